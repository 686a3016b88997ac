use crate::AppViewModel;

/// Presentation seam: turns a view model into output for one front end.
///
/// Core logic never touches presentation APIs; hosts pick a renderer and
/// feed it each fresh [`AppViewModel`].
pub trait Renderer {
    type Output;

    fn render(&mut self, view: &AppViewModel) -> Self::Output;
}
