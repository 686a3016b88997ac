/// Side effects requested by [`crate::update`], executed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fetch and normalize the three datasets.
    LoadSources,
    /// Bring the search box back into view.
    ScrollToTop,
    /// Bring the result list into view.
    ScrollToResults,
}
