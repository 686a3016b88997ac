use std::collections::VecDeque;

use safetyboard_core::{update, AppState, AppViewModel, Effect, Msg, Renderer};

use crate::effects::EffectRunner;
use crate::render::{Focus, TerminalRenderer};

/// Owns the dashboard state and drives messages through `update`.
pub struct App {
    state: AppState,
    runner: EffectRunner,
    renderer: TerminalRenderer,
}

impl App {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            renderer: TerminalRenderer::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Feeds `msg` and any follow-up messages from effects through `update`,
    /// handing `on_frame` one rendered frame per visible change. A frame is
    /// emitted before effects run, so a blocking load shows its loading
    /// notice while it waits.
    pub fn dispatch_with(&mut self, msg: Msg, mut on_frame: impl FnMut(String)) {
        let mut inbox = VecDeque::from([msg]);

        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            for effect in &effects {
                match effect {
                    Effect::ScrollToTop => self.renderer.focus = Focus::Top,
                    Effect::ScrollToResults => self.renderer.focus = Focus::Results,
                    Effect::LoadSources => {}
                }
            }
            if self.state.consume_dirty() {
                on_frame(self.render());
            }
            for effect in effects {
                inbox.extend(self.runner.run(effect));
            }
        }
    }

    /// Like [`App::dispatch_with`], collecting the frames.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<String> {
        let mut frames = Vec::new();
        self.dispatch_with(msg, |frame| frames.push(frame));
        frames
    }

    pub fn render(&mut self) -> String {
        let view = self.state.view();
        self.renderer.render(&view)
    }

    /// Shows the full dashboard on the next render.
    pub fn focus_top(&mut self) {
        self.renderer.focus = Focus::Top;
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use safetyboard_core::{
        LoadStatus, Status, StatusFilter, LOADING_MESSAGE, LOAD_FAILED_MESSAGE, NO_MATCHES_MESSAGE,
    };
    use safetyboard_engine::{EngineHandle, FetchSettings, SourceSet};
    use tempfile::TempDir;

    use super::*;

    fn write_datasets(dir: &TempDir) {
        fs::write(
            dir.path().join("trustified_data.json"),
            r#"{"whey": {"pass": [{"name": "Gold Whey"}], "fail": [{"name": "Cheap Whey", "link": "https://example.com/r"}]}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("unbox_data.json"),
            r#"{"protein_supplements": {"not_healthy": [{"name": "Sugar Bar"}]}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("open_data.json"),
            r#"{"oils": {"expired": [{"name": "Olive Oil", "source": "FSSAI"}]}}"#,
        )
        .unwrap();
    }

    fn app_for(dir: &TempDir) -> App {
        let sources = SourceSet::from_base(&dir.path().display().to_string());
        let engine = EngineHandle::new(FetchSettings::default());
        App::new(EffectRunner::new(engine, sources))
    }

    #[test]
    fn load_then_filter_renders_changes() {
        let dir = TempDir::new().unwrap();
        write_datasets(&dir);
        let mut app = app_for(&dir);

        let frames = app.dispatch(Msg::LoadRequested);
        assert_eq!(frames.len(), 2);
        assert!(frames[0].contains(LOADING_MESSAGE));
        assert_eq!(app.state().load_status(), LoadStatus::Ready);
        assert_eq!(app.state().stats().total, 4);
        assert!(frames[1].contains("-- 4 results --"));

        let frames = app.dispatch(Msg::SegmentClicked(Status::NotHealthy));
        assert_eq!(frames.len(), 1);
        assert!(!frames[0].contains("Total"));
        assert!(frames[0].contains("Sugar Bar (protein)"));
        assert_eq!(
            app.view().active_filter,
            StatusFilter::Only(Status::NotHealthy)
        );

        let frames = app.dispatch(Msg::SearchChanged("nothing here".into()));
        assert!(frames[0].contains(NO_MATCHES_MESSAGE));

        app.dispatch(Msg::ChartCenterClicked);
        assert_eq!(app.view().cards.len(), 4);

        assert!(app.dispatch(Msg::ChartCenterClicked).is_empty());
    }

    #[test]
    fn missing_dataset_fails_the_load() {
        let dir = TempDir::new().unwrap();
        let mut app = app_for(&dir);

        let frames = app.dispatch(Msg::LoadRequested);

        assert_eq!(app.state().load_status(), LoadStatus::Failed);
        assert!(app.state().load_error().is_some());
        assert!(frames.last().unwrap().contains(LOAD_FAILED_MESSAGE));
        assert!(app.dispatch(Msg::SearchChanged("whey".into())).is_empty());
    }
}
