use safetyboard_core::{Effect, Msg};
use safetyboard_engine::{EngineEvent, EngineHandle, SourceSet, SourceStage};
use safetyboard_logging::{board_debug, board_error, board_info};

/// Executes the effects `update` asks for and turns their outcome back
/// into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    sources: SourceSet,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, sources: SourceSet) -> Self {
        Self { engine, sources }
    }

    pub fn run(&self, effect: Effect) -> Vec<Msg> {
        match effect {
            Effect::LoadSources => vec![self.load()],
            // Scrolling is a presentation concern handled by the host.
            Effect::ScrollToTop | Effect::ScrollToResults => Vec::new(),
        }
    }

    /// Starts the load and blocks until it completes.
    fn load(&self) -> Msg {
        board_info!(
            "Loading datasets: trustified={} unbox={} open_data={}",
            self.sources.trustified,
            self.sources.unbox,
            self.sources.open_data
        );
        self.engine.load(self.sources.clone());

        loop {
            match self.engine.recv() {
                Some(EngineEvent::Progress(progress)) => match progress.stage {
                    SourceStage::Downloading => {
                        board_debug!("{} downloading ({:?} bytes)", progress.origin, progress.bytes)
                    }
                    SourceStage::Parsed => board_debug!("{} parsed", progress.origin),
                },
                Some(EngineEvent::LoadCompleted(Ok(records))) => {
                    return Msg::DataLoaded(records);
                }
                Some(EngineEvent::LoadCompleted(Err(err))) => {
                    board_error!("Dataset load failed: {}", err);
                    return Msg::LoadFailed(err.to_string());
                }
                None => {
                    board_error!("Engine stopped before the load completed");
                    return Msg::LoadFailed("engine stopped".to_string());
                }
            }
        }
    }
}
