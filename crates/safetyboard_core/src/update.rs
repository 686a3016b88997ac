use crate::{AppState, Effect, LoadStatus, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadRequested => {
            // One load per session; a failed load is not retried.
            if state.load_status() != LoadStatus::Idle {
                return (state, Vec::new());
            }
            state.begin_load();
            vec![Effect::LoadSources]
        }
        Msg::DataLoaded(records) => {
            if state.load_status() == LoadStatus::Loading {
                state.apply_loaded(records);
            }
            Vec::new()
        }
        Msg::LoadFailed(reason) => {
            if state.load_status() == LoadStatus::Loading {
                state.apply_failed(reason);
            }
            Vec::new()
        }
        _ if state.load_status() != LoadStatus::Ready => Vec::new(),
        Msg::SearchChanged(query) => {
            let next = state.filter().set_search_query(query);
            state.set_filter(next);
            Vec::new()
        }
        Msg::StatusFilterSelected(filter) => {
            let next = state.filter().set_status_filter(filter);
            state.set_filter(next);
            Vec::new()
        }
        Msg::SegmentClicked(status) => {
            let next = state.filter().toggle_segment(status);
            state.set_filter(next);
            vec![Effect::ScrollToResults]
        }
        Msg::CategoryClicked(category) => {
            let next = state.filter().select_category(&category);
            state.set_filter(next);
            vec![Effect::ScrollToTop]
        }
        Msg::ChartCenterClicked => {
            let next = state.filter().reset();
            state.set_filter(next);
            vec![Effect::ScrollToResults]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
