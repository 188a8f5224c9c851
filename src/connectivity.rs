/// Link-state tracking for the connectivity banner. The component runs
/// the ping loop; this module owns the decision and the interval.
use crate::backend::BackendError;

/// How often the watcher re-pings the backend.
pub const CHECK_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Online,
    Offline,
}

pub fn link_state<T>(result: &Result<T, BackendError>) -> LinkState {
    match result {
        Ok(_) => LinkState::Online,
        Err(_) => LinkState::Offline,
    }
}
