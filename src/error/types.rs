use thiserror::Error;

use crate::host::TargetId;

/// Unified result type for the sizewatch crate.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Errors surfaced by the observation engine.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("target `{0:?}` is not an observable element")]
    InvalidTarget(TargetId),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
