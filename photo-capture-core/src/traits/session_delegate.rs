use crate::models::commit_result::CommitResult;
use crate::models::error::CaptureError;
use crate::models::state::SessionSnapshot;

/// Event delegate for capture session notifications.
///
/// Called on whatever task drives the session. Implementations should
/// marshal to the UI thread if needed.
pub trait SessionDelegate: Send + Sync {
    /// Called after every state, facing, overlay or permission change.
    fn on_state_changed(&self, snapshot: &SessionSnapshot);

    /// Called when an operation fails. The session is already back in a valid state.
    fn on_error(&self, error: &CaptureError);

    /// Called once a pending shot is safely in the album.
    fn on_shot_committed(&self, result: &CommitResult);
}
