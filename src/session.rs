//! Turning a finished wizard into a commit

use crate::error::SessionError;
use crate::git::{CommitRequest, Vcs};
use crate::tui::update::Composed;

/// Commit the composed message, or report the abort.
///
/// A cancelled wizard (`None`) never reaches git.
pub fn dispatch(
    composed: Option<Composed>,
    vcs: &dyn Vcs,
    sign_off: bool,
    passthrough: &[String],
) -> Result<CommitRequest, SessionError> {
    let composed = composed.ok_or(SessionError::Aborted)?;
    let request = CommitRequest {
        message: composed.message,
        open_editor: composed.wants_body,
        sign_off,
        passthrough: passthrough.to_vec(),
    };
    vcs.commit(&request).map_err(SessionError::Commit)?;
    Ok(request)
}
