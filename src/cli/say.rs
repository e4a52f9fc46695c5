//! Non-interactive "say" command

use crate::api::transport::Transport;
use crate::core::chat::{ChatSession, SubmitOutcome};
use crate::core::storage::Storage;
use crate::ui::presenter::Presenter;

/// Sends `prompt` (words joined with spaces) as one user turn. Returns `false`
/// when there was nothing to send or the exchange failed.
pub async fn run_say<S, T, P>(
    session: &mut ChatSession<S, T>,
    presenter: &mut P,
    prompt: &[String],
) -> bool
where
    S: Storage,
    T: Transport,
    P: Presenter + ?Sized,
{
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: chefbot say <prompt>");
        return false;
    }

    match session.submit(&prompt, presenter).await {
        SubmitOutcome::Replied(_) => true,
        SubmitOutcome::Failed(_) | SubmitOutcome::Ignored => false,
    }
}
