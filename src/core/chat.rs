//! Drives one user submission through the transcript, the completion client
//! and the presenter.

use crate::api::transport::Transport;
use crate::core::completion::{CompletionClient, CompletionConfig, CompletionError};
use crate::core::message::{Role, Turn};
use crate::core::storage::Storage;
use crate::core::transcript::TranscriptStore;
use crate::ui::presenter::Presenter;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    Replied(Turn),
    Failed(CompletionError),
}

pub struct ChatSession<S: Storage, T: Transport> {
    store: TranscriptStore<S>,
    client: CompletionClient<T>,
    config: CompletionConfig,
}

impl<S: Storage, T: Transport> ChatSession<S, T> {
    pub fn new(
        store: TranscriptStore<S>,
        client: CompletionClient<T>,
        config: CompletionConfig,
    ) -> Self {
        Self {
            store,
            client,
            config,
        }
    }

    pub fn store(&self) -> &TranscriptStore<S> {
        &self.store
    }

    pub fn client(&self) -> &CompletionClient<T> {
        &self.client
    }

    /// Renders the restored conversation, system turn excluded.
    pub fn replay<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        for turn in self.store.conversation() {
            presenter.append_message(turn.role, &turn.content);
        }
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Sends `text` as the next user turn.
    ///
    /// The user turn is appended optimistically and only persisted together
    /// with its reply. When the exchange fails the turn is rolled back before
    /// saving, and the failure is shown as an assistant-style message that is
    /// not part of the transcript.
    pub async fn submit<P: Presenter + ?Sized>(
        &mut self,
        text: &str,
        presenter: &mut P,
    ) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.store.append(Turn::user(text));
        presenter.append_message(Role::User, text);

        presenter.set_input_enabled(false);
        let result = self.client.complete(self.store.turns(), &self.config).await;
        presenter.set_input_enabled(true);

        match result {
            Ok(reply) => {
                self.store.append(reply.clone());
                self.store.persist();
                presenter.append_message(Role::Assistant, &reply.content);
                debug!(message_count = self.store.len(), "Exchange completed");
                SubmitOutcome::Replied(reply)
            }
            Err(err) => {
                self.store.rollback_last();
                self.store.persist();
                presenter.append_message(Role::Assistant, &err.user_message());
                warn!(%err, "Exchange failed, user turn rolled back");
                SubmitOutcome::Failed(err)
            }
        }
    }
}
