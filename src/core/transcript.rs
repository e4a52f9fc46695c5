//! Owned conversation log and its persistence.
//!
//! The store writes the whole transcript on every save. Conversations are
//! human-sized, so there is no incremental format.

use crate::core::message::Turn;
use crate::core::storage::Storage;
use tracing::{debug, error, warn};

/// Fixed storage key of the persisted transcript.
pub const HISTORY_KEY: &str = "chefChatHistory";

pub struct TranscriptStore<S: Storage> {
    turns: Vec<Turn>,
    storage: S,
    system_prompt: String,
}

impl<S: Storage> TranscriptStore<S> {
    /// Restores the persisted transcript, or seeds a fresh one holding only
    /// the system turn. Unreadable or corrupt history is discarded rather than
    /// reported.
    pub fn load(mut storage: S, system_prompt: impl Into<String>) -> Self {
        let system_prompt = system_prompt.into();

        let turns = match storage.get_item(HISTORY_KEY) {
            Ok(Some(saved)) => match decode_transcript(&saved) {
                Ok(turns) if turns.is_empty() => {
                    debug!("Persisted transcript is empty, seeding system turn");
                    vec![Turn::system(system_prompt.clone())]
                }
                Ok(turns) => {
                    debug!(message_count = turns.len(), "Chat history loaded");
                    turns
                }
                Err(reason) => {
                    warn!(%reason, "Error loading history, resetting");
                    if let Err(err) = storage.remove_item(HISTORY_KEY) {
                        error!(%err, "Failed to remove corrupt history");
                    }
                    vec![Turn::system(system_prompt.clone())]
                }
            },
            Ok(None) => {
                debug!("No saved history found, initializing with system prompt");
                vec![Turn::system(system_prompt.clone())]
            }
            Err(err) => {
                warn!(%err, "History could not be read, starting fresh");
                vec![Turn::system(system_prompt.clone())]
            }
        };

        Self {
            turns,
            storage,
            system_prompt,
        }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Removes the most recently appended turn. The seeded system turn is
    /// never removed.
    pub fn rollback_last(&mut self) -> Option<Turn> {
        match self.turns.last() {
            Some(turn) if !turn.is_system() => self.turns.pop(),
            _ => None,
        }
    }

    /// Writes the full transcript to storage. Failures are logged and
    /// otherwise ignored; the conversation keeps going in memory.
    pub fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.turns) {
            Ok(serialized) => serialized,
            Err(err) => {
                error!(%err, "Error serializing history");
                return;
            }
        };

        match self.storage.set_item(HISTORY_KEY, &serialized) {
            Ok(()) => debug!(message_count = self.turns.len(), "Chat history saved"),
            Err(err) => error!(%err, "Error saving history"),
        }
    }

    /// Forgets every stored turn and reseeds the system turn.
    pub fn clear(&mut self) {
        if let Err(err) = self.storage.remove_item(HISTORY_KEY) {
            error!(%err, "Error clearing history");
        }
        self.turns = vec![Turn::system(self.system_prompt.clone())];
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns shown to the user; the system turn is never rendered.
    pub fn conversation(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|turn| !turn.is_system())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Parses a persisted transcript and checks the system-turn invariant: at most
/// one system turn, and only in first position.
fn decode_transcript(saved: &str) -> Result<Vec<Turn>, String> {
    let turns: Vec<Turn> = serde_json::from_str(saved).map_err(|err| err.to_string())?;

    if let Some(index) = turns.iter().skip(1).position(Turn::is_system) {
        return Err(format!("unexpected system turn at position {}", index + 1));
    }

    Ok(turns)
}
