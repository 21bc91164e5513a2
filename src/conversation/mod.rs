pub mod transport;

use crate::models::chat::ChatMessage;
use log::{ info, warn };
use std::sync::{ Arc, Mutex, MutexGuard, PoisonError };
use self::transport::RelayTransport;

/// Shown in place of a reply whenever the relay round trip fails.
pub const FALLBACK_REPLY: &str = "抱歉，我遇到了一些问题。请稍后再试。";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input or a submission already in flight; nothing changed.
    Ignored,
    Replied,
    Fallback,
}

#[derive(Default)]
struct StoreState {
    messages: Vec<ChatMessage>,
    input: String,
    busy: bool,
}

/// Client-side conversation state. All history mutation goes through `submit`.
pub struct ConversationStore {
    transport: Arc<dyn RelayTransport>,
    state: Mutex<StoreState>,
}

impl ConversationStore {
    pub fn new(transport: Arc<dyn RelayTransport>) -> Self {
        Self {
            transport,
            state: Mutex::new(StoreState::default()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock_state().messages.clone()
    }

    pub fn len(&self) -> usize {
        self.lock_state().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().messages.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.lock_state().busy
    }

    pub fn input(&self) -> String {
        self.lock_state().input.clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.lock_state().input = text.into();
    }

    /// Submits whatever is currently in the input field.
    pub async fn submit_input(&self) -> SubmitOutcome {
        let text = self.input();
        self.submit(&text).await
    }

    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let (history, _busy) = {
            let mut state = self.lock_state();
            let trimmed = text.trim();
            if trimmed.is_empty() || state.busy {
                return SubmitOutcome::Ignored;
            }
            state.messages.push(ChatMessage::user(trimmed));
            state.input.clear();
            state.busy = true;
            (state.messages.clone(), BusyGuard { store: self })
        };

        let (reply, outcome) = match self.transport.send(&history).await {
            Ok(reply) => {
                if let Some(role) = reply.role.as_deref().filter(|r| *r != "assistant") {
                    info!("Relay reported role '{}', storing as assistant", role);
                }
                (reply.into_message(), SubmitOutcome::Replied)
            }
            Err(e) => {
                warn!("Failed to send message: {}", e);
                (ChatMessage::assistant(FALLBACK_REPLY), SubmitOutcome::Fallback)
            }
        };

        self.lock_state().messages.push(reply);
        outcome
    }
}

/// Clears the busy flag on every exit path of `submit`, including a dropped future.
struct BusyGuard<'a> {
    store: &'a ConversationStore,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.store.lock_state().busy = false;
    }
}
