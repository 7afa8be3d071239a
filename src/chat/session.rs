use std::sync::Arc;

use tracing::{info, warn};

use super::message::{ChatRecord, RecordId, Sender};
use super::store::MessageStore;
use crate::content::sanitize;
use crate::llm::{ChatError, Transport};

/// Where the submission workflow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending { placeholder: RecordId },
    Completed { record: RecordId, sender: Sender },
}

/// Result of asking the session to start a submission.
pub enum Dispatch {
    /// Blank input, or a reply is still pending. Nothing changed.
    Rejected,
    /// Settled without a network call, e.g. no transport is configured.
    Completed,
    /// A placeholder is in the store; run the call and hand back its completion.
    InFlight(PendingCall),
}

/// A transport call that has been dispatched but not yet awaited.
pub struct PendingCall {
    placeholder: RecordId,
    text: String,
    transport: Arc<dyn Transport>,
}

impl PendingCall {
    pub fn placeholder(&self) -> RecordId {
        self.placeholder
    }

    pub async fn run(self) -> Completion {
        let outcome = self.transport.send(&self.text).await;
        Completion {
            placeholder: self.placeholder,
            outcome,
        }
    }
}

#[derive(Debug)]
pub struct Completion {
    placeholder: RecordId,
    outcome: Result<String, ChatError>,
}

impl Completion {
    /// The call for `placeholder` died before producing an outcome.
    pub fn interrupted(placeholder: RecordId, reason: impl Into<String>) -> Self {
        Self {
            placeholder,
            outcome: Err(ChatError::Interrupted(reason.into())),
        }
    }
}

/// Owns the transcript and serializes submissions: one call in flight at most.
pub struct Session {
    store: MessageStore,
    phase: Phase,
    transport: Result<Arc<dyn Transport>, ChatError>,
}

impl Session {
    /// `transport` is the outcome of building the client. A build failure is
    /// reported to the user on each submission instead of aborting the session.
    pub fn new(transport: Result<Arc<dyn Transport>, ChatError>) -> Self {
        Self {
            store: MessageStore::seeded(),
            phase: Phase::Idle,
            transport,
        }
    }

    pub fn records(&self) -> &[ChatRecord] {
        self.store.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    pub fn model_name(&self) -> Option<&str> {
        self.transport.as_ref().ok().map(|t| t.model_name())
    }

    pub fn dispatch(&mut self, input: &str) -> Dispatch {
        if input.trim().is_empty() || self.is_pending() {
            return Dispatch::Rejected;
        }

        self.store.append(ChatRecord::user(input));

        let transport = match &self.transport {
            Ok(transport) => Arc::clone(transport),
            Err(err) => {
                let record = self.store.append(ChatRecord::error(err.user_message()));
                self.phase = Phase::Completed {
                    record,
                    sender: Sender::Error,
                };
                return Dispatch::Completed;
            }
        };

        let placeholder = self.store.append(ChatRecord::pending());
        self.phase = Phase::Pending { placeholder };
        info!(records = self.store.len(), "submission dispatched");

        Dispatch::InFlight(PendingCall {
            placeholder,
            text: input.to_string(),
            transport,
        })
    }

    /// Swap the placeholder for the reply or error record.
    ///
    /// Returns false and leaves the store alone if `completion` does not
    /// belong to the outstanding call.
    pub fn complete(&mut self, completion: Completion) -> bool {
        match self.phase {
            Phase::Pending { placeholder } if placeholder == completion.placeholder => {}
            _ => {
                warn!("ignoring completion for a call that is not pending");
                return false;
            }
        }

        self.store.remove_by_id(completion.placeholder);
        debug_assert_eq!(self.store.pending_count(), 0);

        let record = match completion.outcome {
            Ok(reply) => ChatRecord::bot(sanitize(&reply)),
            Err(err) => {
                warn!(error = %err, "submission failed");
                ChatRecord::error(err.user_message())
            }
        };
        let sender = record.sender;
        let id = self.store.append(record);

        self.phase = Phase::Completed { record: id, sender };
        info!(?sender, "submission completed");
        true
    }

    /// The record that settled the last submission, if one has settled.
    pub fn outcome(&self) -> Option<&ChatRecord> {
        match self.phase {
            Phase::Completed { record, .. } => self.store.get(record),
            _ => None,
        }
    }

    /// Dispatch, await and complete in one step.
    pub async fn submit(&mut self, input: &str) -> Option<&ChatRecord> {
        match self.dispatch(input) {
            Dispatch::Rejected => return None,
            Dispatch::Completed => {}
            Dispatch::InFlight(call) => {
                let completion = call.run().await;
                self.complete(completion);
            }
        }
        self.outcome()
    }
}
