//! The conversation engine: append-only transcript plus one outbound
//! assistant call per sent message.
//!
//! Overlapping sends are allowed: each produces an independent in-flight
//! request and replies append in whichever order they resolve. Nothing is
//! queued; a specific request can be cancelled through its id.
//!
//! Failures are never silent: they are logged and recorded as
//! [`FailureNotice`] entries the view renders inline.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

use phil_assistant::{AssistantBackend, GenerateRequest};
use phil_catalog::catalog::SeedRole;
use phil_catalog::{Catalog, ContextDescriptor, PromptComposer, Sermon};

use crate::config::ConversationConfig;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// The sermon title cited when a message mentions "glory".
///
/// An illustrative trigger standing in for real retrieval.
const GLORY_CITATION_TITLE: &str = "The Weight of Glory";

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A transcript entry. Appended once, never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Message {
    /// Unique message id
    pub id: String,
    /// Who authored the message
    pub role: MessageRole,
    /// Message text
    pub content: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Church tag, set when sent in a plain-church context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub church_id: Option<String>,
    /// Cited sermons
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Sermon>,
}

/// A visible record of a failed assistant call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct FailureNotice {
    /// The request that failed
    pub request_id: String,
    /// Human-readable reason
    pub reason: String,
    /// When the failure was recorded
    pub occurred_at: DateTime<Utc>,
}

/// Error types for sending a message.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SendError {
    /// Input was empty or whitespace-only after trimming
    #[error("Message is empty")]
    EmptyMessage,
}

/// Handle to one in-flight send.
pub struct SendTicket {
    /// Id correlating the spawned request
    pub request_id: String,
    handle: JoinHandle<()>,
}

impl SendTicket {
    /// Wait until the request settles (reply appended or failure
    /// recorded). Cancelled requests settle without either.
    pub async fn settled(self) {
        // An aborted task yields a JoinError; settling is all we report.
        let _ = self.handle.await;
    }
}

#[derive(Debug, Default)]
struct ConversationState {
    messages: Vec<Message>,
    failures: Vec<FailureNotice>,
    pending: usize,
}

/// Engine owning the transcript and the typing indicator.
pub struct ConversationEngine {
    backend: Arc<dyn AssistantBackend>,
    catalog: Arc<Catalog>,
    config: ConversationConfig,
    state: Arc<RwLock<ConversationState>>,
    in_flight: Arc<DashMap<String, AbortHandle>>,
}

impl ConversationEngine {
    /// Create an engine with an empty transcript.
    pub fn new(
        backend: Arc<dyn AssistantBackend>,
        catalog: Arc<Catalog>,
        config: ConversationConfig,
    ) -> Self {
        Self {
            backend,
            catalog,
            config,
            state: Arc::new(RwLock::new(ConversationState::default())),
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Create an engine preloaded with the catalog's seed transcript.
    pub fn seeded(
        backend: Arc<dyn AssistantBackend>,
        catalog: Arc<Catalog>,
        config: ConversationConfig,
    ) -> Self {
        let now = Utc::now();
        let messages = catalog
            .seed_transcript()
            .iter()
            .map(|seed| Message {
                id: seed.id.clone(),
                role: match seed.role {
                    SeedRole::User => MessageRole::User,
                    SeedRole::Assistant => MessageRole::Assistant,
                },
                content: seed.content.clone(),
                timestamp: now - Duration::seconds(seed.age_secs),
                church_id: seed.church_id.clone(),
                citations: seed
                    .citation_ids
                    .iter()
                    .filter_map(|id| catalog.sermon(id).cloned())
                    .collect(),
            })
            .collect();

        Self {
            backend,
            catalog,
            config,
            state: Arc::new(RwLock::new(ConversationState {
                messages,
                ..Default::default()
            })),
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Whether any request is pending (the typing indicator).
    pub async fn is_typing(&self) -> bool {
        self.state.read().await.pending > 0
    }

    /// Snapshot of the transcript.
    pub async fn messages(&self) -> Vec<Message> {
        self.state.read().await.messages.clone()
    }

    /// Snapshot of recorded failures.
    pub async fn failures(&self) -> Vec<FailureNotice> {
        self.state.read().await.failures.clone()
    }

    /// Number of in-flight requests.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Send a user message and dispatch one assistant request.
    ///
    /// The user message is appended immediately; the assistant reply (or
    /// a failure notice) lands when the spawned request settles. `context`
    /// and `church_tag` come from the selection store at send time.
    pub async fn send(
        &self,
        text: &str,
        context: ContextDescriptor,
        church_tag: Option<String>,
    ) -> Result<SendTicket, SendError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SendError::EmptyMessage);
        }

        let request_id = uuid::Uuid::new_v4().to_string();
        let user_text = text.to_string();

        {
            let mut state = self.state.write().await;
            state.messages.push(Message {
                id: uuid::Uuid::new_v4().to_string(),
                role: MessageRole::User,
                content: user_text.clone(),
                timestamp: Utc::now(),
                church_id: church_tag,
                citations: Vec::new(),
            });
            state.pending += 1;
        }

        let prompt = PromptComposer::compose(&self.config.persona, &context, &user_text);
        debug!(request_id = %request_id, backend = %self.backend.id(), "Dispatching assistant request");

        let backend = Arc::clone(&self.backend);
        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);
        let in_flight = Arc::clone(&self.in_flight);
        let fallback = self.config.fallback_reply.clone();
        let delay_ms = self.config.display_delay_ms;
        let task_request_id = request_id.clone();

        let handle = tokio::spawn(async move {
            let result = backend.generate(GenerateRequest::new(prompt)).await;

            // Cosmetic display delay, applied after the response arrives.
            if delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            }

            let mut guard = state.write().await;
            match result {
                Ok(response) => {
                    let content = if response.text.is_empty() {
                        fallback
                    } else {
                        response.text
                    };

                    let citations = if user_text.to_lowercase().contains("glory") {
                        catalog
                            .sermon_by_title(GLORY_CITATION_TITLE)
                            .cloned()
                            .into_iter()
                            .collect()
                    } else {
                        Vec::new()
                    };

                    guard.messages.push(Message {
                        id: uuid::Uuid::new_v4().to_string(),
                        role: MessageRole::Assistant,
                        content,
                        timestamp: Utc::now(),
                        church_id: None,
                        citations,
                    });
                }
                Err(error) => {
                    warn!(request_id = %task_request_id, %error, "Assistant request failed");
                    guard.failures.push(FailureNotice {
                        request_id: task_request_id.clone(),
                        reason: error.to_string(),
                        occurred_at: Utc::now(),
                    });
                }
            }
            guard.pending = guard.pending.saturating_sub(1);
            // Removed while the lock is held so a concurrent cancel cannot
            // observe the entry after the decrement and decrement again.
            in_flight.remove(&task_request_id);
        });

        self.in_flight.insert(request_id.clone(), handle.abort_handle());
        // The task may already have settled and removed itself; drop the
        // stale entry rather than leaking it.
        if handle.is_finished() {
            self.in_flight.remove(&request_id);
        }

        Ok(SendTicket { request_id, handle })
    }

    /// Abort a specific in-flight request.
    ///
    /// The already-appended user message stays; no reply and no failure
    /// notice will ever arrive for the request. Returns whether anything
    /// was cancelled.
    pub async fn cancel(&self, request_id: &str) -> bool {
        // The state lock orders this against the spawned task's settle
        // section; a settled request has no entry left to find.
        let mut state = self.state.write().await;
        if let Some((_, handle)) = self.in_flight.remove(request_id) {
            handle.abort();
            state.pending = state.pending.saturating_sub(1);
            debug!(request_id = %request_id, "Cancelled in-flight request");
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phil_assistant::MockBackend;

    fn test_config() -> ConversationConfig {
        ConversationConfig {
            display_delay_ms: 0,
            ..Default::default()
        }
    }

    fn engine_with(backend: MockBackend) -> ConversationEngine {
        ConversationEngine::new(
            Arc::new(backend),
            Arc::new(Catalog::builtin()),
            test_config(),
        )
    }

    #[tokio::test]
    async fn test_send_appends_user_then_assistant() {
        let engine = engine_with(MockBackend::default().with_response("Peace to you."));

        let ticket = engine
            .send("What is grace?", ContextDescriptor::General, None)
            .await
            .unwrap();

        // User message is visible immediately.
        let messages = engine.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::User);
        assert!(engine.is_typing().await);

        ticket.settled().await;

        let messages = engine.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "Peace to you.");
        assert!(messages[1].citations.is_empty());
        assert!(!engine.is_typing().await);
    }

    #[tokio::test]
    async fn test_glory_trigger_attaches_citation() {
        let engine = engine_with(MockBackend::default().with_response("A weighty theme."));

        let ticket = engine
            .send("What is glory?", ContextDescriptor::General, None)
            .await
            .unwrap();
        ticket.settled().await;

        let messages = engine.messages().await;
        let reply = &messages[1];
        assert_eq!(reply.citations.len(), 1);
        assert_eq!(reply.citations[0].title, "The Weight of Glory");
    }

    #[tokio::test]
    async fn test_glory_trigger_is_case_insensitive() {
        let engine = engine_with(MockBackend::default().with_response("Indeed."));

        let ticket = engine
            .send("Tell me about GLORY", ContextDescriptor::General, None)
            .await
            .unwrap();
        ticket.settled().await;

        assert_eq!(engine.messages().await[1].citations.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let engine = engine_with(MockBackend::default());

        let result = engine.send("   \n ", ContextDescriptor::General, None).await;
        assert_eq!(result.err(), Some(SendError::EmptyMessage));
        assert!(engine.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_response_uses_fallback() {
        let engine = engine_with(MockBackend::default().with_response(""));

        let ticket = engine
            .send("Anyone there?", ContextDescriptor::General, None)
            .await
            .unwrap();
        ticket.settled().await;

        assert_eq!(engine.messages().await[1].content, "I'm reflecting on that.");
    }

    #[tokio::test]
    async fn test_failure_is_surfaced_not_silent() {
        let engine = engine_with(MockBackend::default().with_error("connection reset"));

        let ticket = engine
            .send("What is hope?", ContextDescriptor::General, None)
            .await
            .unwrap();
        let request_id = ticket.request_id.clone();
        ticket.settled().await;

        // No assistant message, typing cleared, but a visible notice.
        let messages = engine.messages().await;
        assert_eq!(messages.len(), 1);
        assert!(!engine.is_typing().await);

        let failures = engine.failures().await;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].request_id, request_id);
        assert!(failures[0].reason.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_church_tag_carried_on_user_message() {
        let engine = engine_with(MockBackend::default());

        let ticket = engine
            .send(
                "A question",
                ContextDescriptor::Church {
                    name: "Victory Decatur".to_string(),
                },
                Some("v-decatur".to_string()),
            )
            .await
            .unwrap();
        ticket.settled().await;

        let messages = engine.messages().await;
        assert_eq!(messages[0].church_id, Some("v-decatur".to_string()));
        assert!(messages[1].church_id.is_none());
    }

    #[tokio::test]
    async fn test_overlapping_sends_settle_independently() {
        let engine = engine_with(
            MockBackend::default()
                .with_response("Reply")
                .with_latency(std::time::Duration::from_millis(20)),
        );

        let first = engine
            .send("first", ContextDescriptor::General, None)
            .await
            .unwrap();
        let second = engine
            .send("second", ContextDescriptor::General, None)
            .await
            .unwrap();

        assert_eq!(engine.in_flight_count(), 2);
        assert!(engine.is_typing().await);

        first.settled().await;
        second.settled().await;

        let messages = engine.messages().await;
        // Two user messages plus two replies.
        assert_eq!(messages.len(), 4);
        assert!(!engine.is_typing().await);
        assert_eq!(engine.in_flight_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_request() {
        let engine = engine_with(
            MockBackend::default()
                .with_response("too late")
                .with_latency(std::time::Duration::from_secs(30)),
        );

        let ticket = engine
            .send("never answered", ContextDescriptor::General, None)
            .await
            .unwrap();
        let request_id = ticket.request_id.clone();

        assert!(engine.cancel(&request_id).await);
        ticket.settled().await;

        let messages = engine.messages().await;
        assert_eq!(messages.len(), 1);
        assert!(engine.failures().await.is_empty());
        assert!(!engine.is_typing().await);

        // Second cancel is a no-op.
        assert!(!engine.cancel(&request_id).await);
    }

    #[tokio::test]
    async fn test_cancel_decrements_pending_at_most_once() {
        let engine = engine_with(
            MockBackend::default()
                .with_response("Reply")
                .with_latency(std::time::Duration::from_secs(30)),
        );

        let first = engine
            .send("first", ContextDescriptor::General, None)
            .await
            .unwrap();
        let second = engine
            .send("second", ContextDescriptor::General, None)
            .await
            .unwrap();

        assert!(engine.cancel(&first.request_id).await);
        // Repeated cancels of the same request find nothing to remove and
        // must leave the other request's pending count alone.
        assert!(!engine.cancel(&first.request_id).await);
        assert!(!engine.cancel(&first.request_id).await);
        assert!(engine.is_typing().await);
        assert_eq!(engine.in_flight_count(), 1);

        assert!(engine.cancel(&second.request_id).await);
        assert!(!engine.is_typing().await);
    }

    #[tokio::test]
    async fn test_cancel_after_settle_is_inert() {
        let engine = engine_with(MockBackend::default().with_response("Reply"));

        let ticket = engine
            .send("answered", ContextDescriptor::General, None)
            .await
            .unwrap();
        let request_id = ticket.request_id.clone();
        ticket.settled().await;

        // Settling removed the entry; a late cancel finds nothing.
        assert!(!engine.cancel(&request_id).await);
        assert_eq!(engine.in_flight_count(), 0);
        assert!(!engine.is_typing().await);
        assert_eq!(engine.messages().await.len(), 2);
    }

    #[tokio::test]
    async fn test_seeded_transcript() {
        let engine = ConversationEngine::seeded(
            Arc::new(MockBackend::default()),
            Arc::new(Catalog::builtin()),
            test_config(),
        );

        let messages = engine.messages().await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].church_id, Some("grace-community".to_string()));
        assert_eq!(messages[1].citations[0].id, "s1");
        assert!(messages[0].timestamp < messages[1].timestamp);
    }
}
