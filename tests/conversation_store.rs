use async_trait::async_trait;
use cherry_chat::conversation::transport::{ HttpRelayTransport, RelayTransport, TransportError };
use cherry_chat::conversation::{ ConversationStore, SubmitOutcome, FALLBACK_REPLY };
use cherry_chat::llm::chat::ChatClient;
use cherry_chat::models::chat::{ ChatMessage, RelayReply, Role };
use cherry_chat::server::api::{ router, AppState };
use serde_json::{ json, Value };
use std::error::Error as StdError;
use std::sync::{ Arc, Mutex };
use tokio::sync::Notify;

struct ScriptedUpstream {
    reply: Value,
    fail: bool,
}

#[async_trait]
impl ChatClient for ScriptedUpstream {
    async fn complete(&self, _messages: &[Value]) -> Result<Value, Box<dyn StdError + Send + Sync>> {
        if self.fail {
            return Err("rate limited".into());
        }
        Ok(self.reply.clone())
    }

    fn get_model(&self) -> String {
        "scripted".into()
    }
}

async fn spawn_relay(upstream: ScriptedUpstream) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(AppState::new(Arc::new(upstream)), false);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/chat", addr)
}

/// Records every history it is asked to send and answers with a numbered reply.
#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<Vec<ChatMessage>>>,
}

#[async_trait]
impl RelayTransport for RecordingTransport {
    async fn send(&self, messages: &[ChatMessage]) -> Result<RelayReply, TransportError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(messages.to_vec());
        Ok(RelayReply { role: None, content: format!("reply {}", sent.len()) })
    }
}

/// Holds the request open until the test releases it.
struct GatedTransport {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl RelayTransport for GatedTransport {
    async fn send(&self, _messages: &[ChatMessage]) -> Result<RelayReply, TransportError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(RelayReply { role: Some("assistant".into()), content: "done".into() })
    }
}

#[tokio::test]
async fn round_trip_through_http_relay_coerces_role() {
    let url = spawn_relay(ScriptedUpstream {
        reply: json!({ "role": "model", "content": "hello" }),
        fail: false,
    }).await;
    let store = ConversationStore::new(Arc::new(HttpRelayTransport::new(url)));

    assert_eq!(store.submit("hi").await, SubmitOutcome::Replied);

    assert_eq!(store.messages(), vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")]);
    assert!(!store.is_busy());
}

#[tokio::test]
async fn relay_500_becomes_fallback_message() {
    let url = spawn_relay(ScriptedUpstream { reply: Value::Null, fail: true }).await;
    let store = ConversationStore::new(Arc::new(HttpRelayTransport::new(url)));

    assert_eq!(store.submit("hi").await, SubmitOutcome::Fallback);

    let messages = store.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], ChatMessage::user("hi"));
    assert_eq!(messages[1], ChatMessage::assistant(FALLBACK_REPLY));
    assert!(!store.is_busy());
}

#[tokio::test]
async fn unreachable_relay_becomes_fallback_message() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let store = ConversationStore::new(
        Arc::new(HttpRelayTransport::new(format!("http://{}/api/chat", addr)))
    );

    assert_eq!(store.submit("anyone there?").await, SubmitOutcome::Fallback);
    assert_eq!(store.messages().last().map(|m| m.content().to_string()).as_deref(), Some(FALLBACK_REPLY));
    assert!(!store.is_busy());
}

#[tokio::test]
async fn reply_missing_content_is_a_failure() {
    let url = spawn_relay(ScriptedUpstream {
        reply: json!({ "role": "assistant", "content": null }),
        fail: false,
    }).await;
    let store = ConversationStore::new(Arc::new(HttpRelayTransport::new(url)));

    assert_eq!(store.submit("hi").await, SubmitOutcome::Fallback);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn submit_while_busy_is_a_noop() {
    let transport = Arc::new(GatedTransport { entered: Notify::new(), release: Notify::new() });
    let store = Arc::new(ConversationStore::new(transport.clone()));

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.submit("first").await }
    });
    transport.entered.notified().await;

    assert!(store.is_busy());
    assert_eq!(store.len(), 1);
    store.set_input("second");
    assert_eq!(store.submit_input().await, SubmitOutcome::Ignored);
    assert_eq!(store.len(), 1);
    assert!(store.is_busy());
    assert_eq!(store.input(), "second");

    transport.release.notify_one();
    assert_eq!(first.await.unwrap(), SubmitOutcome::Replied);
    assert!(!store.is_busy());
    assert_eq!(store.messages(), vec![ChatMessage::user("first"), ChatMessage::assistant("done")]);
}

#[tokio::test]
async fn history_sent_matches_conversation_order() {
    let transport = Arc::new(RecordingTransport::default());
    let store = ConversationStore::new(transport.clone());

    for text in ["one", "  two  ", "", "three"] {
        store.submit(text).await;
    }

    let messages = store.messages();
    assert_eq!(messages.len(), 6);
    for (i, pair) in messages.chunks(2).enumerate() {
        assert_eq!(pair[0].role(), Role::User);
        assert_eq!(pair[1].role(), Role::Assistant);
        assert_eq!(pair[1].content(), format!("reply {}", i + 1));
    }
    assert_eq!(messages[2].content(), "two");

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 3);
    for history in sent.iter() {
        assert_eq!(history.as_slice(), &messages[..history.len()]);
        assert_eq!(history.last().map(|m| m.role()), Some(Role::User));
    }
}
