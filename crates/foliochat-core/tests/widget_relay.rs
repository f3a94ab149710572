//! End-to-end widget flows that cross the relay boundary.

use foliochat_core::*;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn base() -> KnowledgeBase {
    KnowledgeBase::from_json(serde_json::json!({
        "about": "I build chat widgets.",
        "intents": [
            {"tag": "greeting", "patterns": ["hi"], "response": "Welcome!"}
        ]
    }))
}

async fn next_appended(handle: &mut WidgetHandle) -> Message {
    loop {
        match handle.events.recv().await.expect("widget closed") {
            WidgetEvent::MessageAppended(message) => return message,
            _ => continue,
        }
    }
}

#[tokio::test]
async fn unmatched_utterance_relays_and_renders_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(serde_json::json!({
            "message": "what is the meaning of life?"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"reply": "42, probably"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut handle = ChatWidget::spawn(
        WidgetConfig::default(),
        KnowledgeStore::preloaded(base()),
        RelayClient::new(server.uri()),
    );

    handle
        .commands
        .send(WidgetCommand::Send("what is the meaning of life?".into()))
        .unwrap();

    let user = next_appended(&mut handle).await;
    assert_eq!(user.sender, Sender::User);
    let bot = next_appended(&mut handle).await;
    assert_eq!(bot.sender, Sender::Bot);
    assert_eq!(bot.body, KnowledgeValue::Scalar("42, probably".into()));
}

#[tokio::test]
async fn relay_failure_yields_fixed_error_reply_and_widget_stays_usable() {
    let mut handle = ChatWidget::spawn(
        WidgetConfig {
            reply_delay: std::time::Duration::from_millis(1),
        },
        KnowledgeStore::preloaded(base()),
        RelayClient::new("http://127.0.0.1:1"),
    );

    handle
        .commands
        .send(WidgetCommand::Send("unmatchable zebra query".into()))
        .unwrap();

    let _user = next_appended(&mut handle).await;
    let bot = next_appended(&mut handle).await;
    assert_eq!(bot.body, KnowledgeValue::Scalar(RELAY_ERROR_REPLY.into()));

    // A later message still matches locally after the failure.
    handle
        .commands
        .send(WidgetCommand::Send("about".into()))
        .unwrap();
    let _user = next_appended(&mut handle).await;
    let bot = next_appended(&mut handle).await;
    assert_eq!(
        bot.body,
        KnowledgeValue::Scalar("I build chat widgets.".into())
    );
}

#[tokio::test]
async fn knowledge_load_failure_falls_back_to_relay() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"reply": "remote answer"})),
        )
        .mount(&server)
        .await;

    let mut handle = ChatWidget::spawn(
        WidgetConfig::default(),
        KnowledgeStore::spawn_load("/definitely/not/here.json"),
        RelayClient::new(server.uri()),
    );

    // "about" would match a healthy document; with the empty fallback base
    // it goes straight to the relay.
    handle
        .commands
        .send(WidgetCommand::Send("about".into()))
        .unwrap();

    let _user = next_appended(&mut handle).await;
    let bot = next_appended(&mut handle).await;
    assert_eq!(bot.body, KnowledgeValue::Scalar("remote answer".into()));
}
