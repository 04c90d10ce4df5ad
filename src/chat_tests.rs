use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use super::*;

/// Answers from a queue and records what it was asked.
#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<Vec<Result<ChatReply, ChatError>>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn answering(reply: Result<ChatReply, ChatError>) -> Self {
        Self {
            replies: Mutex::new(vec![reply]),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl ChatTransport for ScriptedTransport {
    fn send(&self, message: &str) -> Result<ChatReply, ChatError> {
        self.seen.lock().unwrap().push(message.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(ChatError::Network("script exhausted".into())))
    }
}

fn reply(text: &str) -> Result<ChatReply, ChatError> {
    Ok(ChatReply {
        reply: Some(text.to_string()),
    })
}

#[test]
fn blank_input_is_ignored() {
    let mut chat = ChatSession::new();
    assert_eq!(chat.begin_send("   \n "), None);
    assert!(chat.messages().is_empty());
    assert!(!chat.is_sending());
    assert_eq!(chat.header(), IDLE_HEADER);
}

#[test]
fn sending_trims_and_marks_the_message_sent() {
    let mut chat = ChatSession::new();
    let pending = chat.begin_send("  hello there  ").expect("accepted");

    assert_eq!(pending.text, "hello there");
    assert!(chat.is_sending());
    assert_eq!(chat.orb(), OrbState::Processing);
    assert_eq!(chat.header(), PROCESSING_HEADER);
    let [message] = chat.messages() else {
        panic!("expected one message");
    };
    assert_eq!(message.role, Role::User);
    assert_eq!(message.content, "hello there");
    assert_eq!(message.status, Some(Delivery::Sent));
}

#[test]
fn second_send_is_refused_while_one_is_in_flight() {
    let mut chat = ChatSession::new();
    let _pending = chat.begin_send("first").expect("accepted");
    assert_eq!(chat.begin_send("second"), None);
    assert_eq!(chat.messages().len(), 1);
}

#[test]
fn successful_reply_is_appended_and_delivers_the_message() {
    let mut chat = ChatSession::new();
    let transport = ScriptedTransport::answering(reply("Hi!"));

    assert!(chat.send_blocking(&transport, "hello"));

    assert_eq!(transport.seen.lock().unwrap().as_slice(), ["hello"]);
    let messages = chat.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].status, Some(Delivery::Delivered));
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, "Hi!");
    assert_eq!(messages[1].status, None);
    assert!(!chat.is_sending());
    assert_eq!(chat.orb(), OrbState::Responding);

    chat.settle();
    assert_eq!(chat.orb(), OrbState::Idle);
}

#[test]
fn missing_or_empty_reply_uses_the_fallback_text() {
    for outcome in [Ok(ChatReply { reply: None }), reply("")] {
        let mut chat = ChatSession::new();
        chat.send_blocking(&ScriptedTransport::answering(outcome), "hello");
        assert_eq!(chat.messages()[1].content, EMPTY_REPLY);
    }
}

#[test]
fn error_status_still_counts_as_delivered() {
    let mut chat = ChatSession::new();
    let transport = ScriptedTransport::answering(Err(ChatError::Status { code: 500 }));
    chat.send_blocking(&transport, "hello");

    assert_eq!(chat.messages()[0].status, Some(Delivery::Delivered));
    assert_eq!(chat.messages()[1].content, FAILURE_REPLY);
    assert_eq!(chat.orb(), OrbState::Idle);
    assert!(!chat.is_sending());
}

#[test]
fn network_failure_leaves_the_message_sent() {
    let mut chat = ChatSession::new();
    let transport = ScriptedTransport::answering(Err(ChatError::Network("refused".into())));
    chat.send_blocking(&transport, "hello");

    assert_eq!(chat.messages()[0].status, Some(Delivery::Sent));
    assert_eq!(chat.messages()[1].content, FAILURE_REPLY);
    assert!(chat.begin_send("again").is_some(), "sending is re-enabled");
}

#[test]
fn message_ids_are_unique_and_increasing() {
    let mut chat = ChatSession::new();
    let transport = ScriptedTransport {
        replies: Mutex::new(vec![reply("two"), reply("one")]),
        seen: Mutex::new(Vec::new()),
    };
    chat.send_blocking(&transport, "a");
    chat.send_blocking(&transport, "b");

    let ids: Vec<u64> = chat.messages().iter().map(|msg| msg.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(chat.messages()[3].content, "two");
}

#[test]
fn worker_delivers_outcomes_through_the_channel() {
    let mut chat = ChatSession::new();
    let worker = ChatWorker::new(Arc::new(ScriptedTransport::answering(reply("async"))));

    let pending = chat.begin_send("ping").expect("accepted");
    worker.dispatch(pending);

    let deadline = Instant::now() + Duration::from_secs(5);
    let (pending, result) = loop {
        if let Some(outcome) = worker.poll() {
            break outcome;
        }
        assert!(Instant::now() < deadline, "worker never answered");
        std::thread::sleep(Duration::from_millis(5));
    };
    chat.finish_send(&pending, result);

    assert_eq!(chat.messages()[1].content, "async");
    assert_eq!(chat.messages()[0].status, Some(Delivery::Delivered));
}

#[test]
fn reply_body_decodes_with_or_without_the_field() {
    let with: ChatReply = serde_json::from_str(r#"{ "reply": "yo" }"#).unwrap();
    assert_eq!(with.reply.as_deref(), Some("yo"));
    let without: ChatReply = serde_json::from_str("{}").unwrap();
    assert_eq!(without.reply, None);
}

#[test]
fn non_string_replies_are_shown_as_text() {
    let number: ChatReply = serde_json::from_str(r#"{ "reply": 42 }"#).unwrap();
    assert_eq!(number.reply.as_deref(), Some("42"));
    let flag: ChatReply = serde_json::from_str(r#"{ "reply": true }"#).unwrap();
    assert_eq!(flag.reply.as_deref(), Some("true"));

    for body in [r#"{ "reply": null }"#, r#"{ "reply": { "text": "x" } }"#] {
        let decoded: ChatReply = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.reply, None);

        let mut chat = ChatSession::new();
        let transport = ScriptedTransport::answering(Ok(decoded));
        assert!(chat.send_blocking(&transport, "hi"));
        assert_eq!(chat.messages()[1].content, EMPTY_REPLY);
    }
}
