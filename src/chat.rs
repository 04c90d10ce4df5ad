use std::{
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::content::scalar_text;

pub const IDLE_HEADER: &str = "Click to interact with the assistant";
pub const PROCESSING_HEADER: &str = "Assistant is processing…";
pub const RESPONDING_HEADER: &str = "Assistant is responding…";
pub const EMPTY_REPLY: &str = "Sorry, I couldn't generate a response.";
pub const FAILURE_REPLY: &str = "Sorry, something went wrong talking to my backend.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the transport, no response yet.
    Sent,
    /// Some response came back, successful or not.
    Delivered,
}

impl Delivery {
    pub fn ticks(self) -> &'static str {
        match self {
            Delivery::Sent => "✓",
            Delivery::Delivered => "✓✓",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    /// Only user messages carry a delivery status.
    pub status: Option<Delivery>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrbState {
    #[default]
    Idle,
    Processing,
    Responding,
}

impl OrbState {
    pub fn header(self) -> &'static str {
        match self {
            OrbState::Idle => IDLE_HEADER,
            OrbState::Processing => PROCESSING_HEADER,
            OrbState::Responding => RESPONDING_HEADER,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    /// Numbers and booleans are shown as text. Objects, arrays and `null`
    /// count as no reply.
    #[serde(default, deserialize_with = "reply_text")]
    pub reply: Option<String>,
}

fn reply_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let text = scalar_text(&value);
    Ok((!text.is_empty()).then_some(text))
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat request failed: {0}")]
    Network(String),
    #[error("chat endpoint responded with HTTP {code}")]
    Status { code: u16 },
    #[error("invalid chat response: {0}")]
    Decode(String),
}

impl ChatError {
    /// Whether the endpoint answered at all.
    pub fn responded(&self) -> bool {
        !matches!(self, ChatError::Network(_))
    }
}

pub trait ChatTransport: Send + Sync {
    fn send(&self, message: &str) -> Result<ChatReply, ChatError>;
}

/// Posts `{ "message": ... }` as JSON and expects `{ "reply": ... }` back.
pub struct HttpChatTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpChatTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl ChatTransport for HttpChatTransport {
    fn send(&self, message: &str) -> Result<ChatReply, ChatError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { message })
            .send()
            .map_err(|err| ChatError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                code: status.as_u16(),
            });
        }

        response
            .json::<ChatReply>()
            .map_err(|err| ChatError::Decode(err.to_string()))
    }
}

/// A user message handed to the transport and awaiting its reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSend {
    pub id: u64,
    pub text: String,
}

#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    sending: bool,
    next_id: u64,
    orb: OrbState,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            sending: false,
            next_id: 1,
            orb: OrbState::Idle,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn orb(&self) -> OrbState {
        self.orb
    }

    pub fn header(&self) -> &'static str {
        self.orb.header()
    }

    /// Record a user message as sent. Returns `None` for blank input or while
    /// another message is in flight.
    pub fn begin_send(&mut self, input: &str) -> Option<PendingSend> {
        let text = input.trim();
        if text.is_empty() || self.sending {
            return None;
        }

        self.sending = true;
        self.orb = OrbState::Processing;
        let id = self.push(Role::User, text.to_string(), Some(Delivery::Sent));
        Some(PendingSend {
            id,
            text: text.to_string(),
        })
    }

    /// Apply the transport's outcome. The user message becomes delivered
    /// whenever the endpoint answered; every failure is shown as a fixed
    /// apology from the assistant.
    pub fn finish_send(&mut self, pending: &PendingSend, result: Result<ChatReply, ChatError>) {
        let responded = match &result {
            Ok(_) => true,
            Err(err) => err.responded(),
        };
        if responded
            && let Some(message) = self.messages.iter_mut().find(|msg| msg.id == pending.id)
        {
            message.status = Some(Delivery::Delivered);
        }

        match result {
            Ok(reply) => {
                let text = reply
                    .reply
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| EMPTY_REPLY.to_string());
                self.push(Role::Assistant, text, None);
                self.orb = OrbState::Responding;
            }
            Err(err) => {
                tracing::warn!(error = %err, "assistant request failed");
                self.push(Role::Assistant, FAILURE_REPLY.to_string(), None);
                self.orb = OrbState::Idle;
            }
        }
        self.sending = false;
    }

    /// Return the orb to idle once a reply has been shown.
    pub fn settle(&mut self) {
        if !self.sending {
            self.orb = OrbState::Idle;
        }
    }

    /// Send synchronously through `transport`.
    pub fn send_blocking(&mut self, transport: &dyn ChatTransport, input: &str) -> bool {
        let Some(pending) = self.begin_send(input) else {
            return false;
        };
        let result = transport.send(&pending.text);
        self.finish_send(&pending, result);
        true
    }

    fn push(&mut self, role: Role, content: String, status: Option<Delivery>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            role,
            content,
            status,
        });
        id
    }
}

pub type ChatOutcome = (PendingSend, Result<ChatReply, ChatError>);

/// Runs transport requests off the UI thread and hands results back through
/// a channel.
pub struct ChatWorker {
    transport: Arc<dyn ChatTransport>,
    sender: Sender<ChatOutcome>,
    receiver: Receiver<ChatOutcome>,
}

impl ChatWorker {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            transport,
            sender,
            receiver,
        }
    }

    pub fn dispatch(&self, pending: PendingSend) {
        let transport = Arc::clone(&self.transport);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = transport.send(&pending.text);
            // The receiver only goes away when the app is shutting down.
            let _ = sender.send((pending, result));
        });
    }

    /// Next finished request, if any. Never blocks.
    pub fn poll(&self) -> Option<ChatOutcome> {
        self.receiver.try_recv().ok()
    }
}

#[cfg(test)]
#[path = "chat_tests.rs"]
mod chat_tests;
