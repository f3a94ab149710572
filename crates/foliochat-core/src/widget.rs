use std::time::Duration;

use tokio::sync::mpsc;

use crate::knowledge::{KnowledgeStore, KnowledgeValue};
use crate::matcher::match_utterance;
use crate::relay::RelayClient;
use crate::transcript::{Message, Transcript};

/// Greeting used when the knowledge document declares no `greeting` intent.
pub const DEFAULT_GREETING: &str = "Hello! 👋 How can I help you?";

/// Simulated typing latency before a locally matched reply is shown.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone)]
pub enum WidgetCommand {
    Toggle,
    Send(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    VisibilityChanged(bool),
    Typing(bool),
    MessageAppended(Message),
}

#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub reply_delay: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
        }
    }
}

/// Channel pair a front end uses to drive the widget and mirror its state.
pub struct WidgetHandle {
    pub commands: mpsc::UnboundedSender<WidgetCommand>,
    pub events: mpsc::UnboundedReceiver<WidgetEvent>,
}

/// The chat widget controller. All session state (visibility, greeting
/// latch, transcript) lives in one task; commands are processed strictly
/// one at a time, so overlapping sends are serialized and transcript order
/// follows command order.
pub struct ChatWidget {
    open: bool,
    greeted: bool,
    transcript: Transcript,
    knowledge: KnowledgeStore,
    relay: RelayClient,
    config: WidgetConfig,
    events: mpsc::UnboundedSender<WidgetEvent>,
}

impl ChatWidget {
    pub fn spawn(
        config: WidgetConfig,
        knowledge: KnowledgeStore,
        relay: RelayClient,
    ) -> WidgetHandle {
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut widget = ChatWidget {
            open: false,
            greeted: false,
            transcript: Transcript::new(),
            knowledge,
            relay,
            config,
            events: event_tx,
        };

        tokio::spawn(async move {
            while let Some(command) = command_rx.recv().await {
                widget.handle(command).await;
            }
        });

        WidgetHandle {
            commands: command_tx,
            events: event_rx,
        }
    }

    async fn handle(&mut self, command: WidgetCommand) {
        match command {
            WidgetCommand::Toggle => self.toggle(),
            WidgetCommand::Send(text) => self.send_message(&text).await,
        }
    }

    fn toggle(&mut self) {
        self.open = !self.open;
        self.emit(WidgetEvent::VisibilityChanged(self.open));
        if self.open {
            self.greet();
        }
    }

    /// Emit the greeting exactly once per session, and only once the
    /// knowledge document has loaded (so a declared greeting intent is
    /// honored rather than racing the load).
    fn greet(&mut self) {
        if self.greeted {
            return;
        }
        let Some(base) = self.knowledge.get() else {
            return;
        };
        let greeting = base
            .intent("greeting")
            .map(|i| i.response.clone())
            .unwrap_or_else(|| DEFAULT_GREETING.to_string());
        self.append(Message::bot(KnowledgeValue::Scalar(greeting)));
        self.greeted = true;
    }

    async fn send_message(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.append(Message::user(text));
        self.emit(WidgetEvent::Typing(true));

        let base = self.knowledge.ready().await;

        if let Some(reply) = match_utterance(text, &base) {
            tokio::time::sleep(self.config.reply_delay).await;
            self.emit(WidgetEvent::Typing(false));
            self.append(Message::bot(reply));
            return;
        }

        let reply = self.relay.relay(text).await;
        self.emit(WidgetEvent::Typing(false));
        self.append(Message::bot(KnowledgeValue::Scalar(reply)));
    }

    fn append(&mut self, message: Message) {
        self.transcript.push(message.clone());
        self.emit(WidgetEvent::MessageAppended(message));
    }

    fn emit(&self, event: WidgetEvent) {
        // The front end may have gone away; the session keeps working.
        let _ = self.events.send(event);
    }
}
