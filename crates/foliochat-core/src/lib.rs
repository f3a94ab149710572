pub mod knowledge;
pub mod matcher;
pub mod relay;
pub mod render;
pub mod transcript;
pub mod widget;

pub use knowledge::{Intent, KnowledgeBase, KnowledgeStore, KnowledgeValue};
pub use matcher::match_utterance;
pub use relay::{RelayClient, FALLBACK_REPLY, RELAY_ERROR_REPLY};
pub use render::{render_message, RenderedLine, RenderedSpan};
pub use transcript::{Message, Sender, Transcript};
pub use widget::{
    ChatWidget, WidgetCommand, WidgetConfig, WidgetEvent, WidgetHandle, DEFAULT_GREETING,
};
