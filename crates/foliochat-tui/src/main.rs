use anyhow::Result;
use foliochat_core::{ChatWidget, KnowledgeStore, RelayClient, WidgetConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let knowledge = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "portfolio-data.json".to_string());
    let relay_url = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "http://localhost:5000".to_string());

    let handle = ChatWidget::spawn(
        WidgetConfig::default(),
        KnowledgeStore::spawn_load(knowledge),
        RelayClient::new(relay_url),
    );
    foliochat_tui::run_tui(handle).await
}
