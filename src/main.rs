use std::io::Write;
use std::sync::Arc;

use civic_dashboard::core::config::Config;
use civic_dashboard::features::auth::{FileSessionStore, Navigator, Notifier, SessionGuard};
use civic_dashboard::features::dashboard::AdminDashboard;
use civic_dashboard::features::reports::renderer::HtmlRenderer;
use civic_dashboard::features::users::header_date;
use civic_dashboard::modules::api::ApiClient;
use civic_dashboard::shared::format::{set_display_zone, to_display_zone};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Prints navigations; there is no browser to move.
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, target: &str) {
        tracing::info!("Navigate to {}", target);
    }
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");
    tracing::info!(
        "API: {} (timeout {}s), session file: {}",
        config.api.base_url,
        config.api.timeout.as_secs(),
        config.session.storage_path.display()
    );

    if let Some(offset) = config.dashboard.utc_offset {
        set_display_zone(offset);
    }

    let store = Arc::new(FileSessionStore::new(config.session.storage_path.clone()));
    let api = Arc::new(ApiClient::new(&config.api, store.clone())?);
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let guard = Arc::new(SessionGuard::new(
        store,
        Arc::new(ConsoleNavigator),
        notifier.clone(),
        config.session.clone(),
    ));
    tracing::info!("Session guard initialized");

    let mut dashboard = AdminDashboard::new(
        Arc::clone(&guard),
        api.clone(),
        api,
        notifier,
        config.dashboard.clone(),
        HtmlRenderer::table(),
    );

    if let Err(e) = dashboard.initialize().await {
        if e.is_auth_failure() {
            tracing::warn!("No valid session, exiting");
            return Ok(());
        }
        return Err(anyhow::anyhow!("Failed to load dashboard: {}", e));
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", header_date(&to_display_zone(&chrono::Utc::now())))?;
    if let Some(cards) = dashboard.cards() {
        writeln!(
            stdout,
            "Total: {} ({} this month) | Resolved: {} ({} this week) | Pending: {} | {}",
            cards.total,
            cards.new_this_month,
            cards.resolved,
            cards.resolved_this_week,
            cards.pending,
            cards.avg_resolution_caption()
        )?;
    }
    writeln!(stdout, "{}", dashboard.list().renderer().html())?;
    writeln!(stdout, "{}", dashboard.activity_html())?;
    drop(stdout);

    tokio::select! {
        status = guard.run() => {
            tracing::info!("Session ended: {:?}", status);
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
