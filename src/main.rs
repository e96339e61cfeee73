use noticeboard::config::Config;
use noticeboard::services::NavigationMenu;
use noticeboard::{app, tui, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env();
    let menu = NavigationMenu::load_or_default(config.nav_file.as_deref())?;
    let state = AppState::with_menu(config, menu);

    if state.config.tui {
        // The TUI owns the terminal, so tracing stays uninitialized
        tui::run_tui(state).await?;
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "noticeboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = state.config.addr();
    info!(
        "Starting noticeboard on {} (default channel '{}', auto-close {} ms)",
        addr, state.config.default_channel, state.config.auto_close_ms
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Noticeboard listening on {}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
