use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use paystub_mailer::api::{AppState, create_router};
use paystub_mailer::config::Settings;
use paystub_mailer::notify::SmtpMailer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let settings = Settings::from_env().context("failed to load settings")?;
    settings
        .ensure_dirs()
        .context("failed to create logo and output directories")?;
    info!(?settings, "Settings loaded");

    let mailer = SmtpMailer::from_settings(&settings.smtp).context("failed to set up SMTP")?;
    let bind_addr = settings.bind_addr.clone();
    let app = create_router(AppState::new(settings, Arc::new(mailer)));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
