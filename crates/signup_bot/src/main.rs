use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use signup_bot::{
    init_tracing, BotConfig, ChatRouter, Cli, Dispatcher, ExportGate, TelegramClient,
    TranscriptLog, UpdatePoller,
};
use signup_session::InMemorySessionStore;
use signup_storage::{RegistrationRepository, SqliteRegistrationRepository, XlsxExportRenderer};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug, cli.log_level.as_deref());
    let config = BotConfig::from(cli);

    tracing::info!("Starting signup bot");
    tracing::info!("  API base: {}", config.api_base);
    tracing::info!("  Database: {}", config.database.display());
    tracing::info!("  Transcript: {}", config.transcript_log.display());

    let repository = Arc::new(SqliteRegistrationRepository::new(&config.database));
    repository
        .init()
        .await
        .context("Failed to initialise registration database")?;

    let gate = ExportGate::new(
        config.export_password_salt.clone(),
        &config.export_password_digest,
    )?;
    let transcript = TranscriptLog::open(&config.transcript_log)
        .with_context(|| format!("Failed to open {}", config.transcript_log.display()))?;

    let client = Arc::new(TelegramClient::new(&config.api_base, &config.bot_token)?);
    let dispatcher = Dispatcher::new(
        Arc::new(InMemorySessionStore::new()),
        repository,
        client.clone(),
        Arc::new(XlsxExportRenderer::default()),
        gate,
    )
    .with_transcript(Arc::new(transcript));
    let router = Arc::new(ChatRouter::new(Arc::new(dispatcher)));

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", error);
            return;
        }
        tracing::info!("Shutdown requested");
        signal_token.cancel();
    });

    let mut poller = UpdatePoller::new(client, router.clone(), config.poll_timeout);
    poller.run(shutdown).await;

    router.shutdown().await;
    tracing::info!("Signup bot stopped");
    Ok(())
}
