use crate::{
    config::AppConfig,
    error::CliError,
    shutdown::{ExitCode, ShutdownCoordinator},
};
use clap::Parser;
use commands::{Commands, CursorCommand};
use engine_core::{
    state::{
        CursorStore,
        file_store::JsonFileStore,
        paths::{DataDirResolver, StatePathResolver},
    },
    time::{
        clock::{FixedZoneClock, SystemZoneClock, ZoneClock},
        corrector::TimestampCorrector,
    },
};
use engine_processing::fetcher::{LogFetcher, config::FetchContext};
use engine_runtime::{
    poller::{PollSettings, Poller},
    sink::JsonLinesSink,
};
use model::pagination::cursor::{CursorState, NO_ID};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;
mod shutdown;

#[derive(Parser)]
#[command(
    name = "logtail",
    version = "0.1.0",
    about = "Incremental tailer for HomeSeer SQLite logs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout carries only events
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Run { config } => {
            let config = AppConfig::load(config.as_deref()).await?;
            run(&config).await?
        }
        Commands::Fetch { config, batch_size } => {
            let config = AppConfig::load(config.as_deref()).await?;
            fetch_once(&config, batch_size.unwrap_or(config.log_batch_size)).await?;
            ExitCode::Success
        }
        Commands::Cursor { command } => {
            match command {
                CursorCommand::Show { config, json } => {
                    let config = AppConfig::load(config.as_deref()).await?;
                    show_cursor(&config, json).await?;
                }
                CursorCommand::Set { config, last_id } => {
                    let config = AppConfig::load(config.as_deref()).await?;
                    set_cursor(&config, last_id).await?;
                }
            }
            ExitCode::Success
        }
    };

    match code {
        ExitCode::Success => Ok(()),
        code => std::process::exit(code.as_i32()),
    }
}

async fn run(config: &AppConfig) -> Result<ExitCode, CliError> {
    let fetcher = open_fetcher(config).await?;
    let settings = PollSettings {
        interval: config.poll_interval(),
        state_file: config.state_file.clone(),
        batch_size: config.log_batch_size,
    };

    let shutdown = ShutdownCoordinator::new(CancellationToken::new());
    shutdown.register_handlers();

    let summary = Poller::new(fetcher, JsonLinesSink::stdout(), settings)
        .run(shutdown.cancel_token())
        .await?;

    info!(
        cycles = summary.cycles,
        events = summary.events,
        "Log tailer stopped"
    );

    if shutdown.is_shutdown_requested() {
        Ok(ExitCode::ShutdownRequested)
    } else {
        Ok(ExitCode::Success)
    }
}

async fn fetch_once(config: &AppConfig, batch_size: u32) -> Result<(), CliError> {
    let mut fetcher = open_fetcher(config).await?;
    let result = fetcher.fetch_batch(&config.state_file, batch_size).await;
    fetcher.close().await;

    output::print_events(&result?).await
}

async fn show_cursor(config: &AppConfig, as_json: bool) -> Result<(), CliError> {
    let resolver = DataDirResolver::new(config.data_dir()?);
    let path = resolver.resolve(&config.state_file)?;
    let store = JsonFileStore::new();

    let exists = store.exists(&path).await?;
    let cursor = store.load(&path).await?;
    output::print_cursor(&path, exists, &cursor, as_json)
}

async fn set_cursor(config: &AppConfig, last_id: i64) -> Result<(), CliError> {
    if last_id < NO_ID {
        return Err(CliError::InvalidCursor(last_id));
    }

    let resolver = DataDirResolver::new(config.data_dir()?);
    resolver.prepare().await?;
    let path = resolver.resolve(&config.state_file)?;

    JsonFileStore::new()
        .save(&path, &CursorState::new(last_id))
        .await?;
    info!(path = %path.display(), last_id, "Cursor updated");
    Ok(())
}

async fn open_fetcher(config: &AppConfig) -> Result<LogFetcher, CliError> {
    let resolver = DataDirResolver::new(config.data_dir()?);
    resolver.prepare().await?;

    let clock: Arc<dyn ZoneClock> = match config.zone()? {
        Some(tz) => Arc::new(FixedZoneClock::new(tz)),
        None => Arc::new(SystemZoneClock::detect()),
    };

    let ctx = FetchContext::new(
        Arc::new(JsonFileStore::new()),
        Arc::new(resolver),
        TimestampCorrector::new(clock),
    )
    .with_policy(config.on_timestamp_error);

    Ok(LogFetcher::init(config.source_path(), ctx).await?)
}
