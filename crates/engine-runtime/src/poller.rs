use crate::{error::RuntimeError, sink::EventSink};
use async_trait::async_trait;
use chrono::Utc;
use engine_processing::{error::FetchError, fetcher::LogFetcher};
use model::{
    events::{Event, LogEvent},
    records::log_entry::LogEntry,
};
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Anything that can run fetch cycles for the poller.
#[async_trait]
pub trait BatchFetcher: Send {
    async fn fetch_batch(
        &mut self,
        identity: &str,
        batch_size: u32,
    ) -> Result<Vec<LogEntry>, FetchError>;

    async fn close(&mut self);
}

#[async_trait]
impl BatchFetcher for LogFetcher {
    async fn fetch_batch(
        &mut self,
        identity: &str,
        batch_size: u32,
    ) -> Result<Vec<LogEntry>, FetchError> {
        LogFetcher::fetch_batch(self, identity, batch_size).await
    }

    async fn close(&mut self) {
        LogFetcher::close(self).await
    }
}

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub state_file: String,
    pub batch_size: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    pub cycles: u64,
    pub events: u64,
}

/// Calls the fetcher on a fixed interval and publishes what it returns.
///
/// Cycles never overlap. Any fetch or sink error stops the loop; the fetcher
/// is closed on every exit path.
pub struct Poller<F, S> {
    fetcher: F,
    sink: S,
    settings: PollSettings,
    summary: PollSummary,
}

impl<F, S> Poller<F, S>
where
    F: BatchFetcher,
    S: EventSink,
{
    pub fn new(fetcher: F, sink: S, settings: PollSettings) -> Self {
        Self {
            fetcher,
            sink,
            settings,
            summary: PollSummary::default(),
        }
    }

    pub async fn run(mut self, cancel: CancellationToken) -> Result<PollSummary, RuntimeError> {
        info!(
            interval_ms = self.settings.interval.as_millis() as u64,
            state_file = %self.settings.state_file,
            "Log tailer is running"
        );

        let mut ticker = time::interval(self.settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let result = loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Shutdown requested, stopping poller");
                    break Ok(());
                }
                _ = ticker.tick() => {}
            }

            if let Err(err) = self.poll_once().await {
                error!(error = %err, "Polling stopped");
                break Err(err);
            }
        };

        self.fetcher.close().await;
        result.map(|_| self.summary)
    }

    /// Runs one fetch cycle and publishes its events. Returns the number of
    /// events published.
    pub async fn poll_once(&mut self) -> Result<usize, RuntimeError> {
        let entries = self
            .fetcher
            .fetch_batch(&self.settings.state_file, self.settings.batch_size)
            .await?;
        self.summary.cycles += 1;

        if entries.is_empty() {
            return Ok(0);
        }

        let created = Utc::now();
        for entry in &entries {
            let event = LogEvent::from_entry(entry, created);
            debug!(kind = event.event_type(), id = entry.id, "Publishing event");
            self.sink.publish(&event).await?;
        }
        self.sink.flush().await?;

        self.summary.events += entries.len() as u64;
        info!(count = entries.len(), "Events sent");
        Ok(entries.len())
    }
}
