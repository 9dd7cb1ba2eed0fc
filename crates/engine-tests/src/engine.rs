#[cfg(test)]
mod tests {
    use crate::{Harness, STATE_FILE};
    use async_trait::async_trait;
    use engine_processing::error::FetchError;
    use engine_runtime::{
        error::{RuntimeError, SinkError},
        poller::{PollSettings, Poller},
        sink::EventSink,
    };
    use model::events::LogEvent;
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };
    use tokio_util::sync::CancellationToken;
    use tracing_test::traced_test;

    #[derive(Default, Clone)]
    struct SharedSink {
        events: Arc<Mutex<Vec<LogEvent>>>,
    }

    impl SharedSink {
        fn ids(&self) -> Vec<i64> {
            self.events.lock().unwrap().iter().map(|e| e.event.id).collect()
        }
    }

    #[async_trait]
    impl EventSink for SharedSink {
        async fn publish(&mut self, event: &LogEvent) -> Result<(), SinkError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), SinkError> {
            Ok(())
        }
    }

    fn settings(batch_size: u32) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(10),
            state_file: STATE_FILE.to_string(),
            batch_size,
        }
    }

    async fn wait_for(sink: &SharedSink, count: usize) {
        tokio::time::timeout(Duration::from_secs(10), async {
            while sink.ids().len() < count {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("events were not published in time");
    }

    // Scenario: Poll a database in small batches, then append more rows.
    // Expected Outcome: Every row is published once, in id order, and the
    // cursor ends at the last id after shutdown.
    #[traced_test]
    #[tokio::test]
    async fn poller_tails_database_until_cancelled() {
        let harness = Harness::with_ids(1..=5).await;
        let fetcher = harness.fetcher().await;
        let sink = SharedSink::default();
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(Poller::new(fetcher, sink.clone(), settings(2)).run(cancel.clone()));

        wait_for(&sink, 5).await;
        harness.db.insert_ids(6..=7).await;
        wait_for(&sink, 7).await;

        cancel.cancel();
        let summary = handle.await.unwrap().unwrap();

        assert_eq!(summary.events, 7);
        assert_eq!(sink.ids(), (1..=7).collect::<Vec<_>>());
        assert_eq!(harness.read_state(), "{\n  \"lastID\": 7\n}\n");
    }

    // Scenario: A restarted poller with an existing cursor.
    // Expected Outcome: Already delivered rows are not published again.
    #[tokio::test]
    async fn restarted_poller_resumes_from_cursor() {
        let harness = Harness::with_ids(1..=6).await;
        harness.write_state("{\"lastID\": 4}");
        let sink = SharedSink::default();
        let cancel = CancellationToken::new();

        let poller = Poller::new(harness.fetcher().await, sink.clone(), settings(100));
        let handle = tokio::spawn(poller.run(cancel.clone()));

        wait_for(&sink, 2).await;
        cancel.cancel();
        handle.await.unwrap().unwrap();

        assert_eq!(sink.ids(), vec![5, 6]);
    }

    // Scenario: The cursor file is corrupt when the poller starts.
    // Expected Outcome: The poller stops with an error and publishes nothing.
    #[tokio::test]
    async fn corrupt_cursor_stops_poller() {
        let harness = Harness::with_ids(1..=3).await;
        harness.write_state("{\"lastID\": \"three\"}");
        let sink = SharedSink::default();

        let err = Poller::new(harness.fetcher().await, sink.clone(), settings(10))
            .run(CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RuntimeError::Fetch(FetchError::StateCorrupt { .. })
        ));
        assert!(sink.ids().is_empty());
        assert_eq!(harness.read_state(), "{\"lastID\": \"three\"}");
    }
}
