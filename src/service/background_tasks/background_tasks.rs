use parking_lot::Mutex;
use std::{fmt::Display, future::Future, sync::Arc, time::Duration};
use tokio::task::{JoinError, JoinSet};
use tracing::Instrument;

///
/// Spawner of fire-and-forget work.
///
/// Errors and panics of spawned tasks are logged, never propagated.
/// [BackgroundTasks::close] waits for tasks that are still running.
///
#[derive(Clone, Default)]
pub struct BackgroundTasks {
    tasks: Arc<Mutex<JoinSet<()>>>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F, E>(&self, name: &'static str, task: F)
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let span = tracing::info_span!("background_task", name);
        let task = async move {
            match task.await {
                Ok(()) => tracing::debug!("background task finished"),
                Err(err) => tracing::error!(%err, "background task failed"),
            }
        }
        .instrument(span);

        let mut tasks = self.tasks.lock();
        Self::reap_finished(&mut tasks);
        tasks.spawn(task);
    }

    #[cfg(test)]
    pub fn running(&self) -> usize {
        let mut tasks = self.tasks.lock();
        Self::reap_finished(&mut tasks);
        tasks.len()
    }

    ///
    /// Waits until all spawned tasks finish.
    /// Tasks still running after `timeout` are aborted.
    ///
    pub async fn close(&self, timeout: Duration) {
        let mut tasks = std::mem::take(&mut *self.tasks.lock());
        tracing::info!(running = tasks.len(), "waiting for background tasks");

        let join_all = async {
            while let Some(result) = tasks.join_next().await {
                Self::log_join_result(result);
            }
        };

        let result = tokio::time::timeout(timeout, join_all).await;
        match result {
            Ok(()) => tracing::info!("background tasks finished"),
            Err(_) => {
                tracing::warn!(aborted = tasks.len(), "background tasks timed out");
                tasks.abort_all();
            }
        }
    }

    fn reap_finished(tasks: &mut JoinSet<()>) {
        while let Some(result) = tasks.try_join_next() {
            Self::log_join_result(result);
        }
    }

    fn log_join_result(result: Result<(), JoinError>) {
        if let Err(err) = result {
            tracing::error!(%err, "background task panicked");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn spawn_task_runs() {
        let tasks = BackgroundTasks::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = counter.clone();
            tasks.spawn("increment", async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(())
            });
        }
        tasks.close(Duration::from_secs(1)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(tasks.running(), 0);
    }

    #[tokio::test]
    async fn spawn_failing_task_not_propagated() {
        let tasks = BackgroundTasks::new();

        tasks.spawn("failing", async { Err("failure".to_string()) });
        tasks.spawn("panicking", async {
            if tasks_should_panic() {
                panic!("panic in background task");
            }
            Ok::<_, String>(())
        });
        tasks.close(Duration::from_secs(1)).await;

        assert_eq!(tasks.running(), 0);
    }

    fn tasks_should_panic() -> bool {
        true
    }

    #[tokio::test(start_paused = true)]
    async fn close_long_running_task_aborted_after_timeout() {
        let tasks = BackgroundTasks::new();
        let finished = Arc::new(AtomicUsize::new(0));

        let finished_clone = finished.clone();
        tasks.spawn("sleeping", async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            finished_clone.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(())
        });
        tasks.close(Duration::from_secs(1)).await;

        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn spawn_finished_tasks_reaped() {
        let tasks = BackgroundTasks::new();

        tasks.spawn("quick", async { Ok::<_, String>(()) });
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(tasks.running(), 0);
    }
}
