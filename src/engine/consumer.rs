// Consumer - 並列ワーカー機能

use super::completion::CompletionSignal;
use crate::core::{JobReporter, WorkerReport, WorkerRole};
use crate::queue::JobReceiver;
use std::sync::Arc;
use std::time::Duration;

/// 単一Consumerワーカー
///
/// キューがクローズされ、かつ空になるまでジョブを取り出し続ける。
pub fn spawn_single_consumer<R>(
    worker_id: usize,
    queue: JobReceiver,
    pause: Duration,
    reporter: Arc<R>,
    signal: CompletionSignal,
) -> tokio::task::JoinHandle<()>
where
    R: JobReporter + ?Sized + 'static,
{
    tokio::spawn(async move {
        tracing::debug!(worker_id, "consumer started");
        let mut consumed = 0;

        // None はクローズ済みかつ空
        while let Some(job) = queue.recv().await {
            reporter.report_consumed(worker_id, &job).await;
            consumed += 1;

            tokio::time::sleep(pause).await;
        }

        signal.complete(WorkerReport {
            role: WorkerRole::Consumer,
            worker_id,
            jobs_handled: consumed,
        });
        tracing::debug!(worker_id, consumed, "consumer finished");
    })
}

/// Consumers: 並列ワーカープール
pub fn spawn_consumers<R>(
    queue: &JobReceiver,
    pause: Duration,
    reporter: Arc<R>,
    signals: Vec<CompletionSignal>,
) -> Vec<tokio::task::JoinHandle<()>>
where
    R: JobReporter + ?Sized + 'static,
{
    let mut handles = Vec::with_capacity(signals.len());

    for (worker_id, signal) in signals.into_iter().enumerate() {
        let handle = spawn_single_consumer(
            worker_id,
            queue.clone(),
            pause,
            reporter.clone(),
            signal,
        );
        handles.push(handle);
    }

    handles
}
