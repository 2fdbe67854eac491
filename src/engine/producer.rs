// Producer - ジョブ生成機能

use super::completion::CompletionSignal;
use crate::core::{Job, JobOrigin, JobReporter, PipelineResult, WorkerReport, WorkerRole};
use crate::queue::JobSender;
use std::sync::Arc;
use std::time::Duration;

/// Producer共通の設定
#[derive(Debug, Clone)]
pub struct ProducerSettings {
    pub jobs_per_producer: usize,
    pub pause: Duration,
    pub payload: String,
}

/// 単一Producerワーカー
///
/// 決められた件数のジョブを順にキューへ挿入し、最後に一度だけ完了を通知する。
pub fn spawn_producer<R>(
    worker_id: usize,
    settings: ProducerSettings,
    queue: JobSender,
    reporter: Arc<R>,
    signal: CompletionSignal,
) -> tokio::task::JoinHandle<PipelineResult<()>>
where
    R: JobReporter + ?Sized + 'static,
{
    tokio::spawn(async move {
        tracing::debug!(worker_id, jobs = settings.jobs_per_producer, "producer started");

        for sequence in 0..settings.jobs_per_producer {
            let job = Job::new(
                JobOrigin {
                    producer_id: worker_id,
                    sequence,
                },
                settings.payload.as_str(),
            );

            // 満杯なら空きが出るまで待機
            queue.send(job.clone()).await?;
            reporter.report_produced(worker_id, &job).await;

            tokio::time::sleep(settings.pause).await;
        }

        // 送信側を先に手放してから完了通知
        drop(queue);
        signal.complete(WorkerReport {
            role: WorkerRole::Producer,
            worker_id,
            jobs_handled: settings.jobs_per_producer,
        });

        tracing::debug!(worker_id, "producer finished");
        Ok(())
    })
}

/// Producers: ワーカープール
///
/// 完了通知の数だけワーカーを起動する。
pub fn spawn_producers<R>(
    settings: &ProducerSettings,
    queue: &JobSender,
    reporter: Arc<R>,
    signals: Vec<CompletionSignal>,
) -> Vec<tokio::task::JoinHandle<PipelineResult<()>>>
where
    R: JobReporter + ?Sized + 'static,
{
    signals
        .into_iter()
        .enumerate()
        .map(|(worker_id, signal)| {
            spawn_producer(
                worker_id,
                settings.clone(),
                queue.clone(),
                reporter.clone(),
                signal,
            )
        })
        .collect()
}
