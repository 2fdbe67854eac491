// Pipeline - Producer-Consumer パイプライン
// コーディネータ: キュー構築、ワーカー起動、順序付きシャットダウン

use super::completion::completion_group;
use super::consumer::spawn_consumers;
use super::producer::{spawn_producers, ProducerSettings};
use crate::core::{
    JobReporter, PipelineConfig, PipelineResult, PipelineSummary, WorkerReport, WorkerRole,
};
use crate::queue;
use crate::services::config::validate_config;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// メール送信ジョブのパイプライン
pub struct EmailPipeline<C, R: ?Sized> {
    config: C,
    reporter: Arc<R>,
}

impl<C, R> EmailPipeline<C, R>
where
    C: PipelineConfig,
    R: JobReporter + ?Sized + 'static,
{
    /// 新しいパイプラインを作成
    pub fn new(config: C, reporter: Arc<R>) -> Self {
        Self { config, reporter }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn reporter(&self) -> Arc<R> {
        self.reporter.clone()
    }

    /// パイプラインを最後まで実行
    ///
    /// 全Producerの完了 → キューのクローズ → 全Consumerの完了、の順で待機する。
    pub async fn run(&self) -> PipelineResult<PipelineSummary> {
        validate_config(&self.config)?;

        let started_at = Utc::now();
        let start_time = Instant::now();

        let producer_count = self.config.producer_count();
        let consumer_count = self.config.consumer_count();
        let pause = self.config.pause();

        tracing::info!(
            producers = producer_count,
            consumers = consumer_count,
            capacity = self.config.queue_capacity(),
            jobs_per_producer = self.config.jobs_per_producer(),
            pause_ms = pause.as_millis() as u64,
            "pipeline starting"
        );

        let (job_tx, job_rx, mut closer) = queue::bounded(self.config.queue_capacity());
        let (producer_group, producer_signals) =
            completion_group(WorkerRole::Producer, producer_count);
        let (consumer_group, consumer_signals) =
            completion_group(WorkerRole::Consumer, consumer_count);

        let settings = ProducerSettings {
            jobs_per_producer: self.config.jobs_per_producer(),
            pause,
            payload: self.config.payload(),
        };

        // Producer Pool起動
        let producer_handles =
            spawn_producers(&settings, &job_tx, self.reporter.clone(), producer_signals);
        drop(job_tx);

        // Consumer Pool起動
        let consumer_handles =
            spawn_consumers(&job_rx, pause, self.reporter.clone(), consumer_signals);

        // Producer完了を待機
        let producers = match producer_group.wait().await {
            Ok(reports) => reports,
            Err(lost) => {
                closer.close();
                join_producers(producer_handles).await?;
                return Err(lost);
            }
        };
        join_producers(producer_handles).await?;

        // 以降の挿入は起こらない
        closer.close();
        tracing::debug!("job queue closed");
        self.reporter.report_queue_closed().await;

        // Consumer完了を待機
        let consumers = match consumer_group.wait().await {
            Ok(reports) => reports,
            Err(lost) => {
                join_consumers(consumer_handles).await?;
                return Err(lost);
            }
        };
        join_consumers(consumer_handles).await?;

        // Consumerが0の場合のみ残りが出る
        let undelivered = job_rx.discard_remaining().await;
        if undelivered > 0 {
            tracing::warn!(undelivered, "jobs left in queue with no consumers");
        }

        let summary = PipelineSummary {
            produced: total_handled(&producers),
            consumed: total_handled(&consumers),
            undelivered,
            producers,
            consumers,
            started_at,
            finished_at: Utc::now(),
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        };

        tracing::info!(
            produced = summary.produced,
            consumed = summary.consumed,
            undelivered = summary.undelivered,
            elapsed_ms = summary.elapsed_ms,
            "pipeline finished"
        );
        self.reporter.report_completed(&summary).await;

        Ok(summary)
    }
}

fn total_handled(reports: &[WorkerReport]) -> usize {
    reports.iter().map(|report| report.jobs_handled).sum()
}

async fn join_producers(handles: Vec<JoinHandle<PipelineResult<()>>>) -> PipelineResult<()> {
    for handle in handles {
        handle.await??;
    }
    Ok(())
}

async fn join_consumers(handles: Vec<JoinHandle<()>>) -> PipelineResult<()> {
    for handle in handles {
        handle.await?;
    }
    Ok(())
}
