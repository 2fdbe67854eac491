// エンドツーエンド統合テスト
use crate::fixtures::{expected_origins, fast_config};
use email_pipeline::{
    DefaultPipelineConfig, EmailPipeline, JobOrigin, JobReporter, MemoryJobReporter,
    NoOpJobReporter, PipelineSummary, WriterJobReporter,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

async fn run_to_completion<R>(pipeline: EmailPipeline<DefaultPipelineConfig, R>) -> PipelineSummary
where
    R: JobReporter + ?Sized + 'static,
{
    timeout(Duration::from_secs(30), pipeline.run())
        .await
        .expect("pipeline did not terminate")
        .expect("pipeline failed")
}

#[tokio::test]
async fn test_every_job_consumed_exactly_once() {
    let reporter = Arc::new(MemoryJobReporter::new());
    let pipeline = EmailPipeline::new(fast_config(), reporter.clone());

    let summary = run_to_completion(pipeline).await;
    assert_eq!(summary.produced, 15);
    assert_eq!(summary.consumed, 15);

    let consumed = reporter.consumed_origins();
    let unique: HashSet<JobOrigin> = consumed.iter().copied().collect();
    assert_eq!(consumed.len(), 15, "重複消費がある");
    assert_eq!(unique, expected_origins(3, 5));
}

#[tokio::test]
async fn test_real_pause_keeps_counts() {
    let reporter = Arc::new(MemoryJobReporter::new());
    let config = fast_config().with_pause(Duration::from_millis(5));
    let pipeline = EmailPipeline::new(config, reporter.clone());

    let summary = run_to_completion(pipeline).await;
    assert_eq!(summary.consumed, 15);
    // 各Producerは1件ごとに5ms待機し、5件で25ms以上かかる
    assert!(summary.elapsed_ms >= 25);
    assert!(summary.finished_at >= summary.started_at);
}

#[tokio::test]
async fn test_no_production_after_close() {
    let reporter = Arc::new(MemoryJobReporter::new());
    let pipeline = EmailPipeline::new(fast_config().with_capacity(1), reporter.clone());
    run_to_completion(pipeline).await;

    let closed_at = reporter.queue_closed_position().unwrap();
    let last_produced = reporter.last_produced_position().unwrap();
    assert!(last_produced < closed_at);
}

#[tokio::test]
async fn test_terminates_for_various_shapes() {
    for producers in 1..=3 {
        for consumers in 1..=3 {
            for capacity in [0, 1, 5] {
                let config = fast_config()
                    .with_producers(producers)
                    .with_consumers(consumers)
                    .with_capacity(capacity);
                let pipeline = EmailPipeline::new(config, Arc::new(NoOpJobReporter::new()));

                let summary = timeout(Duration::from_secs(10), pipeline.run())
                    .await
                    .unwrap_or_else(|_| {
                        panic!("deadlock: producers={producers} consumers={consumers} capacity={capacity}")
                    })
                    .unwrap();

                assert_eq!(summary.produced, producers * 5);
                assert_eq!(summary.consumed, producers * 5);
            }
        }
    }
}

#[tokio::test]
async fn test_single_producer_without_consumers() {
    let config = fast_config().with_producers(1).with_consumers(0);
    let pipeline = EmailPipeline::new(config, Arc::new(MemoryJobReporter::new()));

    let summary = run_to_completion(pipeline).await;
    assert_eq!(summary.produced, 5);
    assert_eq!(summary.consumed, 0);
    assert_eq!(summary.undelivered, 5);
    assert!(summary.consumers.is_empty());
}

#[tokio::test]
async fn test_console_output_lines() {
    let reporter = Arc::new(WriterJobReporter::with_writer(Vec::new()));
    let config = fast_config().with_payload("someone@example.com");
    let pipeline = EmailPipeline::new(config, reporter.clone());

    pipeline.run().await.unwrap();

    let lines = reporter.lines();
    let produced = lines.iter().filter(|l| l.contains("produced job someone@example.com")).count();
    let consumed = lines.iter().filter(|l| l.contains("consumed job someone@example.com")).count();
    assert_eq!(lines.len(), 30);
    assert_eq!(produced, 15);
    assert_eq!(consumed, 15);
}

#[tokio::test]
async fn test_worker_reports_per_pool() {
    let reporter = Arc::new(MemoryJobReporter::new());
    let config = fast_config().with_producers(2).with_consumers(4);
    let pipeline = EmailPipeline::new(config, reporter.clone());

    let summary = run_to_completion(pipeline).await;

    assert_eq!(summary.producers.len(), 2);
    assert!(summary.producers.iter().all(|r| r.jobs_handled == 5));
    assert_eq!(summary.consumers.len(), 4);
    let ids: Vec<usize> = summary.consumers.iter().map(|r| r.worker_id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(reporter.completed(), Some(summary));
}
