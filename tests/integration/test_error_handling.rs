// エラーハンドリングの統合テスト
use crate::fixtures::fast_config;
use email_pipeline::{
    core::ErrorSeverity, DefaultPipelineConfig, EmailPipeline, NoOpJobReporter, PipelineError,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_zero_consumers_with_overflow_rejected_before_start() {
    let reporter = Arc::new(email_pipeline::MemoryJobReporter::new());
    let config = fast_config().with_consumers(0);
    let pipeline = EmailPipeline::new(config, reporter.clone());

    let error = pipeline.run().await.unwrap_err();

    assert!(matches!(error, PipelineError::Configuration { .. }));
    assert_eq!(error.severity(), ErrorSeverity::High);
    // 起動前に検証されるので何も生成されない
    assert!(reporter.events().is_empty());
}

#[tokio::test]
async fn test_zero_capacity_zero_consumers_single_job() {
    let config = fast_config()
        .with_producers(1)
        .with_consumers(0)
        .with_capacity(0)
        .with_jobs_per_producer(1);
    let pipeline = EmailPipeline::new(config, Arc::new(NoOpJobReporter::new()));

    let summary = pipeline.run().await.unwrap();
    assert_eq!(summary.undelivered, 1);
}

#[test]
fn test_invalid_json_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let error = DefaultPipelineConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(error, PipelineError::ConfigFile { .. }));
    assert!(error.to_string().contains("broken.json"));
    assert!(!error.is_recoverable());
}
