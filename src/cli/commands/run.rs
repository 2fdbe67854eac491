use crate::core::{JobReporter, PipelineConfig, PipelineSummary};
use crate::engine::EmailPipeline;
use anyhow::Result;
use std::sync::Arc;

/// パイプラインを実行し、必要ならサマリーをJSONで出力する
pub async fn execute_run<C, R>(
    config: C,
    reporter: Arc<R>,
    summary_json: bool,
) -> Result<PipelineSummary>
where
    C: PipelineConfig,
    R: JobReporter + ?Sized + 'static,
{
    let pipeline = EmailPipeline::new(config, reporter);
    let summary = pipeline.run().await?;

    if summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(summary)
}
