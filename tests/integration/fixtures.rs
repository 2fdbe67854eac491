// テスト用のヘルパー

use email_pipeline::{DefaultPipelineConfig, JobOrigin};
use std::collections::HashSet;
use std::time::Duration;

/// 待機時間0の設定（それ以外はデフォルト）
pub fn fast_config() -> DefaultPipelineConfig {
    DefaultPipelineConfig::default().with_pause(Duration::ZERO)
}

/// 期待される全ジョブの発生元
pub fn expected_origins(producers: usize, jobs_per_producer: usize) -> HashSet<JobOrigin> {
    (0..producers)
        .flat_map(|producer_id| {
            (0..jobs_per_producer).map(move |sequence| JobOrigin {
                producer_id,
                sequence,
            })
        })
        .collect()
}
