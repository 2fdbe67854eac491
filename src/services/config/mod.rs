// 設定管理機能
// デフォルト値、JSONファイル読み込み、実行前検証

pub mod implementations;

// 公開API
pub use implementations::{
    validate_config, DefaultPipelineConfig, DEFAULT_CONSUMERS, DEFAULT_JOBS_PER_PRODUCER,
    DEFAULT_PAUSE_MS, DEFAULT_PAYLOAD, DEFAULT_PRODUCERS, DEFAULT_QUEUE_CAPACITY,
};
