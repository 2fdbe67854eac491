// サービス層 - 機能別の具象実装
// 設定と出力はトレイト越しにパイプラインへ渡される

pub mod config;
pub mod monitoring;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::{validate_config, DefaultPipelineConfig};
pub use monitoring::{
    ConsoleJobReporter, MemoryJobReporter, NoOpJobReporter, ReportEvent, WriterJobReporter,
};
