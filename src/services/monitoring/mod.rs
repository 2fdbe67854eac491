// 出力・監視機能
// ジョブの生成・消費報告、キュークローズ、完了通知

pub mod implementations;

// 公開API
pub use implementations::{
    ConsoleJobReporter, MemoryJobReporter, NoOpJobReporter, ReportEvent, WriterJobReporter,
};
