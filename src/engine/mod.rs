// 並列実行機能
// Producer-Consumer パターンによる並列処理とオーケストレーション

pub mod completion;
pub mod consumer;
pub mod pipeline;
pub mod producer;

// 公開API
pub use completion::{completion_group, CompletionGroup, CompletionSignal};
pub use consumer::{spawn_consumers, spawn_single_consumer};
pub use pipeline::EmailPipeline;
pub use producer::{spawn_producer, spawn_producers, ProducerSettings};
