pub mod cli;
pub mod core;
pub mod engine;
pub mod queue;
pub mod services;

// 公開API
pub use crate::core::{
    Job, JobOrigin, JobReporter, PipelineConfig, PipelineError, PipelineResult, PipelineSummary,
    WorkerReport, WorkerRole,
};
pub use engine::EmailPipeline;
pub use services::{
    ConsoleJobReporter, DefaultPipelineConfig, MemoryJobReporter, NoOpJobReporter,
    WriterJobReporter,
};
