use crate::core::PipelineResult;
use crate::services::DefaultPipelineConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// 引数なしで実行すると 3 producers / 3 consumers / 容量5 / 5件ずつ / 200ms で動く
#[derive(Parser, Debug, Default)]
#[command(name = "email_pipeline")]
#[command(about = "Bounded producer/consumer pipeline for email jobs")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file (flags take precedence over its values)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of producer workers
    #[arg(short, long)]
    pub producers: Option<usize>,

    /// Number of consumer workers
    #[arg(short = 'n', long)]
    pub consumers: Option<usize>,

    /// Queue capacity
    #[arg(short = 'q', long)]
    pub capacity: Option<usize>,

    /// Jobs emitted by each producer
    #[arg(short, long)]
    pub jobs_per_producer: Option<usize>,

    /// Pause after each job in milliseconds
    #[arg(long)]
    pub pause_ms: Option<u64>,

    /// Payload carried by every job
    #[arg(long)]
    pub payload: Option<String>,

    /// Print the run summary as JSON when finished
    #[arg(long)]
    pub summary_json: bool,

    /// Enable debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 設定ファイルとフラグを合成した設定を作る
    pub fn resolve_config(&self) -> PipelineResult<DefaultPipelineConfig> {
        let mut config = match &self.config {
            Some(path) => DefaultPipelineConfig::from_json_file(path)?,
            None => DefaultPipelineConfig::default(),
        };

        if let Some(producers) = self.producers {
            config = config.with_producers(producers);
        }
        if let Some(consumers) = self.consumers {
            config = config.with_consumers(consumers);
        }
        if let Some(capacity) = self.capacity {
            config = config.with_capacity(capacity);
        }
        if let Some(jobs) = self.jobs_per_producer {
            config = config.with_jobs_per_producer(jobs);
        }
        if let Some(pause_ms) = self.pause_ms {
            config = config.with_pause(Duration::from_millis(pause_ms));
        }
        if let Some(payload) = &self.payload {
            config = config.with_payload(payload.clone());
        }

        Ok(config)
    }
}
