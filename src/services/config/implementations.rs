// 設定管理の具象実装

use crate::core::{PipelineConfig, PipelineError, PipelineResult};
use crate::queue::effective_capacity;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PRODUCERS: usize = 3;
pub const DEFAULT_CONSUMERS: usize = 3;
pub const DEFAULT_QUEUE_CAPACITY: usize = 5;
pub const DEFAULT_JOBS_PER_PRODUCER: usize = 5;
pub const DEFAULT_PAUSE_MS: u64 = 200;
pub const DEFAULT_PAYLOAD: &str = "something";

/// デフォルト設定実装
///
/// JSONファイルからも読み込める。省略されたフィールドはデフォルト値になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultPipelineConfig {
    producers: usize,
    consumers: usize,
    capacity: usize,
    jobs_per_producer: usize,
    #[serde(rename = "pause_ms", with = "pause_millis")]
    pause: Duration,
    payload: String,
}

impl DefaultPipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON文字列から読み込み
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// JSONファイルから読み込み
    pub fn from_json_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::config_file(path, e.into()))?;
        Self::from_json_str(&content).map_err(|e| PipelineError::config_file(path, e))
    }

    pub fn with_producers(mut self, producers: usize) -> Self {
        self.producers = producers;
        self
    }

    pub fn with_consumers(mut self, consumers: usize) -> Self {
        self.consumers = consumers;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_jobs_per_producer(mut self, jobs_per_producer: usize) -> Self {
        self.jobs_per_producer = jobs_per_producer;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self {
            producers: DEFAULT_PRODUCERS,
            consumers: DEFAULT_CONSUMERS,
            capacity: DEFAULT_QUEUE_CAPACITY,
            jobs_per_producer: DEFAULT_JOBS_PER_PRODUCER,
            pause: Duration::from_millis(DEFAULT_PAUSE_MS),
            payload: DEFAULT_PAYLOAD.to_string(),
        }
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn producer_count(&self) -> usize {
        self.producers
    }

    fn consumer_count(&self) -> usize {
        self.consumers
    }

    fn queue_capacity(&self) -> usize {
        self.capacity
    }

    fn jobs_per_producer(&self) -> usize {
        self.jobs_per_producer
    }

    fn pause(&self) -> Duration {
        self.pause
    }

    fn payload(&self) -> String {
        self.payload.clone()
    }
}

/// JSONでは待機時間をミリ秒の整数で表す（ミリ秒未満は書き出し時に切り捨て）
mod pause_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(pause: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(pause.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// 実行前の設定検証
///
/// Consumerが0のとき、総ジョブ数がキューに収まらなければProducerが永久に待機する。
pub fn validate_config<C>(config: &C) -> PipelineResult<()>
where
    C: PipelineConfig + ?Sized,
{
    let total_jobs = config
        .producer_count()
        .checked_mul(config.jobs_per_producer())
        .ok_or_else(|| PipelineError::configuration("総ジョブ数がオーバーフローします"))?;

    let capacity = effective_capacity(config.queue_capacity());
    if config.consumer_count() == 0 && total_jobs > capacity {
        return Err(PipelineError::configuration(format!(
            "consumer数が0のため総ジョブ数 {total_jobs} がキュー容量 {capacity} を超えると終了できません"
        )));
    }

    Ok(())
}
