// パイプラインで扱うデータ型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ジョブの発生元（どのProducerの何番目か）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobOrigin {
    pub producer_id: usize,
    pub sequence: usize,
}

/// メール送信ジョブ
///
/// 生成後は不変。ちょうど1つのConsumerに消費される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    origin: JobOrigin,
    payload: String,
}

impl Job {
    pub fn new(origin: JobOrigin, payload: impl Into<String>) -> Self {
        Self {
            origin,
            payload: payload.into(),
        }
    }

    pub fn origin(&self) -> JobOrigin {
        self.origin
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// ワーカーの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerRole {
    Producer,
    Consumer,
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Producer => f.write_str("producer"),
            Self::Consumer => f.write_str("consumer"),
        }
    }
}

/// 完了通知と一緒に送られるワーカーの実績
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerReport {
    pub role: WorkerRole,
    pub worker_id: usize,
    pub jobs_handled: usize,
}

/// パイプライン実行全体のサマリー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub produced: usize,
    pub consumed: usize,
    /// Consumerが0のときキューに残ったジョブ数
    pub undelivered: usize,
    pub producers: Vec<WorkerReport>,
    pub consumers: Vec<WorkerReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl PipelineSummary {
    /// 生成されたジョブが全て消費されたか
    pub fn is_fully_drained(&self) -> bool {
        self.produced == self.consumed && self.undelivered == 0
    }
}
