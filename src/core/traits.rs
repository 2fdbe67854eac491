// パイプラインのトレイト定義
// 設定と出力の抽象化インターフェースを定義

use super::types::{Job, PipelineSummary};
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;

/// パイプラインの設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// Producerワーカー数
    fn producer_count(&self) -> usize;

    /// Consumerワーカー数
    fn consumer_count(&self) -> usize;

    /// キュー容量
    fn queue_capacity(&self) -> usize;

    /// Producer1つあたりの生成ジョブ数
    fn jobs_per_producer(&self) -> usize;

    /// ジョブ間の待機時間
    fn pause(&self) -> Duration;

    /// ジョブのペイロード
    fn payload(&self) -> String;
}

impl PipelineConfig for Box<dyn PipelineConfig> {
    fn producer_count(&self) -> usize {
        self.as_ref().producer_count()
    }

    fn consumer_count(&self) -> usize {
        self.as_ref().consumer_count()
    }

    fn queue_capacity(&self) -> usize {
        self.as_ref().queue_capacity()
    }

    fn jobs_per_producer(&self) -> usize {
        self.as_ref().jobs_per_producer()
    }

    fn pause(&self) -> Duration {
        self.as_ref().pause()
    }

    fn payload(&self) -> String {
        self.as_ref().payload()
    }
}

/// ジョブの生成・消費を報告するトレイト
#[automock]
#[async_trait]
pub trait JobReporter: Send + Sync {
    /// ジョブ生成時の報告
    async fn report_produced(&self, worker_id: usize, job: &Job);

    /// ジョブ消費時の報告
    async fn report_consumed(&self, worker_id: usize, job: &Job);

    /// キュークローズ時の報告
    async fn report_queue_closed(&self);

    /// 全ワーカー完了時の報告
    async fn report_completed(&self, summary: &PipelineSummary);
}
