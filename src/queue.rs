// 有界ジョブキュー
// tokio::sync::mpsc の有界チャンネルを、一度きりのクローズ操作付きで包む

use crate::core::{Job, PipelineError, PipelineResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// 有界キューを作成し、送信側・受信側・クローズ用ハンドルを返す
///
/// tokioのチャンネルは容量0を扱えないため、0は1として扱う。
pub fn bounded(capacity: usize) -> (JobSender, JobReceiver, QueueCloser) {
    let capacity = effective_capacity(capacity);
    let (tx, rx) = mpsc::channel::<Job>(capacity);
    let closed = Arc::new(AtomicBool::new(false));

    let sender = JobSender {
        tx: tx.clone(),
        closed: closed.clone(),
    };
    let receiver = JobReceiver {
        rx: Arc::new(Mutex::new(rx)),
    };
    let closer = QueueCloser {
        tx: Some(tx),
        closed,
    };

    (sender, receiver, closer)
}

/// 実際に確保されるバッファ容量
pub fn effective_capacity(capacity: usize) -> usize {
    capacity.max(1)
}

/// 送信側ハンドル（Producerごとにclone）
#[derive(Debug, Clone)]
pub struct JobSender {
    tx: mpsc::Sender<Job>,
    closed: Arc<AtomicBool>,
}

impl JobSender {
    /// ジョブを挿入する。満杯の場合は空きが出るまで待機
    pub async fn send(&self, job: Job) -> PipelineResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(PipelineError::QueueClosed);
        }
        self.tx
            .send(job)
            .await
            .map_err(|_| PipelineError::QueueClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// 受信側ハンドル（Consumer間で共有）
#[derive(Debug, Clone)]
pub struct JobReceiver {
    rx: Arc<Mutex<mpsc::Receiver<Job>>>,
}

impl JobReceiver {
    /// 次のジョブを取り出す。空なら待機し、クローズ済みかつ空なら None
    pub async fn recv(&self) -> Option<Job> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }

    /// バッファに残っているジョブを全て捨て、その件数を返す
    pub async fn discard_remaining(&self) -> usize {
        let mut rx = self.rx.lock().await;
        let mut discarded = 0;
        while rx.try_recv().is_ok() {
            discarded += 1;
        }
        discarded
    }
}

/// キューのクローズ用ハンドル（コーディネータが保持）
#[derive(Debug)]
pub struct QueueCloser {
    tx: Option<mpsc::Sender<Job>>,
    closed: Arc<AtomicBool>,
}

impl QueueCloser {
    /// キューをクローズする。以降の挿入は失敗し、残りのジョブは取り出し可能
    ///
    /// 初回呼び出し時のみ true を返す。
    pub fn close(&mut self) -> bool {
        self.closed.store(true, Ordering::Release);
        self.tx.take().is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
