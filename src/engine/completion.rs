// Completion - ワーカープールの完了待ち
// 完了通知のチャンネルを N 件受信するまで待機する

use crate::core::{PipelineError, PipelineResult, WorkerReport, WorkerRole};
use tokio::sync::mpsc;

/// プールごとの完了待ちグループと、ワーカー数ぶんの完了通知を作成
pub fn completion_group(
    role: WorkerRole,
    worker_count: usize,
) -> (CompletionGroup, Vec<CompletionSignal>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let signals = (0..worker_count)
        .map(|_| CompletionSignal { tx: tx.clone() })
        .collect();

    let group = CompletionGroup {
        role,
        expected: worker_count,
        rx,
    };
    (group, signals)
}

/// ワーカーが一度だけ送る完了通知
#[derive(Debug)]
pub struct CompletionSignal {
    tx: mpsc::UnboundedSender<WorkerReport>,
}

impl CompletionSignal {
    /// 完了を通知する（selfを消費するので二重通知はできない）
    pub fn complete(self, report: WorkerReport) {
        // 待機側が既に終了していても無視してよい
        let _ = self.tx.send(report);
    }
}

/// プール全体の完了待ち
#[derive(Debug)]
pub struct CompletionGroup {
    role: WorkerRole,
    expected: usize,
    rx: mpsc::UnboundedReceiver<WorkerReport>,
}

impl CompletionGroup {
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// 全ワーカーの完了通知を受信するまで待機
    ///
    /// ワーカー数0なら即座に返る。通知を送らずに終了したワーカーがいれば
    /// 永久に待たずに `WorkerLost` を返す。
    pub async fn wait(mut self) -> PipelineResult<Vec<WorkerReport>> {
        let mut reports = Vec::with_capacity(self.expected);

        while reports.len() < self.expected {
            match self.rx.recv().await {
                Some(report) => reports.push(report),
                None => {
                    return Err(PipelineError::worker_lost(
                        self.role,
                        self.expected,
                        reports.len(),
                    ))
                }
            }
        }

        reports.sort_by_key(|report| report.worker_id);
        Ok(reports)
    }
}
