// ジョブ報告の具象実装

use crate::core::{Job, JobOrigin, JobReporter, PipelineSummary};
use async_trait::async_trait;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// 1つの書き込み先に行単位で出力する報告実装
///
/// 複数ワーカーからの出力が行の途中で混ざらないよう、書き込みはMutexで直列化する。
#[derive(Debug)]
pub struct WriterJobReporter<W> {
    writer: Mutex<W>,
}

/// 標準出力への報告実装
pub type ConsoleJobReporter = WriterJobReporter<io::Stdout>;

impl<W: Write + Send> WriterJobReporter<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
            tracing::warn!(%error, "failed to write job report");
        }
    }
}

impl<W: AsRef<[u8]>> WriterJobReporter<W> {
    /// 書き込まれた内容を行ごとに取得
    pub fn lines(&self) -> Vec<String> {
        let writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(writer.as_ref())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl ConsoleJobReporter {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for ConsoleJobReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<W: Write + Send> JobReporter for WriterJobReporter<W> {
    async fn report_produced(&self, worker_id: usize, job: &Job) {
        self.write_line(&format!("producer {worker_id} produced job {}", job.payload()));
    }

    async fn report_consumed(&self, worker_id: usize, job: &Job) {
        self.write_line(&format!("consumer {worker_id} consumed job {}", job.payload()));
    }

    async fn report_queue_closed(&self) {}

    async fn report_completed(&self, _summary: &PipelineSummary) {}
}

/// 何もしない報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpJobReporter;

impl NoOpJobReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl JobReporter for NoOpJobReporter {
    async fn report_produced(&self, _worker_id: usize, _job: &Job) {}

    async fn report_consumed(&self, _worker_id: usize, _job: &Job) {}

    async fn report_queue_closed(&self) {}

    async fn report_completed(&self, _summary: &PipelineSummary) {}
}

/// 記録された報告イベント
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    Produced {
        worker_id: usize,
        origin: JobOrigin,
        payload: String,
    },
    Consumed {
        worker_id: usize,
        origin: JobOrigin,
        payload: String,
    },
    QueueClosed,
    Completed(PipelineSummary),
}

/// 報告イベントを到着順にメモリへ記録する実装
#[derive(Debug, Default)]
pub struct MemoryJobReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl MemoryJobReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    /// (worker_id, payload) の一覧
    pub fn produced(&self) -> Vec<(usize, String)> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Produced {
                    worker_id, payload, ..
                } => Some((*worker_id, payload.clone())),
                _ => None,
            })
            .collect()
    }

    /// (worker_id, payload) の一覧
    pub fn consumed(&self) -> Vec<(usize, String)> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Consumed {
                    worker_id, payload, ..
                } => Some((*worker_id, payload.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn produced_origins(&self) -> Vec<JobOrigin> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Produced { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect()
    }

    pub fn consumed_origins(&self) -> Vec<JobOrigin> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Consumed { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect()
    }

    pub fn queue_closed(&self) -> bool {
        self.queue_closed_position().is_some()
    }

    pub fn queue_closed_position(&self) -> Option<usize> {
        self.lock()
            .iter()
            .position(|event| matches!(event, ReportEvent::QueueClosed))
    }

    pub fn last_produced_position(&self) -> Option<usize> {
        self.lock()
            .iter()
            .rposition(|event| matches!(event, ReportEvent::Produced { .. }))
    }

    pub fn completed(&self) -> Option<PipelineSummary> {
        self.lock().iter().find_map(|event| match event {
            ReportEvent::Completed(summary) => Some(summary.clone()),
            _ => None,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, event: ReportEvent) {
        self.lock().push(event);
    }
}

#[async_trait]
impl JobReporter for MemoryJobReporter {
    async fn report_produced(&self, worker_id: usize, job: &Job) {
        self.push(ReportEvent::Produced {
            worker_id,
            origin: job.origin(),
            payload: job.payload().to_string(),
        });
    }

    async fn report_consumed(&self, worker_id: usize, job: &Job) {
        self.push(ReportEvent::Consumed {
            worker_id,
            origin: job.origin(),
            payload: job.payload().to_string(),
        });
    }

    async fn report_queue_closed(&self) {
        self.push(ReportEvent::QueueClosed);
    }

    async fn report_completed(&self, summary: &PipelineSummary) {
        self.push(ReportEvent::Completed(summary.clone()));
    }
}
