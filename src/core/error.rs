// パイプライン専用のカスタムエラー型定義

use super::types::WorkerRole;
use std::path::PathBuf;
use thiserror::Error;

/// パイプライン固有のエラー型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("設定エラー: {message}")]
    Configuration { message: String },

    #[error("設定ファイルエラー: {} - {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("キューは既にクローズされています")]
    QueueClosed,

    #[error("ワーカー消失: {role} プールの完了通知が不足 (期待: {expected}, 受信: {received})")]
    WorkerLost {
        role: WorkerRole,
        expected: usize,
        received: usize,
    },

    #[error("タスクエラー: {source}")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl PipelineError {
    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// 設定ファイルエラーの作成
    pub fn config_file(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Self::ConfigFile {
            path: path.into(),
            source,
        }
    }

    /// ワーカー消失エラーの作成
    pub fn worker_lost(role: WorkerRole, expected: usize, received: usize) -> Self {
        Self::WorkerLost {
            role,
            expected,
            received,
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::Task { source }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Configuration { .. } | Self::ConfigFile { .. } => ErrorSeverity::High,
            Self::QueueClosed => ErrorSeverity::Medium,
            Self::WorkerLost { .. } | Self::Task { .. } => ErrorSeverity::Critical,
        }
    }

    /// エラーが回復可能かどうかを判定
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Configuration { .. } | Self::ConfigFile { .. } => false,
            Self::QueueClosed => true,
            Self::WorkerLost { .. } | Self::Task { .. } => false,
        }
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(source: tokio::task::JoinError) -> Self {
        Self::task(source)
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的 - システム停止レベル
    Critical,
}

impl ErrorSeverity {
    /// 重要度の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// パイプラインの結果型
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
