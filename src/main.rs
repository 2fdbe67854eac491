//! email_pipeline: 有界キューを挟んだ Producer/Consumer パイプライン
//!
//! ログ: `RUST_LOG=email_pipeline=debug` でワーカーの開始・終了などを stderr に出す。

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use email_pipeline::cli::{execute_run, Cli};
use email_pipeline::ConsoleJobReporter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG が優先。--verbose なら debug、それ以外は warn
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "email_pipeline=debug"
        } else {
            "email_pipeline=warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("❌ エラー: {error}");
            std::process::exit(1);
        }
    };

    match execute_run(config, Arc::new(ConsoleJobReporter::new()), cli.summary_json).await {
        Ok(_) => Ok(()),
        Err(error) => {
            eprintln!("❌ エラー: {error}");
            std::process::exit(1);
        }
    }
}
