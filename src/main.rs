// src/main.rs

use std::process::ExitCode;
use std::sync::Arc;

use dyncomp::exec::{OutputSink, StdoutSink};
use dyncomp::{cli, logging, run_and_report};

#[tokio::main]
async fn main() -> ExitCode {
    match run_main().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("dyncomp error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run_main() -> anyhow::Result<bool> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    let sink: Arc<dyn OutputSink> = Arc::new(StdoutSink);
    Ok(run_and_report(args, sink).await)
}
