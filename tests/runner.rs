#![cfg(unix)]

mod common;
use crate::common::sink::RecordingSink;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use dyncomp::errors::DyncompError;
use dyncomp::exec::{execute, CommandRunner, RunnerOptions};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn forwards_stdout_lines() -> TestResult {
    with_timeout(async {
        init_tracing();

        let sink = Arc::new(RecordingSink::new());
        execute("echo 'EXPECTED TEST OUTPUT'", sink.clone()).await?;

        assert_eq!(sink.lines(), vec!["EXPECTED TEST OUTPUT".to_string()]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn keeps_line_order_within_a_stream() -> TestResult {
    with_timeout(async {
        init_tracing();

        let sink = Arc::new(RecordingSink::new());
        execute("sh -c 'for i in 1 2 3 4 5; do echo $i; done'", sink.clone()).await?;

        assert_eq!(sink.lines(), vec!["1", "2", "3", "4", "5"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn forwards_both_streams() -> TestResult {
    with_timeout(async {
        init_tracing();

        let sink = Arc::new(RecordingSink::new());
        execute("sh -c 'echo out; echo err 1>&2'", sink.clone()).await?;

        let mut lines = sink.lines();
        lines.sort();
        assert_eq!(lines, vec!["err", "out"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn only_first_pipeline_stage_runs() -> TestResult {
    with_timeout(async {
        init_tracing();

        let sink = Arc::new(RecordingSink::new());
        execute("echo a b c | wc -l", sink.clone()).await?;

        assert_eq!(sink.lines(), vec!["a b c"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn missing_executable_is_run_failure_without_output() -> TestResult {
    with_timeout(async {
        init_tracing();

        let sink = Arc::new(RecordingSink::new());
        let err = execute("unexistent_dyncomp_command --flag", sink.clone())
            .await
            .unwrap_err();

        match &err {
            DyncompError::RunningCommand { command, reason } => {
                assert_eq!(command, "unexistent_dyncomp_command --flag");
                assert_eq!(
                    reason,
                    "exec: \"unexistent_dyncomp_command\": executable file not found in $PATH"
                );
            }
            other => panic!("expected RunningCommand, got {:?}", other),
        }
        assert!(sink.is_empty());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn non_zero_exit_is_run_failure_and_keeps_output() -> TestResult {
    with_timeout(async {
        init_tracing();

        let sink = Arc::new(RecordingSink::new());
        let err = execute("sh -c 'echo before; exit 3'", sink.clone())
            .await
            .unwrap_err();

        match &err {
            DyncompError::RunningCommand { reason, .. } => {
                assert!(reason.contains('3'), "unexpected reason: {reason}");
            }
            other => panic!("expected RunningCommand, got {:?}", other),
        }
        assert_eq!(sink.lines(), vec!["before"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn syntax_error_is_build_failure() -> TestResult {
    with_timeout(async {
        init_tracing();

        let sink = Arc::new(RecordingSink::new());
        let err = execute("echo 'oops", sink.clone()).await.unwrap_err();

        assert!(
            matches!(err, DyncompError::BuildingCommand { .. }),
            "got {:?}",
            err
        );
        assert!(sink.is_empty());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn timeout_kills_long_running_command() -> TestResult {
    with_timeout(async {
        init_tracing();

        let runner = CommandRunner::new(RunnerOptions {
            timeout: Some(Duration::from_millis(200)),
        });
        let sink = Arc::new(RecordingSink::new());
        let err = runner.run("sleep 10", sink.clone()).await.unwrap_err();

        match &err {
            DyncompError::RunningCommand { reason, .. } => {
                assert!(reason.contains("timed out"), "unexpected reason: {reason}");
            }
            other => panic!("expected RunningCommand, got {:?}", other),
        }
        Ok(())
    })
    .await
}

#[tokio::test]
async fn timeout_does_not_affect_quick_commands() -> TestResult {
    with_timeout(async {
        init_tracing();

        let runner = CommandRunner::new(RunnerOptions {
            timeout: Some(Duration::from_secs(3)),
        });
        let sink = Arc::new(RecordingSink::new());
        runner.run("echo quick", sink.clone()).await?;

        assert_eq!(sink.lines(), vec!["quick"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn nothing_reaches_sink_after_timeout_returns() -> TestResult {
    with_timeout(async {
        init_tracing();

        let runner = CommandRunner::new(RunnerOptions {
            timeout: Some(Duration::from_millis(200)),
        });
        let sink = Arc::new(RecordingSink::new());
        // The background subshell outlives `sh` and keeps the pipes open.
        let err = runner
            .run("sh -c '(sleep 0.6; echo late) & wait'", sink.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, DyncompError::RunningCommand { .. }), "got {:?}", err);

        let at_return = sink.lines();
        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(sink.lines(), at_return);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn drains_large_output_on_both_streams() -> TestResult {
    with_timeout(async {
        init_tracing();

        let sink = Arc::new(RecordingSink::new());
        // Each stream carries well over a pipe buffer's worth.
        execute(
            "sh -c 'yes o | head -n 100000; yes e | head -n 100000 1>&2'",
            sink.clone(),
        )
        .await?;

        let lines = sink.lines();
        assert_eq!(lines.iter().filter(|l| *l == "o").count(), 100_000);
        assert_eq!(lines.iter().filter(|l| *l == "e").count(), 100_000);
        assert_eq!(lines.len(), 200_000);
        Ok(())
    })
    .await
}
