#![cfg(test)]
// End-to-end runtime smoke test (headless)
// - Starts trendboard::app::run in demo mode in the background.
// - Runs with TRENDBOARD_TEST_HEADLESS=1 to bypass raw TTY setup/restore.
// - Waits briefly to allow the workers to start and the first loads to land.
// - If it finishes, it must return Ok(()); otherwise the abort must be a clean cancel.

use std::time::Duration;

use trendboard::app::RunOptions;

#[tokio::test(flavor = "multi_thread")]
async fn runtime_smoke_headless_initializes_and_runs_without_panic() {
    unsafe {
        std::env::set_var("TRENDBOARD_TEST_HEADLESS", "1");
    }

    let handle = tokio::spawn(async {
        trendboard::app::run(RunOptions {
            demo: true,
            ..RunOptions::default()
        })
        .await
        .map_err(|e| e.to_string())
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    if handle.is_finished() {
        match handle.await {
            Ok(run_result) => {
                if let Err(e) = run_result {
                    panic!("app::run returned error early: {e}");
                }
                return;
            }
            Err(join_err) => panic!("app::run task panicked: {join_err}"),
        }
    }

    handle.abort();
    match handle.await {
        Ok(run_result) => {
            if let Err(e) = run_result {
                panic!("app::run completed with error on abort race: {e}");
            }
        }
        Err(join_err) => {
            assert!(
                join_err.is_cancelled(),
                "app::run join error should be cancellation, got: {join_err}"
            );
        }
    }
}
