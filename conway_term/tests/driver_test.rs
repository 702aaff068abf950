//! End-to-end runs of the tick loop against an in-memory terminal.

mod common;

use std::time::Duration;

use common::{FrameRefusingBuf, SharedBuf};
use conway_term::{Config, Driver, EdgePolicy, RenderError, RuleSet};

fn config(generations: u64) -> Config {
    Config {
        width: 6,
        length: 8,
        interval: Duration::ZERO,
        seed: Some(1234),
        generations: Some(generations),
        ..Config::default()
    }
}

#[tokio::test]
async fn run_presents_every_generation() {
    let out = SharedBuf::default();
    let driver = Driver::new(config(3), out.clone());
    driver.run().await.unwrap();

    let written = out.contents();
    assert_eq!(written.matches("\u{1b}[2J").count(), 1, "screen cleared once");
    // Seed frame plus one per generation.
    assert_eq!(written.matches("██").count(), 4 * 6 * 8);
    assert_eq!(written.matches('\n').count(), 4 * 6);
}

#[tokio::test]
async fn run_returns_the_last_generation() {
    let expected = {
        let mut grid = Driver::new(config(5), Vec::new()).seed();
        for _ in 0..5 {
            grid = grid.advance();
        }
        grid
    };

    let last = Driver::new(config(5), Vec::new()).run().await.unwrap();
    assert_eq!(*last, expected);
}

#[tokio::test]
async fn zero_generations_only_draws_the_seed() {
    let out = SharedBuf::default();
    let driver = Driver::new(config(0), out.clone());
    let seed = driver.seed();

    let last = driver.run().await.unwrap();
    assert_eq!(*last, seed);
    assert_eq!(out.contents().matches("██").count(), 6 * 8);
}

#[tokio::test]
async fn bounded_runs_keep_the_border_dead() {
    let config = Config {
        edges: EdgePolicy::Bounded,
        rule: RuleSet::day_and_night(),
        ..config(10)
    };
    let last = Driver::new(config, Vec::new()).run().await.unwrap();
    for (row, cells) in last.rows().enumerate() {
        for (col, &alive) in cells.iter().enumerate() {
            if row == 0 || col == 0 || row == 5 || col == 7 {
                assert!(!alive, "border cell ({row}, {col}) alive");
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn run_terminates_the_terminal_session() {
    let out = SharedBuf::default();
    Driver::new(config(2), out.clone()).run().await.unwrap();
    // Cursor shown again after the last frame.
    assert!(out.contents().ends_with("\u{1b}[?25h"));
}

#[tokio::test]
async fn shutdown_finishes_the_frame_before_restoring() {
    let out = SharedBuf::default();
    let config = Config { generations: None, ..config(0) };
    let driver = Driver::new(config, out.clone());
    let seed = driver.seed();

    let last = driver.run_until(std::future::ready(())).await.unwrap();
    assert_eq!(*last, seed);

    let written = out.contents();
    assert_eq!(written.matches("██").count(), 6 * 8);
    assert!(written.ends_with("\u{1b}[?25h"));
}

#[tokio::test]
async fn render_failure_restores_the_cursor() {
    let out = FrameRefusingBuf::default();
    let result = Driver::new(config(3), out.clone()).run().await;

    assert!(matches!(result, Err(RenderError::Io(_))));
    let written = out.contents();
    assert!(written.contains("\u{1b}[?25l"), "cursor hidden at start");
    assert!(written.ends_with("\u{1b}[?25h"), "{written:?}");
}
