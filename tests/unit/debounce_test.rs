//! Timing tests for the scroll debouncer, run on a paused tokio clock.

use std::time::Duration;

use tokio::time::{self, Instant};

use readpace::services::debounce::{Debouncer, QUIET_INTERVAL};

#[tokio::test(start_paused = true)]
async fn test_burst_delivers_only_last_value() {
    let mut debouncer = Debouncer::new();
    let start = Instant::now();

    for top in [10, 20, 30, 40] {
        debouncer.notify(top);
    }

    assert_eq!(debouncer.recv().await, Some(40));
    assert_eq!(start.elapsed(), QUIET_INTERVAL);
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_each_event_restarts_quiet_interval() {
    let mut debouncer = Debouncer::new();
    let start = Instant::now();

    debouncer.notify(1);
    time::sleep(Duration::from_millis(60)).await;
    debouncer.notify(2);
    time::sleep(Duration::from_millis(60)).await;
    assert!(debouncer.is_pending());
    debouncer.notify(3);

    assert_eq!(debouncer.recv().await, Some(3));
    assert_eq!(start.elapsed(), Duration::from_millis(220));
}

#[tokio::test(start_paused = true)]
async fn test_separate_bursts_each_deliver() {
    let mut debouncer = Debouncer::new();

    debouncer.notify("first");
    assert_eq!(debouncer.recv().await, Some("first"));

    time::sleep(Duration::from_millis(500)).await;
    debouncer.notify("second");
    assert_eq!(debouncer.recv().await, Some("second"));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_pending_value() {
    let mut debouncer = Debouncer::new();
    debouncer.notify(7);
    assert!(debouncer.is_pending());

    debouncer.cancel();
    assert!(!debouncer.is_pending());

    time::sleep(QUIET_INTERVAL * 2).await;
    assert_eq!(debouncer.settle().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_settle_flushes_pending_value() {
    let mut debouncer = Debouncer::with_interval(Duration::from_millis(250));
    let start = Instant::now();
    debouncer.notify(5);
    debouncer.notify(6);

    assert_eq!(debouncer.settle().await, Some(6));
    assert_eq!(start.elapsed(), Duration::from_millis(250));
    assert_eq!(debouncer.settle().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_default_interval() {
    let debouncer: Debouncer<u8> = Debouncer::default();
    assert_eq!(debouncer.interval(), Duration::from_millis(100));
    assert!(!debouncer.is_pending());
}
