//! Backlog replay specs
//!
//! Verify which entries a late-attached sink receives.

use crate::prelude::*;
#[allow(unused_imports)]
use crate::prelude::assert_eq;

#[test]
fn late_sink_receives_last_capacity_entries_in_order() {
    let h = Harness::with_config(LogConfig::new().with_capacity(3));
    h.emit_numbered(5);

    let sink = h.observe();

    assert_eq!(sink.sequences(), vec![2, 3, 4]);
    assert_eq!(sink.messages(), vec!["msg-2", "msg-3", "msg-4"]);
}

#[test]
fn late_sink_receives_everything_when_backlog_not_full() {
    let h = Harness::with_config(LogConfig::new().with_capacity(10));
    h.emit_numbered(4);

    assert_eq!(h.observe().sequences(), vec![0, 1, 2, 3]);
}

#[test]
fn sink_on_empty_logger_receives_nothing() {
    let h = Harness::new();
    assert!(h.observe().is_empty());
}

#[test]
fn replay_is_followed_by_live_entries() {
    let h = Harness::with_config(LogConfig::new().with_capacity(2));
    h.emit_numbered(3);

    let sink = h.observe();
    h.logger.warn("live").unwrap();

    assert_eq!(sink.sequences(), vec![1, 2, 3]);
    assert_eq!(sink.entries()[2].severity(), Severity::Warn);
}

#[test]
fn each_sink_replays_independently() {
    let h = Harness::with_config(LogConfig::new().with_capacity(2));
    h.emit_numbered(1);
    let first = h.observe();
    h.emit_numbered(2);
    let second = h.observe();

    assert_eq!(first.sequences(), vec![0, 1, 2]);
    assert_eq!(second.sequences(), vec![1, 2]);
}

#[test]
fn replayed_entries_keep_original_timestamps() {
    let h = Harness::new();
    h.logger.info("early").unwrap();
    let early = h.clock.utc_now();
    h.clock.advance(chrono::Duration::seconds(30));

    let sink = h.observe();

    assert_eq!(sink.entries()[0].timestamp(), early);
}
