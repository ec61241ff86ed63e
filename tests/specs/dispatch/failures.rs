//! Sink failure specs
//!
//! Verify that one misbehaving sink cannot starve the others.

use crate::prelude::*;
#[allow(unused_imports)]
use crate::prelude::assert_eq;

#[test]
fn failing_and_panicking_sinks_are_isolated() {
    let h = Harness::new();
    let failing = FailingSink::new();
    let panicking = PanickingSink::new();
    h.logger.add_sink(failing.clone());
    h.logger.add_sink(panicking.clone());
    let sink = h.observe();

    h.emit_numbered(3);

    assert_eq!(sink.sequences(), vec![0, 1, 2]);
    assert_eq!(failing.attempts(), 3);
    assert_eq!(panicking.attempts(), 3);
    assert_eq!(h.logger.stats().sink_failures, 6);
}

#[test]
fn failing_sink_does_not_affect_backlog() {
    let h = Harness::new();
    h.logger.add_sink(FailingSink::new());
    h.emit_numbered(2);

    assert_eq!(h.observe().sequences(), vec![0, 1]);
}

#[test]
fn rethrow_reports_first_failure_and_keeps_entry() {
    let h = Harness::with_config(LogConfig::new().with_rethrow(true));
    let early = h.observe();
    h.logger.add_sink(FailingSink::new());
    let late = h.observe();

    let err = h.logger.info("hello").unwrap_err();
    assert!(
        matches!(err, LogError::Sink { sequence: 0, .. }),
        "got {:?}",
        err
    );

    assert_eq!(early.sequences(), vec![0]);
    assert!(late.is_empty());
    assert_eq!(h.logger.backlog()[0].sequence(), 0);
}

#[test]
fn replay_failures_never_fail_add_sink() {
    let h = Harness::with_config(LogConfig::new().with_rethrow(true));
    h.emit_numbered(2);

    let failing = FailingSink::new();
    h.logger.add_sink(failing.clone());

    assert_eq!(failing.attempts(), 2);
}

#[test]
fn removed_sink_stops_receiving() {
    let h = Harness::new();
    let sink = MemorySink::new();
    let id = h.logger.add_sink(sink.clone());

    h.logger.info("one").unwrap();
    assert!(h.logger.remove_sink(id));
    assert!(!h.logger.remove_sink(id));
    h.logger.info("two").unwrap();

    assert_eq!(sink.messages(), vec!["one"]);
    assert_eq!(h.logger.sink_count(), 0);
}

#[test]
fn sink_recovering_from_failure_receives_later_entries() {
    let h = Harness::new();
    let sink = h.observe();

    sink.set_failing(true);
    h.logger.info("lost").unwrap();
    sink.set_failing(false);
    h.logger.info("kept").unwrap();

    assert_eq!(sink.messages(), vec!["kept"]);
    assert_eq!(h.logger.stats().sink_failures, 1);
}
