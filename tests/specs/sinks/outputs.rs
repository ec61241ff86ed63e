//! Sink output specs
//!
//! Verify the bundled sinks end to end.

use crate::prelude::*;
#[allow(unused_imports)]
use crate::prelude::assert_eq;
use ringlog_sinks::{read_json_lines, ChannelSink, EntryFormat, FilterSink, WriterSink};
use tempfile::TempDir;

#[test]
fn json_file_sink_captures_replay_and_live_entries() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    let h = Harness::new();
    h.logger.info("before").unwrap();

    h.logger.add_sink(WriterSink::append(&path, EntryFormat::Json).unwrap());
    h.logger.error(Event::message("failed {0}").arg("job-7")).unwrap();

    let entries = read_json_lines(&path).unwrap();
    let sequences: Vec<i64> = entries.iter().map(|e| e.sequence()).collect();
    assert_eq!(sequences, vec![0, 1]);
    assert_eq!(entries[1].arguments().to_vec(), vec![json!("job-7")]);
}

#[test]
fn filter_sink_narrows_one_observer() {
    let h = Harness::new();
    let all = h.observe();
    let errors = MemorySink::new();
    h.logger.add_sink(FilterSink::new(errors.clone(), Severity::Error));

    h.logger.info("i").unwrap();
    h.logger.error("e").unwrap();

    assert_eq!(all.messages(), vec!["i", "e"]);
    assert_eq!(errors.messages(), vec!["e"]);
}

#[tokio::test]
async fn channel_sink_feeds_async_consumer() {
    let h = Harness::new();
    h.logger.info("replayed").unwrap();

    let (sink, mut rx) = ChannelSink::new();
    h.logger.add_sink(sink);
    h.logger.warn("live").unwrap();

    assert_eq!(rx.recv().await.unwrap().message(), Some("replayed"));
    assert_eq!(rx.recv().await.unwrap().message(), Some("live"));
}

#[test]
fn closed_channel_counts_as_sink_failure() {
    let h = Harness::new();
    let (sink, rx) = ChannelSink::new();
    h.logger.add_sink(sink);
    drop(rx);

    assert_eq!(h.logger.info("nobody").unwrap(), Some(0));
    assert_eq!(h.logger.stats().sink_failures, 1);
}
