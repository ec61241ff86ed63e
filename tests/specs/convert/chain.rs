//! Converter specs
//!
//! Verify how attached payloads are rewritten before they are stored.

use crate::prelude::*;
#[allow(unused_imports)]
use crate::prelude::assert_eq;
use std::fmt;

#[derive(Debug)]
struct Outer(Inner);

#[derive(Debug)]
struct Inner;

impl fmt::Display for Outer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request failed")
    }
}

impl std::error::Error for Outer {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl fmt::Display for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection reset")
    }
}

impl std::error::Error for Inner {}

#[test]
fn errors_become_records_before_storage() {
    let h = Harness::new();
    h.logger.add_converter(ErrorRecordConverter);
    let sink = h.observe();

    h.logger
        .error(Event::message("upload").error(&Outer(Inner)))
        .unwrap();

    let entry = &sink.entries()[0];
    let Payload::Record(record) = &entry.data()[0] else {
        panic!("expected record, got {:?}", entry.data());
    };
    assert!(record.name.ends_with("Outer"), "name: {}", record.name);
    assert_eq!(record.field("message"), Some(&json!("request failed")));
    assert_eq!(record.field("chain"), Some(&json!(["connection reset"])));
}

#[test]
fn converters_chain_until_no_one_accepts() {
    let h = Harness::new();
    h.logger.add_converter(ErrorRecordConverter);
    h.logger.add_converter(FnConverter::new(
        "record-name",
        PayloadKind::Record,
        |p: &Payload| match p {
            Payload::Record(r) => Ok(Payload::Text(format!("record {}", r.name))),
            other => Err(ConvertError::Unsupported(other.kind())),
        },
    ));
    let sink = h.observe();

    h.logger
        .info(Event::new().attach(ErrorPayload::new("Timeout", "took too long")))
        .unwrap();

    assert_eq!(
        sink.entries()[0].data().to_vec(),
        vec![Payload::from("record Timeout")]
    );
}

#[test]
fn failing_converter_passes_original_payload() {
    let h = Harness::new();
    h.logger.add_converter(FnConverter::new(
        "broken",
        PayloadKind::Text,
        |_: &Payload| Err(ConvertError::Failed("nope".to_string())),
    ));
    let sink = h.observe();

    assert_eq!(h.logger.info(Event::new().attach("raw")).unwrap(), Some(0));

    assert_eq!(sink.entries()[0].data().to_vec(), vec![Payload::from("raw")]);
    assert_eq!(h.logger.stats().converter_failures, 1);
}

#[test]
fn failing_converter_in_rethrow_mode_still_writes_entry() {
    let h = Harness::with_config(LogConfig::new().with_rethrow(true));
    h.logger.add_converter(FnConverter::new(
        "broken",
        PayloadKind::Text,
        |_: &Payload| Err(ConvertError::Failed("nope".to_string())),
    ));
    let sink = h.observe();

    let err = h.logger.info(Event::new().attach("raw")).unwrap_err();
    assert!(
        matches!(err, LogError::Converter { ref converter, .. } if converter == "broken"),
        "got {:?}",
        err
    );
    assert_eq!(sink.entries()[0].data().to_vec(), vec![Payload::from("raw")]);

    assert_eq!(h.logger.info("next").unwrap(), Some(1));
    assert_eq!(sink.sequences(), vec![0, 1]);
    let backlog: Vec<i64> = h.logger.backlog().iter().map(|e| e.sequence()).collect();
    assert_eq!(backlog, vec![0, 1]);
}

#[test]
fn looping_converters_are_bounded() {
    let h = Harness::with_config(LogConfig::new().with_max_conversion_steps(5));
    h.logger.add_converter(FnConverter::new(
        "echo",
        PayloadKind::Text,
        |p: &Payload| Ok(p.clone()),
    ));
    let sink = h.observe();

    assert_eq!(h.logger.info(Event::new().attach("spin")).unwrap(), Some(0));

    assert_eq!(sink.entries()[0].data().to_vec(), vec![Payload::from("spin")]);
    assert_eq!(h.logger.stats().conversion_overflows, 1);
}

#[test]
fn removed_converter_no_longer_applies() {
    let h = Harness::new();
    let id = h.logger.add_converter(ErrorRecordConverter);
    assert!(h.logger.remove_converter(id));
    let sink = h.observe();

    h.logger
        .info(Event::new().attach(ErrorPayload::new("E", "m")))
        .unwrap();

    assert_eq!(sink.entries()[0].data()[0].kind(), PayloadKind::Error);
}
