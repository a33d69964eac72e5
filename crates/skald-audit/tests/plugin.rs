//! Plugin lifecycle and gating tests.
//!
//! The gate is exercised end to end through a recording sink: events go in
//! through the handle, `stop` drains the queue, and the sink shows exactly
//! what was forwarded.

use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use skald_audit::{
    license_channel, AuditError, AuditEvent, AuditSink, AuditTrailPlugin, LogLevel, APPENDER_NAME,
};
use skald_core::{AppenderConfig, AuditTrailConfig, LayoutConfig, LicenseFeatures, LoggerToggle};

#[derive(Default)]
struct RecordingSink {
    entries: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl RecordingSink {
    fn entries(&self) -> Vec<(String, Map<String, Value>)> {
        self.entries.lock().unwrap().clone()
    }
}

impl AuditSink for RecordingSink {
    fn debug(&self, message: &str, fields: &Map<String, Value>) {
        self.entries
            .lock()
            .unwrap()
            .push((message.to_string(), fields.clone()));
    }
}

fn config(enabled: bool, appender: Option<AppenderConfig>) -> AuditTrailConfig {
    AuditTrailConfig {
        logger: LoggerToggle { enabled },
        appender,
    }
}

/// Let the gate task run until its queue is empty.
async fn drain_pending() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn logs_to_audit_trail_if_license_allows() {
    let sink = Arc::new(RecordingSink::default());
    let (feed, watch) = license_channel();
    feed.push(LicenseFeatures::all_allowed());

    let mut plugin = AuditTrailPlugin::with_sink(config(true, None), Arc::clone(&sink) as Arc<dyn AuditSink>);
    let handle = plugin.setup(watch).unwrap();

    handle
        .emit(AuditEvent::new("MESSAGE").with_field("other", "OTHER"))
        .unwrap();
    plugin.stop().await;

    let mut expected_fields = Map::new();
    expected_fields.insert("other".to_string(), Value::from("OTHER"));
    assert_eq!(sink.entries(), vec![("MESSAGE".to_string(), expected_fields)]);
}

#[tokio::test]
async fn does_not_log_if_license_does_not_allow() {
    let sink = Arc::new(RecordingSink::default());
    let (feed, watch) = license_channel();
    feed.push(LicenseFeatures {
        allow_audit_logging: false,
        ..LicenseFeatures::all_allowed()
    });

    let mut plugin = AuditTrailPlugin::with_sink(config(true, None), Arc::clone(&sink) as Arc<dyn AuditSink>);
    let handle = plugin.setup(watch).unwrap();

    handle
        .emit(AuditEvent::new("MESSAGE").with_field("other", "OTHER"))
        .unwrap();
    plugin.stop().await;

    assert!(sink.entries().is_empty());
}

#[tokio::test]
async fn fails_closed_before_the_first_license_value() {
    let sink = Arc::new(RecordingSink::default());
    let (_feed, watch) = license_channel();

    let mut plugin = AuditTrailPlugin::with_sink(config(true, None), Arc::clone(&sink) as Arc<dyn AuditSink>);
    let handle = plugin.setup(watch).unwrap();

    handle.emit(AuditEvent::new("too early")).unwrap();
    plugin.stop().await;

    assert!(sink.entries().is_empty());
}

#[tokio::test]
async fn license_change_applies_to_the_next_event() {
    let sink = Arc::new(RecordingSink::default());
    let (feed, watch) = license_channel();
    feed.push(LicenseFeatures::all_allowed());

    let mut plugin = AuditTrailPlugin::with_sink(config(true, None), Arc::clone(&sink) as Arc<dyn AuditSink>);
    let handle = plugin.setup(watch).unwrap();

    handle.emit(AuditEvent::new("while licensed")).unwrap();
    drain_pending().await;

    feed.push(LicenseFeatures::default());
    handle.emit(AuditEvent::new("after downgrade")).unwrap();
    plugin.stop().await;

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "while licensed");
}

#[tokio::test]
async fn license_upgrade_applies_to_the_next_event() {
    let sink = Arc::new(RecordingSink::default());
    let (feed, watch) = license_channel();
    feed.push(LicenseFeatures::default());

    let mut plugin = AuditTrailPlugin::with_sink(config(true, None), Arc::clone(&sink) as Arc<dyn AuditSink>);
    let handle = plugin.setup(watch).unwrap();

    handle.emit(AuditEvent::new("while unlicensed")).unwrap();
    drain_pending().await;

    feed.push(LicenseFeatures::all_allowed());
    handle.emit(AuditEvent::new("after upgrade")).unwrap();
    plugin.stop().await;

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "after upgrade");
}

#[tokio::test]
async fn events_drain_in_delivery_order() {
    let sink = Arc::new(RecordingSink::default());
    let (feed, watch) = license_channel();
    feed.push(LicenseFeatures::all_allowed());

    let mut plugin = AuditTrailPlugin::with_sink(config(true, None), Arc::clone(&sink) as Arc<dyn AuditSink>);
    let handle = plugin.setup(watch).unwrap();

    for n in 0..5 {
        handle.emit(AuditEvent::new(format!("event {n}"))).unwrap();
    }
    plugin.stop().await;

    let messages: Vec<_> = sink.entries().into_iter().map(|(m, _)| m).collect();
    assert_eq!(
        messages,
        (0..5).map(|n| format!("event {n}")).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn emit_after_stop_is_rejected() {
    let (feed, watch) = license_channel();
    feed.push(LicenseFeatures::all_allowed());

    let mut plugin = AuditTrailPlugin::new(config(true, None));
    let handle = plugin.setup(watch).unwrap();
    plugin.stop().await;

    let err = handle.emit(AuditEvent::new("late")).unwrap_err();
    assert!(matches!(err, AuditError::TrailClosed));
}

#[tokio::test]
async fn setup_twice_is_an_error() {
    let (feed, watch) = license_channel();
    let mut plugin = AuditTrailPlugin::new(config(true, None));

    let _handle = plugin.setup(feed.watch()).unwrap();
    let err = plugin.setup(watch).unwrap_err();
    assert!(matches!(err, AuditError::AlreadySetUp));

    plugin.stop().await;
}

#[tokio::test]
async fn setup_registers_the_derived_logging_configuration() {
    let (_feed, watch) = license_channel();
    let mut plugin = AuditTrailPlugin::new(config(false, None));
    let handle = plugin.setup(watch).unwrap();

    let logging = handle.logging();
    let derived = logging.borrow();
    assert!(derived.loggers.iter().all(|l| l.level == LogLevel::Off));
    assert_eq!(
        derived.appenders.get(APPENDER_NAME),
        Some(&AppenderConfig::Console {
            layout: LayoutConfig::Pattern { highlight: true },
        })
    );
    drop(derived);

    plugin.stop().await;
}

#[tokio::test]
async fn configured_appender_reaches_the_logging_configuration() {
    let (_feed, watch) = license_channel();
    let appender = AppenderConfig::File {
        path: "/path/to/file.txt".into(),
    };
    let mut plugin = AuditTrailPlugin::new(config(true, Some(appender.clone())));
    let handle = plugin.setup(watch).unwrap();

    let logging = handle.logging();
    let derived = logging.borrow();
    assert_eq!(derived.appenders.len(), 1);
    assert_eq!(derived.appenders.get(APPENDER_NAME), Some(&appender));
    assert!(derived.loggers.iter().all(|l| l.level == LogLevel::Debug));
    drop(derived);

    plugin.stop().await;
}
