//! Audit trail plugin lifecycle.
//!
//! `setup` derives the logging configuration, opens the event registration
//! point and spawns the gate task. The gate handles events one at a time
//! in delivery order: for each event it reads the latest license value and
//! forwards the event to the sink only when audit logging is allowed.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use skald_core::AuditTrailConfig;

use crate::error::AuditError;
use crate::event::AuditEvent;
use crate::license::LicenseWatch;
use crate::logging::{logging_config, LoggingConfig};
use crate::sink::{AuditSink, TracingSink};

/// The audit trail plugin.
pub struct AuditTrailPlugin {
    config: AuditTrailConfig,
    sink: Arc<dyn AuditSink>,
    logging: Option<watch::Sender<LoggingConfig>>,
    shutdown: Option<oneshot::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

/// Handle returned from `setup`, consumed by the host.
#[derive(Debug, Clone)]
pub struct AuditTrailHandle {
    events: mpsc::UnboundedSender<AuditEvent>,
    logging: watch::Receiver<LoggingConfig>,
}

impl AuditTrailHandle {
    /// Deliver an event to the gate.
    pub fn emit(&self, event: AuditEvent) -> Result<(), AuditError> {
        self.events
            .send(event)
            .map_err(|_| AuditError::TrailClosed)
    }

    /// The derived logging configuration, for registration with the
    /// logging subsystem. The receiver observes any future re-derivation.
    pub fn logging(&self) -> watch::Receiver<LoggingConfig> {
        self.logging.clone()
    }
}

impl AuditTrailPlugin {
    /// Create a plugin that forwards to the `tracing` subsystem.
    pub fn new(config: AuditTrailConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Create a plugin with a custom sink.
    pub fn with_sink(config: AuditTrailConfig, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            config,
            sink,
            logging: None,
            shutdown: None,
            worker: None,
        }
    }

    /// Start the gate and register the derived logging configuration.
    ///
    /// The license check is a per-event snapshot read of `license`; until
    /// the licensing collaborator pushes a first value the gate forwards
    /// nothing.
    pub fn setup(&mut self, license: LicenseWatch) -> Result<AuditTrailHandle, AuditError> {
        if self.worker.is_some() {
            return Err(AuditError::AlreadySetUp);
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (logging_tx, logging_rx) = watch::channel(logging_config(&self.config));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let worker = tokio::spawn(run_gate(
            events_rx,
            shutdown_rx,
            license,
            Arc::clone(&self.sink),
        ));

        self.logging = Some(logging_tx);
        self.shutdown = Some(shutdown_tx);
        self.worker = Some(worker);

        Ok(AuditTrailHandle {
            events: events_tx,
            logging: logging_rx,
        })
    }

    /// Stop accepting events and wait for already-queued ones to drain.
    pub async fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The worker may already be gone if every sender was dropped.
            let _ = shutdown.send(());
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
        self.logging = None;
    }
}

async fn run_gate(
    mut events: mpsc::UnboundedReceiver<AuditEvent>,
    mut shutdown: oneshot::Receiver<()>,
    license: LicenseWatch,
    sink: Arc<dyn AuditSink>,
) {
    let mut shutting_down = false;
    loop {
        tokio::select! {
            delivered = events.recv() => match delivered {
                Some(event) => deliver(&license, sink.as_ref(), event),
                None => break,
            },
            _ = &mut shutdown, if !shutting_down => {
                shutting_down = true;
                // Refuse further sends; queued events still drain.
                events.close();
            }
        }
    }
}

fn deliver(license: &LicenseWatch, sink: &dyn AuditSink, event: AuditEvent) {
    if license.allows_audit_logging() {
        sink.debug(&event.message, &event.fields);
    }
}
