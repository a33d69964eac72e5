//! Last-value cell for license features.
//!
//! The licensing collaborator pushes `LicenseFeatures` records as the
//! deployment license changes; consumers read the most recent value at the
//! moment they need it. The cell starts empty, and an empty cell means no
//! capability is granted.

use skald_core::LicenseFeatures;
use tokio::sync::watch;

/// Create a connected feed/watch pair with no license value yet.
pub fn license_channel() -> (LicenseFeed, LicenseWatch) {
    let (tx, rx) = watch::channel(None);
    (LicenseFeed { tx }, LicenseWatch { rx })
}

/// Producer side, held by the licensing collaborator.
#[derive(Debug)]
pub struct LicenseFeed {
    tx: watch::Sender<Option<LicenseFeatures>>,
}

impl LicenseFeed {
    /// Publish a new current feature set, replacing any previous value.
    pub fn push(&self, features: LicenseFeatures) {
        // Receivers may all be gone during teardown; nothing to do then.
        let _ = self.tx.send(Some(features));
    }

    /// Create another watch on this feed.
    pub fn watch(&self) -> LicenseWatch {
        LicenseWatch {
            rx: self.tx.subscribe(),
        }
    }
}

/// Consumer side: a snapshot read of the latest pushed value.
#[derive(Debug, Clone)]
pub struct LicenseWatch {
    rx: watch::Receiver<Option<LicenseFeatures>>,
}

impl LicenseWatch {
    /// The most recently pushed feature set, if any has arrived yet.
    pub fn latest(&self) -> Option<LicenseFeatures> {
        *self.rx.borrow()
    }

    /// Whether audit logging is currently licensed. Fails closed while the
    /// cell is still empty.
    pub fn allows_audit_logging(&self) -> bool {
        self.latest()
            .map(|features| features.allow_audit_logging)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_fails_closed() {
        let (_feed, watch) = license_channel();
        assert_eq!(watch.latest(), None);
        assert!(!watch.allows_audit_logging());
    }

    #[test]
    fn last_value_wins() {
        let (feed, watch) = license_channel();

        feed.push(LicenseFeatures::all_allowed());
        assert!(watch.allows_audit_logging());

        feed.push(LicenseFeatures::default());
        assert!(!watch.allows_audit_logging());
    }

    #[test]
    fn watches_share_the_feed() {
        let (feed, first) = license_channel();
        let second = feed.watch();

        feed.push(LicenseFeatures::all_allowed());
        assert!(first.allows_audit_logging());
        assert!(second.allows_audit_logging());
    }
}
