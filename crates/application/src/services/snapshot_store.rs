//! Latest published snapshot
//!
//! The update pipeline swaps in a fully built [`PublishedSnapshot`]; readers
//! clone the `Arc` and never observe a partial value.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{ComposedMessage, WeatherSnapshot};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{Map, Value};

use super::report::WeatherReport;

/// RFC 1123 in GMT, e.g. `Sat, 01 Jun 2024 18:15:00 GMT`
const RFC1123: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A snapshot together with the message generated for it
#[derive(Debug, Clone)]
pub struct PublishedSnapshot {
    pub snapshot: Arc<WeatherSnapshot>,
    pub message: ComposedMessage,
    pub report: WeatherReport,
    pub published_at: DateTime<Utc>,
}

/// JSON document served to readers
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub city: String,
    pub country: String,
    pub message: String,
    pub timestamp: String,
    pub data: Map<String, Value>,
}

impl PublishedSnapshot {
    pub fn new(snapshot: Arc<WeatherSnapshot>, message: ComposedMessage) -> Self {
        let report = WeatherReport::from_snapshot(&snapshot);
        Self {
            snapshot,
            message,
            report,
            published_at: Utc::now(),
        }
    }

    pub fn city(&self) -> &str {
        self.snapshot.place().name()
    }

    pub fn country(&self) -> &str {
        self.snapshot.place().country_code()
    }

    #[must_use]
    pub fn to_document(&self) -> ReportDocument {
        ReportDocument {
            city: self.city().to_string(),
            country: self.country().to_string(),
            message: self.message.text.clone(),
            timestamp: self.published_at.format(RFC1123).to_string(),
            data: self.report.to_json_map(),
        }
    }
}

/// Single-slot store for the latest publication
#[derive(Debug, Default)]
pub struct SnapshotStore {
    latest: RwLock<Option<Arc<PublishedSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<Arc<PublishedSnapshot>> {
        self.latest.read().clone()
    }

    /// Replace the published value
    pub fn publish(&self, published: PublishedSnapshot) -> Arc<PublishedSnapshot> {
        let published = Arc::new(published);
        *self.latest.write() = Some(Arc::clone(&published));
        published
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use domain::DedupState;

    use super::*;
    use crate::services::test_support::snapshot_at;

    fn published(hour: u32, text: &str) -> PublishedSnapshot {
        PublishedSnapshot::new(snapshot_at(hour, 15), ComposedMessage::new(text, DedupState::Generated))
    }

    #[test]
    fn empty_store() {
        assert!(SnapshotStore::new().latest().is_none());
    }

    #[test]
    fn publish_replaces_latest() {
        let store = SnapshotStore::new();
        let first = store.publish(published(13, "first"));
        let reader_copy = store.latest().unwrap();

        store.publish(published(14, "second"));

        assert_eq!(store.latest().unwrap().message.text, "second");
        // Earlier readers keep their value
        assert_eq!(reader_copy.message.text, "first");
        assert!(Arc::ptr_eq(&first, &reader_copy));
    }

    #[test]
    fn document_shape() {
        let mut entry = published(14, "Light rain in New York.");
        entry.published_at = Utc.with_ymd_and_hms(2024, 6, 1, 18, 15, 0).unwrap();

        let doc = entry.to_document();
        assert_eq!(doc.city, "New York");
        assert_eq!(doc.country, "US");
        assert_eq!(doc.message, "Light rain in New York.");
        assert_eq!(doc.timestamp, "Sat, 01 Jun 2024 18:15:00 GMT");
        assert_eq!(doc.data["condition"], Value::String("Rain".into()));

        let json = serde_json::to_value(&doc).unwrap();
        for key in ["city", "country", "message", "timestamp", "data"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
