use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod record {
    use super::*;

    /// An income or expense entry as stored by the server.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Record {
        pub id: String,
        /// Should be > 0, but the server is the sole validator.
        pub amount: f64,
        /// RFC3339 timestamp assigned by the server on creation.
        ///
        /// Serialized as `createdAt` in JSON.
        #[serde(rename = "createdAt")]
        pub created_at: DateTime<Utc>,
        /// Descriptive fields (title, category, note, ...) the store does not
        /// interpret. Passed through as-is.
        #[serde(flatten)]
        pub extra: Map<String, Value>,
    }

    /// Payload for creating a record. The server assigns `id` and `createdAt`.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct RecordNew {
        pub amount: f64,
        #[serde(flatten)]
        pub extra: Map<String, Value>,
    }
}

#[cfg(test)]
mod tests {
    use super::record::Record;

    #[test]
    fn record_round_trips_created_at_and_extras() {
        let raw = r#"{
            "id": "64f0",
            "amount": 12.5,
            "createdAt": "2026-03-01T09:30:00Z",
            "title": "salary",
            "category": "work"
        }"#;

        let record: Record = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, "64f0");
        assert_eq!(record.amount, 12.5);
        assert_eq!(record.extra.get("title").unwrap(), "salary");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back.get("createdAt").unwrap(), "2026-03-01T09:30:00Z");
        assert_eq!(back.get("category").unwrap(), "work");
    }
}
