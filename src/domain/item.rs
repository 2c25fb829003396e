use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized news entry. Immutable once constructed; a fresh set is
/// produced on every refresh pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Entry headline. Doubles as the dedup key: two items are duplicates
    /// iff their titles are byte-for-byte equal. May be empty when the
    /// source omitted it.
    pub title: String,
    /// Target URL for display. Not required to be unique.
    pub link: String,
    /// Publish time, when the source provided one.
    pub published_at: Option<DateTime<Utc>>,
    /// Which configured source this item came from. Display-only.
    pub source_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn undated_sorts_below_any_dated() {
        let dated = Some(Utc.with_ymd_and_hms(1971, 1, 1, 0, 0, 0).unwrap());
        let undated: Option<DateTime<Utc>> = None;
        assert!(undated < dated);
    }

    #[test]
    fn serializes_without_date() {
        let item = Item {
            title: "Hello".into(),
            link: "https://example.com/1".into(),
            published_at: None,
            source_label: "test".into(),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"published_at\":null"));
    }
}
