use feed_rs::model::Entry;

use crate::domain::Item;

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Convert one parsed feed entry into the canonical item shape.
    ///
    /// A missing title becomes the empty string rather than dropping the
    /// entry, so empty-titled items share a single dedup bucket downstream.
    /// No entity decoding or markup stripping happens here; sanitizing for
    /// display is the presentation layer's job.
    pub fn normalize(&self, entry: Entry, source_label: &str) -> Item {
        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let link = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();
        let published_at = entry.published.or(entry.updated);

        Item {
            title,
            link,
            published_at,
            source_label: source_label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_rs::parser;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <item>
      <title>Test Item 1</title>
      <link>https://example.com/item1</link>
      <guid>item-1</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
    </item>
    <item>
      <link>https://example.com/item2</link>
      <guid>item-2</guid>
    </item>
  </channel>
</rss>"#;

    fn entries() -> Vec<Entry> {
        parser::parse(RSS_SAMPLE.as_bytes()).unwrap().entries
    }

    #[test]
    fn normalizes_title_link_and_date() {
        let normalizer = Normalizer::new();
        let item = normalizer.normalize(entries().remove(0), "r/stocks");

        assert_eq!(item.title, "Test Item 1");
        assert_eq!(item.link, "https://example.com/item1");
        assert_eq!(item.source_label, "r/stocks");
        assert!(item.published_at.is_some());
    }

    #[test]
    fn missing_title_becomes_empty_string() {
        let normalizer = Normalizer::new();
        let item = normalizer.normalize(entries().remove(1), "r/stocks");

        assert_eq!(item.title, "");
        assert_eq!(item.link, "https://example.com/item2");
    }

    #[test]
    fn missing_date_stays_absent() {
        let normalizer = Normalizer::new();
        let item = normalizer.normalize(entries().remove(1), "r/stocks");

        assert_eq!(item.published_at, None);
    }

    #[test]
    fn entities_are_left_alone() {
        let rss = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>F</title>
<item><title>Ben &amp; Jerry</title><link>https://example.com/1</link></item>
</channel></rss>"#;
        let entry = parser::parse(rss.as_bytes()).unwrap().entries.remove(0);

        let item = Normalizer::new().normalize(entry, "f");
        // The XML parser resolves &amp; but no further display decoding
        // happens at this layer.
        assert_eq!(item.title, "Ben & Jerry");
    }
}
