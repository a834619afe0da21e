//! Custom Search response shapes and their mapping onto [`SearchResult`].
//!
//! Every field of an item is optional on the wire; missing text fields become
//! empty strings and missing images fall back to [`PLACEHOLDER_IMAGE`].
//! Items are mapped one at a time: a field of the wrong type is treated as
//! absent and never rejects its neighbours.

use crate::search::{SearchError, SearchResult, PLACEHOLDER_IMAGE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Top-level JSON body returned by the provider
#[derive(Debug, Default, Deserialize)]
pub struct ProviderResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub items: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderItem {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub snippet: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pagemap: Option<PageMap>,
}

/// Structured page metadata attached to an item
#[derive(Debug, Default, Deserialize)]
pub struct PageMap {
    #[serde(default, deserialize_with = "lenient")]
    pub cse_image: Option<Vec<ImageRef>>,
    #[serde(default, deserialize_with = "lenient")]
    pub cse_thumbnail: Option<Vec<ImageRef>>,
    #[serde(default, deserialize_with = "lenient")]
    pub metatags: Option<Vec<HashMap<String, Value>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageRef {
    #[serde(default, deserialize_with = "lenient")]
    pub src: Option<String>,
}

/// Deserialize a field, mapping a value of the wrong shape to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl ProviderItem {
    /// Read one raw item; anything that is not an object maps to an empty item
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Parse a response body
pub fn parse_response(body: &str) -> Result<ProviderResponse, SearchError> {
    Ok(serde_json::from_str(body)?)
}

/// Map provider items onto results, preserving order.
///
/// Returns `None` when the body has no items at all (absent or empty).
pub fn normalize(response: ProviderResponse) -> Option<Vec<SearchResult>> {
    let items = response.items.filter(|items| !items.is_empty())?;
    Some(
        items
            .into_iter()
            .map(ProviderItem::from_value)
            .map(normalize_item)
            .collect(),
    )
}

fn normalize_item(item: ProviderItem) -> SearchResult {
    let image = extract_image(&item)
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string();

    SearchResult {
        title: item.title.unwrap_or_default(),
        link: item.link.unwrap_or_default(),
        snippet: item.snippet.unwrap_or_default(),
        image: Some(image),
    }
}

/// First usable image: `cse_image`, then `cse_thumbnail`, then `og:image`
pub fn extract_image(item: &ProviderItem) -> Option<&str> {
    let pagemap = item.pagemap.as_ref()?;

    first_src(pagemap.cse_image.as_deref())
        .or_else(|| first_src(pagemap.cse_thumbnail.as_deref()))
        .or_else(|| {
            pagemap
                .metatags
                .as_deref()
                .and_then(|tags| tags.first())
                .and_then(|tags| tags.get("og:image"))
                .and_then(|value| value.as_str())
                .filter(|url| !url.is_empty())
        })
}

fn first_src(images: Option<&[ImageRef]>) -> Option<&str> {
    images?
        .first()?
        .src
        .as_deref()
        .filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> ProviderItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_thumbnail_image_wins_over_og_image() {
        let item = item(json!({
            "title": "t",
            "pagemap": {
                "cse_thumbnail": [{"src": "https://img/thumb.jpg"}],
                "metatags": [{"og:image": "https://img/og.jpg"}]
            }
        }));
        assert_eq!(extract_image(&item), Some("https://img/thumb.jpg"));
    }

    #[test]
    fn test_cse_image_wins_over_thumbnail() {
        let item = item(json!({
            "pagemap": {
                "cse_image": [{"src": "https://img/full.jpg"}],
                "cse_thumbnail": [{"src": "https://img/thumb.jpg"}]
            }
        }));
        assert_eq!(extract_image(&item), Some("https://img/full.jpg"));
    }

    #[test]
    fn test_og_image_used_last() {
        let item = item(json!({
            "pagemap": {
                "cse_image": [],
                "metatags": [{"og:image": "https://img/og.jpg", "og:title": "x"}]
            }
        }));
        assert_eq!(extract_image(&item), Some("https://img/og.jpg"));
    }

    #[test]
    fn test_empty_src_is_skipped() {
        let item = item(json!({
            "pagemap": {
                "cse_image": [{"src": ""}],
                "cse_thumbnail": [{"src": "https://img/thumb.jpg"}]
            }
        }));
        assert_eq!(extract_image(&item), Some("https://img/thumb.jpg"));
    }

    #[test]
    fn test_placeholder_when_no_image() {
        let response: ProviderResponse = serde_json::from_value(json!({
            "items": [{"title": "Omelette", "link": "https://a.example/omelette"}]
        }))
        .unwrap();

        let results = normalize(response).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Omelette");
        assert_eq!(results[0].link, "https://a.example/omelette");
        assert_eq!(results[0].snippet, "");
        assert_eq!(results[0].image.as_deref(), Some(PLACEHOLDER_IMAGE));
    }

    #[test]
    fn test_order_preserved_without_dedup() {
        let response: ProviderResponse = serde_json::from_value(json!({
            "items": [
                {"title": "A", "link": "https://x/1", "snippet": "first"},
                {"title": "B", "link": "https://x/2", "snippet": "second"},
                {"title": "A", "link": "https://x/1", "snippet": "first"}
            ]
        }))
        .unwrap();

        let titles: Vec<_> = normalize(response)
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["A", "B", "A"]);
    }

    #[test]
    fn test_missing_or_empty_items_is_none() {
        assert!(normalize(parse_response("{}").unwrap()).is_none());
        assert!(normalize(parse_response(r#"{"items": []}"#).unwrap()).is_none());
        assert!(normalize(parse_response(r#"{"items": null}"#).unwrap()).is_none());
    }

    #[test]
    fn test_bad_field_only_affects_its_item() {
        let body = json!({
            "items": [
                {
                    "title": "親子丼",
                    "link": "https://recipes.example/oyakodon",
                    "snippet": "鶏肉と卵",
                    "pagemap": {"cse_image": [{"src": "https://img/oyako.jpg"}]}
                },
                {
                    "title": "卵焼き",
                    "link": 7,
                    "pagemap": {
                        "cse_image": [{"src": 42}],
                        "metatags": [{"og:image": "https://img/og.jpg"}]
                    }
                },
                "not an item"
            ]
        })
        .to_string();

        let results = normalize(parse_response(&body).unwrap()).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "親子丼");
        assert_eq!(results[0].image.as_deref(), Some("https://img/oyako.jpg"));
        assert_eq!(results[1].title, "卵焼き");
        assert_eq!(results[1].link, "");
        assert_eq!(results[1].image.as_deref(), Some("https://img/og.jpg"));
        assert_eq!(results[2].title, "");
        assert_eq!(results[2].image.as_deref(), Some(PLACEHOLDER_IMAGE));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let err = parse_response("<html>oops</html>").unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }
}
