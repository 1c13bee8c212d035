//! Citation sources from grounding metadata

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// One cited web page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub uri: String,
    pub title: String,
}

/// Pull `groundingChunks[].web.{uri, title}` out of grounding metadata.
///
/// Entries are unique by `uri`; a repeated uri keeps its first position but
/// takes the later title. Anything malformed is skipped, so the result is
/// empty rather than an error when the metadata is missing or unexpected.
pub fn extract_sources(grounding: Option<&Value>) -> Vec<SourceEntry> {
    let Some(chunks) = grounding
        .and_then(|g| g.get("groundingChunks"))
        .and_then(Value::as_array)
    else {
        debug!("No grounding chunks in response");
        return Vec::new();
    };

    let mut sources: Vec<SourceEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for web in chunks.iter().filter_map(|chunk| chunk.get("web")) {
        let Some(uri) = web.get("uri").and_then(Value::as_str) else {
            continue;
        };
        let title = web
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match index.get(uri) {
            Some(&i) => sources[i].title = title,
            None => {
                index.insert(uri.to_string(), sources.len());
                sources.push(SourceEntry {
                    uri: uri.to_string(),
                    title,
                });
            }
        }
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duplicate_uri_keeps_later_title() {
        let grounding = json!({
            "groundingChunks": [
                {"web": {"uri": "https://a.example/1", "title": "first"}},
                {"web": {"uri": "https://b.example/2", "title": "other"}},
                {"web": {"uri": "https://a.example/1", "title": "second"}}
            ]
        });

        let sources = extract_sources(Some(&grounding));
        assert_eq!(
            sources,
            vec![
                SourceEntry {
                    uri: "https://a.example/1".to_string(),
                    title: "second".to_string()
                },
                SourceEntry {
                    uri: "https://b.example/2".to_string(),
                    title: "other".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_missing_metadata_is_empty() {
        assert!(extract_sources(None).is_empty());
        assert!(extract_sources(Some(&json!({}))).is_empty());
        assert!(extract_sources(Some(&json!({"groundingChunks": "nope"}))).is_empty());
        assert!(extract_sources(Some(&json!("garbage"))).is_empty());
    }

    #[test]
    fn test_malformed_chunks_are_skipped() {
        let grounding = json!({
            "groundingChunks": [
                {"retrievedContext": {"uri": "x"}},
                {"web": {"title": "no uri"}},
                {"web": {"uri": 42}},
                7,
                {"web": {"uri": "https://ok.example"}}
            ]
        });

        let sources = extract_sources(Some(&grounding));
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].uri, "https://ok.example");
        assert_eq!(sources[0].title, "");
    }
}
