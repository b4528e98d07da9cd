//! Wire and domain types for documentation exports.
//!
//! These mirror the on-disk export format: `multi-doc.json` at the root,
//! then `info.json`, `toc.json`, one information-map file per toc entry and
//! a `context.json` under each export directory.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One article/page in a documentation tree, with its children ("topics").
///
/// The same `id` is reused across languages to denote the same logical topic
/// translated; `content` is populated lazily and is not part of the index
/// identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Documentation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub label: String,
    /// Resource locator relative to the export directory.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub topics: Vec<Documentation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// One entry of an export's `toc.json`, referencing an information-map file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocEntry {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    pub file: String,
}

/// Raw shape of an export's `toc.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocFile {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub toc: Vec<TocEntry>,
}

/// Raw shape of an information-map file: `id` and `label` alongside one
/// documentation tree per language code, keyed by the code itself.
#[derive(Debug, Clone, Deserialize)]
pub struct InformationMapFile {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub trees: BTreeMap<String, serde_json::Value>,
}

/// A named group of documentation topics sharing one source file, available
/// in multiple languages.
#[derive(Debug, Clone, Default)]
pub struct InformationMap {
    pub id: Option<i64>,
    pub label: Option<String>,
    /// Source resource name, from the toc entry that referenced this map.
    pub file: String,
    /// Per-language documentation roots. May be empty when the map file was
    /// missing or carried no parseable language tree.
    pub languages: BTreeMap<String, Documentation>,
}

/// Assembled table of contents for one export.
#[derive(Debug, Clone, Default)]
pub struct Toc {
    pub label: String,
    /// Positional order matches the `toc.json` entries.
    pub maps: Vec<InformationMap>,
}

/// One independently-exported documentation bundle.
#[derive(Debug, Clone)]
pub struct DocumentationExport {
    pub plugin_id: String,
    pub product_id: Option<i64>,
    pub toc: Toc,
    pub default_language: String,
    pub languages: Vec<String>,
}

/// One row of the root `multi-doc.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiDocEntry {
    pub plugin_id: String,
    #[serde(default)]
    pub product_id: Option<i64>,
}

/// Localized export title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Title {
    #[serde(default)]
    pub title: String,
}

/// Contents of an export's `info.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub titles: BTreeMap<String, Title>,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub default_language: String,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Per-export metadata bundle: the `multi-doc.json` identifiers plus the
/// parsed `info.json`. `current_language` is refreshed on language switches.
#[derive(Debug, Clone)]
pub struct ExportInfo {
    pub plugin_id: String,
    pub product_id: Option<i64>,
    pub info: Info,
    pub current_language: String,
}

/// An article attached to a contextual-help entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A contextual-help snippet, looked up by (main key, sub key, language).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Helper {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
    /// Language the helper was resolved in. Set at lookup time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Export the helper belongs to. Set at lookup time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_id: Option<String>,
}

/// Translated popover labels, one file per language under `i18n/popover/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopoverLabel {
    #[serde(default)]
    pub articles: String,
    #[serde(default)]
    pub links: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Result of a documentation lookup through the client facade.
#[derive(Debug, Clone)]
pub struct DocumentationTransfer {
    pub doc: Option<Documentation>,
    /// Export the client ended up on after the lookup.
    pub export_id: Option<String>,
    /// True when the lookup moved the client to a different export.
    pub has_export_changed: bool,
    /// Language the content was resolved in (after any fallback).
    pub resolved_language: String,
}

/// The JSON resources making up an export, by their on-disk names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    MultiDoc,
    Info,
    Toc,
    Context,
}

impl ContentType {
    pub fn file_name(self) -> &'static str {
        match self {
            ContentType::MultiDoc => "multi-doc.json",
            ContentType::Info => "info.json",
            ContentType::Toc => "toc.json",
            ContentType::Context => "context.json",
        }
    }

    /// Whether the resource lives under an export directory (everything but
    /// the root `multi-doc.json`).
    pub fn in_export(self) -> bool {
        !matches!(self, ContentType::MultiDoc)
    }

    /// Logical fetch path for this resource.
    pub fn path(self, export_id: &str) -> String {
        if self.in_export() {
            format!("{export_id}/{}", self.file_name())
        } else {
            self.file_name().to_string()
        }
    }
}

/// Contextual-help table: main key → sub key → language → helper.
pub type ContextualHelp = BTreeMap<String, BTreeMap<String, BTreeMap<String, Helper>>>;

/// Some exports write numeric ids as JSON strings; accept both.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(i64),
        Str(String),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        Some(Repr::Num(n)) => Some(n),
        Some(Repr::Str(s)) => s.trim().parse().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_documentation_tree() {
        let doc: Documentation = serde_json::from_value(json!({
            "id": 41,
            "label": "document 41 in english",
            "url": "myProduct1/en/41.html",
            "topics": [
                { "id": 42 },
                { "id": 43, "topics": [{ "id": 44 }] }
            ]
        }))
        .expect("should deserialize");

        assert_eq!(doc.id, Some(41));
        assert_eq!(doc.topics.len(), 2);
        assert_eq!(doc.topics[1].topics[0].id, Some(44));
        assert!(doc.content.is_none());
    }

    #[test]
    fn deserialize_toc_with_string_ids() {
        let toc: TocFile = serde_json::from_value(json!({
            "label": "myProduct1",
            "toc": [
                { "id": "1", "file": "toc-1.json" },
                { "id": 3, "file": "toc-3.json" }
            ]
        }))
        .expect("should deserialize");

        assert_eq!(toc.toc[0].id, Some(1));
        assert_eq!(toc.toc[1].id, Some(3));
        assert_eq!(toc.toc[0].file, "toc-1.json");
    }

    #[test]
    fn information_map_file_keeps_language_keys() {
        let file: InformationMapFile = serde_json::from_value(json!({
            "id": 3,
            "label": "Map 3",
            "en": { "id": 41, "label": "document 41 in english", "topics": [] },
            "fr": { "id": 41, "label": "document 41 in french", "topics": [] }
        }))
        .expect("should deserialize");

        assert_eq!(file.id, Some(3));
        assert_eq!(file.trees.len(), 2);
        assert!(file.trees.contains_key("en"));
        assert!(file.trees.contains_key("fr"));
    }

    #[test]
    fn deserialize_info() {
        let info: Info = serde_json::from_value(json!({
            "vendor": "acme",
            "version": "1.2",
            "name": "My Product",
            "titles": { "en": { "title": "My product" }, "fr": { "title": "Mon produit" } },
            "identifier": "my-product",
            "defaultLanguage": "en",
            "languages": ["en", "fr"]
        }))
        .expect("should deserialize");

        assert_eq!(info.default_language, "en");
        assert_eq!(info.languages, vec!["en", "fr"]);
        assert_eq!(info.titles["fr"].title, "Mon produit");
    }

    #[test]
    fn content_type_paths() {
        assert_eq!(ContentType::MultiDoc.path("ignored"), "multi-doc.json");
        assert_eq!(ContentType::Toc.path("myProduct1"), "myProduct1/toc.json");
        assert_eq!(
            ContentType::Context.path("myProduct1"),
            "myProduct1/context.json"
        );
    }
}
