//! Shared test doubles and fixtures.
//!
//! The stub data mirrors a three-export documentation dump: `myProduct1`
//! (three information maps, en/fr), `myProduct3` (one map, en/de) and
//! `myProduct5` (one map, ru/es).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{EdcError, Result};
use crate::fetch::ResourceFetcher;
use crate::types::{Documentation, DocumentationExport, InformationMap, Toc};

/// In-memory [`ResourceFetcher`]. Paths registered with [`failing`] reject
/// as if the transport broke; unknown paths resolve to `None` like a 404.
///
/// [`failing`]: StubFetcher::failing
#[derive(Default)]
pub struct StubFetcher {
    json: HashMap<String, Value>,
    raw: HashMap<String, String>,
    failing: HashSet<String>,
    fetched: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, path: &str, value: Value) -> Self {
        self.json.insert(path.to_string(), value);
        self
    }

    pub fn with_raw(mut self, path: &str, body: &str) -> Self {
        self.raw.insert(path.to_string(), body.to_string());
        self
    }

    pub fn failing(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    pub fn fetched_paths(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    fn check(&self, path: &str) -> Result<()> {
        self.fetched.lock().unwrap().push(path.to_string());
        if self.failing.contains(path) {
            return Err(EdcError::InvalidContent {
                path: path.to_string(),
                reason: "stubbed fetch failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceFetcher for StubFetcher {
    async fn fetch_json(&self, path: &str) -> Result<Option<Value>> {
        self.check(path)?;
        Ok(self.json.get(path).cloned())
    }

    async fn fetch_raw(&self, path: &str) -> Result<Option<String>> {
        self.check(path)?;
        Ok(self.raw.get(path).cloned())
    }
}

/// A root documentation node with flat children.
pub fn tree(id: i64, children: &[i64]) -> Documentation {
    Documentation {
        id: Some(id),
        topics: children
            .iter()
            .map(|&child| Documentation {
                id: Some(child),
                ..Documentation::default()
            })
            .collect(),
        ..Documentation::default()
    }
}

pub fn information_map(
    id: Option<i64>,
    file: &str,
    languages: &[(&str, Documentation)],
) -> InformationMap {
    InformationMap {
        id,
        label: None,
        file: file.to_string(),
        languages: languages
            .iter()
            .map(|(code, root)| (code.to_string(), root.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub fn export(plugin_id: &str, maps: Vec<InformationMap>) -> DocumentationExport {
    DocumentationExport {
        plugin_id: plugin_id.to_string(),
        product_id: None,
        toc: Toc {
            label: plugin_id.to_string(),
            maps,
        },
        default_language: "en".to_string(),
        languages: vec!["en".to_string(), "fr".to_string()],
    }
}

fn doc_json(id: i64, label: &str, topics: Value) -> Value {
    json!({ "id": id, "label": label, "url": format!("{id}.html"), "topics": topics })
}

pub fn im1_json() -> Value {
    let tree = |lang: &str| {
        doc_json(
            1,
            &format!("document 1 in {lang}"),
            json!([
                doc_json(2, "2", json!([])),
                doc_json(3, "3", json!([
                    doc_json(4, "4", json!([doc_json(5, "5", json!([]))])),
                    doc_json(6, "6", json!([]))
                ]))
            ]),
        )
    };
    json!({ "id": 1, "en": tree("english"), "fr": tree("french") })
}

pub fn im3_json() -> Value {
    let tree = |lang: &str| {
        doc_json(
            41,
            &format!("document 41 in {lang}"),
            json!([
                doc_json(42, "42", json!([])),
                doc_json(43, "43", json!([
                    doc_json(44, "44", json!([doc_json(45, "45", json!([]))])),
                    doc_json(46, "46", json!([]))
                ]))
            ]),
        )
    };
    json!({ "id": 3, "en": tree("english"), "fr": tree("french") })
}

pub fn im4_json() -> Value {
    let tree = |lang: &str| {
        doc_json(
            61,
            &format!("document 61 in {lang}"),
            json!([doc_json(62, "62", json!([])), doc_json(66, "66", json!([]))]),
        )
    };
    json!({ "id": 4, "en": tree("english"), "fr": tree("french") })
}

pub fn im7_json() -> Value {
    let tree = |lang: &str| {
        doc_json(
            81,
            &format!("document 81 in {lang}"),
            json!([
                doc_json(83, "83", json!([doc_json(84, "84", json!([]))])),
                doc_json(82, "82", json!([]))
            ]),
        )
    };
    json!({ "id": 7, "en": tree("english"), "de": tree("german") })
}

pub fn im11_json() -> Value {
    let tree = |lang: &str| {
        doc_json(
            100,
            &format!("document 100 in {lang}"),
            json!([doc_json(101, "101", json!([doc_json(102, "102", json!([]))]))]),
        )
    };
    json!({ "id": 11, "ru": tree("russian"), "es": tree("spanish") })
}

fn info_json(name: &str, default_language: &str, languages: Value) -> Value {
    json!({
        "vendor": "acme",
        "version": "1.0",
        "name": name,
        "titles": {
            "en": { "title": format!("{name} (en)") },
            "fr": { "title": format!("{name} (fr)") }
        },
        "identifier": name,
        "defaultLanguage": default_language,
        "languages": languages
    })
}

/// A fully wired stub dump: multi-doc.json, per-export info.json/toc.json,
/// every information-map file, one context file and a couple of raw bodies.
pub fn full_stub_fetcher() -> StubFetcher {
    StubFetcher::new()
        .with_json(
            "multi-doc.json",
            json!([
                { "pluginId": "myProduct1", "productId": 1 },
                { "pluginId": "myProduct3", "productId": 3 },
                { "pluginId": "myProduct5", "productId": 5 }
            ]),
        )
        .with_json(
            "myProduct1/info.json",
            info_json("myProduct1", "en", json!(["en", "fr"])),
        )
        .with_json(
            "myProduct3/info.json",
            info_json("myProduct3", "en", json!(["en", "de"])),
        )
        .with_json(
            "myProduct5/info.json",
            info_json("myProduct5", "ru", json!(["ru", "es"])),
        )
        .with_json(
            "myProduct1/toc.json",
            json!({
                "label": "myProduct1",
                "toc": [
                    { "id": "1", "file": "toc-1.json" },
                    { "id": "3", "file": "toc-3.json" },
                    { "id": "4", "file": "toc-4.json" }
                ]
            }),
        )
        .with_json(
            "myProduct3/toc.json",
            json!({ "label": "myProduct3", "toc": [{ "id": "7", "file": "toc-7.json" }] }),
        )
        .with_json(
            "myProduct5/toc.json",
            json!({ "label": "myProduct5", "toc": [{ "id": "11", "file": "toc-11.json" }] }),
        )
        .with_json("myProduct1/toc-1.json", im1_json())
        .with_json("myProduct1/toc-3.json", im3_json())
        .with_json("myProduct1/toc-4.json", im4_json())
        .with_json("myProduct3/toc-7.json", im7_json())
        .with_json("myProduct5/toc-11.json", im11_json())
        .with_json(
            "myProduct1/context.json",
            json!({
                "settings": {
                    "export": {
                        "en": {
                            "label": "Exporting",
                            "description": "How to export",
                            "url": "context/export.en.html",
                            "articles": [
                                { "label": "Formats", "url": "context/formats.en.html" }
                            ]
                        },
                        "fr": {
                            "label": "Exporter",
                            "description": "Comment exporter",
                            "url": "context/export.fr.html",
                            "articles": []
                        }
                    }
                }
            }),
        )
        .with_raw("myProduct1/context/export.en.html", "<p>export help</p>")
        .with_raw("myProduct1/context/formats.en.html", "<p>formats</p>")
        .with_raw("myProduct1/41.html", "<p>doc 41</p>")
        .with_json(
            "i18n/popover/en.json",
            json!({
                "articles": "Need more…",
                "links": "Related topics",
                "url": "popover/labels.en.html"
            }),
        )
        .with_raw("myProduct1/popover/labels.en.html", "<p>popover labels</p>")
}
