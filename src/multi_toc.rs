//! The merged, cross-export aggregate and its id → path index.

use std::collections::HashMap;

use tracing::warn;

use crate::index::{index_tree, DocPath};
use crate::lang::LANGUAGE_CODES;
use crate::types::{Documentation, DocumentationExport, InformationMap};

/// All loaded documentation exports plus a global index mapping every
/// documentation id to its [`DocPath`].
///
/// Built in one shot from a full export set and never patched in place: a
/// rebuild produces a fresh `MultiToc` that replaces the previous snapshot
/// wholesale.
#[derive(Debug, Clone, Default)]
pub struct MultiToc {
    pub exports: Vec<DocumentationExport>,
    pub index: HashMap<i64, DocPath>,
}

impl MultiToc {
    /// Build the aggregate from an ordered export set.
    ///
    /// For each information map the first registry language with a
    /// parseable root is taken as the canonical shape (ids are assumed
    /// language-invariant). Maps without any content are skipped with a
    /// diagnostic and keep their positional slot. If the same id appears in
    /// more than one export, the last one indexed wins
    /// (implementation-defined, the source data keeps ids globally unique).
    pub fn build(exports: Vec<DocumentationExport>) -> Self {
        let mut index = HashMap::new();
        for (export_position, export) in exports.iter().enumerate() {
            if export.toc.maps.is_empty() {
                warn!(
                    plugin_id = %export.plugin_id,
                    "export has no information maps, nothing to index"
                );
                continue;
            }
            for (map_position, map) in export.toc.maps.iter().enumerate() {
                let Some(root) = first_available_root(map) else {
                    warn!(
                        plugin_id = %export.plugin_id,
                        file = %map.file,
                        "no content found for information map, skipping"
                    );
                    continue;
                };
                let prefix = DocPath::root(export_position, map_position);
                index.extend(index_tree(std::slice::from_ref(root), &prefix, true));
            }
        }
        MultiToc { exports, index }
    }

    pub fn path_of(&self, id: i64) -> Option<&DocPath> {
        self.index.get(&id)
    }

    pub fn find_export(&self, plugin_id: &str) -> Option<&DocumentationExport> {
        self.exports.iter().find(|e| e.plugin_id == plugin_id)
    }
}

/// Canonical tree for indexing: the first language from the master registry
/// priority list that has a root in this map.
fn first_available_root(map: &InformationMap) -> Option<&Documentation> {
    LANGUAGE_CODES
        .iter()
        .find_map(|code| map.languages.get(*code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{export, information_map, tree};

    #[test]
    fn builds_index_across_exports() {
        let exports = vec![
            export(
                "myProduct1",
                vec![
                    information_map(Some(1), "toc-1.json", &[("en", tree(1, &[2, 3]))]),
                    information_map(Some(3), "toc-3.json", &[("en", tree(41, &[42]))]),
                ],
            ),
            export(
                "myProduct3",
                vec![information_map(Some(7), "toc-7.json", &[("de", tree(81, &[82]))])],
            ),
        ];

        let multi_toc = MultiToc::build(exports);

        assert_eq!(
            multi_toc.path_of(1).unwrap().to_string(),
            "exports[0].toc.toc[0][langCode]"
        );
        assert_eq!(
            multi_toc.path_of(3).unwrap().to_string(),
            "exports[0].toc.toc[0][langCode].topics[1]"
        );
        assert_eq!(
            multi_toc.path_of(41).unwrap().to_string(),
            "exports[0].toc.toc[1][langCode]"
        );
        assert_eq!(
            multi_toc.path_of(81).unwrap().to_string(),
            "exports[1].toc.toc[0][langCode]"
        );
        assert_eq!(
            multi_toc.path_of(82).unwrap().to_string(),
            "exports[1].toc.toc[0][langCode].topics[0]"
        );
    }

    #[test]
    fn canonical_shape_comes_from_first_registry_language() {
        // Registry priority (es before ru) decides the canonical shape, not
        // whatever order the file happened to list its languages in.
        let map = information_map(
            Some(11),
            "toc-11.json",
            &[("ru", tree(100, &[101])), ("es", tree(100, &[101, 105]))],
        );
        let multi_toc = MultiToc::build(vec![export("myProduct5", vec![map])]);

        // The es tree has an extra child, so 105 must be indexed.
        assert!(multi_toc.path_of(105).is_some());
    }

    #[test]
    fn map_without_content_is_skipped_but_keeps_its_slot() {
        let exports = vec![export(
            "myProduct1",
            vec![
                information_map(Some(1), "toc-1.json", &[]),
                information_map(Some(3), "toc-3.json", &[("en", tree(41, &[]))]),
            ],
        )];

        let multi_toc = MultiToc::build(exports);

        assert!(multi_toc.path_of(1).is_none());
        // Positions are not compacted: map 3 still indexes at slot 1.
        assert_eq!(
            multi_toc.path_of(41).unwrap().to_string(),
            "exports[0].toc.toc[1][langCode]"
        );
    }

    #[test]
    fn rebuild_is_idempotent() {
        let make = || {
            vec![
                export(
                    "myProduct1",
                    vec![information_map(Some(1), "toc-1.json", &[("en", tree(1, &[2]))])],
                ),
                export(
                    "myProduct3",
                    vec![information_map(Some(7), "toc-7.json", &[("de", tree(81, &[]))])],
                ),
            ]
        };

        let first = MultiToc::build(make());
        let second = MultiToc::build(make());

        assert_eq!(first.index.len(), second.index.len());
        for (id, path) in &first.index {
            assert_eq!(second.index.get(id), Some(path));
        }
    }

    #[test]
    fn empty_export_set_builds_empty_aggregate() {
        let multi_toc = MultiToc::build(Vec::new());
        assert!(multi_toc.exports.is_empty());
        assert!(multi_toc.index.is_empty());
    }
}
