//! Path indexing over documentation trees.
//!
//! Every node reachable from an information map gets a [`DocPath`]: which
//! export, which map, then the chain of child positions below the
//! per-language root. The language itself is not part of the path; it is
//! substituted at resolution time.

use std::collections::HashMap;
use std::fmt;

use crate::types::Documentation;

/// Token standing in for a not-yet-chosen language code in the rendered
/// template form of a [`DocPath`].
pub const LANG_PLACEHOLDER: &str = "[langCode]";

/// Typed location of a documentation node inside a [`MultiToc`] aggregate.
///
/// `steps` are zero-based positions in successive `topics` sequences,
/// starting below the information map's per-language root. An empty `steps`
/// addresses the root itself.
///
/// [`MultiToc`]: crate::multi_toc::MultiToc
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    pub export: usize,
    pub map: usize,
    pub steps: Vec<usize>,
}

impl DocPath {
    pub fn root(export: usize, map: usize) -> Self {
        DocPath {
            export,
            map,
            steps: Vec::new(),
        }
    }

    /// Path of the child at `position` in this node's `topics`.
    pub fn child(&self, position: usize) -> Self {
        let mut steps = self.steps.clone();
        steps.push(position);
        DocPath {
            export: self.export,
            map: self.map,
            steps,
        }
    }
}

/// Renders the legacy string-template form, e.g.
/// `exports[0].toc.toc[1][langCode].topics[2]`.
impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exports[{}].toc.toc[{}]{LANG_PLACEHOLDER}",
            self.export, self.map
        )?;
        for step in &self.steps {
            write!(f, ".topics[{step}]")?;
        }
        Ok(())
    }
}

/// Walk `roots` and map every node id to its path.
///
/// With `is_root` set, the first level reuses `prefix` verbatim: root
/// entries map 1:1 onto the caller-supplied slot. Each deeper level appends
/// the child's position in its parent's `topics`. Nodes without an id are
/// skipped but their children are still visited. If two nodes carry the
/// same id, the last one in traversal order wins (implementation-defined).
///
/// Pure: no I/O, inputs untouched, deterministic.
pub fn index_tree(
    roots: &[Documentation],
    prefix: &DocPath,
    is_root: bool,
) -> HashMap<i64, DocPath> {
    let mut index = HashMap::new();
    for (position, doc) in roots.iter().enumerate() {
        let path = if is_root {
            prefix.clone()
        } else {
            prefix.child(position)
        };
        if let Some(id) = doc.id {
            index.insert(id, path.clone());
        }
        index.extend(index_tree(&doc.topics, &path, false));
    }
    index
}
