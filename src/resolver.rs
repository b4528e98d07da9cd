//! Lookup operations over a built [`MultiToc`].
//!
//! Business-level absence (unknown id, language without content) is `None`.
//! A path that points outside the loaded exports is an index inconsistency
//! and fails hard: the indexer produced state it cannot stand behind.

use crate::error::{EdcError, Result};
use crate::index::DocPath;
use crate::multi_toc::MultiToc;
use crate::types::{Documentation, InformationMap};

/// Resolve a documentation id in `lang`, falling back to `default_lang`
/// when the requested language has no node at the indexed location.
///
/// Returns the node together with the language it was actually found in.
pub fn resolve<'a, 'l>(
    multi_toc: &'a MultiToc,
    id: i64,
    lang: &'l str,
    default_lang: Option<&'l str>,
) -> Result<Option<(&'a Documentation, &'l str)>> {
    let Some(path) = multi_toc.path_of(id) else {
        return Ok(None);
    };
    if let Some(doc) = deref(multi_toc, path, lang)? {
        return Ok(Some((doc, lang)));
    }
    if let Some(fallback) = default_lang.filter(|code| *code != lang) {
        if let Some(doc) = deref(multi_toc, path, fallback)? {
            return Ok(Some((doc, fallback)));
        }
    }
    Ok(None)
}

/// [`resolve`], discarding the resolved language.
pub fn find_documentation<'a>(
    multi_toc: &'a MultiToc,
    id: i64,
    lang: &str,
    default_lang: Option<&str>,
) -> Result<Option<&'a Documentation>> {
    Ok(resolve(multi_toc, id, lang, default_lang)?.map(|(doc, _)| doc))
}

/// Export identifier owning the given documentation id.
pub fn find_plugin_id_from_documentation_id(multi_toc: &MultiToc, id: i64) -> Result<Option<&str>> {
    let Some(path) = multi_toc.path_of(id) else {
        return Ok(None);
    };
    let export = export_at(multi_toc, path)?;
    Ok(Some(&export.plugin_id))
}

/// Information-map container the given documentation id belongs to,
/// independent of any language.
pub fn find_information_map_from_documentation_id(
    multi_toc: &MultiToc,
    id: i64,
) -> Result<Option<&InformationMap>> {
    let Some(path) = multi_toc.path_of(id) else {
        return Ok(None);
    };
    let export = export_at(multi_toc, path)?;
    let map = export.toc.maps.get(path.map).ok_or_else(|| {
        EdcError::IndexInconsistency(format!(
            "path {path} references map {} but export {} holds {} maps",
            path.map,
            export.plugin_id,
            export.toc.maps.len()
        ))
    })?;
    Ok(Some(map))
}

/// Structural dereference of a path in one concrete language.
///
/// A missing language root or a child position the language's tree does not
/// have is plain absence; only export/map positions outside the aggregate
/// are treated as inconsistency.
fn deref<'a>(
    multi_toc: &'a MultiToc,
    path: &DocPath,
    lang: &str,
) -> Result<Option<&'a Documentation>> {
    let export = export_at(multi_toc, path)?;
    let map = export.toc.maps.get(path.map).ok_or_else(|| {
        EdcError::IndexInconsistency(format!(
            "path {path} references map {} but export {} holds {} maps",
            path.map,
            export.plugin_id,
            export.toc.maps.len()
        ))
    })?;
    let Some(mut node) = map.languages.get(lang) else {
        return Ok(None);
    };
    for &step in &path.steps {
        match node.topics.get(step) {
            Some(child) => node = child,
            None => return Ok(None),
        }
    }
    Ok(Some(node))
}

fn export_at<'a>(
    multi_toc: &'a MultiToc,
    path: &DocPath,
) -> Result<&'a crate::types::DocumentationExport> {
    multi_toc.exports.get(path.export).ok_or_else(|| {
        EdcError::IndexInconsistency(format!(
            "path {path} references export {} but only {} exports are loaded",
            path.export,
            multi_toc.exports.len()
        ))
    })
}
