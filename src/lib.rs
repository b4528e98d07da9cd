//! Client-side engine for published documentation exports.
//!
//! An export dump holds a `multi-doc.json` listing, a per-export
//! `info.json`/`toc.json` pair and per-language information-map files. This
//! crate fetches them, stitches the maps into a unified tree, indexes every
//! documentation id to a typed path and resolves `(id, language, export)`
//! lookups with fallback to the export's default language.
//!
//! [`EdcClient`] is the entry point; everything underneath is usable on its
//! own for finer control.

pub mod catalog;
pub mod client;
pub mod context;
pub mod error;
pub mod fetch;
pub mod index;
pub mod info;
pub mod lang;
pub mod multi_toc;
pub mod resolver;
pub mod types;
pub mod url;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::client::{ClientState, EdcClient};
pub use crate::error::{EdcError, Result};
pub use crate::fetch::{HttpFetcher, Loadable, ResourceFetcher};
pub use crate::index::{DocPath, LANG_PLACEHOLDER};
pub use crate::lang::LanguageResolver;
pub use crate::multi_toc::MultiToc;
pub use crate::types::{
    Article, ContextualHelp, Documentation, DocumentationExport, DocumentationTransfer,
    ExportInfo, Helper, InformationMap, PopoverLabel, Toc, TocEntry, TocFile,
};
pub use crate::url::UrlBuilder;
