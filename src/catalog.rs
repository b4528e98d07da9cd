//! Reading documentation exports: toc files and information maps.
//!
//! One export's information-map files are fetched in parallel and
//! reassembled in toc order. An export whose toc or any of its map files
//! cannot be retrieved is dropped from the result set with a warning; the
//! overall batch still succeeds with whatever loaded.

use std::sync::Arc;

use futures_util::future::{join_all, try_join_all};
use tracing::{debug, warn};

use crate::error::{EdcError, Result};
use crate::fetch::ResourceFetcher;
use crate::lang::is_valid_code;
use crate::types::{
    ContentType, Documentation, DocumentationExport, ExportInfo, InformationMap,
    InformationMapFile, Toc, TocEntry, TocFile,
};

pub struct ExportCatalog {
    fetcher: Arc<dyn ResourceFetcher>,
}

impl ExportCatalog {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        ExportCatalog { fetcher }
    }

    /// Read every export in `infos` order. Failed exports are filtered out,
    /// so the result may be shorter than the input.
    pub async fn read_exports(&self, infos: &[ExportInfo]) -> Vec<DocumentationExport> {
        let reads = infos.iter().map(|info| self.read_export(info));
        join_all(reads).await.into_iter().flatten().collect()
    }

    /// Read one export's table of contents and all of its information maps.
    ///
    /// Returns `None` (with a warning) when anything in the export cannot
    /// be retrieved.
    pub async fn read_export(&self, info: &ExportInfo) -> Option<DocumentationExport> {
        match self.try_read_export(info).await {
            Ok(export) => {
                debug!(
                    plugin_id = %export.plugin_id,
                    maps = export.toc.maps.len(),
                    "export loaded"
                );
                Some(export)
            }
            Err(err) => {
                warn!(plugin_id = %info.plugin_id, %err, "dropping export");
                None
            }
        }
    }

    async fn try_read_export(&self, info: &ExportInfo) -> Result<DocumentationExport> {
        let toc_path = ContentType::Toc.path(&info.plugin_id);
        let toc_value =
            self.fetcher
                .fetch_json(&toc_path)
                .await?
                .ok_or_else(|| EdcError::InvalidContent {
                    path: toc_path.clone(),
                    reason: "table of contents not found".to_string(),
                })?;
        let toc_file: TocFile =
            serde_json::from_value(toc_value).map_err(|err| EdcError::InvalidContent {
                path: toc_path,
                reason: err.to_string(),
            })?;
        let toc = self.read_information_maps(&info.plugin_id, toc_file).await?;
        Ok(DocumentationExport {
            plugin_id: info.plugin_id.clone(),
            product_id: info.product_id,
            toc,
            default_language: info.info.default_language.clone(),
            languages: info.info.languages.clone(),
        })
    }

    /// Fetch each referenced information-map file and assemble the toc.
    ///
    /// Fetches run in parallel; the resulting sequence matches the order of
    /// the toc entries regardless of completion order. A file that resolves
    /// to nothing keeps its positional slot as an empty map (it is skipped
    /// later at index time), while a failed fetch fails the whole toc.
    pub async fn read_information_maps(&self, export_id: &str, toc_file: TocFile) -> Result<Toc> {
        let fetches = toc_file.toc.iter().map(|entry| {
            let path = format!("{export_id}/{}", entry.file);
            async move { self.fetcher.fetch_json(&path).await }
        });
        let contents = try_join_all(fetches).await?;

        let maps = toc_file
            .toc
            .iter()
            .zip(contents)
            .map(|(entry, content)| assemble_information_map(export_id, entry, content))
            .collect();
        Ok(Toc {
            label: toc_file.label,
            maps,
        })
    }
}

/// Merge a toc entry with its fetched file content into one information
/// map. Only registry language codes are taken as tree keys; a tree that
/// does not parse as documentation is dropped with a warning (best-effort
/// shape checking, not validation).
fn assemble_information_map(
    export_id: &str,
    entry: &TocEntry,
    content: Option<serde_json::Value>,
) -> InformationMap {
    let mut map = InformationMap {
        id: entry.id,
        label: None,
        file: entry.file.clone(),
        languages: Default::default(),
    };
    let Some(content) = content else {
        warn!(export_id, file = %entry.file, "information map file not found");
        return map;
    };
    let file: InformationMapFile = match serde_json::from_value(content) {
        Ok(file) => file,
        Err(err) => {
            warn!(export_id, file = %entry.file, %err, "unreadable information map file");
            return map;
        }
    };
    if file.id.is_some() {
        map.id = file.id;
    }
    map.label = file.label;
    for (code, tree) in file.trees {
        if !is_valid_code(&code) {
            continue;
        }
        match serde_json::from_value::<Documentation>(tree) {
            Ok(root) => {
                map.languages.insert(code, root);
            }
            Err(err) => {
                warn!(export_id, file = %entry.file, lang = %code, %err, "unreadable language tree");
            }
        }
    }
    map
}
