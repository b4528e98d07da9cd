//! Export information: the multi-doc listing, per-export `info.json`
//! metadata, and which export is currently active.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::warn;

use crate::error::{EdcError, Result};
use crate::fetch::ResourceFetcher;
use crate::lang::LanguageResolver;
use crate::types::{ContentType, ExportInfo, Info, MultiDocEntry};

pub struct ExportInfoStore {
    fetcher: Arc<dyn ResourceFetcher>,
    infos: Vec<ExportInfo>,
    current_export_id: Option<String>,
}

impl ExportInfoStore {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        ExportInfoStore {
            fetcher,
            infos: Vec::new(),
            current_export_id: None,
        }
    }

    /// Read `multi-doc.json` and every listed export's `info.json`, then
    /// select the current export (the requested one when it loaded, the
    /// first available otherwise) and initialize the language state from it.
    ///
    /// A missing multi-doc listing, or a listing whose exports all fail to
    /// load, is a configuration error: there is nothing to serve.
    pub async fn load(
        &mut self,
        export_id: Option<&str>,
        lang: Option<&str>,
        languages: &mut LanguageResolver,
    ) -> Result<()> {
        let path = ContentType::MultiDoc.path("");
        let entries = self
            .fetcher
            .fetch_json(&path)
            .await
            .map_err(|err| EdcError::Configuration(format!("could not read {path}: {err}")))?
            .ok_or_else(|| EdcError::Configuration(format!("{path} not found")))?;
        let entries: Vec<MultiDocEntry> =
            serde_json::from_value(entries).map_err(|err| EdcError::InvalidContent {
                path,
                reason: err.to_string(),
            })?;

        let reads = entries.iter().map(|entry| self.read_info(entry));
        self.infos = join_all(reads).await.into_iter().flatten().collect();
        self.current_export_id = None;

        if self.infos.is_empty() {
            return Err(EdcError::Configuration(
                "no export information available".to_string(),
            ));
        }

        let selected = export_id
            .filter(|id| self.exists(id))
            .map(str::to_string)
            .unwrap_or_else(|| self.infos[0].plugin_id.clone());
        self.set_current_export(Some(&selected), lang, languages);
        Ok(())
    }

    async fn read_info(&self, entry: &MultiDocEntry) -> Option<ExportInfo> {
        let path = ContentType::Info.path(&entry.plugin_id);
        let value = match self.fetcher.fetch_json(&path).await {
            Ok(value) => value,
            Err(err) => {
                warn!(plugin_id = %entry.plugin_id, %err, "could not read info file, skipping export");
                return None;
            }
        };
        let Some(value) = value else {
            warn!(plugin_id = %entry.plugin_id, "info file not found, skipping export");
            return None;
        };
        let info: Info = match serde_json::from_value(value) {
            Ok(info) => info,
            Err(err) => {
                warn!(plugin_id = %entry.plugin_id, %err, "unreadable info file, skipping export");
                return None;
            }
        };
        let current_language = info.default_language.clone();
        Some(ExportInfo {
            plugin_id: entry.plugin_id.clone(),
            product_id: entry.product_id,
            info,
            current_language,
        })
    }

    /// Switch the current export, re-initializing the language state from
    /// the new export's declared languages. Switching to the same export
    /// (or to an unknown one) only re-validates the requested language.
    ///
    /// Returns the current export id after the switch.
    pub fn set_current_export(
        &mut self,
        export_id: Option<&str>,
        requested_lang: Option<&str>,
        languages: &mut LanguageResolver,
    ) -> Option<String> {
        match export_id {
            Some(id) if self.current_export_id.as_deref() != Some(id) && self.exists(id) => {
                self.current_export_id = Some(id.to_string());
                if let Some(info) = self.get(id).map(|found| found.info.clone()) {
                    languages.init(&info.default_language, requested_lang, &info.languages);
                }
            }
            _ => {
                if requested_lang.is_some() {
                    languages.set_current_language(requested_lang);
                }
            }
        }
        self.current_export_id.clone()
    }

    pub fn exists(&self, export_id: &str) -> bool {
        self.infos.iter().any(|info| info.plugin_id == export_id)
    }

    pub fn get(&self, export_id: &str) -> Option<&ExportInfo> {
        self.infos.iter().find(|info| info.plugin_id == export_id)
    }

    pub fn infos(&self) -> &[ExportInfo] {
        &self.infos
    }

    pub fn current_export_id(&self) -> Option<&str> {
        self.current_export_id.as_deref()
    }

    pub fn current_info(&self) -> Option<&ExportInfo> {
        self.current_export_id
            .as_deref()
            .and_then(|id| self.get(id))
    }

    /// Snapshot of the current export's info with the language the session
    /// is actually on.
    pub fn current_export_info(&self, languages: &LanguageResolver) -> Option<ExportInfo> {
        self.current_info().map(|info| {
            let mut info = info.clone();
            info.current_language = languages.current_language().to_string();
            info
        })
    }

    /// Localized title of the current export: current-language title, then
    /// default-language title, then the plain info name.
    pub fn title(&self, languages: &LanguageResolver) -> Result<String> {
        let info = &self
            .current_info()
            .ok_or_else(|| {
                EdcError::Configuration("no current export information".to_string())
            })?
            .info;
        let localized = info
            .titles
            .get(languages.current_language())
            .or_else(|| info.titles.get(languages.default_language()))
            .map(|title| title.title.as_str())
            .filter(|title| !title.is_empty());
        Ok(localized.unwrap_or(&info.name).to_string())
    }
}
