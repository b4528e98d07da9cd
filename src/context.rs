//! Contextual-help content: the per-export `context.json` table and the
//! translated popover labels.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::warn;

use crate::error::{EdcError, Result};
use crate::fetch::{load_content, ResourceFetcher};
use crate::types::{ContentType, ContextualHelp, Helper, PopoverLabel};

pub struct ContextStore {
    fetcher: Arc<dyn ResourceFetcher>,
    plugin_id: Option<String>,
    help: Option<ContextualHelp>,
}

impl ContextStore {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        ContextStore {
            fetcher,
            plugin_id: None,
            help: None,
        }
    }

    /// Load the context table for `plugin_id` unless it is already the one
    /// held. A missing or unreadable context file degrades to "no helpers".
    pub async fn load(&mut self, plugin_id: &str) {
        if self.help.is_some() && self.plugin_id.as_deref() == Some(plugin_id) {
            return;
        }
        self.plugin_id = Some(plugin_id.to_string());
        self.help = match self.read_context(plugin_id).await {
            Ok(help) => help,
            Err(err) => {
                warn!(plugin_id, %err, "could not read context file");
                None
            }
        };
    }

    async fn read_context(&self, plugin_id: &str) -> Result<Option<ContextualHelp>> {
        let path = ContentType::Context.path(plugin_id);
        match self.fetcher.fetch_json(&path).await? {
            Some(value) => {
                let help =
                    serde_json::from_value(value).map_err(|err| EdcError::InvalidContent {
                        path,
                        reason: err.to_string(),
                    })?;
                Ok(Some(help))
            }
            None => Ok(None),
        }
    }

    /// Look up the helper for `(main_key, sub_key, lang)` in `plugin_id`'s
    /// context and load its body and every article body.
    pub async fn helper(
        &mut self,
        main_key: &str,
        sub_key: &str,
        plugin_id: &str,
        lang: &str,
    ) -> Option<Helper> {
        self.load(plugin_id).await;
        let helper = self
            .help
            .as_ref()?
            .get(main_key)?
            .get(sub_key)?
            .get(lang)?;

        let mut helper = helper.clone();
        helper.language = Some(lang.to_string());
        helper.export_id = Some(plugin_id.to_string());

        load_content(self.fetcher.as_ref(), plugin_id, &mut helper).await;
        let article_loads = helper
            .articles
            .iter_mut()
            .map(|article| load_content(self.fetcher.as_ref(), plugin_id, article));
        join_all(article_loads).await;

        Some(helper)
    }

    /// Translated popover labels for `lang`, from `i18n/popover/<lang>.json`.
    /// A label referencing a body by `url` gets it loaded from `export_id`.
    pub async fn popover_label(
        &self,
        lang: &str,
        export_id: Option<&str>,
    ) -> Result<Option<PopoverLabel>> {
        let path = format!("i18n/popover/{lang}.json");
        match self.fetcher.fetch_json(&path).await? {
            Some(value) => {
                let mut label: PopoverLabel =
                    serde_json::from_value(value).map_err(|err| EdcError::InvalidContent {
                        path,
                        reason: err.to_string(),
                    })?;
                if let Some(export_id) = export_id {
                    load_content(self.fetcher.as_ref(), export_id, &mut label).await;
                }
                Ok(Some(label))
            }
            None => Ok(None),
        }
    }
}
