//! Primary facade for the documentation engine.
//!
//! One `EdcClient` per consuming session: it owns the fetcher, the language
//! state, the export information, the contextual help and the built
//! documentation index. There are no process-wide singletons.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::ExportCatalog;
use crate::context::ContextStore;
use crate::error::{EdcError, Result};
use crate::fetch::{load_content, HttpFetcher, ResourceFetcher};
use crate::info::ExportInfoStore;
use crate::lang::LanguageResolver;
use crate::multi_toc::MultiToc;
use crate::resolver;
use crate::types::{
    DocumentationTransfer, ExportInfo, Helper, InformationMap, PopoverLabel, Toc,
};
use crate::url::UrlBuilder;

/// Content lifecycle of a client session.
///
/// Language or export changes go back through `Loading` and rebuild the
/// whole index rather than patching it in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Uninitialized,
    Loading,
    Ready,
}

pub struct EdcClient {
    fetcher: Arc<dyn ResourceFetcher>,
    urls: UrlBuilder,
    languages: LanguageResolver,
    infos: ExportInfoStore,
    context: ContextStore,
    catalog: ExportCatalog,
    /// Published snapshot; swapped wholesale, never mutated in place.
    multi_toc: Option<Arc<MultiToc>>,
    context_only: bool,
    state: ClientState,
    /// Build generation, bumped on every (re)load. A completing build
    /// publishes only when it is still the most recently requested one.
    /// Builds hold `&mut self` today, so the check cannot fail; a build
    /// dropped mid-flight simply never reaches it and the next call
    /// supersedes it by bumping the counter.
    generation: u64,
}

impl EdcClient {
    /// Client over HTTP: `base_url` is the documentation root holding
    /// `multi-doc.json`, `help_url` the web-help explorer used for deep
    /// links.
    pub fn new(base_url: &str, help_url: &str) -> Result<Self> {
        let fetcher: Arc<dyn ResourceFetcher> = Arc::new(HttpFetcher::new(base_url)?);
        Ok(Self::with_fetcher(
            fetcher,
            UrlBuilder::new(base_url, help_url),
        ))
    }

    /// Client over any fetcher implementation.
    pub fn with_fetcher(fetcher: Arc<dyn ResourceFetcher>, urls: UrlBuilder) -> Self {
        EdcClient {
            urls,
            languages: LanguageResolver::new(),
            infos: ExportInfoStore::new(fetcher.clone()),
            context: ContextStore::new(fetcher.clone()),
            catalog: ExportCatalog::new(fetcher.clone()),
            fetcher,
            multi_toc: None,
            context_only: false,
            state: ClientState::Uninitialized,
            generation: 0,
        }
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    /// Load (or reload) the whole content set: export information, context
    /// and, unless `context_only`, the documentation index.
    ///
    /// The requested language is adopted when the selected export carries
    /// it, otherwise the export's default applies. Returns the current
    /// export information with the language the session ended up on.
    pub async fn init_content(
        &mut self,
        export_id: Option<&str>,
        context_only: bool,
        lang: Option<&str>,
    ) -> Result<ExportInfo> {
        self.state = ClientState::Loading;
        self.context_only = context_only;
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;

        match self.build_content(export_id, context_only, lang).await {
            Ok(multi_toc) => {
                if generation == self.generation {
                    self.multi_toc = multi_toc.map(Arc::new);
                    self.state = ClientState::Ready;
                } else {
                    debug!(generation, "discarding superseded content build");
                }
                self.infos
                    .current_export_info(&self.languages)
                    .ok_or_else(|| {
                        EdcError::Configuration("no current export information".to_string())
                    })
            }
            Err(err) => {
                if generation == self.generation {
                    self.state = ClientState::Uninitialized;
                    self.multi_toc = None;
                }
                Err(err)
            }
        }
    }

    async fn build_content(
        &mut self,
        export_id: Option<&str>,
        context_only: bool,
        lang: Option<&str>,
    ) -> Result<Option<MultiToc>> {
        self.infos.load(export_id, lang, &mut self.languages).await?;
        if let Some(current) = self.infos.current_export_id().map(str::to_string) {
            self.context.load(&current).await;
        }
        if context_only {
            return Ok(None);
        }
        let exports = self.catalog.read_exports(self.infos.infos()).await;
        Ok(Some(MultiToc::build(exports)))
    }

    async fn ensure_ready(&mut self) -> Result<()> {
        if self.state != ClientState::Ready {
            self.init_content(None, self.context_only, None).await?;
        }
        Ok(())
    }

    fn require_multi_toc(&self) -> Result<Arc<MultiToc>> {
        self.multi_toc.clone().ok_or_else(|| {
            EdcError::Configuration(
                "documentation index not loaded (context-only session)".to_string(),
            )
        })
    }

    /// Resolve a documentation id, in the requested language when the
    /// owning export carries it.
    ///
    /// The owning export becomes the current one (language state included);
    /// when nothing resolves, the session is put back on `source_export_id`.
    /// The transfer reports the export the session ended up on, whether that
    /// differs from before the call, and the language the content was
    /// actually found in.
    pub async fn get_documentation(
        &mut self,
        id: i64,
        lang: Option<&str>,
        source_export_id: Option<&str>,
    ) -> Result<DocumentationTransfer> {
        self.ensure_ready().await?;
        let multi_toc = self.require_multi_toc()?;
        if multi_toc.exports.is_empty() {
            return Err(EdcError::Configuration(
                "no documentation exports loaded".to_string(),
            ));
        }

        let previous = self.infos.current_export_id().map(str::to_string);
        let owner =
            resolver::find_plugin_id_from_documentation_id(&multi_toc, id)?.map(str::to_string);
        if owner.is_some() || lang.is_some() {
            self.infos
                .set_current_export(owner.as_deref(), lang, &mut self.languages);
        }

        let current_lang = self.languages.current_language().to_string();
        let default_lang = self.languages.default_language().to_string();
        let resolved = resolver::resolve(&multi_toc, id, &current_lang, Some(&default_lang))?;
        let (mut doc, resolved_language) = match resolved {
            Some((node, lang_used)) => (Some(node.clone()), lang_used.to_string()),
            None => (None, current_lang),
        };

        if let (Some(doc), Some(owner)) = (doc.as_mut(), owner.as_deref()) {
            load_content(self.fetcher.as_ref(), owner, doc).await;
        }
        if doc.is_none() {
            self.infos
                .set_current_export(source_export_id, lang, &mut self.languages);
        }

        let export_id = self.infos.current_export_id().map(str::to_string);
        let has_export_changed = previous != export_id;
        Ok(DocumentationTransfer {
            doc,
            export_id,
            has_export_changed,
            resolved_language,
        })
    }

    /// Table of contents for the given export, or for the current one.
    pub async fn get_toc(
        &mut self,
        plugin_id: Option<&str>,
        lang: Option<&str>,
    ) -> Result<Option<Toc>> {
        self.ensure_ready().await?;
        self.infos
            .set_current_export(plugin_id, lang, &mut self.languages);
        let multi_toc = self.require_multi_toc()?;
        Ok(self
            .infos
            .current_export_id()
            .and_then(|id| multi_toc.find_export(id))
            .map(|export| export.toc.clone()))
    }

    /// Localized title of the current export.
    pub async fn get_title(&mut self) -> Result<String> {
        self.ensure_ready().await?;
        self.infos.title(&self.languages)
    }

    /// Contextual-help snippet, in the current language of the (possibly
    /// switched) export.
    pub async fn get_helper(
        &mut self,
        main_key: &str,
        sub_key: &str,
        plugin_id: Option<&str>,
        lang: Option<&str>,
    ) -> Result<Option<Helper>> {
        self.ensure_ready().await?;
        self.infos
            .set_current_export(plugin_id, lang, &mut self.languages);
        let Some(current) = self.infos.current_export_id().map(str::to_string) else {
            return Ok(None);
        };
        let lang = self.languages.current_language().to_string();
        Ok(self.context.helper(main_key, sub_key, &current, &lang).await)
    }

    /// Information map a documentation id belongs to, language-independent.
    pub async fn get_information_map_from_doc_id(
        &mut self,
        id: i64,
    ) -> Result<Option<InformationMap>> {
        self.ensure_ready().await?;
        let multi_toc = self.require_multi_toc()?;
        Ok(resolver::find_information_map_from_documentation_id(&multi_toc, id)?.cloned())
    }

    /// Translated popover labels, defaulting to the current language. Label
    /// bodies are loaded from the current export.
    pub async fn get_popover_label(&mut self, lang: Option<&str>) -> Result<Option<PopoverLabel>> {
        self.ensure_ready().await?;
        let lang = lang
            .filter(|code| self.languages.is_language_valid(code))
            .unwrap_or_else(|| self.languages.current_language())
            .to_string();
        let export_id = self.infos.current_export_id().map(str::to_string);
        self.context.popover_label(&lang, export_id.as_deref()).await
    }

    pub fn current_export_id(&self) -> Option<&str> {
        self.infos.current_export_id()
    }

    pub fn current_language(&self) -> &str {
        self.languages.current_language()
    }

    pub fn default_language(&self) -> &str {
        self.languages.default_language()
    }

    /// True if the language was exported, as translation or default.
    pub fn is_language_present(&self, code: &str) -> bool {
        self.languages.is_language_present(code)
    }

    /// Web-help deep link for a contextual-help element.
    pub fn context_web_help_url(
        &self,
        main_key: &str,
        sub_key: &str,
        language_code: &str,
        article_index: usize,
        publication_id: Option<&str>,
    ) -> String {
        let plugin = publication_id
            .or_else(|| self.infos.current_export_id())
            .unwrap_or_default();
        let lang = if self.languages.is_language_valid(language_code) {
            language_code
        } else {
            self.languages.current_language()
        };
        self.urls
            .context_url(plugin, main_key, sub_key, lang, article_index)
    }

    /// Web-help deep link for a documentation page.
    pub fn documentation_web_help_url(&self, id: i64, language_code: Option<&str>) -> String {
        let lang = language_code
            .filter(|code| self.languages.is_language_present(code))
            .unwrap_or_else(|| self.languages.current_language());
        self.urls
            .documentation_url(id, Some(lang), self.infos.current_export_id())
    }

    pub fn home_web_help_url(&self) -> String {
        self.urls.home_url()
    }

    pub fn error_web_help_url(&self) -> String {
        self.urls.error_url()
    }

    pub fn popover_i18n_url(&self) -> String {
        self.urls.popover_i18n_url()
    }

    pub fn web_help_i18n_url(&self) -> String {
        self.urls.web_help_i18n_url()
    }
}
