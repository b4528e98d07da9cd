//! Deep-link URLs into the web-help explorer and the i18n folders.
//!
//! Pure string assembly; nothing here affects index correctness.

const I18N_ROOT_FOLDER: &str = "i18n";
const I18N_POPOVER_FOLDER: &str = "popover";
const I18N_WEB_HELP_FOLDER: &str = "web-help";

#[derive(Debug, Clone, Default)]
pub struct UrlBuilder {
    base_url: String,
    help_url: String,
}

impl UrlBuilder {
    pub fn new(base_url: impl Into<String>, help_url: impl Into<String>) -> Self {
        UrlBuilder {
            base_url: base_url.into(),
            help_url: help_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn home_url(&self) -> String {
        format!("{}/home", self.help_url)
    }

    pub fn error_url(&self) -> String {
        format!("{}/error", self.help_url)
    }

    pub fn context_url(
        &self,
        publication_id: &str,
        main_key: &str,
        sub_key: &str,
        language_code: &str,
        article_index: usize,
    ) -> String {
        format!(
            "{}/context/{publication_id}/{main_key}/{sub_key}/{language_code}/{article_index}",
            self.help_url
        )
    }

    pub fn documentation_url(&self, id: i64, lang: Option<&str>, export_id: Option<&str>) -> String {
        let export_prefix = export_id.map(|e| format!("{e}/")).unwrap_or_default();
        let lang_suffix = lang.map(|l| format!("/{l}")).unwrap_or_default();
        format!("{}/doc/{export_prefix}{id}{lang_suffix}", self.help_url)
    }

    pub fn i18n_base_url(&self) -> String {
        format!("{}/{I18N_ROOT_FOLDER}", self.base_url)
    }

    pub fn web_help_i18n_url(&self) -> String {
        format!("{}/{I18N_WEB_HELP_FOLDER}", self.i18n_base_url())
    }

    pub fn popover_i18n_url(&self) -> String {
        format!("{}/{I18N_POPOVER_FOLDER}", self.i18n_base_url())
    }
}
