//! Language state for the active export.
//!
//! Tracks the default, current and available language codes, validating
//! every requested code against the master registry. One resolver per
//! client session; never process-wide.

pub mod codes;

pub use codes::{is_valid_code, LANGUAGE_CODES};

/// Fallback language when an export declares no usable default.
pub const SYS_DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone)]
pub struct LanguageResolver {
    default_language: String,
    current_language: String,
    languages: Vec<String>,
}

impl Default for LanguageResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageResolver {
    pub fn new() -> Self {
        LanguageResolver {
            default_language: SYS_DEFAULT_LANGUAGE.to_string(),
            current_language: SYS_DEFAULT_LANGUAGE.to_string(),
            languages: Vec::new(),
        }
    }

    /// Reset the whole language state from an export's declared languages.
    ///
    /// Returns the adopted current language.
    pub fn init(
        &mut self,
        default_language: &str,
        current_language: Option<&str>,
        languages: &[String],
    ) -> String {
        self.set_languages(languages);
        self.set_default_language(default_language);
        self.set_current_language(current_language)
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Adopt `code` as default if the registry knows the full code
    /// (truncated to its 2-letter form), otherwise fall back to the system
    /// default. Region-qualified codes are not registry members.
    pub fn set_default_language(&mut self, code: &str) {
        self.default_language = if is_valid_code(code) {
            code.chars().take(2).collect()
        } else {
            SYS_DEFAULT_LANGUAGE.to_string()
        };
    }

    pub fn current_language(&self) -> &str {
        &self.current_language
    }

    /// Adopt `code` as current when it is available in the export, otherwise
    /// adopt the default language. `None` retries the existing current
    /// language against the (possibly changed) available set.
    ///
    /// Returns the adopted value.
    pub fn set_current_language(&mut self, code: Option<&str>) -> String {
        let candidate = match code {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => self.current_language.clone(),
        };
        self.current_language = if self.is_language_present(&candidate) {
            candidate
        } else {
            self.default_language.clone()
        };
        self.current_language.clone()
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Store the registry-valid subset of `languages`, preserving order.
    /// Duplicates are kept as provided.
    pub fn set_languages(&mut self, languages: &[String]) {
        self.languages = languages
            .iter()
            .filter(|code| is_valid_code(code))
            .cloned()
            .collect();
    }

    /// True iff `code` is one of the export's available languages.
    pub fn is_language_present(&self, code: &str) -> bool {
        self.languages.iter().any(|c| c == code)
    }

    /// True iff `code` belongs to the master registry, regardless of what
    /// the current export makes available.
    pub fn is_language_valid(&self, code: &str) -> bool {
        is_valid_code(code)
    }
}
