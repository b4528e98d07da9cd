/// Master registry of recognized language codes (ISO 639-1).
///
/// Order matters: when an information map is indexed, the first code from
/// this list with a non-empty tree is taken as the canonical shape.
pub const LANGUAGE_CODES: &[&str] = &[
    "en", "fr", "de", "es", "it", "pt", "nl", "ru", "zh", "ja", "ko", "ar", "bg", "cs", "da",
    "el", "et", "fi", "he", "hi", "hr", "hu", "id", "lt", "lv", "ms", "no", "pl", "ro", "sk",
    "sl", "sr", "sv", "th", "tr", "uk", "vi",
];

/// True when `code` belongs to the master registry.
pub fn is_valid_code(code: &str) -> bool {
    LANGUAGE_CODES.contains(&code)
}
