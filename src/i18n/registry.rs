//! Locale table: the single source of truth for supported languages.
//!
//! The table is a plain `static` slice. Supporting another language means adding
//! an entry here and the matching `<attr>_<code>` columns in the database; the
//! selector and the resolver pick it up without further changes.

use serde::Serialize;

/// Writing direction of a locale's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl std::fmt::Display for TextDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the locale table.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleConfig {
    /// ISO 639-1 code, also used as the column suffix (`title_ar`)
    pub code: &'static str,
    /// English name of the language
    pub name: &'static str,
    /// Name of the language in the language itself
    pub native_name: &'static str,
    pub direction: TextDirection,
    /// The default locale and last-resort fallback column. Exactly one entry sets this.
    pub is_default: bool,
}

static LOCALES: &[LocaleConfig] = &[
    LocaleConfig {
        code: "en",
        name: "English",
        native_name: "English",
        direction: TextDirection::Ltr,
        is_default: true,
    },
    LocaleConfig {
        code: "ar",
        name: "Arabic",
        native_name: "العربية",
        direction: TextDirection::Rtl,
        is_default: false,
    },
];

/// Read-only view over the locale table.
pub struct LocaleRegistry;

impl LocaleRegistry {
    /// All supported locales, default first.
    pub fn all() -> &'static [LocaleConfig] {
        LOCALES
    }

    /// Exact, case-sensitive lookup by code.
    pub fn get_by_code(code: &str) -> Option<&'static LocaleConfig> {
        LOCALES.iter().find(|locale| locale.code == code)
    }

    pub fn default_locale() -> &'static LocaleConfig {
        // The table is static and always carries a default entry (checked in tests).
        LOCALES
            .iter()
            .find(|locale| locale.is_default)
            .unwrap_or(&LOCALES[0])
    }

    pub fn is_supported(code: &str) -> bool {
        Self::get_by_code(code).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn exactly_one_default_locale() {
        let defaults: Vec<_> = LocaleRegistry::all().iter().filter(|l| l.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].code, "en");
        assert_eq!(LocaleRegistry::default_locale().code, "en");
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = LocaleRegistry::all().iter().map(|l| l.code).collect();
        assert_eq!(codes.len(), LocaleRegistry::all().len());
    }

    #[test]
    fn directions_follow_the_table() {
        assert_eq!(LocaleRegistry::get_by_code("en").map(|l| l.direction), Some(TextDirection::Ltr));
        assert_eq!(LocaleRegistry::get_by_code("ar").map(|l| l.direction), Some(TextDirection::Rtl));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(LocaleRegistry::is_supported("ar"));
        assert!(!LocaleRegistry::is_supported("AR"));
        assert!(!LocaleRegistry::is_supported("ar-SA"));
    }

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(serde_json::to_value(TextDirection::Rtl).unwrap(), serde_json::json!("rtl"));
        assert_eq!(TextDirection::Ltr.to_string(), "ltr");
    }
}
