//! Language selection: turns whatever the client sent into a supported locale.

use serde::{Serialize, Serializer};

use super::registry::{LocaleConfig, LocaleRegistry, TextDirection};

/// A locale drawn from the locale table.
///
/// Only obtainable through [`Locale::select`] or [`Locale::default`], so every
/// value refers to a supported entry.
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    config: &'static LocaleConfig,
}

impl Locale {
    /// Normalize a raw language token.
    ///
    /// An exact match against the locale table wins; anything else (absent,
    /// unknown, different casing, region-tagged) selects the default locale.
    /// Never fails: localization must not reject a request.
    pub fn select(raw: Option<&str>) -> Locale {
        let config = raw
            .and_then(LocaleRegistry::get_by_code)
            .unwrap_or_else(LocaleRegistry::default_locale);
        Locale { config }
    }

    pub fn code(&self) -> &'static str {
        self.config.code
    }

    pub fn direction(&self) -> TextDirection {
        self.config.direction
    }

    pub fn is_default(&self) -> bool {
        self.config.is_default
    }

    /// Column holding attribute `attr` in this locale, e.g. `title_ar`.
    pub fn column_for(&self, attr: &str) -> String {
        format!("{}_{}", attr, self.config.code)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale {
            config: LocaleRegistry::default_locale(),
        }
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.config.code == other.config.code
    }
}

impl Eq for Locale {}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.config.code)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.config.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_supported_codes() {
        let ar = Locale::select(Some("ar"));
        assert_eq!(ar.code(), "ar");
        assert_eq!(ar.direction(), TextDirection::Rtl);

        let en = Locale::select(Some("en"));
        assert_eq!(en.code(), "en");
        assert_eq!(en.direction(), TextDirection::Ltr);
    }

    #[test]
    fn absent_token_defaults_to_english() {
        let locale = Locale::select(None);
        assert_eq!(locale.code(), "en");
        assert_eq!(locale.direction(), TextDirection::Ltr);
    }

    #[test]
    fn unsupported_tokens_degrade_silently() {
        for raw in ["fr", "AR", "ar-SA", "", " ar", "en_US", "العربية", "<script>"] {
            let locale = Locale::select(Some(raw));
            assert_eq!(locale.code(), "en", "token {:?} should select en", raw);
            assert_eq!(locale.direction(), TextDirection::Ltr);
        }
    }

    #[test]
    fn column_for_appends_code() {
        assert_eq!(Locale::select(Some("ar")).column_for("title"), "title_ar");
        assert_eq!(Locale::default().column_for("tags"), "tags_en");
    }

    #[test]
    fn serializes_as_code() {
        let v = serde_json::to_value(Locale::select(Some("ar"))).unwrap();
        assert_eq!(v, serde_json::json!("ar"));
    }
}
