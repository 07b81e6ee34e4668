// SPDX-License-Identifier: MPL-2.0
use super::catalog::MessageCatalog;
use crate::config::{defaults, Config};
use crate::error::{I18nError, Result};
use unic_langid::LanguageIdentifier;

/// Owns the message catalog and the active-locale selection.
///
/// Rendering code borrows the handle to resolve keys; only
/// [`I18n::set_locale`] changes which locale is active.
#[derive(Debug)]
pub struct I18n {
    catalog: MessageCatalog,
    current_locale: LanguageIdentifier,
    fallback_locale: LanguageIdentifier,
}

impl I18n {
    /// Creates the provider with `default_locale` active.
    ///
    /// Both locales must be part of `catalog`.
    pub fn initialize(
        catalog: MessageCatalog,
        default_locale: LanguageIdentifier,
        fallback_locale: LanguageIdentifier,
    ) -> std::result::Result<Self, I18nError> {
        for (role, locale) in [("default", &default_locale), ("fallback", &fallback_locale)] {
            if !catalog.contains(locale) {
                return Err(I18nError::Configuration(format!(
                    "{} locale `{}` is not in the catalog",
                    role, locale
                )));
            }
        }

        tracing::debug!(
            locale = %default_locale,
            fallback = %fallback_locale,
            "i18n provider initialized"
        );

        Ok(Self {
            catalog,
            current_locale: default_locale,
            fallback_locale,
        })
    }

    /// Builds the provider used at application start-up.
    ///
    /// The catalog comes from `config.catalog_dir` when set, otherwise from
    /// the embedded resources. The active locale is the first available of:
    /// the CLI value, the configured language, the OS locale (only when
    /// `detect_system_locale` is enabled), and finally [`defaults::DEFAULT_LOCALE`].
    pub fn from_config(cli_lang: Option<String>, config: &Config) -> Result<Self> {
        let catalog = match &config.catalog_dir {
            Some(dir) => MessageCatalog::load_dir(dir)?,
            None => MessageCatalog::embedded()?,
        };

        let fallback_locale = parse_configured_locale(
            config
                .fallback_language
                .as_deref()
                .unwrap_or(defaults::FALLBACK_LOCALE),
        )?;

        let system_lang = if config
            .detect_system_locale
            .unwrap_or(defaults::DEFAULT_DETECT_SYSTEM_LOCALE)
        {
            sys_locale::get_locale()
        } else {
            None
        };

        let default_locale = match resolve_locale(
            cli_lang.as_deref(),
            config.language.as_deref(),
            system_lang.as_deref(),
            &catalog.locales(),
        ) {
            Some(locale) => locale,
            None => parse_configured_locale(defaults::DEFAULT_LOCALE)?,
        };

        Ok(Self::initialize(catalog, default_locale, fallback_locale)?)
    }

    /// Resolves `key` against the active locale, then the fallback locale.
    pub fn translate(&self, key: &str) -> std::result::Result<String, I18nError> {
        if let Some(value) = self.catalog.lookup(&self.current_locale, key) {
            return Ok(value);
        }

        if self.fallback_locale != self.current_locale {
            if let Some(value) = self.catalog.lookup(&self.fallback_locale, key) {
                tracing::debug!(
                    key,
                    locale = %self.current_locale,
                    fallback = %self.fallback_locale,
                    "translation served from fallback locale"
                );
                return Ok(value);
            }
        }

        Err(I18nError::MissingTranslation(key.to_string()))
    }

    /// Like [`I18n::translate`], but renders a placeholder for missing keys.
    pub fn tr(&self, key: &str) -> String {
        match self.translate(key) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(key, locale = %self.current_locale, %error, "rendering placeholder");
                format!("{}{}", defaults::MISSING_TRANSLATION_PREFIX, key)
            }
        }
    }

    /// Switches the active locale. Unknown locales leave it unchanged.
    pub fn set_locale(&mut self, locale: LanguageIdentifier) -> std::result::Result<(), I18nError> {
        if !self.catalog.contains(&locale) {
            tracing::warn!(
                requested = %locale,
                current = %self.current_locale,
                "rejecting unsupported locale"
            );
            return Err(I18nError::UnsupportedLocale(locale.to_string()));
        }

        if locale != self.current_locale {
            tracing::info!(from = %self.current_locale, to = %locale, "locale changed");
            self.current_locale = locale;
        }
        Ok(())
    }

    /// Parses `locale` and applies it with [`I18n::set_locale`].
    pub fn set_locale_str(&mut self, locale: &str) -> std::result::Result<(), I18nError> {
        let parsed = locale
            .parse::<LanguageIdentifier>()
            .map_err(|_| I18nError::UnsupportedLocale(locale.to_string()))?;
        self.set_locale(parsed)
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn fallback_locale(&self) -> &LanguageIdentifier {
        &self.fallback_locale
    }

    pub fn available_locales(&self) -> Vec<LanguageIdentifier> {
        self.catalog.locales()
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }
}

fn parse_configured_locale(tag: &str) -> std::result::Result<LanguageIdentifier, I18nError> {
    tag.parse::<LanguageIdentifier>()
        .map_err(|_| I18nError::Configuration(format!("`{}` is not a valid locale identifier", tag)))
}

fn resolve_locale(
    cli_lang: Option<&str>,
    config_lang: Option<&str>,
    system_lang: Option<&str>,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    [cli_lang, config_lang, system_lang]
        .into_iter()
        .flatten()
        .find_map(|candidate| match_available(candidate, available))
}

/// Exact match first, then the first available locale sharing the
/// primary language subtag (`en-US` selects `en`).
fn match_available(candidate: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    // POSIX-style tags such as `zh_CN` come from some systems.
    let requested: LanguageIdentifier = candidate.replace('_', "-").parse().ok()?;
    if available.contains(&requested) {
        return Some(requested);
    }
    available
        .iter()
        .find(|locale| locale.language == requested.language)
        .cloned()
}
