// SPDX-License-Identifier: MPL-2.0
//! Message trees backed by Fluent resources.
//!
//! Each locale is one `.ftl` resource. A dotted key `namespace.leaf` names
//! the attribute `leaf` of the Fluent message `namespace`; a key without a
//! dot names a message value:
//!
//! ```ftl
//! app =
//!     .title = JSON Toolkit
//! ```
//!
//! Resources are validated when they enter the catalog: only plain text
//! patterns are accepted, so every key resolves to a literal string.

use crate::error::{I18nError, Result};
use fluent_bundle::{FluentBundle, FluentResource};
use fluent_syntax::ast;
use rust_embed::RustEmbed;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const RESOURCE_EXTENSION: &str = "ftl";

/// The string table of a single locale.
pub struct MessageTree {
    locale: LanguageIdentifier,
    bundle: FluentBundle<FluentResource>,
    keys: BTreeSet<String>,
}

impl MessageTree {
    /// Parses and validates `source` as the tree of `locale`.
    pub fn parse(locale: LanguageIdentifier, source: String) -> std::result::Result<Self, I18nError> {
        let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
            let detail = errors
                .first()
                .map(|error| format!("{:?} at byte {}", error.kind, error.pos.start))
                .unwrap_or_default();
            I18nError::Configuration(format!(
                "{}: {} syntax error(s), first: {}",
                locale,
                errors.len(),
                detail
            ))
        })?;

        let keys = collect_keys(&locale, &resource)?;
        if keys.is_empty() {
            return Err(I18nError::Configuration(format!(
                "{}: resource defines no messages",
                locale
            )));
        }

        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            I18nError::Configuration(format!("{}: {:?}", locale, errors))
        })?;

        Ok(Self {
            locale,
            bundle,
            keys,
        })
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Every dotted key of the tree, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the literal value of `key`, if the tree defines it.
    pub fn get(&self, key: &str) -> Option<String> {
        let (id, attribute) = match key.split_once('.') {
            Some((id, attribute)) => (id, Some(attribute)),
            None => (key, None),
        };

        let message = self.bundle.get_message(id)?;
        let pattern = match attribute {
            Some(name) => message.get_attribute(name)?.value(),
            None => message.value()?,
        };

        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, None, &mut errors);
        if errors.is_empty() {
            Some(value.into_owned())
        } else {
            None
        }
    }
}

impl fmt::Debug for MessageTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageTree")
            .field("locale", &self.locale.to_string())
            .field("keys", &self.keys)
            .finish()
    }
}

fn collect_keys(
    locale: &LanguageIdentifier,
    resource: &FluentResource,
) -> std::result::Result<BTreeSet<String>, I18nError> {
    let mut keys = BTreeSet::new();

    for entry in resource.entries() {
        match entry {
            ast::Entry::Message(message) => {
                let id = message.id.name;
                if let Some(value) = &message.value {
                    ensure_plain_text(locale, id, value)?;
                    keys.insert(id.to_string());
                }
                for attribute in &message.attributes {
                    let key = format!("{}.{}", id, attribute.id.name);
                    ensure_plain_text(locale, &key, &attribute.value)?;
                    keys.insert(key);
                }
            }
            ast::Entry::Term(term) => {
                return Err(I18nError::Configuration(format!(
                    "{}: term `-{}` is not supported",
                    locale, term.id.name
                )));
            }
            ast::Entry::Junk { content } => {
                return Err(I18nError::Configuration(format!(
                    "{}: unparsable entry `{}`",
                    locale,
                    content.trim()
                )));
            }
            _ => {}
        }
    }

    Ok(keys)
}

fn ensure_plain_text(
    locale: &LanguageIdentifier,
    key: &str,
    pattern: &ast::Pattern<&str>,
) -> std::result::Result<(), I18nError> {
    // String literals are how Fluent escapes `{` and `}`; they stay verbatim.
    let interpolated = pattern.elements.iter().any(|element| match element {
        ast::PatternElement::Placeable { expression } => !matches!(
            expression,
            ast::Expression::Inline(ast::InlineExpression::StringLiteral { .. })
        ),
        _ => false,
    });
    if interpolated {
        return Err(I18nError::Configuration(format!(
            "{}: `{}` uses a placeable; only literal text is supported",
            locale, key
        )));
    }
    Ok(())
}

/// Immutable mapping from locale to its [`MessageTree`].
#[derive(Debug, Default)]
pub struct MessageCatalog {
    trees: HashMap<LanguageIdentifier, MessageTree>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the catalog from the resources compiled into the binary.
    pub fn embedded() -> std::result::Result<Self, I18nError> {
        let mut catalog = Self::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale_str) = filename.strip_suffix(".ftl") else {
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };
            let source = String::from_utf8(content.data.into_owned()).map_err(|_| {
                I18nError::Configuration(format!("{}: resource is not valid UTF-8", filename))
            })?;
            catalog.insert(parse_resource_locale(locale_str)?, source)?;
        }

        catalog.ensure_not_empty()?;
        tracing::debug!(locales = catalog.len(), "loaded embedded catalog");
        Ok(catalog)
    }

    /// Builds the catalog from `(locale, Fluent source)` pairs.
    pub fn from_sources<I, L, S>(sources: I) -> std::result::Result<Self, I18nError>
    where
        I: IntoIterator<Item = (L, S)>,
        L: AsRef<str>,
        S: Into<String>,
    {
        let mut catalog = Self::new();
        for (locale, source) in sources {
            catalog.insert(parse_resource_locale(locale.as_ref())?, source)?;
        }
        catalog.ensure_not_empty()?;
        Ok(catalog)
    }

    /// Loads every `<locale>.ftl` file in `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(RESOURCE_EXTENSION)
            })
            .collect();
        paths.sort();

        let mut catalog = Self::new();
        for path in paths {
            let Some(locale_str) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let locale = parse_resource_locale(locale_str)?;
            let source = fs::read_to_string(&path)?;
            catalog.insert(locale, source)?;
        }

        catalog.ensure_not_empty()?;
        tracing::debug!(dir = %dir.display(), locales = catalog.len(), "loaded catalog directory");
        Ok(catalog)
    }

    /// Adds the tree of `locale`. A locale may only be registered once.
    pub fn insert(
        &mut self,
        locale: LanguageIdentifier,
        source: impl Into<String>,
    ) -> std::result::Result<(), I18nError> {
        if self.trees.contains_key(&locale) {
            return Err(I18nError::Configuration(format!(
                "{}: locale registered twice",
                locale
            )));
        }
        let tree = MessageTree::parse(locale.clone(), source.into())?;
        self.trees.insert(locale, tree);
        Ok(())
    }

    pub fn contains(&self, locale: &LanguageIdentifier) -> bool {
        self.trees.contains_key(locale)
    }

    pub fn tree(&self, locale: &LanguageIdentifier) -> Option<&MessageTree> {
        self.trees.get(locale)
    }

    /// Registered locales, sorted by their tag.
    pub fn locales(&self) -> Vec<LanguageIdentifier> {
        let mut locales: Vec<_> = self.trees.keys().cloned().collect();
        locales.sort_by_key(|locale| locale.to_string());
        locales
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn lookup(&self, locale: &LanguageIdentifier, key: &str) -> Option<String> {
        self.trees.get(locale)?.get(key)
    }

    /// Compares every locale's key set against the one of `reference`.
    pub fn key_parity(
        &self,
        reference: &LanguageIdentifier,
    ) -> std::result::Result<KeyParityReport, I18nError> {
        let reference_tree = self.trees.get(reference).ok_or_else(|| {
            I18nError::Configuration(format!("{}: reference locale is not in the catalog", reference))
        })?;

        let locales = self
            .locales()
            .into_iter()
            .filter(|locale| locale != reference)
            .filter_map(|locale| {
                let tree = self.trees.get(&locale)?;
                Some(LocaleParity {
                    missing: reference_tree
                        .keys
                        .difference(&tree.keys)
                        .cloned()
                        .collect(),
                    extra: tree.keys.difference(&reference_tree.keys).cloned().collect(),
                    locale,
                })
            })
            .collect();

        Ok(KeyParityReport {
            reference: reference.clone(),
            locales,
        })
    }

    /// Fails unless every locale defines exactly the keys of `reference`.
    pub fn check_key_parity(
        &self,
        reference: &LanguageIdentifier,
    ) -> std::result::Result<(), I18nError> {
        let report = self.key_parity(reference)?;
        if report.is_consistent() {
            Ok(())
        } else {
            Err(I18nError::Configuration(report.to_string()))
        }
    }

    fn ensure_not_empty(&self) -> std::result::Result<(), I18nError> {
        if self.trees.is_empty() {
            return Err(I18nError::Configuration(
                "catalog contains no locales".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_resource_locale(tag: &str) -> std::result::Result<LanguageIdentifier, I18nError> {
    tag.parse::<LanguageIdentifier>().map_err(|_| {
        I18nError::Configuration(format!("`{}` is not a valid locale identifier", tag))
    })
}

/// Key differences of one locale against the reference locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleParity {
    pub locale: LanguageIdentifier,
    /// Keys of the reference locale this locale lacks.
    pub missing: Vec<String>,
    /// Keys this locale defines that the reference locale lacks.
    pub extra: Vec<String>,
}

impl LocaleParity {
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParityReport {
    pub reference: LanguageIdentifier,
    pub locales: Vec<LocaleParity>,
}

impl KeyParityReport {
    pub fn is_consistent(&self) -> bool {
        self.locales.iter().all(LocaleParity::is_consistent)
    }
}

impl fmt::Display for KeyParityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_consistent() {
            return write!(f, "all locales match `{}`", self.reference);
        }
        write!(f, "key mismatch against `{}`:", self.reference)?;
        for parity in self.locales.iter().filter(|parity| !parity.is_consistent()) {
            write!(f, " {}", parity.locale)?;
            if !parity.missing.is_empty() {
                write!(f, " missing [{}]", parity.missing.join(", "))?;
            }
            if !parity.extra.is_empty() {
                write!(f, " extra [{}]", parity.extra.join(", "))?;
            }
            write!(f, ";")?;
        }
        Ok(())
    }
}
