// SPDX-License-Identifier: MPL-2.0
//! `json_toolkit_i18n` holds the locale string tables of the JSON Toolkit
//! and the provider that turns message keys into display strings.
//!
//! It ships English and Simplified Chinese catalogs as Fluent resources,
//! keeps the active locale on an explicit [`i18n::I18n`] handle, and falls
//! back to a second locale when a key is missing.
//!
//! ```
//! use json_toolkit_i18n::i18n::{I18n, MessageCatalog};
//!
//! let catalog = MessageCatalog::embedded().unwrap();
//! let mut i18n = I18n::initialize(catalog, "zh".parse().unwrap(), "en".parse().unwrap()).unwrap();
//! assert_eq!(i18n.tr("app.title"), "JSON 工具箱");
//!
//! i18n.set_locale("en".parse().unwrap()).unwrap();
//! assert_eq!(i18n.tr("app.title"), "JSON Toolkit");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod i18n;
