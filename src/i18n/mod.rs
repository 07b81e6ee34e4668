// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the JSON Toolkit.
//!
//! This module provides the locale catalog and the provider that resolves
//! dotted message keys (`app.title`) to display strings, using the Fluent
//! localization system for storage.
//!
//! # Features
//!
//! - Embedded `.ftl` catalogs for `en` and `zh`, or a directory override
//! - Start-up locale selection from CLI, config, or system settings
//! - Runtime language switching
//! - Fallback to the fallback locale when a translation is missing
//! - Key-parity checks across locales

pub mod catalog;
pub mod provider;

pub use catalog::{KeyParityReport, LocaleParity, MessageCatalog, MessageTree};
pub use provider::I18n;
