// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for locale selection.
//!
//! This module serves as the single source of truth for the locales the
//! provider starts with when neither the command line nor `settings.toml`
//! say otherwise.

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Locale active at start-up.
pub const DEFAULT_LOCALE: &str = "zh";

/// Locale consulted when the active locale lacks a key.
pub const FALLBACK_LOCALE: &str = "en";

/// Whether the OS locale takes part in start-up resolution.
pub const DEFAULT_DETECT_SYSTEM_LOCALE: bool = false;

// ==========================================================================
// Rendering Defaults
// ==========================================================================

/// Prefix of the placeholder rendered in place of a missing translation.
pub const MISSING_TRANSLATION_PREFIX: &str = "MISSING: ";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!DEFAULT_LOCALE.is_empty());
    assert!(!FALLBACK_LOCALE.is_empty());
    assert!(!MISSING_TRANSLATION_PREFIX.is_empty());
};
