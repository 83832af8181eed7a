// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for locale handling and persistence.

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Locale used when nothing has been stored yet.
pub const DEFAULT_LOCALE: &str = "en";

/// Storage key under which the active UI language is persisted.
pub const LOCALE_STORAGE_KEY: &str = "lang_ui";

// ==========================================================================
// File Names
// ==========================================================================

/// User preferences file inside the config directory.
pub const CONFIG_FILE: &str = "settings.toml";

/// Key-value state file inside the data directory.
pub const STORAGE_FILE: &str = "storage.toml";

/// Catalog file name inside each per-locale directory.
pub const CATALOG_FILE: &str = "messages.ftl";

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Default `tracing` filter directive when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info";
