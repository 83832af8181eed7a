// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) runtime built on Fluent.
//!
//! The runtime owns one bundle per loaded locale and the plural rules
//! registered for it. Exactly one locale is active at a time; lookups always
//! go through the active bundle.
//!
//! # Features
//!
//! - Catalogs are loaded on demand, see [`catalog::CatalogSource`]
//! - Runtime language switching with change notification ([`I18n::subscribe`])
//! - A missing message never fails: the `missing` hook decides what to show,
//!   by default the message id itself

pub mod catalog;
pub mod languages;
pub mod plurals;

use crate::error::{CatalogError, Result};
use catalog::Catalog;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use intl_pluralrules::PluralCategory;
use plurals::PluralRules;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tokio::sync::watch;
use unic_langid::LanguageIdentifier;

/// Called with `(active_locale, message_id)` when a message is absent.
pub type MissingHandler = Box<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Per-locale data registered alongside a catalog.
#[derive(Debug, Default)]
pub struct LocaleData {
    pub plurals: Option<PluralRules>,
}

#[derive(Default)]
struct Runtime {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    plurals: HashMap<String, PluralRules>,
    active: Option<String>,
}

pub struct I18n {
    runtime: RwLock<Runtime>,
    missing: MissingHandler,
    activation: watch::Sender<Option<String>>,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

impl I18n {
    pub fn new() -> Self {
        Self::with_missing_handler(warn_missing)
    }

    pub fn with_missing_handler<F>(missing: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        let (activation, _) = watch::channel(None);
        Self {
            runtime: RwLock::new(Runtime::default()),
            missing: Box::new(missing),
            activation,
        }
    }

    /// Registers locale data (plural rules) for `code`.
    pub fn load_locale_data(&self, code: &str, data: LocaleData) {
        let mut runtime = self.write();
        match data.plurals {
            Some(rules) => {
                runtime.plurals.insert(code.to_string(), rules);
            }
            None => {
                runtime.plurals.remove(code);
            }
        }
    }

    /// Parses `catalog` and installs it as the bundle for `code`, replacing any previous one.
    pub fn load(&self, code: &str, catalog: Catalog) -> Result<()> {
        let langid: LanguageIdentifier = code
            .parse()
            .map_err(|_| CatalogError::InvalidLocale(code.to_string()))?;

        let resource = FluentResource::try_new(catalog.source).map_err(|(_, errors)| {
            CatalogError::Parse {
                locale: code.to_string(),
                message: format!("{:?}", errors),
            }
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![langid]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| CatalogError::Parse {
                locale: code.to_string(),
                message: format!("{:?}", errors),
            })?;

        self.write().bundles.insert(code.to_string(), bundle);
        tracing::debug!(locale = code, "Loaded catalog");
        Ok(())
    }

    /// Makes `code` the locale consulted by lookups. The catalog must be loaded first.
    pub fn activate(&self, code: &str) -> Result<()> {
        {
            let mut runtime = self.write();
            if !runtime.bundles.contains_key(code) {
                return Err(CatalogError::NotLoaded(code.to_string()).into());
            }
            runtime.active = Some(code.to_string());
        }
        self.activation.send_replace(Some(code.to_string()));
        tracing::debug!(locale = code, "Activated catalog");
        Ok(())
    }

    pub fn active_locale(&self) -> Option<String> {
        self.read().active.clone()
    }

    pub fn is_loaded(&self, code: &str) -> bool {
        self.read().bundles.contains_key(code)
    }

    pub fn loaded_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.read().bundles.keys().cloned().collect();
        locales.sort();
        locales
    }

    /// Receiver that observes every activation.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.activation.subscribe()
    }

    /// Translates `id` in the active locale.
    pub fn tr(&self, id: &str) -> String {
        self.tr_args(id, None)
    }

    /// Translates `id` with Fluent arguments.
    pub fn tr_args(&self, id: &str, args: Option<&FluentArgs>) -> String {
        let runtime = self.read();
        if let Some(bundle) = runtime.active.as_ref().and_then(|code| runtime.bundles.get(code)) {
            if let Some(pattern) = bundle.get_message(id).and_then(|message| message.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(pattern, args, &mut errors);
                if !errors.is_empty() {
                    tracing::debug!(id, ?errors, "Errors while formatting message");
                }
                return value.into_owned();
            }
        }

        let locale = runtime.active.clone().unwrap_or_default();
        drop(runtime);
        (self.missing)(&locale, id)
    }

    /// Translates `id` passing `n` as the `$count` argument.
    pub fn tr_count(&self, id: &str, n: u64) -> String {
        let mut args = FluentArgs::new();
        args.set("count", n);
        self.tr_args(id, Some(&args))
    }

    /// Plural category of `n` under the active locale's registered rules.
    pub fn plural_category(&self, n: u64) -> Option<PluralCategory> {
        let runtime = self.read();
        let code = runtime.active.as_ref()?;
        runtime.plurals.get(code).map(|rules| rules.select(n))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Runtime> {
        self.runtime.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Runtime> {
        self.runtime.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("loaded", &self.loaded_locales())
            .field("active", &self.active_locale())
            .finish_non_exhaustive()
    }
}

/// Default `missing` hook: warn and show the id.
fn warn_missing(locale: &str, id: &str) -> String {
    tracing::warn!(locale, id, "Missing localization");
    id.to_string()
}
