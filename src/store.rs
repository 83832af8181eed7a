// SPDX-License-Identifier: MPL-2.0
//! The active UI language and the locale switch that keeps every
//! locale-dependent service in step with it.
//!
//! A switch runs in a fixed order:
//!
//! 1. fetch the catalog and load it with its plural rules into the runtime,
//! 2. set the calendar locale,
//! 3. set the active-locale field, which persists it under `lang_ui`,
//! 4. activate the catalog.
//!
//! Switches are serialized. Each call to [`LocalizationStore::set_locale`]
//! takes a ticket when it is made; when a queued switch reaches the front and
//! a newer ticket exists, it is skipped and reports
//! [`LocaleSwitch::Superseded`]. Once all calls settle, the calendar, the
//! runtime and the field agree on the newest locale.

use crate::calendar::CalendarLocale;
use crate::config::{DEFAULT_LOCALE, LOCALE_STORAGE_KEY};
use crate::error::Result;
use crate::i18n::catalog::CatalogSource;
use crate::i18n::languages::{self, Language};
use crate::i18n::{plurals, I18n, LocaleData};
use crate::observable::{Observable, Subscription};
use crate::storage::{create_storage, Storage, StorageBackend};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of [`LocalizationStore::set_locale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSwitch {
    Applied,
    /// A newer request was made before this one started.
    Superseded,
}

pub struct LocalizationStore<C> {
    active: Observable<String>,
    storage: Storage,
    i18n: Arc<I18n>,
    calendar: Arc<CalendarLocale>,
    catalogs: C,
    switch_lock: Mutex<()>,
    requests: AtomicU64,
}

impl<C: CatalogSource> LocalizationStore<C> {
    /// Creates a store whose language defaults to `en`.
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        i18n: Arc<I18n>,
        calendar: Arc<CalendarLocale>,
        catalogs: C,
    ) -> Self {
        Self::with_default_locale(DEFAULT_LOCALE, backend, i18n, calendar, catalogs)
    }

    /// Restores the active locale from `backend`, falling back to `default_locale`,
    /// and persists every later change.
    pub fn with_default_locale(
        default_locale: &str,
        backend: Arc<dyn StorageBackend>,
        i18n: Arc<I18n>,
        calendar: Arc<CalendarLocale>,
        catalogs: C,
    ) -> Self {
        let storage = create_storage(backend, LOCALE_STORAGE_KEY, default_locale);
        let active = Observable::new(storage.get());

        let persist = storage.clone();
        active.subscribe(move |locale: &String| persist.set(locale));

        Self {
            active,
            storage,
            i18n,
            calendar,
            catalogs,
            switch_lock: Mutex::new(()),
            requests: AtomicU64::new(0),
        }
    }

    pub fn active_locale(&self) -> String {
        self.active.get()
    }

    /// Locale used while nothing is stored.
    pub fn default_locale(&self) -> &str {
        self.storage.default_value()
    }

    /// Known languages sorted by English title.
    pub fn languages(&self) -> Vec<Language> {
        languages::languages()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn i18n(&self) -> &Arc<I18n> {
        &self.i18n
    }

    pub fn calendar(&self) -> &Arc<CalendarLocale> {
        &self.calendar
    }

    /// Observes changes of the active locale, e.g. to trigger a re-render.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.active.subscribe(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.active.unsubscribe(subscription)
    }

    /// Loads and activates the restored locale. Call once before the first render.
    pub async fn init(&self) -> Result<LocaleSwitch> {
        let locale = self.active_locale();
        self.set_locale(&locale).await
    }

    /// Fetches the catalog for `locale` and loads it into the runtime with its plural rules.
    ///
    /// Does not activate it. A missing catalog is returned as an error; there
    /// is no fallback locale.
    pub async fn load(&self, locale: &str) -> Result<()> {
        let catalog = self.catalogs.fetch(locale).await?;
        self.i18n.load_locale_data(
            locale,
            LocaleData {
                plurals: plurals::rules_for(locale),
            },
        );
        self.i18n.load(locale, catalog)
    }

    /// Switches the UI language to `locale`.
    ///
    /// The request is ordered against other switches as soon as this method is
    /// called, before the returned future is first polled.
    pub fn set_locale(
        &self,
        locale: &str,
    ) -> impl Future<Output = Result<LocaleSwitch>> + Send + '_ {
        let locale = locale.to_string();
        let ticket = self.requests.fetch_add(1, Ordering::SeqCst) + 1;

        async move {
            let _guard = self.switch_lock.lock().await;
            if self.requests.load(Ordering::SeqCst) != ticket {
                tracing::debug!(locale = %locale, "Locale switch superseded");
                return Ok(LocaleSwitch::Superseded);
            }

            self.load(&locale).await?;

            // Calendar before the field: listeners re-render on the field change.
            self.calendar.set_locale(&locale);
            self.active.set(locale.clone());

            self.i18n.activate(&locale)?;
            tracing::info!(locale = %locale, "UI locale switched");
            Ok(LocaleSwitch::Applied)
        }
    }
}

impl<C> std::fmt::Debug for LocalizationStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizationStore")
            .field("active", &self.active.get())
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}
