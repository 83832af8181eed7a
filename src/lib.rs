// SPDX-License-Identifier: MPL-2.0
//! `locale_store` keeps a desktop application's display language.
//!
//! It restores the user's language choice from persistent storage, loads
//! Fluent message catalogs on demand and keeps the translation runtime and the
//! date-formatting locale in step whenever the language changes.
//!
//! ```no_run
//! use locale_store::calendar::CalendarLocale;
//! use locale_store::i18n::{catalog::EmbeddedCatalogs, I18n};
//! use locale_store::storage::FileStorage;
//! use locale_store::store::LocalizationStore;
//! use std::sync::Arc;
//!
//! # async fn run() -> locale_store::error::Result<()> {
//! let store = LocalizationStore::new(
//!     Arc::new(FileStorage::in_data_dir()?),
//!     Arc::new(I18n::new()),
//!     Arc::new(CalendarLocale::default()),
//!     EmbeddedCatalogs,
//! );
//! store.init().await?;
//! store.set_locale("fi").await?;
//! println!("{}", store.i18n().tr("language-switcher"));
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod config;
pub mod error;
pub mod i18n;
pub mod observable;
pub mod paths;
pub mod storage;
pub mod store;
