// SPDX-License-Identifier: MPL-2.0
//! Message catalog sources.
//!
//! Each locale has one Fluent catalog at `<locale>/messages.ftl`, resolved at
//! fetch time from the requested code. Nothing here checks that the code is a
//! known language: an absent catalog is reported as
//! [`CatalogError::NotFound`].

use crate::config::CATALOG_FILE;
use crate::error::{CatalogError, Error, Result};
use rust_embed::RustEmbed;
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(RustEmbed)]
#[folder = "assets/locales/"]
struct Asset;

/// Raw Fluent source for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub locale: String,
    pub source: String,
}

impl Catalog {
    pub fn new(locale: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            source: source.into(),
        }
    }
}

/// Relative path of the catalog for `locale`.
pub fn catalog_path(locale: &str) -> String {
    format!("{}/{}", locale, CATALOG_FILE)
}

/// Where compiled catalogs are fetched from.
pub trait CatalogSource: Send + Sync {
    fn fetch(&self, locale: &str) -> impl Future<Output = Result<Catalog>> + Send;
}

/// Catalogs compiled into the binary from `assets/locales/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalogs;

impl EmbeddedCatalogs {
    /// Locale codes that have an embedded catalog, sorted.
    pub fn locales() -> Vec<String> {
        let mut locales: Vec<String> = Asset::iter()
            .filter_map(|file| {
                file.strip_suffix(CATALOG_FILE)
                    .and_then(|dir| dir.strip_suffix('/'))
                    .map(str::to_string)
            })
            .collect();
        locales.sort();
        locales
    }
}

impl CatalogSource for EmbeddedCatalogs {
    async fn fetch(&self, locale: &str) -> Result<Catalog> {
        let file = Asset::get(&catalog_path(locale))
            .ok_or_else(|| CatalogError::NotFound(locale.to_string()))?;
        let source = String::from_utf8_lossy(file.data.as_ref()).into_owned();
        tracing::debug!(locale, bytes = source.len(), "Fetched embedded catalog");
        Ok(Catalog::new(locale, source))
    }
}

/// Catalogs read from a directory tree on disk.
#[derive(Debug, Clone)]
pub struct DirectoryCatalogs {
    root: PathBuf,
}

impl DirectoryCatalogs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl CatalogSource for DirectoryCatalogs {
    async fn fetch(&self, locale: &str) -> Result<Catalog> {
        if !is_plain_segment(locale) {
            return Err(CatalogError::InvalidLocale(locale.to_string()).into());
        }
        let path = self.root.join(locale).join(CATALOG_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(source) => {
                tracing::debug!(locale, path = %path.display(), "Fetched catalog");
                Ok(Catalog::new(locale, source))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(CatalogError::NotFound(locale.to_string()).into())
            }
            Err(err) => Err(Error::from(err)),
        }
    }
}

/// A code must name exactly one directory below the catalog root.
fn is_plain_segment(locale: &str) -> bool {
    !locale.is_empty()
        && locale != "."
        && locale != ".."
        && !locale.contains(['/', '\\'])
        && !std::path::Path::new(locale).is_absolute()
}
