// SPDX-License-Identifier: MPL-2.0
//! Date-formatting locale shared by every view that renders dates.
//!
//! Short codes are widened to the POSIX form `chrono` understands
//! (`fi` becomes `fi_FI`). Codes without locale data format as `en_US`
//! but are still reported back by [`CalendarLocale::code`].

use chrono::{DateTime, Locale, TimeZone};
use std::fmt::Display;
use std::sync::{PoisonError, RwLock};

const FALLBACK: Locale = Locale::en_US;

#[derive(Debug)]
struct State {
    code: String,
    locale: Locale,
}

#[derive(Debug)]
pub struct CalendarLocale {
    state: RwLock<State>,
}

impl Default for CalendarLocale {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LOCALE)
    }
}

impl CalendarLocale {
    pub fn new(code: &str) -> Self {
        Self {
            state: RwLock::new(State {
                code: code.to_string(),
                locale: resolve(code),
            }),
        }
    }

    pub fn set_locale(&self, code: &str) {
        let locale = resolve(code);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.code = code.to_string();
        state.locale = locale;
    }

    /// The code last passed to [`set_locale`](Self::set_locale).
    pub fn code(&self) -> String {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .code
            .clone()
    }

    pub fn locale(&self) -> Locale {
        self.state.read().unwrap_or_else(PoisonError::into_inner).locale
    }

    /// Formats with `strftime` syntax using localized month and day names.
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>, pattern: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        datetime.format_localized(pattern, self.locale()).to_string()
    }

    /// Locale's preferred date representation (`%x`).
    pub fn short_date<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.format(datetime, "%x")
    }

    /// Day, full month name and year, e.g. "5 January 2024".
    pub fn long_date<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.format(datetime, "%-d %B %Y")
    }
}

fn resolve(code: &str) -> Locale {
    let normalized = code.replace('-', "_");
    if let Ok(locale) = Locale::try_from(normalized.as_str()) {
        return locale;
    }

    let language = normalized.split('_').next().unwrap_or_default();
    let widened = match language {
        "en" => "en_US".to_string(),
        "sv" => "sv_SE".to_string(),
        "da" => "da_DK".to_string(),
        "uk" => "uk_UA".to_string(),
        "ja" => "ja_JP".to_string(),
        "ko" => "ko_KR".to_string(),
        "zh" => "zh_CN".to_string(),
        other => format!("{}_{}", other, other.to_uppercase()),
    };
    match Locale::try_from(widened.as_str()) {
        Ok(locale) => locale,
        Err(_) => {
            tracing::debug!(code, "No calendar data for locale, using {:?}", FALLBACK);
            FALLBACK
        }
    }
}
