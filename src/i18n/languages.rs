// SPDX-License-Identifier: MPL-2.0
//! Languages offered in the language switcher.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    /// English name, used for ordering.
    pub title: &'static str,
    /// Name in the language itself.
    pub native_title: &'static str,
}

const LANGUAGES: [Language; 3] = [
    Language {
        code: "en",
        title: "English",
        native_title: "English",
    },
    Language {
        code: "ru",
        title: "Russian",
        native_title: "Русский",
    },
    Language {
        code: "fi",
        title: "Finnish",
        native_title: "Suomi",
    },
];

/// Known languages sorted by English title.
pub fn languages() -> Vec<Language> {
    let mut languages = LANGUAGES.to_vec();
    languages.sort_by(|a, b| a.title.cmp(b.title));
    languages
}

pub fn find(code: &str) -> Option<Language> {
    LANGUAGES.iter().copied().find(|language| language.code == code)
}

/// Picks the first known language matching a system locale such as "fi-FI" or "ru_RU.UTF-8".
pub fn match_system_locale(system: &str) -> Option<Language> {
    let language = system
        .split(|c: char| c == '-' || c == '_' || c == '.')
        .next()?
        .to_lowercase();
    find(&language)
}
