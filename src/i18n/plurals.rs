// SPDX-License-Identifier: MPL-2.0
//! Cardinal plural rules keyed by locale code.

use intl_pluralrules::{PluralCategory, PluralRuleType, PluralRules as IntlPluralRules};
use unic_langid::LanguageIdentifier;

/// Plural rules for one locale, registered with the runtime alongside its catalog.
pub struct PluralRules {
    rules: IntlPluralRules,
}

impl PluralRules {
    /// Plural category of `n`, e.g. `FEW` for 3 in Russian.
    pub fn select(&self, n: u64) -> PluralCategory {
        self.rules.select(n).unwrap_or(PluralCategory::OTHER)
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        self.rules.get_locale()
    }
}

impl std::fmt::Debug for PluralRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluralRules")
            .field("locale", &self.locale().to_string())
            .finish()
    }
}

/// Looks up the cardinal rules for `code`.
///
/// Returns `None` when the code is not a valid language identifier or CLDR
/// has no rules for it.
pub fn rules_for(code: &str) -> Option<PluralRules> {
    let langid: LanguageIdentifier = code.parse().ok()?;
    IntlPluralRules::create(langid, PluralRuleType::CARDINAL)
        .ok()
        .map(|rules| PluralRules { rules })
}
