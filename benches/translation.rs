// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for message lookup in the active catalog.
//!
//! Measures:
//! - Plain lookup of an existing message
//! - Plural selection through `$count`
//! - Lookup of a missing message (falls back to the id)

use criterion::{criterion_group, criterion_main, Criterion};
use locale_store::i18n::catalog::{CatalogSource, EmbeddedCatalogs};
use locale_store::i18n::{plurals, I18n, LocaleData};
use std::hint::black_box;

fn runtime_for(locale: &str) -> I18n {
    let catalog = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(EmbeddedCatalogs.fetch(locale))
        .unwrap();

    let i18n = I18n::with_missing_handler(|_, id| id.to_string());
    i18n.load_locale_data(
        locale,
        LocaleData {
            plurals: plurals::rules_for(locale),
        },
    );
    i18n.load(locale, catalog).unwrap();
    i18n.activate(locale).unwrap();
    i18n
}

fn bench_translation(c: &mut Criterion) {
    let mut group = c.benchmark_group("translation");
    let i18n = runtime_for("ru");

    group.bench_function("tr_existing", |b| {
        b.iter(|| black_box(i18n.tr(black_box("language-switcher"))));
    });

    group.bench_function("tr_count_plural", |b| {
        b.iter(|| black_box(i18n.tr_count("files-selected", black_box(5))));
    });

    group.bench_function("tr_missing", |b| {
        b.iter(|| black_box(i18n.tr(black_box("no-such-message"))));
    });

    group.finish();
}

criterion_group!(benches, bench_translation);
criterion_main!(benches);
