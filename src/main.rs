// SPDX-License-Identifier: MPL-2.0
use fluent_bundle::FluentArgs;
use locale_store::calendar::CalendarLocale;
use locale_store::config::{self, Config};
use locale_store::error::Result;
use locale_store::i18n::catalog::{CatalogSource, DirectoryCatalogs, EmbeddedCatalogs};
use locale_store::i18n::languages;
use locale_store::i18n::I18n;
use locale_store::paths;
use locale_store::storage::{FileStorage, StorageBackend};
use locale_store::store::LocalizationStore;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
locale-store

USAGE:
  locale-store [OPTIONS]

OPTIONS:
  --lang <CODE>         Switch the UI language and remember it
  --name <NAME>         Name used in the greeting [default: World]
  --catalogs <DIR>      Read catalogs from DIR/<code>/messages.ftl
  --config-dir <DIR>    Override the settings directory
  --data-dir <DIR>      Override the state directory
  --list                List the available languages
  -h, --help            Print help
";

struct Flags {
    lang: Option<String>,
    name: String,
    catalogs: Option<String>,
    list: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return ExitCode::SUCCESS;
    }

    let parsed = parse_flags(args);
    let (flags, data_dir, config_dir) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = paths::init_cli_overrides(data_dir, config_dir) {
        eprintln!("error: {}", err);
        return ExitCode::FAILURE;
    }

    let (config, warning) = config::load();
    init_logging(&config);
    if let Some(key) = warning {
        tracing::warn!(key = %key, "Using default configuration");
    }

    match run(flags, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "locale-store failed");
            ExitCode::FAILURE
        }
    }
}

type ParsedFlags = (Flags, Option<String>, Option<String>);

fn parse_flags(
    mut args: pico_args::Arguments,
) -> std::result::Result<ParsedFlags, pico_args::Error> {
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        name: args
            .opt_value_from_str("--name")?
            .unwrap_or_else(|| "World".to_string()),
        catalogs: args.opt_value_from_str("--catalogs")?,
        list: args.contains("--list"),
    };
    let data_dir = args.opt_value_from_str("--data-dir")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;

    let remaining = args.finish();
    if !remaining.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {:?}", remaining),
        });
    }
    Ok((flags, data_dir, config_dir))
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(flags: Flags, config: Config) -> Result<()> {
    if flags.list {
        for language in languages::languages() {
            println!("{:<4}{:<10}{}", language.code, language.title, language.native_title);
        }
        return Ok(());
    }

    let backend: Arc<dyn StorageBackend> = Arc::new(FileStorage::in_data_dir()?);
    let default_locale = startup_default(&config);

    let catalog_dir = flags
        .catalogs
        .clone()
        .map(std::path::PathBuf::from)
        .or_else(|| config.catalogs.directory.clone());
    match catalog_dir {
        Some(dir) => {
            let catalogs = DirectoryCatalogs::new(dir);
            tracing::debug!(
                root = %catalogs.root().display(),
                "Reading catalogs from directory"
            );
            show(store(&default_locale, backend, catalogs), &flags).await
        }
        None => show(store(&default_locale, backend, EmbeddedCatalogs), &flags).await,
    }
}

/// Locale used when nothing is stored: configured default, else the system language if known.
fn startup_default(config: &Config) -> String {
    if let Some(code) = config.general.default_locale.as_deref().filter(|c| !c.is_empty()) {
        return code.to_string();
    }
    sys_locale::get_locale()
        .and_then(|system| languages::match_system_locale(&system))
        .map(|language| language.code.to_string())
        .unwrap_or_else(|| config.default_locale().to_string())
}

fn store<C: CatalogSource>(
    default_locale: &str,
    backend: Arc<dyn StorageBackend>,
    catalogs: C,
) -> LocalizationStore<C> {
    LocalizationStore::with_default_locale(
        default_locale,
        backend,
        Arc::new(I18n::new()),
        Arc::new(CalendarLocale::default()),
        catalogs,
    )
}

async fn show<C: CatalogSource>(store: LocalizationStore<C>, flags: &Flags) -> Result<()> {
    match flags.lang.as_deref() {
        Some(lang) => store.set_locale(lang).await?,
        None => store.init().await?,
    };

    let i18n = store.i18n();
    let active = store.active_locale();
    let language = languages::find(&active)
        .map(|language| language.native_title.to_string())
        .unwrap_or_else(|| active.clone());

    println!("{}", i18n.tr("app-title"));

    let mut args = FluentArgs::new();
    args.set("name", flags.name.as_str());
    println!("{}", i18n.tr_args("greeting", Some(&args)));

    let mut args = FluentArgs::new();
    args.set("language", language);
    println!("{}", i18n.tr_args("language-current", Some(&args)));

    for count in [1, 3, 5] {
        println!("{}", i18n.tr_count("files-selected", count));
    }

    let now = chrono::Local::now();
    tracing::debug!(
        locale = %store.calendar().code(),
        short_date = %store.calendar().short_date(&now),
        "Calendar locale applied"
    );
    let mut args = FluentArgs::new();
    args.set("date", store.calendar().long_date(&now));
    println!("{}", i18n.tr_args("today", Some(&args)));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn args(list: &[&str]) -> pico_args::Arguments {
        pico_args::Arguments::from_vec(list.iter().map(OsString::from).collect())
    }

    #[test]
    fn parses_known_flags() {
        let args = args(&["--lang", "fi", "--list", "--data-dir", "/tmp/state"]);
        let (flags, data_dir, config_dir) = parse_flags(args).expect("valid flags");

        assert_eq!(flags.lang.as_deref(), Some("fi"));
        assert_eq!(flags.name, "World");
        assert!(flags.list);
        assert_eq!(data_dir.as_deref(), Some("/tmp/state"));
        assert_eq!(config_dir, None);
    }

    #[test]
    fn misspelled_flag_is_rejected() {
        let args = args(&["--lnag", "fi"]);
        let err = parse_flags(args).err().expect("unknown flag must fail");
        assert!(err.to_string().contains("--lnag"), "{}", err);
    }

    #[test]
    fn stray_positional_is_rejected() {
        assert!(parse_flags(args(&["--lang", "fi", "extra"])).is_err());
    }
}
