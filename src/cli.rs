// SPDX-License-Identifier: MPL-2.0
//! Command-line front end for querying and checking the locale catalog.

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::i18n::I18n;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

pub const HELP: &str = "\
json-toolkit-i18n: query the JSON Toolkit locale catalog

USAGE:
  json-toolkit-i18n [OPTIONS] [KEY...]

OPTIONS:
  --lang <id>        Active locale (e.g. en, zh)
  --config <file>    Settings file instead of the default location
  --list             Print every key with its translation
  --check            Verify that all locales define the same keys
  --remember         Store the active locale in the settings file
  -h, --help         Print this help
";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Flags {
    pub help: bool,
    pub lang: Option<String>,
    pub config_path: Option<PathBuf>,
    pub list: bool,
    pub check: bool,
    pub remember: bool,
    pub keys: Vec<String>,
}

impl Flags {
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    pub fn from_vec(args: Vec<OsString>) -> Result<Self> {
        Self::parse(pico_args::Arguments::from_vec(args))
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let flags = Self {
            help: args.contains(["-h", "--help"]),
            lang: args.opt_value_from_str("--lang").map_err(usage_error)?,
            config_path: args.opt_value_from_str("--config").map_err(usage_error)?,
            list: args.contains("--list"),
            check: args.contains("--check"),
            remember: args.contains("--remember"),
            keys: args
                .finish()
                .into_iter()
                .map(|arg| {
                    arg.into_string()
                        .map_err(|arg| Error::Config(format!("argument is not UTF-8: {:?}", arg)))
                })
                .collect::<Result<Vec<_>>>()?,
        };

        if let Some(unknown) = flags.keys.iter().find(|key| key.starts_with("--")) {
            return Err(Error::Config(format!("unknown option `{}`", unknown)));
        }
        Ok(flags)
    }
}

fn usage_error(error: pico_args::Error) -> Error {
    Error::Config(error.to_string())
}

/// Executes `flags`, writing results to `out`.
///
/// Returns `false` when `--check` found locales with diverging keys.
pub fn run<W: Write>(flags: &Flags, out: &mut W) -> Result<bool> {
    if flags.help {
        write!(out, "{}", HELP)?;
        return Ok(true);
    }

    let config_path = flags
        .config_path
        .clone()
        .or_else(config::get_default_config_path);
    let mut settings_readable = true;
    let mut settings = match &config_path {
        Some(path) if path.exists() => match config::try_load_from_path(path) {
            Ok(settings) => settings,
            Err(Error::Config(error)) => {
                tracing::warn!(path = %path.display(), %error, "ignoring invalid settings file");
                settings_readable = false;
                Config::default()
            }
            Err(error) => return Err(error),
        },
        _ => Config::default(),
    };

    let i18n = I18n::from_config(flags.lang.clone(), &settings)?;
    tracing::debug!(locale = %i18n.current_locale(), "catalog ready");

    let mut consistent = true;
    if flags.check {
        let report = i18n.catalog().key_parity(i18n.fallback_locale())?;
        writeln!(out, "{}", report)?;
        consistent = report.is_consistent();
    }

    if flags.list {
        let keys: BTreeSet<&str> = [i18n.current_locale(), i18n.fallback_locale()]
            .into_iter()
            .filter_map(|locale| i18n.catalog().tree(locale))
            .flat_map(|tree| tree.keys())
            .collect();
        for key in keys {
            writeln!(out, "{}\t{}", key, i18n.tr(key))?;
        }
    }

    for key in &flags.keys {
        writeln!(out, "{}", i18n.tr(key))?;
    }

    if flags.remember {
        if !settings_readable {
            return Err(Error::Config(
                "settings file is not valid TOML; refusing to overwrite it".to_string(),
            ));
        }
        settings.language = Some(i18n.current_locale().to_string());
        match &config_path {
            Some(path) => config::save_to_path(&settings, path)?,
            None => tracing::warn!("no config directory available; preference not stored"),
        }
    }

    Ok(consistent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    fn run_to_string(flags: &Flags) -> (bool, String) {
        let mut out = Vec::new();
        let consistent = run(flags, &mut out).expect("run should succeed");
        (consistent, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_options_and_keys() {
        let flags = Flags::from_vec(args(&[
            "--lang", "en", "--config", "/tmp/s.toml", "--check", "app.title", "app.copy",
        ]))
        .unwrap();
        assert_eq!(flags.lang.as_deref(), Some("en"));
        assert_eq!(flags.config_path, Some(PathBuf::from("/tmp/s.toml")));
        assert!(flags.check);
        assert!(!flags.list);
        assert_eq!(flags.keys, vec!["app.title", "app.copy"]);
    }

    #[test]
    fn rejects_unknown_option() {
        let err = Flags::from_vec(args(&["--verbose"])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("--verbose")));
    }

    #[test]
    fn prints_translations_in_requested_locale() {
        let dir = tempdir().unwrap();
        let flags = Flags {
            lang: Some("en".into()),
            config_path: Some(dir.path().join("settings.toml")),
            keys: vec!["app.title".into(), "app.nonexistent".into()],
            ..Flags::default()
        };
        let (_, output) = run_to_string(&flags);
        assert_eq!(output, "JSON Toolkit\nMISSING: app.nonexistent\n");
    }

    #[test]
    fn defaults_to_chinese() {
        let dir = tempdir().unwrap();
        let flags = Flags {
            config_path: Some(dir.path().join("settings.toml")),
            keys: vec!["app.title".into()],
            ..Flags::default()
        };
        let (_, output) = run_to_string(&flags);
        assert_eq!(output, "JSON 工具箱\n");
    }

    #[test]
    fn check_reports_consistent_catalog() {
        let dir = tempdir().unwrap();
        let flags = Flags {
            config_path: Some(dir.path().join("settings.toml")),
            check: true,
            ..Flags::default()
        };
        let (consistent, output) = run_to_string(&flags);
        assert!(consistent);
        assert!(output.contains("all locales match `en`"));
    }

    #[test]
    fn check_detects_diverging_catalog_dir() {
        let dir = tempdir().unwrap();
        let locales = dir.path().join("locales");
        std::fs::create_dir_all(&locales).unwrap();
        std::fs::write(locales.join("en.ftl"), "app =\n    .title = T\n    .copy = C\n").unwrap();
        std::fs::write(locales.join("zh.ftl"), "app =\n    .title = T\n").unwrap();

        let settings_path = dir.path().join("settings.toml");
        let settings = Config {
            catalog_dir: Some(locales),
            ..Config::default()
        };
        config::save_to_path(&settings, &settings_path).unwrap();

        let flags = Flags {
            config_path: Some(settings_path),
            check: true,
            ..Flags::default()
        };
        let (consistent, output) = run_to_string(&flags);
        assert!(!consistent);
        assert!(output.contains("missing [app.copy]"));
    }

    #[test]
    fn list_prints_every_key() {
        let dir = tempdir().unwrap();
        let flags = Flags {
            lang: Some("en".into()),
            config_path: Some(dir.path().join("settings.toml")),
            list: true,
            ..Flags::default()
        };
        let (_, output) = run_to_string(&flags);
        assert_eq!(output.lines().count(), 26);
        assert!(output.contains("app.readOnlyWarning\tCannot edit in read-only editor\n"));
    }

    #[test]
    fn remember_stores_active_locale() {
        let dir = tempdir().unwrap();
        let settings_path = dir.path().join("settings.toml");
        let flags = Flags {
            lang: Some("en".into()),
            config_path: Some(settings_path.clone()),
            remember: true,
            ..Flags::default()
        };
        run_to_string(&flags);

        let stored = config::load_from_path(&settings_path).unwrap();
        assert_eq!(stored.language.as_deref(), Some("en"));

        let flags = Flags {
            config_path: Some(settings_path),
            keys: vec!["app.clear".into()],
            ..Flags::default()
        };
        let (_, output) = run_to_string(&flags);
        assert_eq!(output, "Clear\n");
    }

    #[test]
    fn list_includes_keys_only_the_active_locale_defines() {
        let dir = tempdir().unwrap();
        let locales = dir.path().join("locales");
        std::fs::create_dir_all(&locales).unwrap();
        std::fs::write(locales.join("en.ftl"), "app =\n    .title = T\n    .copy = C\n").unwrap();
        std::fs::write(locales.join("zh.ftl"), "app =\n    .title = 标题\n    .paste = 粘贴\n").unwrap();

        let settings_path = dir.path().join("settings.toml");
        let settings = Config {
            catalog_dir: Some(locales),
            ..Config::default()
        };
        config::save_to_path(&settings, &settings_path).unwrap();

        let flags = Flags {
            config_path: Some(settings_path),
            list: true,
            ..Flags::default()
        };
        let (_, output) = run_to_string(&flags);
        assert_eq!(output, "app.copy\tC\napp.paste\t粘贴\napp.title\t标题\n");
    }

    #[test]
    fn remember_keeps_unreadable_settings_file() {
        let dir = tempdir().unwrap();
        let settings_path = dir.path().join("settings.toml");
        std::fs::write(&settings_path, "not = valid = toml").unwrap();

        let flags = Flags {
            lang: Some("en".into()),
            config_path: Some(settings_path.clone()),
            remember: true,
            ..Flags::default()
        };
        let mut out = Vec::new();
        let err = run(&flags, &mut out).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("refusing to overwrite")));
        assert_eq!(
            std::fs::read_to_string(&settings_path).unwrap(),
            "not = valid = toml"
        );
    }

    #[test]
    fn unreadable_settings_file_still_allows_lookups() {
        let dir = tempdir().unwrap();
        let settings_path = dir.path().join("settings.toml");
        std::fs::write(&settings_path, "not = valid = toml").unwrap();

        let flags = Flags {
            config_path: Some(settings_path),
            keys: vec!["app.title".into()],
            ..Flags::default()
        };
        let (_, output) = run_to_string(&flags);
        assert_eq!(output, "JSON 工具箱\n");
    }

    #[test]
    fn help_prints_usage() {
        let flags = Flags::from_vec(args(&["--help"])).unwrap();
        let (_, output) = run_to_string(&flags);
        assert!(output.starts_with("json-toolkit-i18n"));
    }
}
