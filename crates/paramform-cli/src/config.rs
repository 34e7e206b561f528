// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use paramform_app::{DEFAULT_LOCALE, DEFAULT_PAGE_SIZE, EditorSettings, PlatformMetadata};
use paramform_catalog::DEFAULT_MAX_RESULTS;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "paramform";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_FILTER: &str = "paramform=info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub editor: Editor,
    #[serde(default)]
    pub recommend: Recommend,
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub metadata: PlatformMetadata,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            editor: Editor::default(),
            recommend: Recommend::default(),
            log: Log::default(),
            metadata: PlatformMetadata::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Editor {
    pub page_size: Option<i64>,
    pub seed_row: Option<bool>,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            page_size: Some(DEFAULT_PAGE_SIZE as i64),
            seed_row: Some(true),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recommend {
    pub locale: Option<String>,
    pub max_results: Option<i64>,
    pub catalog_path: Option<String>,
}

impl Default for Recommend {
    fn default() -> Self {
        Self {
            locale: Some(DEFAULT_LOCALE.to_owned()),
            max_results: Some(DEFAULT_MAX_RESULTS as i64),
            catalog_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub filter: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            filter: Some(DEFAULT_LOG_FILTER.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("PARAMFORM_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set PARAMFORM_CONFIG_PATH to the config file")
        })?;

        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no `version`. Add `version = 1` at the top; settings live under [editor], [recommend], [log], and [metadata]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(page_size) = self.editor.page_size
            && page_size <= 0
        {
            bail!(
                "editor.page_size in {} must be positive, got {}",
                path.display(),
                page_size
            );
        }

        if let Some(max_results) = self.recommend.max_results
            && max_results <= 0
        {
            bail!(
                "recommend.max_results in {} must be positive, got {}",
                path.display(),
                max_results
            );
        }

        if let Some(locale) = &self.recommend.locale
            && locale.trim().is_empty()
        {
            bail!(
                "recommend.locale in {} must not be empty; use a language tag such as \"en\"",
                path.display()
            );
        }

        Ok(())
    }

    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            page_size: self.page_size(),
            locale: self.locale().to_owned(),
            seed_row: self.editor.seed_row.unwrap_or(true),
        }
    }

    pub fn page_size(&self) -> usize {
        self.editor
            .page_size
            .and_then(|size| usize::try_from(size).ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn locale(&self) -> &str {
        self.recommend.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    pub fn max_results(&self) -> usize {
        self.recommend
            .max_results
            .and_then(|max| usize::try_from(max).ok())
            .unwrap_or(DEFAULT_MAX_RESULTS)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.recommend.catalog_path.as_ref().map(PathBuf::from)
    }

    pub fn log_filter(&self) -> &str {
        self.log.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# paramform config\n# Place this file at: {}\n\nversion = 1\n\n[editor]\npage_size = {}\nseed_row = true\n\n[recommend]\nlocale = \"{}\"\nmax_results = {}\n# Optional. Defaults to the built-in standard name list.\n# catalog_path = \"/absolute/path/to/standard_names.json\"\n\n[log]\n# Overridden by PARAMFORM_LOG when set.\nfilter = \"{}\"\n\n[metadata]\norgName = \"GLOS\"\nplatformName = \"Code Sprint Finish Demo Platform\"\n",
            path.display(),
            DEFAULT_PAGE_SIZE,
            DEFAULT_LOCALE,
            DEFAULT_MAX_RESULTS,
            DEFAULT_LOG_FILTER,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.page_size(), 10);
        assert_eq!(config.locale(), "en");
        assert_eq!(config.max_results(), 25);
        assert_eq!(config.log_filter(), "paramform=info");
        assert!(config.editor_settings().seed_row);
        assert_eq!(config.metadata.org_name, "GLOS");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[editor]\npage_size = 5\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[editor], [recommend], [log], and [metadata]"));
        Ok(())
    }

    #[test]
    fn full_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[editor]\npage_size = 4\nseed_row = false\n[recommend]\nlocale = \"fr\"\nmax_results = 3\ncatalog_path = \"/data/names.json\"\n[log]\nfilter = \"debug\"\n[metadata]\norgName = \"NOAA\"\nlatitude = 41.0\n",
        )?;
        let config = Config::load(&path)?;
        let settings = config.editor_settings();
        assert_eq!(settings.page_size, 4);
        assert!(!settings.seed_row);
        assert_eq!(settings.locale, "fr");
        assert_eq!(config.max_results(), 3);
        assert_eq!(config.catalog_path(), Some(PathBuf::from("/data/names.json")));
        assert_eq!(config.log_filter(), "debug");
        assert_eq!(config.metadata.org_name, "NOAA");
        assert_eq!(config.metadata.latitude, 41.0);
        assert_eq!(config.metadata.platform_type, "tower");
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn non_positive_limits_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[editor]\npage_size = 0\n")?;
        let error = Config::load(&path).expect_err("zero page size should fail");
        assert!(error.to_string().contains("editor.page_size"));

        let (_temp, path) = write_config("version = 1\n[recommend]\nmax_results = -2\n")?;
        let error = Config::load(&path).expect_err("negative max results should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn blank_locale_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[recommend]\nlocale = \" \"\n")?;
        let error = Config::load(&path).expect_err("blank locale should fail");
        assert!(error.to_string().contains("recommend.locale"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("PARAMFORM_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("PARAMFORM_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("PARAMFORM_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("paramform/config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, Config::example_config(&path))?;
        let config = Config::load(&path)?;
        assert_eq!(config.page_size(), 10);
        assert_eq!(config.metadata.org_name, "GLOS");
        Ok(())
    }
}
