//! Layered configuration for `snip`.
//!
//! Later layers override earlier ones:
//!
//! 1. `snip.toml` in the user's config directory, if present;
//! 2. files passed explicitly, in order (format chosen by extension);
//! 3. `SNIP_`-prefixed environment variables (`SNIP_CUT_WORD=off`).
//!
//! Every key is optional. Unset keys fall back to the library defaults when
//! resolved with [`Config::options`].

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Toml, Yaml};
use serde::Deserialize;
use snip_html::{CountingUnit, CutWord, Options};
use std::path::{Path, PathBuf};
use tracing::instrument;

const ENV_PREFIX: &str = "SNIP_";
const KEYS: [&str; 6] = ["ellipsis", "include_ellipsis_length", "whole_word", "cut_word", "unit", "strict"];

/// Partial truncation options, as read from configuration sources.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ellipsis: Option<String>,
    pub include_ellipsis_length: Option<bool>,
    pub whole_word: Option<bool>,
    pub cut_word: Option<CutWord>,
    pub unit: Option<CountingUnit>,
    pub strict: Option<bool>,
}

impl Config {
    /// Location of the user's config file, if the platform has a config
    /// directory. The file itself may not exist.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "snip").map(|dirs| dirs.config_dir().join("snip.toml"))
    }

    /// Loads every layer, starting from the user's config file.
    #[instrument(skip_all, fields(files = files.len()))]
    pub fn load<P: AsRef<Path>>(files: &[P]) -> Result<Self> {
        let figment = Self::figment(Self::default_path().as_deref(), files)?;
        Self::extract(&figment)
    }

    /// Builds the layered [`Figment`] without extracting it. A missing `user`
    /// file is skipped; missing explicit `files` are an error.
    pub fn figment<P: AsRef<Path>>(user: Option<&Path>, files: &[P]) -> Result<Figment> {
        let mut figment = Figment::new();
        if let Some(path) = user
            && path.is_file()
        {
            tracing::debug!(path = %path.display(), "Using user config file");
            figment = figment.merge(Toml::file_exact(path));
        }
        for path in files {
            let path = path.as_ref();
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase);
            figment = match extension.as_deref() {
                Some("toml") => figment.merge(Toml::file_exact(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                Some("json") => figment.merge(Json::file_exact(path)),
                _ => {
                    exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf()));
                },
            };
            tracing::debug!(path = %path.display(), "Using config file");
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).only(&KEYS)))
    }

    pub fn extract(figment: &Figment) -> Result<Self> {
        figment
            .extract()
            .or_raise(|| ErrorKind::InvalidConfig("could not read truncation options".to_string()))
    }

    /// Layers `overrides` on top, keeping current values where the override
    /// is unset.
    pub fn apply(self, overrides: Self) -> Self {
        Self {
            ellipsis: overrides.ellipsis.or(self.ellipsis),
            include_ellipsis_length: overrides.include_ellipsis_length.or(self.include_ellipsis_length),
            whole_word: overrides.whole_word.or(self.whole_word),
            cut_word: overrides.cut_word.or(self.cut_word),
            unit: overrides.unit.or(self.unit),
            strict: overrides.strict.or(self.strict),
        }
    }

    /// Resolves into library options, with library defaults for unset keys.
    pub fn options(&self) -> Options {
        let defaults = Options::default();
        Options {
            ellipsis: self.ellipsis.clone().or(defaults.ellipsis),
            include_ellipsis_length: self.include_ellipsis_length.unwrap_or(defaults.include_ellipsis_length),
            whole_word: self.whole_word.unwrap_or(defaults.whole_word),
            cut_word: self.cut_word.unwrap_or(defaults.cut_word),
            unit: self.unit.unwrap_or(defaults.unit),
            strict: self.strict.unwrap_or(defaults.strict),
        }
    }
}
