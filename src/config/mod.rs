//! Settings loaded from an optional TOML file and the environment.
//!
//! Environment variables use the `HOUSING_FILTER` prefix and `__` between
//! nesting levels, e.g. `HOUSING_FILTER__PROFILE=fr` or
//! `HOUSING_FILTER__AIRTABLE__API_KEY=...`.

use std::fmt;
use std::path::Path;

use config::{Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::{EmptyFilter, FieldOverrides, FilterExpressionBuilder, Profile, ProfileName};

pub const ENV_PREFIX: &str = "HOUSING_FILTER";
pub const DEFAULT_AIRTABLE_URL: &str = "https://api.airtable.com/v0";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub profile: ProfileName,
    pub empty_filter: EmptyFilter,
    /// Field-name overrides applied on top of the profile
    pub fields: FieldOverrides,
    pub airtable: Option<AirtableSettings>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AirtableSettings {
    #[serde(default = "default_airtable_url")]
    pub base_url: String,
    pub base_id: String,
    pub table: String,
    pub api_key: String,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_airtable_url() -> String {
    DEFAULT_AIRTABLE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl fmt::Debug for AirtableSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirtableSettings")
            .field("base_url", &self.base_url)
            .field("base_id", &self.base_id)
            .field("table", &self.table)
            .field("api_key", &"[REDACTED]")
            .field("view", &self.view)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Settings {
    /// Load settings from `path` (when given) with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let raw = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = raw.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let blank = self.fields.blank_entries();
        if !blank.is_empty() {
            return Err(SettingsError::Invalid(format!(
                "field names must not be blank: {}",
                blank.join(", ")
            )));
        }

        if let Some(airtable) = &self.airtable {
            for (name, value) in [
                ("airtable.base_url", &airtable.base_url),
                ("airtable.base_id", &airtable.base_id),
                ("airtable.table", &airtable.table),
                ("airtable.api_key", &airtable.api_key),
            ] {
                if value.trim().is_empty() {
                    return Err(SettingsError::Invalid(format!("{} is required", name)));
                }
            }
            if airtable.timeout_secs == 0 {
                return Err(SettingsError::Invalid(
                    "airtable.timeout_secs must be greater than 0".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Profile selected by `name`, or the configured one, with overrides applied
    pub fn profile(&self, name: Option<ProfileName>) -> Profile {
        Profile::named(name.unwrap_or(self.profile)).with_overrides(&self.fields)
    }

    pub fn builder(&self, name: Option<ProfileName>) -> FilterExpressionBuilder {
        FilterExpressionBuilder::new(self.profile(name)).with_empty_filter(self.empty_filter)
    }
}
