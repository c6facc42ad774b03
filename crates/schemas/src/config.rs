//! Plugin configuration and pre-flight validation.
//!
//! The config mirrors what a code-generation host hands to the plugin. The
//! model list arrives under one of two keys, and the key doubles as the
//! profile selector:
//!
//! - `tables`: list-shaped field collections, substring field exclusion,
//!   explicit primary-key resolution (with the `primaryKeyNames` fallback)
//! - `models`: name-keyed field maps, exact-match field exclusion plus the
//!   optional `_aggregate` suffix exclusion, no primary-key collection

use serde::Deserialize;

use crate::{Error, Result};

/// Output/exclusion profile, selected by whichever of `tables` / `models`
/// the configuration sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// `tables`: ordered field lists, substring exclusion, primary keys.
    Tables,
    /// `models`: name-keyed field maps, exact exclusion, aggregate filter.
    Models,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// Model names to process under the list profile.
    #[serde(default)]
    pub tables: Option<Vec<String>>,

    /// Model names to process under the map profile.
    #[serde(default)]
    pub models: Option<Vec<String>>,

    /// Accepted for host compatibility; validated (must be > 0) but not
    /// consumed by the flattening, which always stops at one level.
    #[serde(default)]
    pub max_depth: Option<i64>,

    /// Field exclusion set. Substring match under the list profile, exact
    /// match under the map profile.
    #[serde(default)]
    pub disable_fields: Vec<String>,

    /// Fallback primary-key field names, used when a model has no
    /// `_pk_columns_input` type.
    #[serde(default = "default_primary_key_names")]
    pub primary_key_names: Vec<String>,

    /// Drop fields whose name contains `_aggregate` (map profile only).
    #[serde(default)]
    pub disable_aggregate_fields: bool,

    /// Accepted for host compatibility; unused by the core transform.
    #[serde(default)]
    pub comment_descriptions: bool,
}

fn default_primary_key_names() -> Vec<String> {
    vec!["id".to_string()]
}

impl PluginConfig {
    /// Pre-flight validation, run by the host before any schema work.
    pub fn validate(&self) -> Result<()> {
        if let Some(depth) = self.max_depth {
            if depth <= 0 {
                return Err(Error::Config(format!(
                    "maxDepth must be greater than 0, got {depth}"
                )));
            }
        }
        self.profile().map(|_| ())
    }

    /// The active profile and its model-name list.
    ///
    /// Exactly one of `tables` / `models` must be set; the key that is set
    /// picks the profile.
    pub fn profile(&self) -> Result<(Profile, &[String])> {
        match (&self.tables, &self.models) {
            (Some(tables), None) => Ok((Profile::Tables, tables)),
            (None, Some(models)) => Ok((Profile::Models, models)),
            (Some(_), Some(_)) => Err(Error::Config(
                "`tables` and `models` are mutually exclusive".to_string(),
            )),
            (None, None) => Err(Error::Config(
                "one of `tables` or `models` must list the model names to process".to_string(),
            )),
        }
    }

    /// Replace the active profile's model list, keeping the profile itself.
    pub fn set_model_names(&mut self, names: Vec<String>) {
        if self.tables.is_some() {
            self.tables = Some(names);
        } else {
            self.models = Some(names);
        }
    }
}
