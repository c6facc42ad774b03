//! Per-model assembly and JSON serialization.
//!
//! The output is a single JSON object keyed by model name, in the order the
//! configuration lists the models. Each entry carries the flattened field
//! collections of the model's generated types plus the derived CRUD
//! permission flags.

use apollo_compiler::Schema;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::config::{PluginConfig, Profile};
use crate::flatten::{flatten_type, FieldSet, FlattenOptions};
use crate::resolve::resolve_model;
use crate::Result;

/// CRUD capability flags derived from the schema.
///
/// `get`/`insert`/`update` hold iff the corresponding flattened field
/// collection is non-empty; `delete` iff the delete mutation field exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub get: bool,
    pub insert: bool,
    pub update: bool,
    pub delete: bool,
}

/// The derived schema record of one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSchemas {
    pub model: FieldSet,
    pub insert_input: FieldSet,
    pub set_input: FieldSet,
    /// Present under the list (`tables`) profile only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_keys: Option<FieldSet>,
    pub permissions: Permissions,
}

/// Derive the schema record of a single model.
pub fn model_schemas(
    schema: &Schema,
    model_name: &str,
    config: &PluginConfig,
) -> Result<ModelSchemas> {
    let (profile, _) = config.profile()?;
    let options = FlattenOptions {
        profile,
        disable_fields: &config.disable_fields,
        disable_aggregate_fields: config.disable_aggregate_fields,
    };

    let resolved = resolve_model(schema, model_name)?;

    let flatten = |handle| flatten_type(schema, handle, &options);
    let model = resolved.model.map(flatten).unwrap_or_else(|| FieldSet::empty(profile));
    let insert_input = resolved
        .insert_input
        .map(flatten)
        .unwrap_or_else(|| FieldSet::empty(profile));
    let set_input = resolved
        .set_input
        .map(flatten)
        .unwrap_or_else(|| FieldSet::empty(profile));

    // Primary keys: the explicit _pk_columns_input type when present,
    // otherwise the configured key names filtered out of the model fields.
    let primary_keys = match profile {
        Profile::Tables => Some(match resolved.pk_input {
            Some(handle) => flatten_type(schema, handle, &options),
            None => model.retain_named(&config.primary_key_names),
        }),
        Profile::Models => None,
    };

    let permissions = Permissions {
        get: !model.is_empty(),
        insert: !insert_input.is_empty(),
        update: !set_input.is_empty(),
        delete: resolved.can_delete,
    };

    debug!(
        model = model_name,
        fields = model.len(),
        ?permissions,
        "assembled model schemas"
    );

    Ok(ModelSchemas {
        model,
        insert_input,
        set_input,
        primary_keys,
        permissions,
    })
}

/// Derive the schema records of every configured model, keyed by model name
/// in configuration order.
///
/// Any failure (configuration or model resolution) aborts the whole batch;
/// there is no partial output.
pub fn build(schema: &Schema, config: &PluginConfig) -> Result<IndexMap<String, ModelSchemas>> {
    config.validate()?;
    let (_, model_names) = config.profile()?;

    let mut records = IndexMap::with_capacity(model_names.len());
    for model_name in model_names {
        records.insert(model_name.clone(), model_schemas(schema, model_name, config)?);
    }
    Ok(records)
}

/// Run the whole transform and serialize the result as compact JSON.
pub fn generate(schema: &Schema, config: &PluginConfig) -> Result<String> {
    Ok(serde_json::to_string(&build(schema, config)?)?)
}

/// Like [`generate`], pretty-printed.
pub fn generate_pretty(schema: &Schema, config: &PluginConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(&build(schema, config)?)?)
}
