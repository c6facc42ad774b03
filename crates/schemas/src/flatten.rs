//! Field flattening: reducing wrapped GraphQL field types to flat
//! descriptors.
//!
//! Every declared field of a resolved type is reduced to a scalar/enum type
//! name plus `array` and `nullable` flags by walking its non-null/list
//! wrapper chain with a small accumulator. A non-null wrapper at any level
//! clears `nullable`; any list level sets `array`; a field whose innermost
//! type is an object or input-object type is dropped entirely (the
//! transform never flattens into nested structures). The flags are
//! cumulative only; nested list-of-list nullability is not modelled.

use apollo_compiler::ast::{NamedType, Type};
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::Schema;
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::Profile;
use crate::resolve::TypeHandle;

/// One flattened field. `name` is carried inline in list-shaped collections
/// and omitted in map-shaped ones, where it is the entry key instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub scalar_type: String,
    pub array: bool,
    pub nullable: bool,
}

/// A flattened field collection, shaped by the active profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldSet {
    List(Vec<FieldInfo>),
    Map(IndexMap<String, FieldInfo>),
}

impl FieldSet {
    pub fn empty(profile: Profile) -> Self {
        match profile {
            Profile::Tables => FieldSet::List(Vec::new()),
            Profile::Models => FieldSet::Map(IndexMap::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldSet::List(fields) => fields.is_empty(),
            FieldSet::Map(fields) => fields.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FieldSet::List(fields) => fields.len(),
            FieldSet::Map(fields) => fields.len(),
        }
    }

    /// The subset of fields whose name is in `names`, keeping shape and
    /// declaration order.
    pub fn retain_named(&self, names: &[String]) -> Self {
        let keep = |name: &str| names.iter().any(|n| n == name);
        match self {
            FieldSet::List(fields) => FieldSet::List(
                fields
                    .iter()
                    .filter(|field| field.name.as_deref().is_some_and(keep))
                    .cloned()
                    .collect(),
            ),
            FieldSet::Map(fields) => FieldSet::Map(
                fields
                    .iter()
                    .filter(|(name, _)| keep(name))
                    .map(|(name, field)| (name.clone(), field.clone()))
                    .collect(),
            ),
        }
    }
}

/// Exclusion and shaping options for one flattening pass.
#[derive(Debug, Clone, Copy)]
pub struct FlattenOptions<'a> {
    pub profile: Profile,
    pub disable_fields: &'a [String],
    pub disable_aggregate_fields: bool,
}

impl FlattenOptions<'_> {
    /// Exclusion policy: substring match under the list profile, exact
    /// match (plus the `_aggregate` filter) under the map profile.
    fn is_excluded(&self, field_name: &str) -> bool {
        match self.profile {
            Profile::Tables => self
                .disable_fields
                .iter()
                .any(|disabled| field_name.contains(disabled.as_str())),
            Profile::Models => {
                self.disable_fields.iter().any(|disabled| disabled == field_name)
                    || (self.disable_aggregate_fields && field_name.contains("_aggregate"))
            }
        }
    }
}

/// Flatten every declared field of `handle`, in declaration order.
pub fn flatten_type(schema: &Schema, handle: TypeHandle<'_>, options: &FlattenOptions<'_>) -> FieldSet {
    let flattened = handle
        .fields()
        .filter(|(name, _)| !options.is_excluded(name))
        .filter_map(|(name, ty)| unwrap_type(schema, ty).map(|info| (name, info)));

    match options.profile {
        Profile::Tables => FieldSet::List(
            flattened
                .map(|(name, (scalar_type, array, nullable))| FieldInfo {
                    name: Some(name.to_string()),
                    scalar_type,
                    array,
                    nullable,
                })
                .collect(),
        ),
        Profile::Models => FieldSet::Map(
            flattened
                .map(|(name, (scalar_type, array, nullable))| {
                    (
                        name.to_string(),
                        FieldInfo {
                            name: None,
                            scalar_type,
                            array,
                            nullable,
                        },
                    )
                })
                .collect(),
        ),
    }
}

/// Walk the wrapper chain down to the innermost named type.
///
/// Returns `(type name, array, nullable)` for scalar/enum innermost types,
/// `None` for object/input-object ones.
fn unwrap_type(schema: &Schema, ty: &Type) -> Option<(String, bool, bool)> {
    let mut nullable = true;
    let mut array = false;
    let mut ty = ty;

    loop {
        match ty {
            Type::NonNullList(inner) => {
                nullable = false;
                array = true;
                ty = inner.as_ref();
            }
            Type::List(inner) => {
                array = true;
                ty = inner.as_ref();
            }
            Type::NonNullNamed(name) => {
                nullable = false;
                return named_scalar(schema, name).map(|n| (n, array, nullable));
            }
            Type::Named(name) => {
                return named_scalar(schema, name).map(|n| (n, array, nullable));
            }
        }
    }
}

/// The innermost type's own name, unless it is an object or input-object
/// type, which ends the field's flattening.
fn named_scalar(schema: &Schema, name: &NamedType) -> Option<String> {
    match schema.types.get(name) {
        Some(ExtendedType::Object(_)) | Some(ExtendedType::InputObject(_)) => None,
        _ => Some(name.to_string()),
    }
}
