//! Type resolution: locating a model's generated GraphQL types.
//!
//! For one model name, the resolver derives the candidate names of the four
//! generated types plus the delete mutation (see [`crate::naming`]) and
//! looks each slot up in the schema under a kind check: the model slot must
//! be an object type, the three input slots must be input-object types.
//! Every slot is resolved independently; a slot whose candidates all miss is
//! simply absent.

use apollo_compiler::ast::{OperationType, Type};
use apollo_compiler::schema::{InputObjectType, ObjectType};
use apollo_compiler::{Node, Schema};
use itertools::Either;
use tracing::debug;

use crate::naming::ModelNames;
use crate::{Error, Result};

/// A borrowed view into one named schema type that carries fields.
#[derive(Debug, Clone, Copy)]
pub enum TypeHandle<'a> {
    Object(&'a Node<ObjectType>),
    InputObject(&'a Node<InputObjectType>),
}

impl<'a> TypeHandle<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            TypeHandle::Object(object) => object.name.as_str(),
            TypeHandle::InputObject(input) => input.name.as_str(),
        }
    }

    /// The declared fields, in declaration order, as `(name, type)` pairs.
    pub fn fields(&self) -> impl Iterator<Item = (&'a str, &'a Type)> + 'a {
        match *self {
            TypeHandle::Object(object) => Either::Left(
                object
                    .fields
                    .iter()
                    .map(|(name, field)| (name.as_str(), &field.ty)),
            ),
            TypeHandle::InputObject(input) => Either::Right(
                input
                    .fields
                    .iter()
                    .map(|(name, field)| (name.as_str(), &*field.ty)),
            ),
        }
    }
}

/// The resolved type handles and delete capability of one model.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedModel<'a> {
    pub model: Option<TypeHandle<'a>>,
    pub insert_input: Option<TypeHandle<'a>>,
    pub set_input: Option<TypeHandle<'a>>,
    pub pk_input: Option<TypeHandle<'a>>,
    pub can_delete: bool,
}

/// Resolve one model against the schema.
///
/// Fails with [`Error::ModelNotFound`] when the model type, insert input and
/// set input are all absent; a model in that state has no usable surface,
/// whether because it does not exist, is named under yet another convention,
/// or is hidden from the introspecting role.
pub fn resolve_model<'a>(schema: &'a Schema, model_name: &str) -> Result<ResolvedModel<'a>> {
    let names = ModelNames::for_model(model_name);

    let model = find_object(schema, &names.model);
    let insert_input = find_input_object(schema, &names.insert_input);
    let set_input = find_input_object(schema, &names.set_input);
    let pk_input = find_input_object(schema, &names.pk_input);
    let can_delete = mutation_has_field(schema, &names.delete_field);

    if model.is_none() && insert_input.is_none() && set_input.is_none() {
        return Err(Error::ModelNotFound(model_name.to_string()));
    }

    debug!(
        model = model_name,
        has_model_type = model.is_some(),
        has_insert_input = insert_input.is_some(),
        has_set_input = set_input.is_some(),
        has_pk_input = pk_input.is_some(),
        can_delete,
        "resolved model"
    );

    Ok(ResolvedModel {
        model,
        insert_input,
        set_input,
        pk_input,
        can_delete,
    })
}

/// First candidate that names an object type, if any.
fn find_object<'a>(schema: &'a Schema, candidates: &[String]) -> Option<TypeHandle<'a>> {
    candidates
        .iter()
        .find_map(|name| schema.get_object(name))
        .map(TypeHandle::Object)
}

/// First candidate that names an input-object type, if any.
fn find_input_object<'a>(schema: &'a Schema, candidates: &[String]) -> Option<TypeHandle<'a>> {
    candidates
        .iter()
        .find_map(|name| schema.get_input_object(name))
        .map(TypeHandle::InputObject)
}

/// True iff the mutation root declares a field under any candidate name.
fn mutation_has_field(schema: &Schema, candidates: &[String]) -> bool {
    let Some(mutation_name) = schema.root_operation(OperationType::Mutation) else {
        return false;
    };
    let Some(mutation) = schema.get_object(mutation_name.as_str()) else {
        return false;
    };
    mutation
        .fields
        .keys()
        .any(|field| candidates.iter().any(|candidate| field.as_str() == candidate))
}
