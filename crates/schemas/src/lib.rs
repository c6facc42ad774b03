//! # hasura-model-schemas
//!
//! Model schema introspection for Hasura-generated GraphQL schemas.
//!
//! Given a parsed GraphQL schema and a list of model/table names, this crate
//! derives the flattened shape of each model's four generated types (the
//! object type, insert input, set input and primary-key input) and infers
//! CRUD permission flags from the presence of those types and of the
//! corresponding delete mutation.
//!
//! ## Architecture
//!
//! 1. **Resolve** - Locate the generated types for a model by naming
//!    convention (snake_case first, lowerCamelCase fallback)
//! 2. **Flatten** - Unwrap non-null/list wrappers on every declared field
//!    down to the innermost scalar/enum, tracking array-ness and nullability
//! 3. **Assemble** - Build one record per model (field collections plus
//!    permissions) and serialize the whole batch as JSON
//!
//! ## Modules
//!
//! - `config`: plugin configuration and pre-flight validation
//! - `naming`: per-slot candidate name generation
//! - `resolve`: type resolution against the schema
//! - `flatten`: field flattening and wrapper unwrapping
//! - `generate`: per-model assembly and JSON serialization
//!
//! ## Usage
//!
//! ```no_run
//! use hasura_model_schemas::{generate, parse_schema, PluginConfig};
//!
//! let sdl = std::fs::read_to_string("schema.graphql")?;
//! let schema = parse_schema(&sdl)?;
//!
//! let config: PluginConfig = serde_json::from_str(r#"{ "tables": ["user"] }"#)?;
//! config.validate()?;
//!
//! let json = generate(&schema, &config)?;
//! println!("{}", json);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod flatten;
pub mod generate;
pub mod naming;
pub mod resolve;

use thiserror::Error;

pub use config::{PluginConfig, Profile};
pub use flatten::{FieldInfo, FieldSet, FlattenOptions};
pub use generate::{build, generate, generate_pretty, model_schemas, ModelSchemas, Permissions};
pub use resolve::{resolve_model, ResolvedModel, TypeHandle};

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("GraphQL schema parse error: {0}")]
    SchemaParse(String),

    /// Raised when neither the model type nor its insert/set inputs resolve.
    /// The three possible causes (nonexistent model, naming-convention
    /// mismatch, role without permissions) are not distinguishable from the
    /// schema alone.
    #[error("model `{0}` not found: no matching type, insert input or set input in the schema (missing model, naming mismatch, or no permissions for the introspecting role)")]
    ModelNotFound(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse a GraphQL SDL document into an [`apollo_compiler::Schema`].
///
/// Parse diagnostics are collapsed into [`Error::SchemaParse`]. This is only
/// a parse; no further GraphQL validation is performed.
pub fn parse_schema(sdl: &str) -> Result<apollo_compiler::Schema> {
    apollo_compiler::Schema::parse(sdl, "schema.graphql")
        .map_err(|with_errors| Error::SchemaParse(with_errors.errors.to_string()))
}
