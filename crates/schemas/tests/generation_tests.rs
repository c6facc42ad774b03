//! End-to-end tests for model schema derivation.
//!
//! These tests run the full transform (resolve, flatten, assemble,
//! serialize) over fixture SDL schemas and verify:
//! - Field flattening (wrapper unwrapping, object-field dropping)
//! - Primary-key resolution (explicit pk input vs configured fallback)
//! - Permission derivation from type/mutation presence
//! - Profile differences (list vs map collections, exclusion policies)
//! - Whole-batch failure on an unresolvable model

use hasura_model_schemas::{build, generate, generate_pretty, parse_schema, Error, PluginConfig};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// A Hasura-style schema with two tables: `user` has the full generated
/// surface, `post` only part of it.
const FIXTURE_SDL: &str = r#"
    type Query {
        user(id: ID!): user
        post(id: ID!): post
    }

    type Mutation {
        insert_user(objects: [user_insert_input!]!): user
        update_user(_set: user_set_input, pk_columns: user_pk_columns_input): user
        delete_user(id: ID!): user
        insert_post(objects: [post_insert_input!]!): post
    }

    type user {
        id: ID!
        name: String
        roles: [String!]!
        posts: [post!]!
        created_by: String
    }
    input user_insert_input {
        name: String
        created_by: String
    }
    input user_set_input {
        name: String
    }
    input user_pk_columns_input {
        id: ID!
    }

    type post {
        id: ID!
        uuid: String!
        title: String
        author: user
    }
    input post_insert_input {
        title: String
    }
"#;

fn tables_config(models: &[&str]) -> PluginConfig {
    serde_json::from_value(json!({ "tables": models })).unwrap()
}

fn models_config(models: &[&str]) -> PluginConfig {
    serde_json::from_value(json!({ "models": models })).unwrap()
}

fn generate_value(sdl: &str, config: &PluginConfig) -> Value {
    let schema = parse_schema(sdl).unwrap();
    serde_json::from_str(&generate(&schema, config).unwrap()).unwrap()
}

#[test]
fn test_user_with_insert_only_surface() {
    // `user` with id/name/roles and only an insert input: get+insert only.
    let sdl = r#"
        type Query { user: user }
        type user { id: ID!, name: String, roles: [String!]! }
        input user_insert_input { name: String }
    "#;
    let output = generate_value(sdl, &tables_config(&["user"]));

    assert_eq!(
        output["user"]["model"],
        json!([
            { "name": "id", "type": "ID", "array": false, "nullable": false },
            { "name": "name", "type": "String", "array": false, "nullable": true },
            { "name": "roles", "type": "String", "array": true, "nullable": false }
        ])
    );
    assert_eq!(
        output["user"]["primaryKeys"],
        json!([{ "name": "id", "type": "ID", "array": false, "nullable": false }])
    );
    assert_eq!(
        output["user"]["permissions"],
        json!({ "get": true, "insert": true, "update": false, "delete": false })
    );
}

#[test]
fn test_full_fixture_tables_profile() {
    let output = generate_value(FIXTURE_SDL, &tables_config(&["user", "post"]));

    // Object-typed fields (`posts`, `author`) never appear.
    assert_eq!(
        output["user"]["model"],
        json!([
            { "name": "id", "type": "ID", "array": false, "nullable": false },
            { "name": "name", "type": "String", "array": false, "nullable": true },
            { "name": "roles", "type": "String", "array": true, "nullable": false },
            { "name": "created_by", "type": "String", "array": false, "nullable": true }
        ])
    );

    // Explicit pk input wins over the primaryKeyNames fallback.
    assert_eq!(
        output["user"]["primaryKeys"],
        json!([{ "name": "id", "type": "ID", "array": false, "nullable": false }])
    );
    assert_eq!(
        output["user"]["permissions"],
        json!({ "get": true, "insert": true, "update": true, "delete": true })
    );

    // `post` has no pk input: fall back to filtering the model fields.
    assert_eq!(
        output["post"]["primaryKeys"],
        json!([{ "name": "id", "type": "ID", "array": false, "nullable": false }])
    );
    assert_eq!(
        output["post"]["permissions"],
        json!({ "get": true, "insert": true, "update": false, "delete": false })
    );
    assert_eq!(output["post"]["setInput"], json!([]));
}

#[test]
fn test_primary_key_names_fallback_is_configurable() {
    let mut config = tables_config(&["post"]);
    config.primary_key_names = vec!["uuid".to_string()];
    let output = generate_value(FIXTURE_SDL, &config);

    assert_eq!(
        output["post"]["primaryKeys"],
        json!([{ "name": "uuid", "type": "String", "array": false, "nullable": false }])
    );
}

#[test]
fn test_models_profile_produces_maps_without_primary_keys() {
    let output = generate_value(FIXTURE_SDL, &models_config(&["user"]));

    assert_eq!(
        output["user"]["model"],
        json!({
            "id": { "type": "ID", "array": false, "nullable": false },
            "name": { "type": "String", "array": false, "nullable": true },
            "roles": { "type": "String", "array": true, "nullable": false },
            "created_by": { "type": "String", "array": false, "nullable": true }
        })
    );
    assert_eq!(output["user"].get("primaryKeys"), None);
    assert_eq!(
        output["user"]["insertInput"],
        json!({
            "name": { "type": "String", "array": false, "nullable": true },
            "created_by": { "type": "String", "array": false, "nullable": true }
        })
    );
}

#[test]
fn test_disable_fields_removes_field_everywhere() {
    let mut config = tables_config(&["user"]);
    config.disable_fields = vec!["created_by".to_string()];
    let output = generate_value(FIXTURE_SDL, &config);

    for collection in ["model", "insertInput", "setInput"] {
        let fields = output["user"][collection].as_array().unwrap();
        assert!(
            fields.iter().all(|f| f["name"] != "created_by"),
            "created_by leaked into {collection}"
        );
    }
}

#[test]
fn test_excluding_every_field_clears_the_permission() {
    // post_insert_input only has `title`; excluding it makes insert false.
    let mut config = tables_config(&["post"]);
    config.disable_fields = vec!["title".to_string()];
    let output = generate_value(FIXTURE_SDL, &config);

    assert_eq!(output["post"]["insertInput"], json!([]));
    assert_eq!(output["post"]["permissions"]["insert"], json!(false));
}

#[test]
fn test_delete_permission_follows_mutation_field_only() {
    // No delete_post mutation exists even though the type does.
    let output = generate_value(FIXTURE_SDL, &tables_config(&["user", "post"]));
    assert_eq!(output["user"]["permissions"]["delete"], json!(true));
    assert_eq!(output["post"]["permissions"]["delete"], json!(false));
}

#[test]
fn test_unknown_model_aborts_the_batch() {
    let schema = parse_schema(FIXTURE_SDL).unwrap();
    let config = tables_config(&["user", "missing_table"]);
    let err = generate(&schema, &config).unwrap_err();
    assert!(matches!(err, Error::ModelNotFound(name) if name == "missing_table"));
}

#[test]
fn test_output_preserves_configured_model_order() {
    let schema = parse_schema(FIXTURE_SDL).unwrap();
    let records = build(&schema, &tables_config(&["post", "user"])).unwrap();
    let keys: Vec<_> = records.keys().cloned().collect();
    assert_eq!(keys, ["post", "user"]);
}

#[test]
fn test_camel_case_schema_resolves_via_fallback() {
    let sdl = r#"
        type Query { userAccount: userAccount }
        type Mutation { deleteUserAccount(id: ID!): userAccount }
        type userAccount { id: ID!, email: String }
        input userAccountInsertInput { email: String }
        input userAccountSetInput { email: String }
    "#;
    let output = generate_value(sdl, &tables_config(&["user_account"]));

    assert_eq!(
        output["user_account"]["permissions"],
        json!({ "get": true, "insert": true, "update": true, "delete": true })
    );
}

#[test]
fn test_pretty_output_round_trips() {
    let schema = parse_schema(FIXTURE_SDL).unwrap();
    let config = tables_config(&["user"]);
    let compact: Value = serde_json::from_str(&generate(&schema, &config).unwrap()).unwrap();
    let pretty: Value = serde_json::from_str(&generate_pretty(&schema, &config).unwrap()).unwrap();
    assert_eq!(compact, pretty);
}

#[test]
fn test_max_depth_validation_blocks_generation() {
    let schema = parse_schema(FIXTURE_SDL).unwrap();
    let mut config = tables_config(&["user"]);
    config.max_depth = Some(0);
    assert!(matches!(
        generate(&schema, &config).unwrap_err(),
        Error::Config(_)
    ));
}
