//! Candidate name generation for Hasura's generated types.
//!
//! Hasura names its generated artifacts after the table, in snake_case by
//! default (`user_insert_input`, `delete_user`) or in lowerCamelCase when
//! the naming convention is switched (`userInsertInput`, `deleteUser`).
//! Nothing in the schema says which convention is active, so every lookup
//! tries an ordered candidate list: snake_case first, camelCase fallback.

use heck::{ToLowerCamelCase, ToSnakeCase};

/// The ordered lookup candidates for every name slot of one model.
#[derive(Debug, Clone)]
pub struct ModelNames {
    /// The model's object type.
    pub model: Vec<String>,
    /// The `<model>_insert_input` input type.
    pub insert_input: Vec<String>,
    /// The `<model>_set_input` input type.
    pub set_input: Vec<String>,
    /// The `<model>_pk_columns_input` input type.
    pub pk_input: Vec<String>,
    /// The `delete_<model>` mutation field.
    pub delete_field: Vec<String>,
}

impl ModelNames {
    pub fn for_model(model: &str) -> Self {
        let snake = model.to_snake_case();
        Self {
            model: candidates(snake.clone()),
            insert_input: candidates(format!("{snake}_insert_input")),
            set_input: candidates(format!("{snake}_set_input")),
            pk_input: candidates(format!("{snake}_pk_columns_input")),
            delete_field: candidates(format!("delete_{snake}")),
        }
    }
}

/// Snake_case name plus its lowerCamelCase equivalent, in lookup order.
fn candidates(snake: String) -> Vec<String> {
    let camel = snake.to_lower_camel_case();
    if camel == snake {
        vec![snake]
    } else {
        vec![snake, camel]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_model() {
        let names = ModelNames::for_model("user_profile");
        assert_eq!(names.model, ["user_profile", "userProfile"]);
        assert_eq!(
            names.insert_input,
            ["user_profile_insert_input", "userProfileInsertInput"]
        );
        assert_eq!(
            names.set_input,
            ["user_profile_set_input", "userProfileSetInput"]
        );
        assert_eq!(
            names.pk_input,
            ["user_profile_pk_columns_input", "userProfilePkColumnsInput"]
        );
        assert_eq!(names.delete_field, ["delete_user_profile", "deleteUserProfile"]);
    }

    #[test]
    fn test_camel_case_input_is_normalized_first() {
        // A camelCase model name still produces the snake candidate first.
        let names = ModelNames::for_model("userProfile");
        assert_eq!(names.model, ["user_profile", "userProfile"]);
    }

    #[test]
    fn test_single_word_model_dedupes_identical_candidates() {
        let names = ModelNames::for_model("user");
        assert_eq!(names.model, ["user"]);
        assert_eq!(names.insert_input, ["user_insert_input", "userInsertInput"]);
        assert_eq!(names.delete_field, ["delete_user", "deleteUser"]);
    }
}
