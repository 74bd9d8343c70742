//! Recipe records as the site shows them, and the looser shapes the recipe service sends.
//!
//! The recipe service only guarantees a name. Everything else is optional on the wire and is
//! filled in by [`RemoteRecipe::normalise`] before a record joins the catalog.

use crate::constants::{
    DEFAULT_CATEGORY, DEFAULT_RATING, DEFAULT_SERVINGS, PLACEHOLDER_IMAGE, REMOTE_ID_OFFSET,
};
use devdishes_types::{Difficulty, RecipeId};
use serde::{Deserialize, Serialize};

/// A fully populated recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[schema(value_type = String)]
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_rating() -> f64 {
    DEFAULT_RATING
}

fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

fn default_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

/// A recipe as returned by `GET /recipes`.
///
/// Only `name` is required. Every other field may be missing, `null`, or of the wrong type; in
/// each case it reads as `None` and is defaulted by [`RemoteRecipe::normalise`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRecipe {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RecipeId>,
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub prep_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub servings: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub instructions: Option<Vec<String>>,
}

/// Read an optional field, turning a value of the wrong shape into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl RemoteRecipe {
    /// Fill in defaults for every missing optional field.
    ///
    /// `position` is the record's index in the service response; records without an id are
    /// numbered `REMOTE_ID_OFFSET + position`. Empty strings, a zero rating, and zero servings
    /// count as missing.
    pub fn normalise(self, position: usize) -> Recipe {
        let id = match self.id {
            Some(RecipeId::Numeric(0)) | None => {
                RecipeId::Numeric(REMOTE_ID_OFFSET + position as u64)
            }
            Some(RecipeId::Text(text)) if text.is_empty() => {
                RecipeId::Numeric(REMOTE_ID_OFFSET + position as u64)
            }
            Some(id) => id,
        };

        let difficulty = non_empty(self.difficulty)
            .and_then(|d| d.parse::<Difficulty>().ok())
            .unwrap_or_default();

        Recipe {
            id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            category: non_empty(self.category).unwrap_or_else(default_category),
            difficulty,
            rating: self
                .rating
                .filter(|r| *r != 0.0 && r.is_finite())
                .unwrap_or(DEFAULT_RATING),
            prep_time: self.prep_time.unwrap_or_default(),
            servings: self.servings.filter(|s| *s > 0).unwrap_or(DEFAULT_SERVINGS),
            image: non_empty(self.image).unwrap_or_else(default_image),
            tags: self.tags.unwrap_or_default(),
            ingredients: self.ingredients.unwrap_or_default(),
            instructions: self.instructions.unwrap_or_default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A single recipe as returned by `GET /recipes/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecipeDetail {
    #[schema(value_type = String)]
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_fills_defaults() {
        let remote: RemoteRecipe =
            serde_json::from_str(r#"{"name":"X","ingredients":["a"],"instructions":["b"]}"#)
                .unwrap();
        let recipe = remote.normalise(0);

        assert_eq!(recipe.id, RecipeId::Numeric(10_000));
        assert_eq!(recipe.name, "X");
        assert_eq!(recipe.category, "Other");
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.rating, 5.0);
        assert_eq!(recipe.servings, 1);
        assert_eq!(recipe.image, PLACEHOLDER_IMAGE);
        assert!(recipe.tags.is_empty());
        assert_eq!(recipe.ingredients, vec!["a".to_string()]);
        assert_eq!(recipe.instructions, vec!["b".to_string()]);
    }

    #[test]
    fn test_normalise_keeps_supplied_fields() {
        let remote: RemoteRecipe = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Curry",
                "description": "Warm",
                "category": "Asian",
                "difficulty": "Hard",
                "rating": 4.5,
                "prepTime": "45 min",
                "servings": 4,
                "image": "https://example.com/curry.jpg",
                "tags": ["spicy"]
            }"#,
        )
        .unwrap();
        let recipe = remote.normalise(3);

        assert_eq!(recipe.id, RecipeId::Numeric(7));
        assert_eq!(recipe.category, "Asian");
        assert_eq!(recipe.difficulty, Difficulty::Hard);
        assert_eq!(recipe.rating, 4.5);
        assert_eq!(recipe.prep_time, "45 min");
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.image, "https://example.com/curry.jpg");
        assert_eq!(recipe.tags, vec!["spicy".to_string()]);
    }

    #[test]
    fn test_normalise_treats_falsy_values_as_missing() {
        let remote: RemoteRecipe = serde_json::from_str(
            r#"{"name":"Y","category":"","difficulty":"","rating":0,"servings":0,"image":null}"#,
        )
        .unwrap();
        let recipe = remote.normalise(2);

        assert_eq!(recipe.id, RecipeId::Numeric(10_002));
        assert_eq!(recipe.category, "Other");
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.rating, 5.0);
        assert_eq!(recipe.servings, 1);
        assert_eq!(recipe.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_normalise_defaults_unknown_difficulty() {
        let remote = RemoteRecipe {
            name: "Z".into(),
            difficulty: Some("Legendary".into()),
            ..Default::default()
        };
        assert_eq!(remote.normalise(0).difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_wrong_typed_optional_fields_fall_back_to_defaults() {
        let cases = [
            r#"{"name":"Neg","servings":-1}"#,
            r#"{"name":"Frac","servings":2.5}"#,
            r#"{"name":"StrRating","rating":"4"}"#,
            r#"{"name":"BadTags","tags":"spicy","id":true,"category":7}"#,
        ];
        for (position, json) in cases.into_iter().enumerate() {
            let remote: RemoteRecipe = serde_json::from_str(json)
                .unwrap_or_else(|e| panic!("{json} should still parse: {e}"));
            let recipe = remote.normalise(position);
            assert_eq!(recipe.servings, 1, "{json}");
            assert_eq!(recipe.rating, 5.0, "{json}");
            assert_eq!(recipe.category, "Other", "{json}");
            assert!(recipe.tags.is_empty(), "{json}");
            assert_eq!(recipe.id, RecipeId::Numeric(10_000 + position as u64));
        }
    }

    #[test]
    fn test_wrong_typed_name_is_still_rejected() {
        let result: Result<RemoteRecipe, _> = serde_json::from_str(r#"{"name":42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_remote_recipe_requires_name() {
        let result: Result<RemoteRecipe, _> = serde_json::from_str(r#"{"id":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_recipe_serialises_camel_case() {
        let recipe = RemoteRecipe {
            name: "Toast".into(),
            prep_time: Some("5 min".into()),
            ..Default::default()
        }
        .normalise(0);
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["prepTime"], "5 min");
        assert_eq!(json["id"], 10_000);
    }
}
