//! # API Shared
//!
//! Shared request and response types for the DevDishes front doors.
//!
//! Contains:
//! - JSON request/response bodies with OpenAPI schemas
//! - Shared services like `HealthService`
//! - Assembly of match results, used by both the site API and the CLI
//!
//! Used by `api-rest` and the `devdishes` CLI.

pub mod health;

pub use health::HealthService;

use devdishes_core::{
    constants::MAX_HIGHLIGHTED_INGREDIENTS, match_percentage, match_recipes, matching_ingredients,
    Catalog, Recipe, RecipeId, SelectionSet, SubmissionReceipt,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Query string of `GET /catalog`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Case-insensitive text matched against name, tags and description
    pub q: Option<String>,
    /// Exact category, or `All`
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CatalogRes {
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CategoriesRes {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MatchReq {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MatchedRecipe {
    pub recipe: Recipe,
    pub match_percentage: u8,
    pub matching_ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MatchRes {
    /// The selection actually used, after lowercasing and duplicate suppression
    pub selected: Vec<String>,
    pub matches: Vec<MatchedRecipe>,
}

impl MatchRes {
    /// Match the catalog against a selection, ranked, with percentages and highlights.
    pub fn build(catalog: &Catalog, selection: &SelectionSet) -> Self {
        let selected = selection.terms();
        let matches = match_recipes(catalog.recipes(), selected)
            .into_iter()
            .map(|recipe| MatchedRecipe {
                match_percentage: match_percentage(recipe, selected),
                matching_ingredients: matching_ingredients(
                    recipe,
                    selected,
                    MAX_HIGHLIGHTED_INGREDIENTS,
                )
                .into_iter()
                .map(str::to_owned)
                .collect(),
                recipe: recipe.clone(),
            })
            .collect();

        Self {
            selected: selected.to_vec(),
            matches,
        }
    }
}

/// Query string of `GET /suggestions`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestionsQuery {
    /// Comma-separated ingredients already selected
    pub selected: Option<String>,
}

impl SuggestionsQuery {
    pub fn selection(&self) -> SelectionSet {
        SelectionSet::from_terms(self.selected.as_deref().unwrap_or_default().split(','))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SuggestionsRes {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubmitRecipeRes {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<RecipeId>,
}

impl From<SubmissionReceipt> for SubmitRecipeRes {
    fn from(receipt: SubmissionReceipt) -> Self {
        Self {
            message: devdishes_core::constants::SUBMISSION_ACCEPTED.to_string(),
            id: receipt.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use devdishes_core::RemoteRecipe;

    fn catalog() -> Catalog {
        let recipes = [
            ("Garlic Chicken", vec!["chicken breast", "garlic", "olive oil"]),
            ("Plain Rice", vec!["rice"]),
            ("Chicken Fried Rice", vec!["rice", "chicken thigh", "egg"]),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, ingredients))| {
            RemoteRecipe {
                name: name.into(),
                ingredients: Some(ingredients.into_iter().map(String::from).collect()),
                ..Default::default()
            }
            .normalise(i)
        })
        .collect();
        Catalog::new(recipes)
    }

    #[test]
    fn test_match_res_ranks_and_scores() {
        let selection = SelectionSet::from_terms(["Chicken", "rice"]);
        let res = MatchRes::build(&catalog(), &selection);

        assert_eq!(res.selected, vec!["chicken", "rice"]);
        let names: Vec<&str> = res.matches.iter().map(|m| m.recipe.name.as_str()).collect();
        assert_eq!(names, vec!["Chicken Fried Rice", "Garlic Chicken", "Plain Rice"]);
        assert_eq!(res.matches[0].match_percentage, 100);
        assert_eq!(res.matches[1].match_percentage, 50);
        assert_eq!(
            res.matches[0].matching_ingredients,
            vec!["rice", "chicken thigh"]
        );
    }

    #[test]
    fn test_match_res_empty_selection() {
        let res = MatchRes::build(&catalog(), &SelectionSet::new());
        assert!(res.selected.is_empty());
        assert!(res.matches.is_empty());
    }

    #[test]
    fn test_suggestions_query_parses_comma_list() {
        let query = SuggestionsQuery {
            selected: Some("Chicken, beef,,".into()),
        };
        assert_eq!(query.selection().terms(), ["chicken", "beef"]);
        assert!(SuggestionsQuery::default().selection().is_empty());
    }
}
