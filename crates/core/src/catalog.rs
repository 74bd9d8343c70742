//! The recipe catalog: seed recipes followed by whatever the recipe service returned.
//!
//! ## Loading
//!
//! The remote list is requested once per load. Every remote record is normalised and appended
//! after the seed list; seed records are never replaced or deduplicated, even when names
//! collide. When the request fails for any reason the catalog is the seed list alone.
//!
//! ## Browsing
//!
//! Browsing filters by a free-text query (name, tags or description) and a category, where the
//! `All` pseudo-category matches everything.

use crate::constants::ALL_CATEGORIES;
use crate::gateway::RecipeGateway;
use crate::recipe::{Recipe, RemoteRecipe};
use devdishes_types::RecipeId;

/// An immutable, ordered set of recipes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Build a catalog from the seed list followed by normalised remote records.
    ///
    /// Each remote record comes with its index in the service response, which numbers records
    /// that have no id of their own.
    pub fn with_remote<I>(seed: Vec<Recipe>, remote: I) -> Self
    where
        I: IntoIterator<Item = (usize, RemoteRecipe)>,
    {
        let mut recipes = seed;
        recipes.extend(
            remote
                .into_iter()
                .map(|(position, r)| r.normalise(position)),
        );
        Self { recipes }
    }

    /// Load the catalog through the gateway, falling back to the seed list on failure.
    pub async fn load(gateway: &RecipeGateway, seed: Vec<Recipe>) -> Self {
        match gateway.list_recipes().await {
            Ok(remote) => {
                tracing::info!(
                    "loaded {} remote recipes after {} seed recipes",
                    remote.len(),
                    seed.len()
                );
                Self::with_remote(seed, remote)
            }
            Err(e) => {
                tracing::warn!("recipe service unavailable, using seed catalog only: {}", e);
                Self::new(seed)
            }
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn find(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| &r.id == id)
    }

    /// `All` followed by each distinct category in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for recipe in &self.recipes {
            if !categories.iter().any(|c| c == &recipe.category) {
                categories.push(recipe.category.clone());
            }
        }
        categories
    }

    /// Recipes matching both the query and the category, in catalog order.
    pub fn browse(&self, query: &str, category: &str) -> Vec<&Recipe> {
        let query = query.to_lowercase();
        self.recipes
            .iter()
            .filter(|r| matches_query(r, &query) && matches_category(r, category))
            .collect()
    }
}

/// `query` must already be lowercase.
fn matches_query(recipe: &Recipe, query: &str) -> bool {
    recipe.name.to_lowercase().contains(query)
        || recipe
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
        || recipe.description.to_lowercase().contains(query)
}

fn matches_category(recipe: &Recipe, category: &str) -> bool {
    category == ALL_CATEGORIES || recipe.category == category
}
