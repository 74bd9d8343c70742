//! # DevDishes Core
//!
//! Core logic for the DevDishes recipe site.
//!
//! This crate contains pure recipe operations and the client for the external recipe service:
//! - The recipe model and normalisation of loosely-typed service records
//! - The static seed catalog and catalog loading with seed fallback
//! - Browsing (search + category) and ingredient matching
//! - The selection set of chosen ingredients and suggestions
//! - Submission cleaning, validation and payload rendering
//!
//! **No API concerns**: HTTP servers and CLI presentation belong in `api-rest`, `api-shared`, or
//! the `devdishes` CLI.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod matcher;
pub mod recipe;
pub mod seed;
pub mod selection;
pub mod submission;

pub use catalog::Catalog;
pub use config::CoreConfig;
pub use devdishes_types::{Difficulty, NonEmptyText, RecipeId};
pub use error::{RecipeError, RecipeResult};
pub use gateway::RecipeGateway;
pub use matcher::{match_count, match_percentage, match_recipes, matching_ingredients};
pub use recipe::{Recipe, RecipeDetail, RemoteRecipe};
pub use selection::SelectionSet;
pub use submission::{submission_message, RecipeSubmission, SubmissionPayload, SubmissionReceipt};

/// Everything a running site needs: the loaded catalog and a gateway for live calls.
#[derive(Clone, Debug)]
pub struct RecipeService {
    catalog: std::sync::Arc<Catalog>,
    gateway: RecipeGateway,
}

impl RecipeService {
    pub fn new(catalog: Catalog, gateway: RecipeGateway) -> Self {
        Self {
            catalog: std::sync::Arc::new(catalog),
            gateway,
        }
    }

    /// Resolve the seed list and load the catalog once.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway cannot be built or the seed catalog cannot be read.
    /// Failures of the recipe service itself fall back to the seed list.
    pub async fn start(cfg: &CoreConfig) -> RecipeResult<Self> {
        let gateway = RecipeGateway::new(cfg)?;
        let seed = seed::load_seed(cfg)?;
        let catalog = Catalog::load(&gateway, seed).await;
        Ok(Self::new(catalog, gateway))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up full details for a recipe on the recipe service.
    pub async fn recipe_detail(&self, id: &RecipeId) -> RecipeResult<RecipeDetail> {
        self.gateway.get_recipe(id).await
    }

    /// Validate and submit a recipe.
    pub async fn submit(&self, submission: RecipeSubmission) -> RecipeResult<SubmissionReceipt> {
        let payload = submission.into_payload()?;
        self.gateway.create_recipe(&payload).await
    }
}
