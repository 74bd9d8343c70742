//! HTTP client for the external recipe service.
//!
//! The service exposes three endpoints, all relative to the configured base URL:
//!
//! - `GET /recipes` returns a JSON array of recipe-like objects
//! - `GET /recipes/:id` returns `{id, name, content, image?}`, or a non-success status when the
//!   recipe does not exist
//! - `POST /recipes` takes `{name, content, image?}`; failures may carry `{"error": "..."}`
//!
//! Each call issues exactly one request. There is no retry.

use crate::config::CoreConfig;
use crate::constants::{RECIPES_PATH, RECIPE_NOT_FOUND, UNKNOWN_ERROR};
use crate::recipe::{RecipeDetail, RemoteRecipe};
use crate::submission::{SubmissionPayload, SubmissionReceipt};
use crate::{RecipeError, RecipeResult};
use devdishes_types::RecipeId;
use reqwest::{Client, Response, Url};

/// Client for the recipe service.
#[derive(Clone, Debug)]
pub struct RecipeGateway {
    client: Client,
    base_url: Url,
}

impl RecipeGateway {
    /// Create a gateway for the service configured in `cfg`.
    pub fn new(cfg: &CoreConfig) -> RecipeResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = cfg.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: cfg.api_base_url().clone(),
        })
    }

    fn recipes_url(&self) -> RecipeResult<Url> {
        self.base_url
            .join(RECIPES_PATH)
            .map_err(|e| RecipeError::InvalidConfig(format!("cannot build recipes url: {e}")))
    }

    fn recipe_url(&self, id: &RecipeId) -> RecipeResult<Url> {
        let mut url = self.recipes_url()?;
        url.path_segments_mut()
            .map_err(|_| RecipeError::InvalidConfig("api base url cannot have a path".into()))?
            .push(&id.to_string());
        Ok(url)
    }

    /// Fetch every recipe the service knows about.
    ///
    /// Elements that cannot be read as a recipe (for example, missing a name) are skipped with
    /// a warning. The rest are returned in response order, each with its index in the response.
    pub async fn list_recipes(&self) -> RecipeResult<Vec<(usize, RemoteRecipe)>> {
        let url = self.recipes_url()?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let response = error_for_status(response).await?;
        let body = response.bytes().await?;

        let items: Vec<serde_json::Value> =
            serde_json::from_slice(&body).map_err(RecipeError::Decode)?;

        let mut recipes = Vec::with_capacity(items.len());
        for (position, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<RemoteRecipe>(item) {
                Ok(recipe) => recipes.push((position, recipe)),
                Err(e) => tracing::warn!("skipping remote recipe at {}: {}", position, e),
            }
        }
        Ok(recipes)
    }

    /// Fetch one recipe. Any non-success status is reported as not found.
    pub async fn get_recipe(&self, id: &RecipeId) -> RecipeResult<RecipeDetail> {
        let url = self.recipe_url(id)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            tracing::info!("recipe {} not found ({})", id, response.status());
            return Err(RecipeError::NotFound(RECIPE_NOT_FOUND.into()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(RecipeError::Decode)
    }

    /// Submit a new recipe.
    ///
    /// # Errors
    ///
    /// - `RecipeError::Transport` if the request could not complete
    /// - `RecipeError::Status` for any non-success status, carrying the body's `error` text or
    ///   `"Unknown error"`
    pub async fn create_recipe(
        &self,
        payload: &SubmissionPayload,
    ) -> RecipeResult<SubmissionReceipt> {
        let url = self.recipes_url()?;
        tracing::debug!("POST {} ({})", url, payload.name);

        let response = self.client.post(url).json(payload).send().await?;
        let response = error_for_status(response).await?;

        let body = response.bytes().await?;
        let receipt = serde_json::from_slice::<SubmissionReceipt>(&body).unwrap_or_default();
        tracing::info!("submitted recipe {}", payload.name);
        Ok(receipt)
    }
}

/// Pass success responses through; turn anything else into `RecipeError::Status`.
async fn error_for_status(response: Response) -> RecipeResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    Err(RecipeError::Status {
        status: status.as_u16(),
        message: error_message_from_body(&body),
    })
}

/// The `error` string of a JSON error body, or `"Unknown error"`.
pub fn error_message_from_body(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: Option<String>,
    }

    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
