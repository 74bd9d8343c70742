//! Recipe submissions.
//!
//! The submission form collects a structured recipe, but the recipe service stores a single
//! free-text body. A submission is therefore cleaned, validated, and rendered into the
//! `{name, content, image}` payload that `POST /recipes` accepts.

use crate::constants::{DEFAULT_CATEGORY, DEFAULT_SERVINGS, SUBMISSION_ACCEPTED};
use crate::{RecipeError, RecipeResult};
use devdishes_types::{Difficulty, NonEmptyText, RecipeId};
use serde::{Deserialize, Serialize};

/// What a person filled in on the submission form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeSubmission {
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub prep_time: String,
    pub servings: u32,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
}

impl Default for RecipeSubmission {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            difficulty: Difficulty::default(),
            prep_time: String::new(),
            servings: DEFAULT_SERVINGS,
            image: String::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            tags: Vec::new(),
        }
    }
}

/// The body sent to `POST /recipes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub name: NonEmptyText,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// What the recipe service said about an accepted submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub id: Option<RecipeId>,
}

impl RecipeSubmission {
    /// Trim every text field and drop blank list entries.
    pub fn cleaned(self) -> Self {
        fn clean_list(items: Vec<String>) -> Vec<String> {
            items
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect()
        }

        let category = self.category.trim();
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            category: if category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category.to_string()
            },
            difficulty: self.difficulty,
            prep_time: self.prep_time.trim().to_string(),
            servings: self.servings.max(DEFAULT_SERVINGS),
            image: self.image.trim().to_string(),
            ingredients: clean_list(self.ingredients),
            instructions: clean_list(self.instructions),
            tags: clean_list(self.tags),
        }
    }

    /// Clean, validate, and render the submission into the service payload.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::InvalidInput` if the name is blank, or if no ingredient or no
    /// instruction remains after cleaning.
    pub fn into_payload(self) -> RecipeResult<SubmissionPayload> {
        let cleaned = self.cleaned();

        let name = NonEmptyText::new(&cleaned.name)
            .map_err(|_| RecipeError::InvalidInput("recipe name is required".into()))?;
        if cleaned.ingredients.is_empty() {
            return Err(RecipeError::InvalidInput(
                "at least one ingredient is required".into(),
            ));
        }
        if cleaned.instructions.is_empty() {
            return Err(RecipeError::InvalidInput(
                "at least one instruction is required".into(),
            ));
        }

        let content = cleaned.render_content();
        let image = Some(cleaned.image).filter(|i| !i.is_empty());

        Ok(SubmissionPayload {
            name,
            content,
            image,
        })
    }

    fn render_content(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        if !self.description.is_empty() {
            lines.push(self.description.clone());
            lines.push(String::new());
        }

        let mut summary = format!(
            "Category: {} | Difficulty: {} | Servings: {}",
            self.category, self.difficulty, self.servings
        );
        if !self.prep_time.is_empty() {
            summary.push_str(&format!(" | Prep time: {}", self.prep_time));
        }
        lines.push(summary);

        if !self.tags.is_empty() {
            lines.push(format!("Tags: {}", self.tags.join(", ")));
        }

        lines.push(String::new());
        lines.push("Ingredients:".to_string());
        lines.extend(self.ingredients.iter().map(|i| format!("- {i}")));

        lines.push(String::new());
        lines.push("Instructions:".to_string());
        lines.extend(
            self.instructions
                .iter()
                .enumerate()
                .map(|(step, instruction)| format!("{}. {instruction}", step + 1)),
        );

        lines.join("\n")
    }
}

/// The text shown to a person after a submission attempt.
pub fn submission_message(result: &RecipeResult<SubmissionReceipt>) -> String {
    match result {
        Ok(_) => SUBMISSION_ACCEPTED.to_string(),
        Err(e) => format!("Failed to submit recipe: {}", e.user_message()),
    }
}
