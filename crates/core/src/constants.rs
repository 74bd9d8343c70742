//! Constants used throughout the DevDishes core crate.
//!
//! Defaults applied to remote recipes, wire paths, and the fixed lists the site shows.

/// Category assigned to recipes that arrive without one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Rating assigned to recipes that arrive without one.
pub const DEFAULT_RATING: f64 = 5.0;

/// Servings assigned to recipes that arrive without a positive count.
pub const DEFAULT_SERVINGS: u32 = 1;

/// Fallback image for recipes that arrive without one.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=600&h=400";

/// Remote recipes without an id are numbered from here by their position in the response.
pub const REMOTE_ID_OFFSET: u64 = 10_000;

/// Pseudo-category that matches every recipe when browsing.
pub const ALL_CATEGORIES: &str = "All";

/// Popular ingredients suggested next to the ingredient search box.
pub const COMMON_INGREDIENTS: &[&str] = &[
    "chicken",
    "beef",
    "salmon",
    "shrimp",
    "eggs",
    "cheese",
    "tomatoes",
    "onion",
    "garlic",
    "rice",
    "pasta",
    "potatoes",
    "mushrooms",
    "spinach",
    "carrots",
    "bell peppers",
    "flour",
    "butter",
    "olive oil",
    "lemon",
    "herbs",
    "milk",
    "bread",
    "avocado",
];

/// Number of suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 12;

/// Number of matching ingredients highlighted per matched recipe.
pub const MAX_HIGHLIGHTED_INGREDIENTS: usize = 4;

/// Path of the recipe collection on the recipe service.
pub const RECIPES_PATH: &str = "recipes";

/// Default base URL of the recipe service.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Message used when a failed response carries no usable error text.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Message used when the recipe service has no recipe for an id.
pub const RECIPE_NOT_FOUND: &str = "Recipe not found";

/// Message shown after a successful submission.
pub const SUBMISSION_ACCEPTED: &str =
    "Recipe submitted successfully! It will be reviewed before being published.";

/// Embedded seed catalog.
pub(crate) const SEED_RECIPES_YAML: &str = include_str!("../seed/recipes.yaml");
