//! Ingredient matching.
//!
//! A selected term hits a recipe when it is a substring of at least one of the recipe's
//! ingredient phrases, compared in lowercase. There is no tokenising or stemming: `"egg"` hits
//! `"2 egg yolks"` and `"eggplant"` alike.
//!
//! Selected terms are expected to be lowercase already (see [`crate::selection::SelectionSet`]).

use crate::recipe::Recipe;
use std::cmp::Reverse;

/// Number of selected terms that hit at least one of the recipe's ingredients.
pub fn match_count<S: AsRef<str>>(recipe: &Recipe, selected: &[S]) -> usize {
    let ingredients: Vec<String> = recipe
        .ingredients
        .iter()
        .map(|i| i.to_lowercase())
        .collect();

    selected
        .iter()
        .filter(|term| {
            let term: &str = term.as_ref();
            ingredients.iter().any(|i| i.contains(term))
        })
        .count()
}

/// Recipes with at least one hit, most hits first.
///
/// Recipes with equal hit counts keep their catalog order. An empty selection matches nothing.
pub fn match_recipes<'a, S: AsRef<str>>(catalog: &'a [Recipe], selected: &[S]) -> Vec<&'a Recipe> {
    if selected.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &Recipe)> = catalog
        .iter()
        .map(|r| (match_count(r, selected), r))
        .filter(|(count, _)| *count > 0)
        .collect();

    // sort_by_key is stable
    scored.sort_by_key(|(count, _)| Reverse(*count));
    scored.into_iter().map(|(_, r)| r).collect()
}

/// Share of the selection present in the recipe, as a whole percentage.
///
/// Rounds half up. Returns 0 for an empty selection.
pub fn match_percentage<S: AsRef<str>>(recipe: &Recipe, selected: &[S]) -> u8 {
    if selected.is_empty() {
        return 0;
    }
    let hits = match_count(recipe, selected) as f64;
    ((hits / selected.len() as f64) * 100.0).round() as u8
}

/// The recipe's own ingredient phrases that contain any selected term, in recipe order, at most
/// `limit` of them.
pub fn matching_ingredients<'a, S: AsRef<str>>(
    recipe: &'a Recipe,
    selected: &[S],
    limit: usize,
) -> Vec<&'a str> {
    recipe
        .ingredients
        .iter()
        .filter(|i| {
            let lower = i.to_lowercase();
            selected.iter().any(|term| {
                let term: &str = term.as_ref();
                lower.contains(term)
            })
        })
        .take(limit)
        .map(String::as_str)
        .collect()
}
