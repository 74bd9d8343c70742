//! Static seed catalog.
//!
//! The embedded YAML list is always available. Deployments can point `DEVDISHES_SEED_FILE` at
//! their own YAML file with the same shape.

use crate::config::CoreConfig;
use crate::constants::SEED_RECIPES_YAML;
use crate::recipe::Recipe;
use crate::{RecipeError, RecipeResult};
use std::path::Path;

/// Parse a YAML list of recipes.
pub fn parse_seed(yaml: &str) -> RecipeResult<Vec<Recipe>> {
    serde_yaml::from_str(yaml).map_err(RecipeError::SeedDecode)
}

/// The seed catalog compiled into the binary.
pub fn embedded_seed() -> RecipeResult<Vec<Recipe>> {
    parse_seed(SEED_RECIPES_YAML)
}

/// Read a seed catalog from a YAML file on disk.
pub fn read_seed_file(path: &Path) -> RecipeResult<Vec<Recipe>> {
    let contents = std::fs::read_to_string(path).map_err(RecipeError::SeedRead)?;
    parse_seed(&contents)
}

/// Resolve the seed catalog for a configuration: the override file when set, else the embedded
/// list.
pub fn load_seed(cfg: &CoreConfig) -> RecipeResult<Vec<Recipe>> {
    match cfg.seed_file() {
        Some(path) => {
            tracing::info!("loading seed catalog from {}", path.display());
            read_seed_file(path)
        }
        None => embedded_seed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devdishes_types::{Difficulty, RecipeId};
    use std::io::Write;

    #[test]
    fn test_embedded_seed_parses() {
        let seed = embedded_seed().expect("embedded seed should parse");
        assert!(!seed.is_empty());
        assert!(seed.iter().all(|r| !r.name.is_empty() && !r.ingredients.is_empty()));
        assert_eq!(seed[0].id, RecipeId::Numeric(1));
    }

    #[test]
    fn test_parse_seed_applies_defaults() {
        let seed = parse_seed("- id: soup\n  name: Soup\n").unwrap();
        assert_eq!(seed.len(), 1);
        assert_eq!(seed[0].id, RecipeId::Text("soup".into()));
        assert_eq!(seed[0].category, "Other");
        assert_eq!(seed[0].difficulty, Difficulty::Easy);
        assert_eq!(seed[0].servings, 1);
    }

    #[test]
    fn test_parse_seed_rejects_invalid_yaml() {
        let err = parse_seed("- name: [unterminated").expect_err("should reject");
        assert!(matches!(err, RecipeError::SeedDecode(_)));
    }

    #[test]
    fn test_load_seed_uses_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "- id: 99\n  name: Override Pie\n  ingredients: [apples]").unwrap();

        let cfg =
            CoreConfig::new("http://localhost:5000", Some(file.path().to_path_buf()), None)
                .unwrap();
        let seed = load_seed(&cfg).unwrap();
        assert_eq!(seed.len(), 1);
        assert_eq!(seed[0].name, "Override Pie");
    }

    #[test]
    fn test_read_seed_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_seed_file(&dir.path().join("missing.yaml")).expect_err("should fail");
        assert!(matches!(err, RecipeError::SeedRead(_)));
    }
}
