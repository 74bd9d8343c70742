use crate::HealthRes;

/// Simple health service shared by the site API and any other front door.
///
/// Reports whether the site is serving and how many recipes the loaded catalog holds.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health(recipe_count: usize) -> HealthRes {
        HealthRes {
            ok: true,
            message: format!("DevDishes is alive ({recipe_count} recipes)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_health_reports_recipe_count() {
        let res = HealthService::check_health(7);
        assert!(res.ok);
        assert_eq!(res.message, "DevDishes is alive (7 recipes)");
    }
}
