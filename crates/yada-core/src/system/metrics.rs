//! # Catalog Metrics
//!
//! Counts and calorie totals for a catalog. Integer arithmetic only.

use crate::Catalog;
use crate::storage::LineStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Summary statistics of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetrics {
    /// Total number of foods.
    pub food_count: usize,
    /// Foods without components.
    pub basic_count: usize,
    /// Foods flagged composite, resolved or not.
    pub composite_count: usize,
    /// Composite foods whose components could not be resolved.
    pub unresolved_count: usize,
    /// Number of distinct keywords across all foods.
    pub distinct_keywords: usize,
    /// Sum of calories over all foods (saturating).
    pub total_calories: u64,
    /// Highest calorie value in the catalog (0 if empty).
    pub max_calories: u32,
}

impl CatalogMetrics {
    /// Compute metrics from a catalog.
    #[must_use]
    pub fn from_catalog<S: LineStore>(catalog: &Catalog<S>) -> Self {
        let mut metrics = Self::default();
        let mut keywords = BTreeSet::new();

        for food in catalog.iter() {
            metrics.food_count += 1;
            if food.is_composite() {
                metrics.composite_count += 1;
                if !food.is_resolved() {
                    metrics.unresolved_count += 1;
                }
            } else {
                metrics.basic_count += 1;
            }

            metrics.total_calories = metrics
                .total_calories
                .saturating_add(u64::from(food.calories()));
            metrics.max_calories = metrics.max_calories.max(food.calories());
            keywords.extend(food.keywords().iter().map(String::as_str));
        }

        metrics.distinct_keywords = keywords.len();
        metrics
    }

    /// Mean calories per food, rounded down (0 if empty).
    #[must_use]
    pub fn mean_calories(&self) -> u64 {
        if self.food_count == 0 {
            return 0;
        }
        self.total_calories / self.food_count as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn empty_catalog_metrics() {
        let catalog = Catalog::in_memory();
        let metrics = CatalogMetrics::from_catalog(&catalog);

        assert_eq!(metrics, CatalogMetrics::default());
        assert_eq!(metrics.mean_calories(), 0);
    }

    #[test]
    fn counts_kinds_and_calories() {
        let mut catalog = Catalog::new(MemoryStore::with_lines([
            "Bun;bread,baked;100;0",
            "Patty;meat;250;0",
            "Combo;;0;1;Bun,Patty",
            "Broken;;0;1;Ghost",
        ]));
        catalog.load();

        let metrics = CatalogMetrics::from_catalog(&catalog);

        assert_eq!(metrics.food_count, 4);
        assert_eq!(metrics.basic_count, 2);
        assert_eq!(metrics.composite_count, 2);
        assert_eq!(metrics.unresolved_count, 1);
        assert_eq!(metrics.distinct_keywords, 3);
        assert_eq!(metrics.total_calories, 700);
        assert_eq!(metrics.max_calories, 350);
        assert_eq!(metrics.mean_calories(), 175);
    }
}
