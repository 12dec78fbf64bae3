//! # Catalog
//!
//! The owning collection of all foods, keyed by identifier.
//!
//! ## Loading
//!
//! Record files may list a composite before the foods it is made of, so a
//! load runs in two passes:
//!
//! 1. Decode every line into a provisional food and insert it. Composite
//!    lines also yield a deferred [`CompositionRef`].
//! 2. Resolve each deferred reference, in capture order, by plain lookup in
//!    the now complete map, and replace the provisional entry with a
//!    composite built from copies of its components.
//!
//! Resolution is a single pass with no recursion. A composite whose
//! component is itself a composite that has not been resolved yet captures
//! that component's zero-aggregate state. Cyclic references therefore
//! terminate, at the cost of not resolving nested composites transitively.
//!
//! Bad lines and broken references never abort a load; they are skipped and
//! reported as [`LoadWarning`]s.

use crate::formats::{composition_ref_from_line, food_from_line, is_ignorable_line};
use crate::primitives::HEADER_LINE;
use crate::storage::{FileStore, LineStore, MemoryStore};
use crate::{CompositionRef, Food, LoadReport, LoadWarning, SearchMode, YadaError};
use indexmap::IndexMap;
use std::path::PathBuf;

/// An in-memory food catalog backed by a line store.
///
/// Iteration, listing, and save order follow insertion order, which after a
/// load is file order.
#[derive(Debug)]
pub struct Catalog<S: LineStore = FileStore> {
    records: IndexMap<String, Food>,
    store: S,
}

impl Catalog<FileStore> {
    /// Open the catalog file at `path` and load it.
    ///
    /// A missing or unreadable file yields an empty catalog; the report says
    /// why.
    pub fn open(path: impl Into<PathBuf>) -> (Self, LoadReport) {
        let mut catalog = Self::new(FileStore::new(path));
        let report = catalog.load();
        (catalog, report)
    }
}

impl Catalog<MemoryStore> {
    /// Create an empty catalog with an in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: LineStore> Catalog<S> {
    /// Create an empty catalog over `store`. Nothing is read until
    /// [`Catalog::load`] is called.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            records: IndexMap::new(),
            store,
        }
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // LOAD / RESOLVE
    // =========================================================================

    /// Replace the catalog contents with the records in the store.
    pub fn load(&mut self) -> LoadReport {
        self.records.clear();
        let mut report = LoadReport::default();

        let lines = match self.store.read_lines() {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!("No records loaded from {}: {}", self.store.location(), e);
                report.warnings.push(LoadWarning::StoreUnavailable {
                    reason: e.to_string(),
                });
                return report;
            }
        };

        let mut deferred: Vec<CompositionRef> = Vec::new();

        for (index, raw) in lines.iter().enumerate() {
            if is_ignorable_line(raw) {
                continue;
            }
            let line_number = index + 1;
            let line = raw.trim();

            let food = match food_from_line(line) {
                Ok(food) => food,
                Err(e) => {
                    tracing::warn!("Skipping line {}: {}", line_number, e);
                    report.warnings.push(LoadWarning::Unparseable {
                        line: line_number,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let identifier = food.identifier().to_string();
            if self.records.contains_key(&identifier) {
                tracing::warn!(
                    "Line {} redefines '{}', replacing the earlier record",
                    line_number,
                    identifier
                );
                deferred.retain(|reference| reference.identifier != identifier);
                report.warnings.push(LoadWarning::DuplicateIdentifier {
                    line: line_number,
                    identifier: identifier.clone(),
                });
            }

            if let Some(reference) = composition_ref_from_line(line) {
                deferred.push(reference);
            }
            self.records.insert(identifier, food);
        }

        self.resolve(deferred, &mut report);
        report.loaded = self.records.len();

        tracing::debug!(
            "Loaded {} foods from {} ({} composites resolved, {} warnings)",
            report.loaded,
            self.store.location(),
            report.composites_resolved,
            report.warnings.len()
        );

        report
    }

    /// Second load pass: turn deferred references into composites.
    fn resolve(&mut self, deferred: Vec<CompositionRef>, report: &mut LoadReport) {
        for reference in deferred {
            let resolved = self
                .collect_components(&reference.component_ids)
                .and_then(|components| Food::composite(reference.identifier.as_str(), components));

            match resolved {
                Ok(composite) => {
                    if let Some(slot) = self.records.get_mut(&reference.identifier) {
                        *slot = composite;
                        report.composites_resolved += 1;
                    }
                }
                Err(YadaError::ComponentNotFound(component)) => {
                    tracing::warn!(
                        "Component '{}' not found for composite food '{}'",
                        component,
                        reference.identifier
                    );
                    report.warnings.push(LoadWarning::ComponentNotFound {
                        composite: reference.identifier,
                        component,
                    });
                }
                Err(e) => {
                    tracing::warn!("Leaving '{}' unresolved: {}", reference.identifier, e);
                    report.warnings.push(LoadWarning::EmptyComposition {
                        composite: reference.identifier,
                    });
                }
            }
        }
    }

    /// Copy the current records for `ids`, failing on the first missing one.
    fn collect_components<T: AsRef<str>>(&self, ids: &[T]) -> Result<Vec<Food>, YadaError> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.records
                    .get(id)
                    .cloned()
                    .ok_or_else(|| YadaError::ComponentNotFound(id.to_string()))
            })
            .collect()
    }

    // =========================================================================
    // SAVE
    // =========================================================================

    /// Encode the catalog: header comment, then one line per food.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        std::iter::once(HEADER_LINE.to_string())
            .chain(self.records.values().map(Food::to_line))
            .collect()
    }

    /// Write the catalog to its store.
    ///
    /// On failure the in-memory catalog is left as it was.
    pub fn save(&mut self) -> Result<(), YadaError> {
        let lines = self.to_lines();
        self.store.write_lines(&lines).inspect_err(|e| {
            tracing::error!("Could not save catalog to {}: {}", self.store.location(), e);
        })?;
        tracing::debug!(
            "Saved {} foods to {}",
            self.records.len(),
            self.store.location()
        );
        Ok(())
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Insert a food, fully replacing any food with the same identifier.
    ///
    /// A replaced food keeps its position. Returns the replaced food.
    pub fn add(&mut self, food: Food) -> Result<Option<Food>, YadaError> {
        food.validate()?;
        Ok(self.records.insert(food.identifier().to_string(), food))
    }

    /// Remove a food. Returns whether anything was removed.
    pub fn remove(&mut self, identifier: &str) -> bool {
        self.records.shift_remove(identifier).is_some()
    }

    /// Build a new composite from foods already in the catalog and add it.
    ///
    /// Components are copied in their current state, composite or not.
    /// Fails without touching the catalog if `name` is taken, a component
    /// is missing, or no components are given.
    pub fn compose_new<T: AsRef<str>>(
        &mut self,
        name: &str,
        component_ids: &[T],
    ) -> Result<&Food, YadaError> {
        if self.records.contains_key(name) {
            return Err(YadaError::DuplicateIdentifier(name.to_string()));
        }

        let components = self.collect_components(component_ids)?;
        let composite = Food::composite(name, components)?;
        self.add(composite)?;
        self.find(name)
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Look up a food by identifier.
    pub fn find(&self, identifier: &str) -> Result<&Food, YadaError> {
        self.get(identifier)
            .ok_or_else(|| YadaError::NotFound(identifier.to_string()))
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Food> {
        self.records.get(identifier)
    }

    /// Mutable access for the food's own setters and appenders.
    pub fn get_mut(&mut self, identifier: &str) -> Option<&mut Food> {
        self.records.get_mut(identifier)
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.records.contains_key(identifier)
    }

    // =========================================================================
    // KEYWORD QUERIES
    // =========================================================================

    /// Foods carrying `keyword`, in catalog order.
    #[must_use]
    pub fn find_by_keyword(&self, keyword: &str) -> Vec<&Food> {
        self.filter(|food| food.matches_keyword(keyword))
    }

    /// Foods carrying every keyword. An empty query returns everything.
    #[must_use]
    pub fn find_all_matching_all<T: AsRef<str>>(&self, keywords: &[T]) -> Vec<&Food> {
        self.filter(|food| food.matches_all_keywords(keywords))
    }

    /// Foods carrying at least one keyword. An empty query returns everything.
    #[must_use]
    pub fn find_all_matching_any<T: AsRef<str>>(&self, keywords: &[T]) -> Vec<&Food> {
        self.filter(|food| food.matches_any_keyword(keywords))
    }

    /// Dispatch a keyword search by mode.
    #[must_use]
    pub fn search<T: AsRef<str>>(&self, mode: SearchMode, keywords: &[T]) -> Vec<&Food> {
        match mode {
            SearchMode::Any => self.find_all_matching_any(keywords),
            SearchMode::All => self.find_all_matching_all(keywords),
        }
    }

    fn filter(&self, predicate: impl Fn(&Food) -> bool) -> Vec<&Food> {
        self.records.values().filter(|&food| predicate(food)).collect()
    }

    // =========================================================================
    // COLLECTION ACCESS
    // =========================================================================

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All foods in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Food> {
        self.records.values()
    }

    /// All identifiers in catalog order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    fn catalog_from(lines: &[&str]) -> (Catalog<MemoryStore>, LoadReport) {
        let mut catalog = Catalog::new(MemoryStore::with_lines(lines.iter().copied()));
        let report = catalog.load();
        (catalog, report)
    }

    fn sample() -> Catalog<MemoryStore> {
        let mut catalog = Catalog::in_memory();
        catalog
            .add(Food::new("Bun", kw(&["bread"]), 100))
            .expect("add");
        catalog
            .add(Food::new("Patty", kw(&["meat"]), 250))
            .expect("add");
        catalog
            .add(Food::new("Lettuce", kw(&["vegetable", "green"]), 5))
            .expect("add");
        catalog
    }

    #[test]
    fn add_upserts_in_place() {
        let mut catalog = sample();
        let replaced = catalog
            .add(Food::new("Bun", kw(&["bread", "seeded"]), 120))
            .expect("add");

        assert_eq!(replaced.map(|f| f.calories()), Some(100));
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.identifiers().collect::<Vec<_>>(),
            vec!["Bun", "Patty", "Lettuce"]
        );
        assert_eq!(catalog.find("Bun").expect("find").calories(), 120);
    }

    #[test]
    fn add_rejects_invalid_records() {
        let mut catalog = sample();
        let result = catalog.add(Food::new("", Vec::new(), 1));
        assert!(matches!(result, Err(YadaError::InvalidRecord(_))));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn remove_reports_deletion_and_keeps_order() {
        let mut catalog = sample();

        assert!(catalog.remove("Patty"));
        assert!(!catalog.remove("Patty"));
        assert_eq!(
            catalog.identifiers().collect::<Vec<_>>(),
            vec!["Bun", "Lettuce"]
        );
    }

    #[test]
    fn find_missing_is_not_found() {
        let catalog = sample();
        assert_eq!(
            catalog.find("Pizza").err(),
            Some(YadaError::NotFound("Pizza".to_string()))
        );
        assert!(catalog.get("Pizza").is_none());
        assert!(catalog.contains("Bun"));
    }

    #[test]
    fn compose_new_builds_from_current_records() {
        let mut catalog = sample();
        let burger = catalog
            .compose_new("Burger", &["Bun", "Patty", "Lettuce"])
            .expect("compose");

        assert_eq!(burger.calories(), 355);
        assert_eq!(
            burger.keywords(),
            kw(&["bread", "meat", "vegetable", "green"]).as_slice()
        );
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn compose_new_nests_existing_composites() {
        let mut catalog = sample();
        catalog
            .compose_new("Burger", &["Bun", "Patty"])
            .expect("compose");
        let meal = catalog
            .compose_new("Meal", &["Burger", "Lettuce"])
            .expect("compose");

        assert_eq!(meal.calories(), 355);
        assert_eq!(meal.components()[0].components().len(), 2);
    }

    #[test]
    fn compose_new_failures_leave_catalog_unchanged() {
        let mut catalog = sample();
        let empty: [&str; 0] = [];

        assert_eq!(
            catalog.compose_new("X", &empty).err(),
            Some(YadaError::EmptyComposition("X".to_string()))
        );
        assert_eq!(
            catalog.compose_new("Bun", &["Patty"]).err(),
            Some(YadaError::DuplicateIdentifier("Bun".to_string()))
        );
        assert_eq!(
            catalog.compose_new("Y", &["Bun", "Cheese"]).err(),
            Some(YadaError::ComponentNotFound("Cheese".to_string()))
        );
        assert!(matches!(
            catalog.compose_new("Bad;Name", &["Bun"]),
            Err(YadaError::InvalidRecord(_))
        ));

        assert_eq!(
            catalog.identifiers().collect::<Vec<_>>(),
            vec!["Bun", "Patty", "Lettuce"]
        );
    }

    #[test]
    fn keyword_queries_preserve_catalog_order() {
        let mut catalog = sample();
        catalog
            .compose_new("Burger", &["Bun", "Patty"])
            .expect("compose");

        let ids = |foods: Vec<&Food>| {
            foods
                .into_iter()
                .map(|f| f.identifier().to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids(catalog.find_by_keyword("meat")), vec!["Patty", "Burger"]);
        assert_eq!(
            ids(catalog.find_all_matching_all(&["bread", "meat"])),
            vec!["Burger"]
        );
        assert_eq!(
            ids(catalog.find_all_matching_any(&["bread", "green"])),
            vec!["Bun", "Lettuce", "Burger"]
        );
        assert_eq!(
            ids(catalog.search(SearchMode::All, &["meat"])),
            vec!["Patty", "Burger"]
        );
    }

    #[test]
    fn empty_queries_return_everything() {
        let catalog = sample();
        let none: [&str; 0] = [];
        assert_eq!(catalog.find_all_matching_any(&none).len(), 3);
        assert_eq!(catalog.find_all_matching_all(&none).len(), 3);
    }

    #[test]
    fn load_skips_comments_blanks_and_bad_lines() {
        let (catalog, report) = catalog_from(&[
            "# header",
            "",
            "   ",
            "  # indented comment",
            "Apple;fruit;95;0",
            "garbage",
            "Pear;fruit;oops;0",
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(report.loaded, 1);
        assert_eq!(report.warnings.len(), 2);
        assert!(matches!(
            report.warnings[0],
            LoadWarning::Unparseable { line: 6, .. }
        ));
        assert!(matches!(
            report.warnings[1],
            LoadWarning::Unparseable { line: 7, .. }
        ));
    }

    #[test]
    fn load_resolves_forward_references() {
        let (catalog, report) = catalog_from(&[
            "Combo;;0;1;Bun,Patty",
            "Bun;bread;100;0",
            "Patty;meat;250;0",
        ]);

        assert!(report.is_clean());
        assert_eq!(report.composites_resolved, 1);

        let combo = catalog.find("Combo").expect("combo");
        assert_eq!(combo.calories(), 350);
        assert_eq!(combo.keywords(), kw(&["bread", "meat"]).as_slice());
        assert_eq!(
            catalog.identifiers().collect::<Vec<_>>(),
            vec!["Combo", "Bun", "Patty"]
        );
    }

    #[test]
    fn load_with_missing_component_keeps_empty_composite() {
        let (catalog, report) = catalog_from(&["Combo;;0;1;Bun,Ghost", "Bun;bread;100;0"]);

        let combo = catalog.find("Combo").expect("combo");
        assert!(combo.is_composite());
        assert!(combo.components().is_empty());
        assert_eq!(combo.calories(), 0);
        assert_eq!(
            report.warnings,
            vec![LoadWarning::ComponentNotFound {
                composite: "Combo".to_string(),
                component: "Ghost".to_string(),
            }]
        );
    }

    #[test]
    fn load_flags_composite_without_components() {
        let (catalog, report) = catalog_from(&["Box;;0;1"]);

        assert!(catalog.find("Box").expect("box").is_composite());
        assert_eq!(
            report.warnings,
            vec![LoadWarning::EmptyComposition {
                composite: "Box".to_string()
            }]
        );
    }

    #[test]
    fn load_duplicate_identifier_keeps_last_definition() {
        let (catalog, report) = catalog_from(&[
            "Bun;bread;100;0",
            "Snack;;0;1;Bun",
            "Snack;crisps;150;0",
        ]);

        let snack = catalog.find("Snack").expect("snack");
        assert!(!snack.is_composite());
        assert_eq!(snack.calories(), 150);
        assert_eq!(report.composites_resolved, 0);
        assert!(matches!(
            report.warnings.as_slice(),
            [LoadWarning::DuplicateIdentifier { line: 3, .. }]
        ));
    }

    #[test]
    fn nested_composite_captures_unresolved_state() {
        // Outer is captured first, so Inner is still provisional when Outer
        // looks it up.
        let (catalog, _) = catalog_from(&[
            "Outer;;0;1;Inner,Bun",
            "Inner;;0;1;Bun",
            "Bun;bread;100;0",
        ]);

        assert_eq!(catalog.find("Inner").expect("inner").calories(), 100);
        let outer = catalog.find("Outer").expect("outer");
        assert_eq!(outer.calories(), 100);
        assert!(outer.components()[0].components().is_empty());
    }

    #[test]
    fn self_reference_terminates() {
        let (catalog, report) = catalog_from(&["Loop;;0;1;Loop"]);

        assert!(report.is_clean());
        let food = catalog.find("Loop").expect("loop");
        assert_eq!(food.calories(), 0);
        assert_eq!(food.component_ids(), vec!["Loop"]);
    }

    #[test]
    fn reload_replaces_contents() {
        let mut catalog = Catalog::new(MemoryStore::with_lines(["Apple;fruit;95;0"]));
        catalog.load();
        catalog
            .add(Food::new("Pear", kw(&["fruit"]), 60))
            .expect("add");

        catalog.load();
        assert_eq!(catalog.identifiers().collect::<Vec<_>>(), vec!["Apple"]);
    }

    #[test]
    fn unreadable_store_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (catalog, report) = Catalog::open(dir.path().join("missing.txt"));

        assert!(catalog.is_empty());
        assert!(matches!(
            report.warnings.as_slice(),
            [LoadWarning::StoreUnavailable { .. }]
        ));
    }

    #[test]
    fn save_writes_header_then_records() {
        let mut catalog = sample();
        catalog
            .compose_new("Burger", &["Bun", "Patty"])
            .expect("compose");
        catalog.save().expect("save");

        assert_eq!(
            catalog.store().lines(),
            [
                HEADER_LINE.to_string(),
                "Bun;bread;100;0".to_string(),
                "Patty;meat;250;0".to_string(),
                "Lettuce;vegetable,green;5;0".to_string(),
                "Burger;bread,meat;350;1;Bun,Patty".to_string(),
            ]
        );
    }

    #[test]
    fn failed_save_keeps_memory_intact() {
        let mut catalog = Catalog::new(MemoryStore::with_lines(["Apple;fruit;95;0"]).read_only());
        catalog.load();
        catalog
            .add(Food::new("Pear", kw(&["fruit"]), 60))
            .expect("add");

        assert!(matches!(catalog.save(), Err(YadaError::Persistence(_))));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.store().lines(), ["Apple;fruit;95;0".to_string()]);
    }
}
