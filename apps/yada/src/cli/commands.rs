//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Each command loads the catalog, acts on it, and saves after mutations.

use crate::display::{FoodRow, print_json, render_json, render_table};
use std::path::Path;
use yada_core::{
    Catalog, CatalogMetrics, FileStore, Food, LoadReport, LoadWarning, SearchMode, YadaError,
};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Split a comma-separated argument, trimming entries and dropping empties.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load the catalog at `db_path`.
///
/// A missing database is an empty catalog. An existing database that cannot
/// be read is an error, so no command saves over records it never loaded.
/// Per-line warnings are logged by the catalog itself.
pub fn load_catalog(db_path: &Path) -> Result<(Catalog<FileStore>, LoadReport), YadaError> {
    let mut catalog = Catalog::new(FileStore::new(db_path));
    if !catalog.store().exists() {
        tracing::info!(path = %db_path.display(), "No database yet, starting empty");
        return Ok((catalog, LoadReport::default()));
    }

    let report = catalog.load();
    if let Some(LoadWarning::StoreUnavailable { reason }) = report
        .warnings
        .iter()
        .find(|w| matches!(w, LoadWarning::StoreUnavailable { .. }))
    {
        return Err(YadaError::Persistence(format!(
            "Could not read database '{}': {}",
            db_path.display(),
            reason
        )));
    }
    Ok((catalog, report))
}

// =============================================================================
// ADD COMMAND
// =============================================================================

/// Add a basic food, replacing an existing one with the same identifier.
pub fn cmd_add(
    db_path: &Path,
    json_mode: bool,
    identifier: &str,
    keywords: &str,
    calories: u32,
) -> Result<(), YadaError> {
    let (mut catalog, _) = load_catalog(db_path)?;
    let identifier = identifier.trim();

    let replaced = catalog
        .add(Food::new(identifier, split_list(keywords), calories))?
        .is_some();
    catalog.save()?;
    tracing::info!(identifier, replaced, "Food saved");

    if json_mode {
        print_json(&serde_json::json!({
            "identifier": identifier,
            "replaced": replaced,
        }));
        return Ok(());
    }

    if replaced {
        println!("Food \"{}\" updated successfully!", identifier);
    } else {
        println!("Food \"{}\" added successfully!", identifier);
    }
    Ok(())
}

// =============================================================================
// COMPOSE COMMAND
// =============================================================================

/// Create a composite food from existing component identifiers.
pub fn cmd_compose(
    db_path: &Path,
    json_mode: bool,
    name: &str,
    parts: &str,
) -> Result<(), YadaError> {
    let (mut catalog, _) = load_catalog(db_path)?;
    let component_ids = split_list(parts);

    let composite = catalog.compose_new(name.trim(), &component_ids)?;
    let row = FoodRow::from(composite);
    let components: Vec<(String, u32)> = composite
        .components()
        .iter()
        .map(|c| (c.identifier().to_string(), c.calories()))
        .collect();

    catalog.save()?;
    tracing::info!(identifier = %row.identifier, components = components.len(), "Composite created");

    if json_mode {
        print_json(&serde_json::to_value(&row).unwrap_or_default());
        return Ok(());
    }

    println!(
        "Composite food \"{}\" created with components:",
        row.identifier
    );
    for (identifier, calories) in &components {
        println!("- {} ({} calories)", identifier, calories);
    }
    println!("Total: {} calories", row.calories);
    Ok(())
}

// =============================================================================
// SEARCH COMMAND
// =============================================================================

/// Search foods matching any or all of the given keywords.
pub fn cmd_search(
    db_path: &Path,
    json_mode: bool,
    mode: SearchMode,
    keywords: &str,
) -> Result<(), YadaError> {
    let keywords = split_list(keywords);
    if keywords.is_empty() {
        return Err(YadaError::Parse(
            "No keywords entered. Please try again.".to_string(),
        ));
    }

    let (catalog, _) = load_catalog(db_path)?;
    let results = catalog.search(mode, &keywords);

    if json_mode {
        print_json(&serde_json::json!({
            "mode": mode.name(),
            "keywords": keywords,
            "results": render_json(results),
        }));
        return Ok(());
    }

    let quoted: Vec<String> = keywords.iter().map(|k| format!("'{}'", k)).collect();
    println!(
        "Foods matching {} of the keywords: {}",
        mode.name().to_uppercase(),
        quoted.join(", ")
    );

    if results.is_empty() {
        println!("No matching foods found.");
        return Ok(());
    }
    print!("{}", render_table(results));
    Ok(())
}

// =============================================================================
// REMOVE COMMAND
// =============================================================================

/// Remove a food by identifier.
pub fn cmd_remove(db_path: &Path, json_mode: bool, identifier: &str) -> Result<(), YadaError> {
    let (mut catalog, _) = load_catalog(db_path)?;
    if !catalog.remove(identifier) {
        return Err(YadaError::NotFound(identifier.to_string()));
    }
    catalog.save()?;
    tracing::info!(identifier, "Food removed");

    if json_mode {
        print_json(&serde_json::json!({ "removed": identifier }));
    } else {
        println!("Food \"{}\" removed.", identifier);
    }
    Ok(())
}

// =============================================================================
// LIST / SHOW COMMANDS
// =============================================================================

/// List every food in catalog order.
pub fn cmd_list(db_path: &Path, json_mode: bool) -> Result<(), YadaError> {
    let (catalog, _) = load_catalog(db_path)?;

    if json_mode {
        print_json(&render_json(catalog.iter()));
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No foods in the database.");
        return Ok(());
    }
    print!("{}", render_table(catalog.iter()));
    Ok(())
}

/// Show a single food.
pub fn cmd_show(db_path: &Path, json_mode: bool, identifier: &str) -> Result<(), YadaError> {
    let (catalog, _) = load_catalog(db_path)?;
    let food = catalog.find(identifier)?;

    if json_mode {
        print_json(&serde_json::to_value(FoodRow::from(food)).unwrap_or_default());
        return Ok(());
    }
    print!("{}", render_table([food]));
    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show catalog metrics and the number of load warnings.
pub fn cmd_status(db_path: &Path, json_mode: bool) -> Result<(), YadaError> {
    let (catalog, report) = load_catalog(db_path)?;
    let metrics = CatalogMetrics::from_catalog(&catalog);

    if json_mode {
        print_json(&serde_json::json!({
            "database": db_path.to_string_lossy(),
            "metrics": metrics,
            "mean_calories": metrics.mean_calories(),
            "warnings": report.warnings.len(),
        }));
        return Ok(());
    }

    println!("YADA Catalog Status");
    println!("===================");
    println!("Database:    {}", db_path.display());
    println!();
    println!("Foods:       {}", metrics.food_count);
    println!("Basic:       {}", metrics.basic_count);
    println!("Composite:   {}", metrics.composite_count);
    println!("Unresolved:  {}", metrics.unresolved_count);
    println!("Keywords:    {}", metrics.distinct_keywords);
    println!("Max Cal:     {}", metrics.max_calories);
    println!("Mean Cal:    {}", metrics.mean_calories());
    println!("Warnings:    {}", report.warnings.len());

    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Write an empty catalog (header only).
pub fn cmd_init(db_path: &Path, force: bool) -> Result<(), YadaError> {
    if db_path.exists() && !force {
        return Err(YadaError::Persistence(
            "Database already exists. Use --force to overwrite.".to_string(),
        ));
    }

    let mut catalog = Catalog::new(FileStore::new(db_path));
    catalog.save()?;
    println!("Initialized new food database at {}", db_path.display());
    Ok(())
}
