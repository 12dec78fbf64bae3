//! # Record Rendering
//!
//! Tab-separated tables for terminals and JSON rows for `--json-mode`.

use serde::Serialize;
use yada_core::Food;

/// Column header of the food table.
pub const TABLE_HEADER: &str = "ID\tCalories\tType\t\tKeywords";

/// Rule printed under [`TABLE_HEADER`].
pub const TABLE_RULE: &str = "-------------------------------------------------------";

/// Whether a row is a basic or composite food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    Basic,
    Composite,
}

impl FoodKind {
    /// Label and padding for the table's Type column.
    fn table_cell(self) -> &'static str {
        match self {
            Self::Basic => "Basic\t\t",
            Self::Composite => "Composite\t",
        }
    }
}

/// A food flattened for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodRow {
    pub identifier: String,
    pub calories: u32,
    pub kind: FoodKind,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unresolved: bool,
}

impl From<&Food> for FoodRow {
    fn from(food: &Food) -> Self {
        Self {
            identifier: food.identifier().to_string(),
            calories: food.calories(),
            kind: if food.is_composite() {
                FoodKind::Composite
            } else {
                FoodKind::Basic
            },
            keywords: food.keywords().to_vec(),
            components: food
                .component_ids()
                .into_iter()
                .map(str::to_string)
                .collect(),
            unresolved: !food.is_resolved(),
        }
    }
}

impl FoodRow {
    /// Render this row as table lines (with a components line for composites).
    pub fn to_table_lines(&self) -> String {
        let mut out = format!(
            "{}\t{}\t\t{}{}\n",
            self.identifier,
            self.calories,
            self.kind.table_cell(),
            self.keywords.join(", ")
        );

        if self.kind == FoodKind::Composite {
            out.push_str("  Components: ");
            out.push_str(&self.components.join(", "));
            if self.unresolved {
                out.push_str(" (unresolved)");
            }
            out.push('\n');
        }
        out
    }
}

/// Render foods as a table with header and rule.
pub fn render_table<'a>(foods: impl IntoIterator<Item = &'a Food>) -> String {
    let mut out = format!("{}\n{}\n", TABLE_HEADER, TABLE_RULE);
    for food in foods {
        out.push_str(&FoodRow::from(food).to_table_lines());
    }
    out
}

/// Render foods as a JSON array of rows.
pub fn render_json<'a>(foods: impl IntoIterator<Item = &'a Food>) -> serde_json::Value {
    let rows: Vec<FoodRow> = foods.into_iter().map(FoodRow::from).collect();
    serde_json::to_value(rows).unwrap_or_default()
}

/// Pretty-print a JSON value, falling back to an empty string.
pub fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn basic_row_has_no_components_line() {
        let food = Food::new("Apple", kw(&["fruit", "red"]), 95);
        let table = FoodRow::from(&food).to_table_lines();

        assert_eq!(table, "Apple\t95\t\tBasic\t\tfruit, red\n");
    }

    #[test]
    fn composite_row_lists_components() {
        let combo = Food::composite(
            "Combo",
            vec![
                Food::new("Bun", kw(&["bread"]), 100),
                Food::new("Patty", kw(&["meat"]), 250),
            ],
        )
        .expect("compose");
        let table = FoodRow::from(&combo).to_table_lines();

        assert_eq!(
            table,
            "Combo\t350\t\tComposite\tbread, meat\n  Components: Bun, Patty\n"
        );
    }

    #[test]
    fn unresolved_composite_is_tagged() {
        let food = Food::from_line("Broken;;0;1;Ghost").expect("decode");
        let row = FoodRow::from(&food);

        assert_eq!(row.kind, FoodKind::Composite);
        assert_eq!(
            row.to_table_lines(),
            "Broken\t0\t\tComposite\t\n  Components: Ghost (unresolved)\n"
        );

        let value = render_json([&food]);
        assert_eq!(value[0]["kind"], "composite");
        assert_eq!(value[0]["unresolved"], true);
    }

    #[test]
    fn json_rows_skip_empty_fields() {
        let food = Food::new("Apple", kw(&["fruit"]), 95);
        let value = render_json([&food]);

        assert_eq!(value[0]["identifier"], "Apple");
        assert_eq!(value[0]["kind"], "basic");
        assert!(value[0].get("components").is_none());
        assert!(value[0].get("unresolved").is_none());
    }
}
