//! # Record Line Format
//!
//! One food per line, semicolon-separated fields, comma-separated sub-lists:
//!
//! ```text
//! identifier;keyword1,keyword2,...;calories;isComposite;componentId1,componentId2,...
//! ```
//!
//! - `isComposite` is `1` or `0`.
//! - The component list is written only for composites.
//! - A line with fewer than three fields cannot be decoded.
//!
//! Decoding a composite line yields a *provisional* food: it is flagged
//! composite, has zero aggregates, and remembers its component identifiers
//! until the catalog resolves them.

use crate::primitives::{
    BASIC_FLAG, COMMENT_PREFIX, COMPOSITE_FLAG, FIELD_DELIMITER, LIST_DELIMITER, MIN_FIELDS,
};
use crate::{CompositionRef, Food, YadaError};

// =============================================================================
// ENCODING
// =============================================================================

/// Encode a food as one record line (no trailing newline).
#[must_use]
pub fn food_to_line(food: &Food) -> String {
    let mut line = String::with_capacity(64);
    line.push_str(food.identifier());
    line.push(FIELD_DELIMITER);
    push_list(&mut line, food.keywords().iter().map(String::as_str));
    line.push(FIELD_DELIMITER);
    line.push_str(&food.calories().to_string());
    line.push(FIELD_DELIMITER);

    if food.is_composite() {
        line.push_str(COMPOSITE_FLAG);
        line.push(FIELD_DELIMITER);
        push_list(&mut line, food.component_ids().into_iter());
    } else {
        line.push_str(BASIC_FLAG);
    }

    line
}

fn push_list<'a>(out: &mut String, items: impl Iterator<Item = &'a str>) {
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push(LIST_DELIMITER);
        }
        out.push_str(item);
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Check whether a raw line carries no record (blank or comment).
#[must_use]
pub fn is_ignorable_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX)
}

/// Decode one record line.
///
/// Never panics. A basic line yields a complete food; a composite line
/// yields a provisional composite holding only its component identifiers.
pub fn food_from_line(line: &str) -> Result<Food, YadaError> {
    let fields = split_fields(line);

    let [identifier, keywords, calories, rest @ ..] = fields.as_slice() else {
        return Err(YadaError::Parse(format!(
            "expected at least {} fields, found {}",
            MIN_FIELDS,
            fields.len()
        )));
    };

    if identifier.is_empty() {
        return Err(YadaError::Parse("empty identifier".to_string()));
    }

    let calories: u32 = calories.trim().parse().map_err(|_| {
        YadaError::Parse(format!(
            "invalid calorie value '{}' for '{}'",
            calories, identifier
        ))
    })?;

    if rest.first() == Some(&COMPOSITE_FLAG) {
        let component_ids = split_list(rest.get(1).copied().unwrap_or_default());
        return Ok(Food::provisional(*identifier, component_ids));
    }

    Ok(Food::new(*identifier, split_list(keywords), calories))
}

/// Extract the deferred composition reference from a record line.
///
/// Reads only the identifier, flag, and component fields, independently of
/// the rest of the record. Returns `None` for basic lines.
#[must_use]
pub fn composition_ref_from_line(line: &str) -> Option<CompositionRef> {
    let fields = split_fields(line);
    match fields.as_slice() {
        [identifier, _, _, flag, rest @ ..] if *flag == COMPOSITE_FLAG => {
            let component_ids = split_list(rest.first().copied().unwrap_or_default());
            Some(CompositionRef::new(*identifier, component_ids))
        }
        _ => None,
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.trim_end_matches(['\r', '\n'])
        .split(FIELD_DELIMITER)
        .collect()
}

/// Split a comma list, dropping empty entries.
fn split_list(field: &str) -> Vec<String> {
    field
        .split(LIST_DELIMITER)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
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

    #[test]
    fn basic_line_encoding() {
        let food = Food::new("Apple", kw(&["fruit", "red"]), 95);
        assert_eq!(food_to_line(&food), "Apple;fruit,red;95;0");
    }

    #[test]
    fn basic_line_without_keywords() {
        let food = Food::new("Water", Vec::new(), 0);
        let line = food_to_line(&food);
        assert_eq!(line, "Water;;0;0");
        assert_eq!(food_from_line(&line).expect("decode"), food);
    }

    #[test]
    fn composite_line_lists_component_ids() {
        let bun = Food::new("Bun", kw(&["bread"]), 100);
        let patty = Food::new("Patty", kw(&["meat"]), 250);
        let combo = Food::composite("Combo", vec![bun, patty]).expect("compose");

        assert_eq!(food_to_line(&combo), "Combo;bread,meat;350;1;Bun,Patty");
    }

    #[test]
    fn basic_line_roundtrip() {
        let food = Food::new("Oats", kw(&["grain", "breakfast"]), 150);
        let decoded = food_from_line(&food_to_line(&food)).expect("decode");
        assert_eq!(decoded, food);
    }

    #[test]
    fn composite_line_decodes_provisional() {
        let food = food_from_line("Combo;bread,meat;350;1;Bun,Patty").expect("decode");

        assert!(food.is_composite());
        assert!(!food.is_resolved());
        assert!(food.components().is_empty());
        assert_eq!(food.calories(), 0);
        assert!(food.keywords().is_empty());
        assert_eq!(food.component_ids(), vec!["Bun", "Patty"]);
    }

    #[test]
    fn provisional_composite_reencodes_its_component_ids() {
        let line = "Combo;;0;1;Bun,Patty";
        let food = food_from_line(line).expect("decode");
        assert_eq!(food_to_line(&food), line);
    }

    #[test]
    fn too_few_fields_is_parse_error() {
        assert!(matches!(
            food_from_line("Apple;fruit"),
            Err(YadaError::Parse(_))
        ));
        assert!(matches!(food_from_line(""), Err(YadaError::Parse(_))));
    }

    #[test]
    fn bad_calories_is_parse_error() {
        assert!(matches!(
            food_from_line("Apple;fruit;lots;0"),
            Err(YadaError::Parse(_))
        ));
        assert!(matches!(
            food_from_line("Apple;fruit;-5;0"),
            Err(YadaError::Parse(_))
        ));
    }

    #[test]
    fn empty_identifier_is_parse_error() {
        assert!(matches!(
            food_from_line(";fruit;5;0"),
            Err(YadaError::Parse(_))
        ));
    }

    #[test]
    fn three_field_line_is_basic() {
        let food = food_from_line("Apple;fruit;95").expect("decode");
        assert!(!food.is_composite());
        assert_eq!(food.calories(), 95);
    }

    #[test]
    fn carriage_return_and_empty_entries_are_tolerated() {
        let food = food_from_line("Apple;fruit,,red,;95;0\r").expect("decode");
        assert_eq!(food.keywords(), kw(&["fruit", "red"]).as_slice());
    }

    #[test]
    fn composition_ref_only_for_composite_lines() {
        assert_eq!(composition_ref_from_line("Apple;fruit;95;0"), None);
        assert_eq!(composition_ref_from_line("Apple;fruit;95"), None);

        let reference =
            composition_ref_from_line("Combo;x;0;1;Bun,Patty").expect("composite reference");
        assert_eq!(reference.identifier, "Combo");
        assert_eq!(reference.component_ids, kw(&["Bun", "Patty"]));
    }

    #[test]
    fn flagged_line_without_component_field_has_empty_reference() {
        let reference = composition_ref_from_line("Box;;0;1").expect("composite reference");
        assert!(reference.component_ids.is_empty());
    }

    #[test]
    fn ignorable_lines() {
        assert!(is_ignorable_line(""));
        assert!(is_ignorable_line("   "));
        assert!(is_ignorable_line("# comment"));
        assert!(is_ignorable_line("  # indented comment"));
        assert!(!is_ignorable_line("Apple;fruit;95;0"));
    }
}
