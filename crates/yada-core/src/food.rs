//! # Food Records
//!
//! A `Food` is one catalog entry, either basic or composite.
//!
//! - Basic foods carry authoritative calories and keywords.
//! - Composite foods derive both from their components: calories are the
//!   (saturating) sum, keywords the first-seen union of every component's
//!   keywords.
//!
//! Components are held by value. A composite keeps the state its components
//! had when it was built; later edits to the originals do not reach it.

use crate::formats;
use crate::primitives::{COMMENT_PREFIX, FIELD_DELIMITER, LIST_DELIMITER};
use crate::YadaError;

/// One food record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Food {
    identifier: String,
    keywords: Vec<String>,
    calories: u32,
    composite: bool,
    /// Resolved component copies, in composition order.
    components: Vec<Food>,
    /// Component identifiers of a provisional composite awaiting resolution.
    pending: Vec<String>,
}

impl Food {
    /// Create a basic food.
    #[must_use]
    pub fn new(identifier: impl Into<String>, keywords: Vec<String>, calories: u32) -> Self {
        Self {
            identifier: identifier.into(),
            keywords,
            calories,
            ..Self::default()
        }
    }

    /// Create a composite food from its components.
    ///
    /// Built by appending each component in turn, so the result is identical
    /// to the incremental path through [`Food::append_component`].
    pub fn composite(
        identifier: impl Into<String>,
        components: Vec<Food>,
    ) -> Result<Self, YadaError> {
        let identifier = identifier.into();
        if components.is_empty() {
            return Err(YadaError::EmptyComposition(identifier));
        }

        let mut food = Self {
            identifier,
            composite: true,
            ..Self::default()
        };
        for component in components {
            food.append_component(component);
        }
        Ok(food)
    }

    /// Create a composite whose components are only known by identifier.
    ///
    /// Aggregates stay zero until the composite is rebuilt from resolved
    /// components.
    pub(crate) fn provisional(identifier: impl Into<String>, component_ids: Vec<String>) -> Self {
        Self {
            identifier: identifier.into(),
            composite: true,
            pending: component_ids,
            ..Self::default()
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// The unique identifier (name) of this food.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Keywords in order.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Calories per serving.
    #[must_use]
    pub fn calories(&self) -> u32 {
        self.calories
    }

    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.composite
    }

    /// Resolved component copies. Empty for basic and provisional foods.
    #[must_use]
    pub fn components(&self) -> &[Food] {
        &self.components
    }

    /// Identifiers of this food's components.
    ///
    /// For a provisional composite these are the identifiers still waiting
    /// for resolution.
    #[must_use]
    pub fn component_ids(&self) -> Vec<&str> {
        if self.components.is_empty() {
            self.pending.iter().map(String::as_str).collect()
        } else {
            self.components.iter().map(Food::identifier).collect()
        }
    }

    /// A basic food is always resolved; a composite is resolved once it
    /// holds its components.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.composite || !self.components.is_empty()
    }

    // =========================================================================
    // COMPOSITION
    // =========================================================================

    /// Append a component and fold it into the aggregates.
    ///
    /// The first component turns the food into a composite and drops any
    /// calories or keywords it carried as a basic food. New keywords keep
    /// their first-seen position.
    pub fn append_component(&mut self, component: Food) {
        if self.components.is_empty() {
            self.calories = 0;
            self.keywords.clear();
            self.pending.clear();
        }
        self.composite = true;

        self.calories = self.calories.saturating_add(component.calories);
        merge_keywords(&mut self.keywords, &component.keywords);
        self.components.push(component);
    }

    // =========================================================================
    // BASIC CONTENT SETTERS
    // =========================================================================

    /// Add a keyword. Returns `false` if it was already present.
    pub fn add_keyword(&mut self, keyword: impl Into<String>) -> Result<bool, YadaError> {
        self.ensure_basic()?;
        let keyword = keyword.into();
        if self.matches_keyword(&keyword) {
            return Ok(false);
        }
        self.keywords.push(keyword);
        Ok(true)
    }

    /// Replace all keywords.
    pub fn set_keywords(&mut self, keywords: Vec<String>) -> Result<(), YadaError> {
        self.ensure_basic()?;
        self.keywords = keywords;
        Ok(())
    }

    /// Replace the calorie value.
    pub fn set_calories(&mut self, calories: u32) -> Result<(), YadaError> {
        self.ensure_basic()?;
        self.calories = calories;
        Ok(())
    }

    fn ensure_basic(&self) -> Result<(), YadaError> {
        if self.composite {
            return Err(YadaError::DerivedValue(self.identifier.clone()));
        }
        Ok(())
    }

    // =========================================================================
    // KEYWORD MATCHING
    // =========================================================================

    /// Exact membership test.
    #[must_use]
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    /// True if every keyword is present. Vacuously true for an empty query.
    #[must_use]
    pub fn matches_all_keywords<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        keywords.iter().all(|k| self.matches_keyword(k.as_ref()))
    }

    /// True if at least one keyword is present, or the query is empty.
    #[must_use]
    pub fn matches_any_keyword<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        keywords.is_empty() || keywords.iter().any(|k| self.matches_keyword(k.as_ref()))
    }

    // =========================================================================
    // LINE FORMAT
    // =========================================================================

    /// Encode as one record line.
    #[must_use]
    pub fn to_line(&self) -> String {
        formats::food_to_line(self)
    }

    /// Decode one record line into a (possibly provisional) food.
    pub fn from_line(line: &str) -> Result<Self, YadaError> {
        formats::food_from_line(line)
    }

    /// Check that this food can be written to and read back from a record
    /// line unchanged.
    pub fn validate(&self) -> Result<(), YadaError> {
        let id = self.identifier.as_str();
        if id.is_empty() {
            return Err(YadaError::InvalidRecord(
                "identifier must not be empty".to_string(),
            ));
        }
        if id.trim() != id || id.starts_with(COMMENT_PREFIX) {
            return Err(YadaError::InvalidRecord(format!(
                "identifier '{}' has surrounding whitespace or starts with '{}'",
                id, COMMENT_PREFIX
            )));
        }
        if has_reserved_char(id) {
            return Err(YadaError::InvalidRecord(format!(
                "identifier '{}' contains '{}', '{}' or a line break",
                id, FIELD_DELIMITER, LIST_DELIMITER
            )));
        }
        if let Some(bad) = self
            .keywords
            .iter()
            .find(|k| k.is_empty() || has_reserved_char(k))
        {
            return Err(YadaError::InvalidRecord(format!(
                "keyword '{}' of '{}' is empty or contains a delimiter",
                bad, id
            )));
        }
        Ok(())
    }
}

/// Append the keywords of `incoming` that `keywords` does not yet contain.
fn merge_keywords(keywords: &mut Vec<String>, incoming: &[String]) {
    for keyword in incoming {
        if !keywords.contains(keyword) {
            keywords.push(keyword.clone());
        }
    }
}

fn has_reserved_char(s: &str) -> bool {
    s.contains([FIELD_DELIMITER, LIST_DELIMITER, '\n', '\r'])
}

// =============================================================================
// TESTS
// =============================================================================
