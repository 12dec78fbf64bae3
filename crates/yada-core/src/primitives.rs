//! # Format Primitives
//!
//! Fixed constants of the YADA record file format.
//!
//! One record per line:
//!
//! ```text
//! identifier;keyword1,keyword2,...;calories;isComposite;componentId1,componentId2,...
//! ```

/// Separates the top-level fields of a record line.
pub const FIELD_DELIMITER: char = ';';

/// Separates entries of the keyword and component sub-lists.
pub const LIST_DELIMITER: char = ',';

/// Lines whose first non-whitespace character is this are comments.
pub const COMMENT_PREFIX: char = '#';

/// Composite flag token for composite records.
pub const COMPOSITE_FLAG: &str = "1";

/// Composite flag token for basic records.
pub const BASIC_FLAG: &str = "0";

/// A line with fewer fields than this cannot be decoded.
pub const MIN_FIELDS: usize = 3;

/// Header comment written as the first line of every saved catalog.
pub const HEADER_LINE: &str = "# Food Database Format: identifier;keyword1,keyword2,...;calories;isComposite;componentId1,componentId2,...";

/// Default catalog file name.
pub const DEFAULT_DATABASE_FILE: &str = "foods.txt";

/// Maximum size of a catalog file the file store will read (16 MiB).
///
/// Larger files are refused before reading to avoid exhausting memory.
pub const MAX_STORE_FILE_SIZE: u64 = 16 * 1024 * 1024;
