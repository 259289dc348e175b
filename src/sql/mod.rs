//! Statement splitting and the per-statement cleanup applied before a
//! statement is sent to the backend.

pub mod comments;
pub mod normalize;
pub mod splitter;

pub use comments::{strip_leading_comments, LINE_COMMENT};
pub use normalize::normalize_whitespace;
pub use splitter::{split_sql_statements, Statements};

/// Turns one split statement into the text submitted to the backend.
///
/// Returns `None` when nothing but whitespace and leading comments remain.
pub fn prepare_statement(stmt: &str) -> Option<String> {
    let stripped = strip_leading_comments(stmt.trim());
    let stmt = stripped.trim();
    if stmt.is_empty() {
        return None;
    }
    Some(normalize_whitespace(stmt))
}
