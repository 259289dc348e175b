pub const LINE_COMMENT: &str = "--";

/// Drops the comment lines at the top of `sql`.
///
/// Blank lines inside that leading block go with it. Stripping stops at the
/// first line holding anything else; from there on every line, including
/// later comment lines, is kept and rejoined with `\n`.
pub fn strip_leading_comments(sql: &str) -> String {
    sql.split('\n')
        .skip_while(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with(LINE_COMMENT)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
