/// Flattens a statement onto one line.
///
/// Carriage returns and newlines become spaces, then runs of spaces collapse
/// to a single space. Tabs are left alone.
pub fn normalize_whitespace(sql: &str) -> String {
    let flattened = sql.replace(['\n', '\r'], " ");
    let mut out = String::with_capacity(flattened.len());
    let mut prev_space = false;

    for ch in flattened.chars() {
        if ch == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(ch);
    }

    out
}
