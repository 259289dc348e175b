use std::iter::Peekable;
use std::str::CharIndices;

/// Splits `sql` into statements on top-level semicolons.
///
/// Semicolons inside single or double quotes, or inside parentheses, do not
/// end a statement. Each item is a trimmed slice of `sql` that keeps its
/// terminating `;` and any comment lines that precede it. Text after the last
/// terminator is yielded as a final statement when it is not blank.
///
/// The scan is lazy; calling this again starts over from the beginning.
pub fn split_sql_statements(sql: &str) -> Statements<'_> {
    Statements {
        sql,
        chars: sql.char_indices().peekable(),
        start: 0,
        quote: None,
        paren_depth: 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Single,
    Double,
}

impl Quote {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            _ => None,
        }
    }

    const fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

#[derive(Debug, Clone)]
pub struct Statements<'a> {
    sql: &'a str,
    chars: Peekable<CharIndices<'a>>,
    // Byte offset where the statement being built begins.
    start: usize,
    quote: Option<Quote>,
    paren_depth: usize,
}

impl<'a> Statements<'a> {
    fn take_until(&mut self, end: usize) -> &'a str {
        let sql = self.sql;
        let stmt = sql[self.start..end].trim();
        self.start = end;
        stmt
    }
}

impl<'a> Iterator for Statements<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, ch)) = self.chars.next() {
            match self.quote {
                None => {
                    if let Some(quote) = Quote::from_char(ch) {
                        self.quote = Some(quote);
                    } else if ch == '(' {
                        self.paren_depth += 1;
                    } else if ch == ')' {
                        self.paren_depth = self.paren_depth.saturating_sub(1);
                    } else if ch == ';' && self.paren_depth == 0 {
                        return Some(self.take_until(idx + ch.len_utf8()));
                    }
                }
                Some(Quote::Single) if ch == '\'' => {
                    // '' inside a single-quoted string is a literal quote.
                    if self.chars.next_if(|&(_, next)| next == '\'').is_none() {
                        self.quote = None;
                    }
                }
                Some(quote) if ch == quote.as_char() => {
                    self.quote = None;
                }
                Some(_) => {}
            }
        }

        if self.start < self.sql.len() {
            let tail = self.take_until(self.sql.len());
            if !tail.is_empty() {
                return Some(tail);
            }
        }

        None
    }
}
