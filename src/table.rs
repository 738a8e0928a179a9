//! Tabular codec: ordered string records and a quote/CRLF tolerant CSV
//! parser and writer. Columns are dynamic — whatever the input header
//! declares is what a record carries, in that order.

use std::io::{self, Write};
use std::mem::take;
use std::path::Path;

/// One row as an ordered column -> value mapping.
///
/// Insertion order is the column order; there is no keying or
/// deduplication across records, identity is positional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    columns: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a column, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite an existing column in place, or append a new one.
    pub fn set(&mut self, name: &str, value: String) {
        match self.columns.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.columns.push((name.to_string(), value)),
        }
    }

    /// Append a column only when no column of that name exists yet.
    /// This is the merge rule for extracted fields: an original input
    /// column is never shadowed, but new columns always appear.
    pub fn merge_absent(&mut self, name: &str, value: String) {
        if self.get(name).is_none() {
            self.columns.push((name.to_string(), value));
        }
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Record {
            columns: iter.into_iter().collect(),
        }
    }
}

/// A decoded input table: the header row plus one `Record` per data row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("input table has no header row")]
    MissingHeader,

    #[error("failed to read input table: {0}")]
    Io(#[from] io::Error),
}

/// Field separator. The original data set is plain comma-separated.
pub const SEPARATOR: char = ',';

/// Split CSV text into raw rows of cells.
///
/// Handles quoted fields, doubled-quote escapes and CRLF line endings;
/// blank lines are dropped. An unterminated quote at EOF still yields
/// the trailing field rather than an error.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if matches!(chars.peek(), Some('"')) => {
                    chars.next();
                    cell.push('"');
                }
                '"' => in_quotes = false,
                _ => cell.push(ch),
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            c if c == sep => row.push(take(&mut cell)),
            '\r' | '\n' => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut cell));
                // A lone empty cell means the line was blank.
                if row.len() > 1 || !row[0].is_empty() {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => cell.push(ch),
        }
    }

    // Flush the trailing row when the file lacks a final newline.
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}

/// Decode CSV text into a `Table`. The first row is the header; each
/// data row is zipped against it (short rows pad with empty values,
/// cells past the header are dropped).
pub fn decode(text: &str) -> Result<Table, TableError> {
    let mut raw = parse_rows(text, SEPARATOR);
    if raw.is_empty() {
        return Err(TableError::MissingHeader);
    }
    let headers = raw.remove(0);

    let rows = raw
        .into_iter()
        .map(|cells| {
            let mut cells = cells.into_iter();
            headers
                .iter()
                .map(|h| (h.clone(), cells.next().unwrap_or_default()))
                .collect::<Record>()
        })
        .collect();

    Ok(Table { headers, rows })
}

/// Read and decode a table from disk. Fatal on unreadable input or a
/// missing header, before any fetch happens.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table, TableError> {
    let text = std::fs::read_to_string(path)?;
    decode(&text)
}

fn needs_quotes(cell: &str, sep: char) -> bool {
    cell.contains(sep) || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}

/// Write one CSV row, quoting only the cells that need it.
pub fn write_row<W: Write>(mut w: W, cells: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}
