//! Parser for catalog CSV files.
//!
//! The catalog is a header-driven CSV:
//! `id,title,author,publisher,year,language,age_restriction,genre,pages,has_illustrations`
//!
//! - `id` is optional; when missing, books are numbered from 1 in file order
//! - Column order is taken from the header, not assumed
//! - Fields may be double-quoted, with `""` as an escaped quote; quoted
//!   fields may span lines

use crate::error::{DataLoadError, Result};
use crate::types::*;
use csv::{Position, ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Columns every catalog file must provide
const REQUIRED_COLUMNS: [&str; 9] = [
    "title",
    "author",
    "publisher",
    "year",
    "language",
    "age_restriction",
    "genre",
    "pages",
    "has_illustrations",
];

/// Parse a catalog CSV file into books, in file order
pub fn parse_books(path: &Path) -> Result<Vec<Book>> {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let reader = builder()
        .from_path(path)
        .map_err(|e| csv_error(&file, e))?;
    read_books(reader, &file)
}

/// Parse catalog CSV content. `file` is only used for error messages.
pub fn parse_books_str(content: &str, file: &str) -> Result<Vec<Book>> {
    read_books(builder().from_reader(content.as_bytes()), file)
}

fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    // Row lengths are checked against the header below
    builder.has_headers(true).flexible(true).trim(Trim::All);
    builder
}

fn read_books<R: Read>(mut reader: csv::Reader<R>, file: &str) -> Result<Vec<Book>> {
    let headers = reader.headers().map_err(|e| csv_error(file, e))?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            line: 1,
            reason: "Missing header".to_string(),
        });
    }

    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim_start_matches('\u{feff}').to_lowercase(), idx))
        .collect();

    for column in REQUIRED_COLUMNS {
        if !columns.contains_key(column) {
            return Err(DataLoadError::MissingColumn(column.to_string()));
        }
    }

    let mut books = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(file, e))?;
        let line = line_of(record.position());
        if record.len() != headers.len() {
            return Err(DataLoadError::FieldCountMismatch {
                expected: headers.len(),
                found: record.len(),
                line,
            });
        }

        let row = Row {
            file,
            line,
            record: &record,
            columns: &columns,
        };

        let id = match columns.get("id") {
            Some(_) => row.number("id")?,
            None => books.len() as BookId + 1,
        };

        books.push(Book {
            id,
            title: row.text("title")?,
            author: row.text("author")?,
            publisher: row.text("publisher")?,
            language: row.text("language")?,
            genre: row.text("genre")?,
            year: row.number("year")?,
            pages: row.number("pages")?,
            age_restriction: row.number("age_restriction")?,
            has_illustrations: row.flag("has_illustrations")?,
        });
    }

    Ok(books)
}

fn line_of(position: Option<&Position>) -> usize {
    position.map_or(0, |p| p.line() as usize)
}

fn csv_error(file: &str, err: csv::Error) -> DataLoadError {
    let line = line_of(err.position());
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => DataLoadError::IoError(e),
        _ => DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason,
        },
    }
}

/// One data line, with access to fields by column name
struct Row<'a> {
    file: &'a str,
    line: usize,
    record: &'a StringRecord,
    columns: &'a HashMap<String, usize>,
}

impl Row<'_> {
    fn field(&self, column: &str) -> Result<&str> {
        self.columns
            .get(column)
            .and_then(|&idx| self.record.get(idx))
            .map(|s| s.trim())
            .ok_or_else(|| DataLoadError::ParseError {
                file: self.file.to_string(),
                line: self.line,
                reason: format!("Missing {}", column),
            })
    }

    fn text(&self, column: &str) -> Result<String> {
        self.field(column).map(str::to_string)
    }

    fn flag(&self, column: &str) -> Result<bool> {
        let raw = self.field(column)?;
        parse_flag(raw).ok_or_else(|| DataLoadError::ParseError {
            file: self.file.to_string(),
            line: self.line,
            reason: format!("Invalid {}: {}", column, raw),
        })
    }

    fn number<T>(&self, column: &str) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.field(column)?;
        // Spreadsheet exports write integers as "1999.0"
        let raw = raw.strip_suffix(".0").unwrap_or(raw);
        raw.parse().map_err(|e| DataLoadError::ParseError {
            file: self.file.to_string(),
            line: self.line,
            reason: format!("Invalid {}: {}", column, e),
        })
    }
}

/// Parse an illustrations flag.
///
/// Accepts numeric, English and Russian spellings used by catalog exports.
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "есть" | "да" => Some(true),
        "0" | "false" | "no" | "нет" | "нету" => Some(false),
        _ => None,
    }
}
