// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
//! Tab-delimited note annotations.
//!
//! One header row, then one row per note. Only the `OnsetTime`, `OffsetTime`
//! and `MidiPitch` columns are read; the rest are ignored. Fields may be
//! wrapped in double quotes, with `""` standing for a literal quote.
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::DataSourceError;

const ONSET_COLUMN: &str = "OnsetTime";
const OFFSET_COLUMN: &str = "OffsetTime";
const PITCH_COLUMN: &str = "MidiPitch";

/// One annotated note, in seconds and MIDI pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedNote {
    pub onset_time: f64,
    pub offset_time: f64,
    pub midi_pitch: i32,
}

/// Error types for annotation parsing. Line numbers are 1-based.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AnnotationError {
    #[error("missing header row")]
    MissingHeader,

    #[error("missing column {0}")]
    MissingColumn(&'static str),

    #[error("line {line}: expected at least {expected} fields, found {found}")]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: {column} must be a finite, non-negative number of seconds, got '{value}'")]
    InvalidTime {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: quoted field is never closed")]
    UnterminatedQuote { line: usize },
}

/// A row of fields and the line it starts on.
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Reads the annotations in the given file.
pub fn read_annotations(path: &Path) -> Result<Vec<AnnotatedNote>, DataSourceError> {
    let contents = fs::read_to_string(path).map_err(|e| DataSourceError::io(path, e))?;
    parse_annotations(&contents).map_err(|source| DataSourceError::Annotation {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses tab-delimited annotations.
pub fn parse_annotations(contents: &str) -> Result<Vec<AnnotatedNote>, AnnotationError> {
    let mut records = split_records(contents)?.into_iter();

    let header = records.next().ok_or(AnnotationError::MissingHeader)?.fields;
    let column = |name: &'static str| {
        header
            .iter()
            .position(|field| field == name)
            .ok_or(AnnotationError::MissingColumn(name))
    };
    let onset_column = column(ONSET_COLUMN)?;
    let offset_column = column(OFFSET_COLUMN)?;
    let pitch_column = column(PITCH_COLUMN)?;
    let expected = onset_column.max(offset_column).max(pitch_column) + 1;

    records
        .map(|Record { line, fields }| {
            if fields.len() < expected {
                return Err(AnnotationError::ShortRow {
                    line,
                    expected,
                    found: fields.len(),
                });
            }
            Ok(AnnotatedNote {
                onset_time: parse_time(&fields[onset_column], ONSET_COLUMN, line)?,
                offset_time: parse_time(&fields[offset_column], OFFSET_COLUMN, line)?,
                midi_pitch: parse_field(&fields[pitch_column], PITCH_COLUMN, line)?,
            })
        })
        .collect()
}

/// Splits the contents into rows of fields, skipping blank rows.
///
/// A field that opens with a double quote runs to the matching closing quote
/// and may contain tabs and line breaks; `""` inside it is a literal quote.
fn split_records(contents: &str) -> Result<Vec<Record>, AnnotationError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = contents.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => quoted = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                quoted = true;
            }
            '\t' => fields.push(take_field(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(take_field(&mut field));
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if quoted {
        return Err(AnnotationError::UnterminatedQuote { line: record_line });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(take_field(&mut field));
        push_record(&mut records, record_line, fields);
    }
    Ok(records)
}

fn take_field(field: &mut String) -> String {
    let taken = field.trim().to_string();
    field.clear();
    taken
}

fn push_record(records: &mut Vec<Record>, line: usize, fields: Vec<String>) {
    if fields.iter().any(|field| !field.is_empty()) {
        records.push(Record { line, fields });
    }
}

fn parse_field<T: FromStr>(
    field: &str,
    column: &'static str,
    line: usize,
) -> Result<T, AnnotationError> {
    field.parse().map_err(|_| AnnotationError::InvalidNumber {
        line,
        column,
        value: field.to_string(),
    })
}

/// Parses a time in seconds. `NaN`, infinities and negative times are
/// rejected here rather than leaking into sample positions.
fn parse_time(field: &str, column: &'static str, line: usize) -> Result<f64, AnnotationError> {
    let seconds: f64 = parse_field(field, column, line)?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(AnnotationError::InvalidTime {
            line,
            column,
            value: field.to_string(),
        });
    }
    Ok(seconds)
}
