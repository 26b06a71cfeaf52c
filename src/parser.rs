//! Record-layout parser for LVIS Level-2 ASCII granules.
//!
//! Decomposes whitespace-delimited record lines into typed numeric columns
//! according to a versioned [`ColumnSchema`]. The parse is a pure, batch
//! transformation: it performs no I/O, holds no global state, and either
//! converts every supplied line or fails with the offending line index.
//! Header and comment lines must be removed by the caller beforehand;
//! [`data_lines`] implements the product's `#`-prefix convention.

use polars::prelude::{Column, DataFrame};

use crate::constants::is_comment_line;
use crate::error::{LvisError, Result};
use crate::models::{ColumnType, FieldDef, LdsVersion};
use crate::schema::ColumnSchema;

/// Typed value storage for one parsed column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Integer(Vec<i64>),
    Float(Vec<f64>),
}

impl ColumnData {
    fn empty(dtype: ColumnType) -> Self {
        match dtype {
            ColumnType::Integer => ColumnData::Integer(Vec::new()),
            ColumnType::Float => ColumnData::Float(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Integer(values) => values.len(),
            ColumnData::Float(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The values as integers, if this is an integer column
    pub fn as_integers(&self) -> Option<&[i64]> {
        match self {
            ColumnData::Integer(values) => Some(values),
            ColumnData::Float(_) => None,
        }
    }

    /// The values as floats, if this is a float column
    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Float(values) => Some(values),
            ColumnData::Integer(_) => None,
        }
    }

    /// Format the value at a row index the way it would appear in a record
    pub fn format_value(&self, row: usize) -> String {
        match self {
            ColumnData::Integer(values) => values[row].to_string(),
            ColumnData::Float(values) => values[row].to_string(),
        }
    }
}

/// Parsed granule contents: one equal-length typed column per schema field
#[derive(Debug, Clone)]
pub struct RecordColumns {
    version: LdsVersion,
    fields: Vec<(FieldDef, ColumnData)>,
    records: usize,
}

impl RecordColumns {
    /// The data structure version the columns were parsed under
    pub fn version(&self) -> LdsVersion {
        self.version
    }

    /// Number of records parsed
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Field names in schema order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(f, _)| f.name.as_str()).collect()
    }

    /// Look up a column by field name
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.fields
            .iter()
            .find(|(f, _)| f.name == name)
            .map(|(_, data)| data)
    }

    /// Look up a float column's values by field name
    pub fn float_values(&self, name: &str) -> Option<&[f64]> {
        self.column(name).and_then(ColumnData::as_floats)
    }

    /// Convert the columns into a polars DataFrame in schema order
    pub fn into_dataframe(self) -> Result<DataFrame> {
        let columns: Vec<Column> = self
            .fields
            .into_iter()
            .map(|(field, data)| match data {
                ColumnData::Integer(values) => Column::new(field.name.as_str().into(), values),
                ColumnData::Float(values) => Column::new(field.name.as_str().into(), values),
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }
}

/// Parse record lines into typed columns under the given layout.
///
/// Every line must tokenize into exactly `schema.width()` whitespace-
/// delimited tokens, and every token must convert to its column's declared
/// numeric type. Any violation aborts the whole parse: no partial dataset
/// is returned and no row is silently skipped. An empty line sequence
/// yields zero-length columns for every schema field.
pub fn parse_records<I, S>(lines: I, schema: &ColumnSchema) -> Result<RecordColumns>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let width = schema.width();
    let mut fields: Vec<(FieldDef, ColumnData)> = schema
        .fields()
        .iter()
        .map(|f| (f.clone(), ColumnData::empty(f.dtype)))
        .collect();

    let mut records = 0usize;

    for (line_index, line) in lines.into_iter().enumerate() {
        let tokens: Vec<&str> = line.as_ref().split_whitespace().collect();

        if tokens.len() != width {
            return Err(LvisError::MalformedRecord {
                line_index,
                expected: width,
                found: tokens.len(),
                version: schema.version(),
            });
        }

        for (field, data) in fields.iter_mut() {
            let token = tokens[field.position];
            match data {
                ColumnData::Integer(values) => {
                    let value =
                        token
                            .parse::<i64>()
                            .map_err(|_| conversion_error(line_index, field, token))?;
                    values.push(value);
                }
                ColumnData::Float(values) => {
                    let value =
                        token
                            .parse::<f64>()
                            .map_err(|_| conversion_error(line_index, field, token))?;
                    values.push(value);
                }
            }
        }

        records += 1;
    }

    Ok(RecordColumns {
        version: schema.version(),
        fields,
        records,
    })
}

fn conversion_error(line_index: usize, field: &FieldDef, token: &str) -> LvisError {
    LvisError::Conversion {
        line_index,
        field: field.name.clone(),
        token: token.to_string(),
        expected_type: field.dtype.type_name(),
    }
}

/// Filter granule file content down to its data lines.
///
/// Strips `#`-prefixed comment/header lines and blank lines; everything
/// else is handed to [`parse_records`] unchanged.
pub fn data_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty() && !is_comment_line(line))
}
