//! Result sets decoded without a compile-time schema.
//!
//! Listings are `SELECT *` and the summary procedure returns whatever the
//! database decides, so rows are decoded column by column from the type
//! information MySQL sends along with them.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::mysql::{MySql, MySqlRow};
use sqlx::{Column, Decode, Row, Type, TypeInfo, ValueRef};

use super::error::DbError;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    Bytes(Vec<u8>),
}

impl Cell {
    /// Integer view of a cell, used for scalar function results.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(value) => Some(*value),
            Cell::UInt(value) => i64::try_from(*value).ok(),
            Cell::Decimal(value) => value.trunc().to_i64(),
            Cell::Text(value) => value.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn decode(row: &MySqlRow, index: usize) -> Result<Self, DbError> {
        if row.try_get_raw(index)?.is_null() {
            return Ok(Cell::Null);
        }

        let type_name = row.column(index).type_info().name();
        let cell = match type_name {
            "YEAR" => Cell::UInt(u64::from(row.try_get_unchecked::<u16, _>(index)?)),
            name if name.ends_with("UNSIGNED") => Cell::UInt(row.try_get(index)?),
            "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
                Cell::Int(row.try_get(index)?)
            }
            "FLOAT" => Cell::Float(f64::from(row.try_get::<f32, _>(index)?)),
            "DOUBLE" => Cell::Float(row.try_get(index)?),
            "DECIMAL" => Cell::Decimal(row.try_get(index)?),
            "DATETIME" | "TIMESTAMP" => temporal(row, index, type_name, Cell::DateTime)?,
            "DATE" => temporal(row, index, type_name, Cell::Date)?,
            "TIME" => temporal(row, index, type_name, Cell::Time)?,
            "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" | "BIT"
            | "GEOMETRY" | "JSON" => bytes_cell(row.try_get_unchecked(index)?),
            other => match row.try_get::<String, _>(index) {
                Ok(text) => Cell::Text(text),
                Err(sqlx::Error::ColumnDecode { .. }) => {
                    let raw: Vec<u8> = row
                        .try_get_unchecked(index)
                        .map_err(|_| DbError::Unsupported(other.to_string()))?;
                    bytes_cell(raw)
                }
                Err(err) => return Err(err.into()),
            },
        };

        Ok(cell)
    }
}

/// Zero dates and times past 24 hours have no chrono value; they are shown
/// as text instead of failing the whole result set.
fn temporal<T>(
    row: &MySqlRow,
    index: usize,
    type_name: &str,
    wrap: fn(T) -> Cell,
) -> Result<Cell, DbError>
where
    T: for<'r> Decode<'r, MySql> + Type<MySql>,
{
    match row.try_get::<T, _>(index) {
        Ok(value) => Ok(wrap(value)),
        Err(sqlx::Error::ColumnDecode { .. }) => {
            let raw: Vec<u8> = row.try_get_unchecked(index)?;
            Ok(Cell::Text(temporal_text(type_name, &raw)))
        }
        Err(err) => Err(err.into()),
    }
}

/// Renders a temporal value from either wire format. Text-protocol values
/// are already printable; binary ones start with a length byte.
pub(crate) fn temporal_text(type_name: &str, raw: &[u8]) -> String {
    let printable = raw
        .iter()
        .all(|b| b.is_ascii_digit() || matches!(b, b'-' | b':' | b' ' | b'.'));
    if printable && !raw.is_empty() {
        return String::from_utf8_lossy(raw).into_owned();
    }

    let body = raw.get(1..).unwrap_or_default();
    let micros = |at: usize| {
        body.get(at..at + 4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .filter(|m| *m > 0)
            .map(|m| format!(".{m:06}"))
            .unwrap_or_default()
    };

    if type_name == "TIME" {
        if body.len() < 8 {
            return "00:00:00".to_string();
        }
        let sign = if body[0] == 1 { "-" } else { "" };
        let days = u32::from_le_bytes([body[1], body[2], body[3], body[4]]);
        let hours = u64::from(days) * 24 + u64::from(body[5]);
        return format!("{sign}{hours:02}:{:02}:{:02}{}", body[6], body[7], micros(8));
    }

    let (year, month, day) = match body {
        [lo, hi, month, day, ..] => (u16::from_le_bytes([*lo, *hi]), *month, *day),
        _ => (0, 0, 0),
    };
    let date = format!("{year:04}-{month:02}-{day:02}");
    if type_name == "DATE" {
        return date;
    }

    let (hour, minute, second) = match body {
        [_, _, _, _, hour, minute, second, ..] => (*hour, *minute, *second),
        _ => (0, 0, 0),
    };
    format!("{date} {hour:02}:{minute:02}:{second:02}{}", micros(7))
}

fn bytes_cell(raw: Vec<u8>) -> Cell {
    match String::from_utf8(raw) {
        Ok(text) => Cell::Text(text),
        Err(err) => Cell::Bytes(err.into_bytes()),
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Int(value) => write!(f, "{value}"),
            Cell::UInt(value) => write!(f, "{value}"),
            Cell::Float(value) => write!(f, "{value}"),
            Cell::Decimal(value) => write!(f, "{value}"),
            Cell::Text(value) => f.write_str(value),
            Cell::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
            Cell::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
            Cell::Time(value) => write!(f, "{}", value.format("%H:%M:%S")),
            Cell::Bytes(value) => {
                for byte in value {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// One result set: column names in server order plus rows of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(rows: &[MySqlRow]) -> Result<Self, DbError> {
        let Some(first) = rows.first() else {
            return Ok(Self::default());
        };

        let mut table = Self::new(first.columns().iter().map(|c| c.name().to_string()));
        for row in rows {
            let cells = (0..row.len())
                .map(|index| Cell::decode(row, index))
                .collect::<Result<Vec<_>, _>>()?;
            table.rows.push(cells);
        }

        Ok(table)
    }

    pub fn push_row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// First column of the first row, for `SELECT fn(...)` style queries.
    pub fn scalar(&self) -> Option<&Cell> {
        self.rows.first().and_then(|row| row.first())
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|cells| Record {
            columns: &self.columns,
            cells,
        })
    }
}

/// A row viewed as a mapping from column name to value.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    cells: &'a [Cell],
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Cell> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|index| self.cells.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Cell)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter())
    }
}
