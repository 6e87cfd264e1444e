//! Row decoding helpers shared by the repositories

use std::str::FromStr;

use skoo_domain::{Result, SkooError};
use tokio_postgres::types::FromSql;
use tokio_postgres::Row;

use crate::errors::db_error;

/// Typed column read, mapping driver errors to `SkooError::Database`.
pub(crate) fn column<'a, T>(row: &'a Row, name: &str) -> Result<T>
where
    T: FromSql<'a>,
{
    row.try_get(name).map_err(db_error)
}

/// Text column holding an enum value (`status`, `priority`, ...).
pub(crate) fn enum_column<T>(row: &Row, name: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = column(row, name)?;
    parse_enum(&raw)
}

pub(crate) fn parse_enum<T>(raw: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    raw.parse().map_err(SkooError::Database)
}
