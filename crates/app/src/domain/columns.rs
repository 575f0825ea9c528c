//! Column conversion helpers shared by the repositories.

use sqlx::{Row, postgres::PgRow};

/// Read a non-negative `BIGINT` money column as minor units.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Convert minor units into the `BIGINT` bound for `col`.
pub(crate) fn amount_param(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(format!("{col}: {e}").into()))
}

/// Read an `INTEGER`/`SMALLINT` column that must fit the target unsigned type.
pub(crate) fn try_get_unsigned<T, S>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    S: for<'r> sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    T: TryFrom<S>,
    <T as TryFrom<S>>::Error: std::error::Error + Send + Sync + 'static,
{
    let value: S = row.try_get(col)?;

    T::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
