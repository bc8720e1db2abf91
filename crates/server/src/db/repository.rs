use std::marker::PhantomData;

use deadpool_postgres::Pool;
use hms_core::{Fetcher, ListQuery, Record, Schema};
use serde_json::Value as JsonValue;
use tokio_postgres::{Row, types::ToSql};

use crate::error::AppError;

/// Read access to one collection, typed by its record
pub struct CollectionRepository<T> {
    pool: Pool,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for CollectionRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<T> CollectionRepository<T> {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

impl<T: Record> CollectionRepository<T> {
    /// List rows in schema order, narrowed by the query's search term
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<T>, AppError> {
        let schema = T::SCHEMA;
        let client = self.pool.get().await?;

        let rows = match (schema.search_column, query.search()) {
            (Some(column), Some(term)) => {
                let pattern = format!("%{}%", escape_like(term));
                client
                    .query(&list_sql(&schema, Some(column)), &[&pattern])
                    .await?
            }
            (None, Some(term)) => {
                tracing::debug!(
                    collection = schema.collection,
                    term = term,
                    "Collection has no search column, ignoring filter"
                );
                client.query(&list_sql(&schema, None), &[]).await?
            }
            (_, None) => client.query(&list_sql(&schema, None), &[]).await?,
        };

        tracing::debug!(
            collection = schema.collection,
            rows = rows.len(),
            "Fetched collection"
        );

        rows.iter().map(decode_row::<T>).collect()
    }

    /// Get one row by identifier
    pub async fn get(&self, id: &T::Id) -> Result<Option<T>, AppError>
    where
        T::Id: ToSql,
    {
        let schema = T::SCHEMA;
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT row_to_json(t) FROM (SELECT {} FROM {} WHERE id = $1) t",
            schema.projection(),
            schema.collection
        );
        let row = client.query_opt(&sql, &[id]).await?;

        row.as_ref().map(decode_row::<T>).transpose()
    }
}

impl<T: Record> Fetcher<T> for CollectionRepository<T> {
    type Error = AppError;

    async fn fetch(&self, query: &ListQuery) -> Result<Vec<T>, AppError> {
        self.list(query).await
    }
}

/// Build the list statement; `$1` is the ILIKE pattern when searching
fn list_sql(schema: &Schema, search_column: Option<&str>) -> String {
    let filter = search_column
        .map(|column| format!(" WHERE {} ILIKE $1", column))
        .unwrap_or_default();
    let tie_break = if schema.order_by == "id" { "" } else { ", t.id" };

    format!(
        "SELECT row_to_json(t) FROM (SELECT {} FROM {}{}) t ORDER BY t.{} {}{}",
        schema.projection(),
        schema.collection,
        filter,
        schema.order_by,
        schema.direction(),
        tie_break
    )
}

/// Escape LIKE wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub(crate) fn decode_row<T: Record>(row: &Row) -> Result<T, AppError> {
    let value: JsonValue = row.try_get(0)?;
    Ok(serde_json::from_value(value)?)
}
