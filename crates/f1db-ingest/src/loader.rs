//! Dependency-ordered loader and reset stage
//!
//! Runs the whole refresh inside one transaction: truncate every target
//! table with identity restart, then load each table in derived dependency
//! order (read -> project -> chunked bulk insert). Any failure rolls the
//! transaction back, leaving the database exactly as it was before the run.
//!
//! Precondition: one run at a time. A second run racing the reset stage is
//! not guarded against.

use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::info;

use crate::coerce::{FieldType, Value};
use crate::config::IngestConfig;
use crate::error::{IngestError, Result};
use crate::project::{self, ProjectedTable};
use crate::reader;
use crate::schema::{self, TableSpec};

/// Rows per multi-row INSERT statement.
///
/// PostgreSQL caps a statement at 65535 bind parameters; the widest target
/// table has 10 columns, so 1000 rows stays well clear of the limit for
/// every table.
pub const INSERT_CHUNK_ROWS: usize = 1000;

/// Per-table load result
#[derive(Debug, Clone)]
pub struct TableReport {
    pub table: &'static str,
    pub rows: u64,
}

/// Full-run load result, in load order
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub tables: Vec<TableReport>,
}

/// Run the full reset + reload batch.
///
/// Commits only if every stage succeeds; the previous state survives any
/// failure untouched, because nothing is committed until the end.
pub async fn run(pool: &PgPool, config: &IngestConfig) -> Result<IngestReport> {
    let order = schema::load_order(schema::TABLES)?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| IngestError::database("begin", e))?;

    reset(&mut tx, &order).await?;
    info!("tables cleared, identity counters reset");

    let mut report = IngestReport::default();
    for &spec in &order {
        let rows = load_table(&mut tx, spec, config).await?;
        info!(table = spec.name, rows, "table loaded");
        report.tables.push(TableReport {
            table: spec.name,
            rows,
        });
    }

    tx.commit()
        .await
        .map_err(|e| IngestError::database("commit", e))?;

    Ok(report)
}

/// Empty all target tables and restart their identity sequences.
///
/// Truncation cascades through dependents, so partial data from a prior run
/// cannot linger. Safe on an empty database. Schema itself is untouched.
async fn reset(tx: &mut Transaction<'_, Postgres>, order: &[&'static TableSpec]) -> Result<()> {
    sqlx::query(&reset_statement(order))
        .execute(&mut **tx)
        .await
        .map_err(|e| IngestError::database("reset", e))?;
    Ok(())
}

/// Build the TRUNCATE statement covering every target table.
///
/// Tables are listed children first (reverse load order) for readability;
/// CASCADE makes the order immaterial to correctness.
fn reset_statement(order: &[&TableSpec]) -> String {
    let names: Vec<&str> = order.iter().rev().map(|t| t.name).collect();
    format!(
        "TRUNCATE TABLE {} RESTART IDENTITY CASCADE",
        names.join(", ")
    )
}

/// Load one table: read its source file, project, bulk insert.
async fn load_table(
    tx: &mut Transaction<'_, Postgres>,
    spec: &'static TableSpec,
    config: &IngestConfig,
) -> Result<u64> {
    let path = config.data_dir.join(spec.file);
    let source = reader::read_table(&path)?;
    let projected = project::project(spec.name, &source, spec.columns, &config.sentinels)?;

    insert_rows(tx, spec, &projected).await
}

/// Bulk-append a projected table, chunked to respect the bind limit.
async fn insert_rows(
    tx: &mut Transaction<'_, Postgres>,
    spec: &'static TableSpec,
    data: &ProjectedTable,
) -> Result<u64> {
    let mut inserted = 0u64;

    for chunk in data.rows.chunks(INSERT_CHUNK_ROWS) {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            spec.name,
            data.columns.join(", ")
        ));

        builder.push_values(chunk, |mut b, row| {
            for (value, column) in row.iter().zip(spec.columns) {
                push_bind_value(&mut b, value, column.ty);
            }
        });

        let result = builder
            .build()
            .execute(&mut **tx)
            .await
            .map_err(|e| IngestError::database(spec.name, e))?;

        inserted += result.rows_affected();
    }

    Ok(inserted)
}

/// Bind one typed value.
///
/// Nulls must be bound with the column's type, not a generic NULL: the
/// extended protocol declares a concrete parameter type per placeholder.
fn push_bind_value(
    b: &mut sqlx::query_builder::Separated<'_, '_, Postgres, &'static str>,
    value: &Value,
    ty: FieldType,
) {
    match value {
        Value::Integer(n) => {
            b.push_bind(*n);
        }
        Value::Float(f) => {
            b.push_bind(*f);
        }
        Value::Date(d) => {
            b.push_bind(*d);
        }
        Value::Time(t) => {
            b.push_bind(*t);
        }
        Value::Text(s) => {
            b.push_bind(s.clone());
        }
        Value::Null => match ty {
            FieldType::Integer => {
                b.push_bind(None::<i64>);
            }
            FieldType::Float => {
                b.push_bind(None::<f64>);
            }
            FieldType::Date => {
                b.push_bind(None::<chrono::NaiveDate>);
            }
            FieldType::Time => {
                b.push_bind(None::<chrono::NaiveTime>);
            }
            FieldType::Text => {
                b.push_bind(None::<String>);
            }
        },
    }
}
