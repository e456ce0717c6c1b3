//! Target schema and load-order derivation
//!
//! The six target tables, their source files, projection specs and
//! foreign-key dependencies, declared as data. The load order is not
//! hardcoded: it is re-derived from the dependency edges by topological sort
//! on every run, so adding a table is a data change rather than a reordering
//! risk.

use crate::coerce::FieldType;
use crate::error::{IngestError, Result};
use crate::project::ColumnSpec;

/// Specification of one target table
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    /// Target table name
    pub name: &'static str,
    /// Source file name, relative to the data directory
    pub file: &'static str,
    /// Tables whose rows must exist before this table loads
    pub depends_on: &'static [&'static str],
    /// Projection spec, in target column order
    pub columns: &'static [ColumnSpec],
}

/// The six target tables, keyed to the Ergast-style source column names.
pub const TABLES: &[TableSpec] = &[
    TableSpec {
        name: "constructors",
        file: "constructors.csv",
        depends_on: &[],
        columns: &[
            ColumnSpec::new("constructorId", "constructor_id", FieldType::Integer),
            ColumnSpec::new("name", "name", FieldType::Text),
            ColumnSpec::new("nationality", "nationality", FieldType::Text),
        ],
    },
    TableSpec {
        name: "circuits",
        file: "circuits.csv",
        depends_on: &[],
        columns: &[
            ColumnSpec::new("circuitId", "circuit_id", FieldType::Integer),
            ColumnSpec::new("name", "name", FieldType::Text),
            ColumnSpec::new("location", "location", FieldType::Text),
            ColumnSpec::new("country", "country", FieldType::Text),
            ColumnSpec::new("lat", "lat", FieldType::Float),
            ColumnSpec::new("lng", "lng", FieldType::Float),
            ColumnSpec::new("alt", "alt", FieldType::Integer),
        ],
    },
    TableSpec {
        name: "drivers",
        file: "drivers.csv",
        depends_on: &[],
        columns: &[
            ColumnSpec::new("driverId", "driver_id", FieldType::Integer),
            ColumnSpec::new("code", "code", FieldType::Text),
            ColumnSpec::new("forename", "forename", FieldType::Text),
            ColumnSpec::new("surname", "surname", FieldType::Text),
            ColumnSpec::new("dob", "dob", FieldType::Date),
            ColumnSpec::new("nationality", "nationality", FieldType::Text),
        ],
    },
    TableSpec {
        name: "status",
        file: "status.csv",
        depends_on: &[],
        columns: &[
            ColumnSpec::new("statusId", "status_id", FieldType::Integer),
            ColumnSpec::new("status", "status", FieldType::Text),
        ],
    },
    TableSpec {
        name: "races",
        file: "races.csv",
        depends_on: &["circuits"],
        columns: &[
            ColumnSpec::new("raceId", "race_id", FieldType::Integer),
            ColumnSpec::new("year", "year", FieldType::Integer),
            ColumnSpec::new("round", "round", FieldType::Integer),
            ColumnSpec::new("circuitId", "circuit_id", FieldType::Integer),
            ColumnSpec::new("name", "name", FieldType::Text),
            ColumnSpec::new("date", "date", FieldType::Date),
            ColumnSpec::new("time", "time", FieldType::Time),
        ],
    },
    TableSpec {
        name: "results",
        file: "results.csv",
        depends_on: &["races", "drivers", "constructors", "status"],
        columns: &[
            ColumnSpec::new("resultId", "result_id", FieldType::Integer),
            ColumnSpec::new("raceId", "race_id", FieldType::Integer),
            ColumnSpec::new("driverId", "driver_id", FieldType::Integer),
            ColumnSpec::new("constructorId", "constructor_id", FieldType::Integer),
            ColumnSpec::new("statusId", "status_id", FieldType::Integer),
            ColumnSpec::new("grid", "grid", FieldType::Integer),
            ColumnSpec::new("positionOrder", "position_order", FieldType::Integer),
            ColumnSpec::new("points", "points", FieldType::Float),
            ColumnSpec::new("laps", "laps", FieldType::Integer),
            ColumnSpec::new("milliseconds", "milliseconds", FieldType::Integer),
        ],
    },
];

/// Derive a load order from the dependency edges (Kahn's algorithm).
///
/// The result places every table after all of its dependencies. Declaration
/// order breaks ties, so the output is deterministic. An unknown dependency
/// or a cycle is a configuration error.
pub fn load_order(tables: &'static [TableSpec]) -> Result<Vec<&'static TableSpec>> {
    for table in tables {
        for dep in table.depends_on {
            if !tables.iter().any(|t| t.name == *dep) {
                return Err(IngestError::Graph(format!(
                    "table '{}' depends on unknown table '{}'",
                    table.name, dep
                )));
            }
        }
    }

    let mut ordered: Vec<&TableSpec> = Vec::with_capacity(tables.len());
    let mut remaining: Vec<&TableSpec> = tables.iter().collect();

    while !remaining.is_empty() {
        let ready = remaining.iter().position(|table| {
            table
                .depends_on
                .iter()
                .all(|dep| ordered.iter().any(|t| t.name == *dep))
        });

        match ready {
            Some(index) => ordered.push(remaining.remove(index)),
            None => {
                let stuck: Vec<&str> = remaining.iter().map(|t| t.name).collect();
                return Err(IngestError::Graph(format!(
                    "dependency cycle among tables: {}",
                    stuck.join(", ")
                )));
            }
        }
    }

    Ok(ordered)
}
