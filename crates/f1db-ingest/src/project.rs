//! Table projection
//!
//! Selects and renames the subset of source columns required by a target
//! table, running every cell through the field coercer. The projection
//! preserves row count: a cell that fails coercion is nulled, never dropped
//! with its row. Source columns not named by the projection spec are ignored.

use crate::coerce::{coerce, FieldType, NullSentinels, Value};
use crate::error::{IngestError, Result};
use crate::reader::SourceTable;

/// One column of a projection spec: source name, target name, coercion rule
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub source: &'static str,
    pub target: &'static str,
    pub ty: FieldType,
}

impl ColumnSpec {
    pub const fn new(source: &'static str, target: &'static str, ty: FieldType) -> Self {
        Self { source, target, ty }
    }
}

/// A projected table, ready for bulk insert
#[derive(Debug, Clone)]
pub struct ProjectedTable {
    /// Target column names, in spec order
    pub columns: Vec<&'static str>,
    /// Typed rows, one per source row
    pub rows: Vec<Vec<Value>>,
}

impl ProjectedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Project a source table onto a target shape.
///
/// Errors with [`IngestError::MissingColumn`] if a required source column is
/// absent; this is a schema mismatch, not a cell-level failure, and aborts
/// the run.
pub fn project(
    table: &'static str,
    source: &SourceTable,
    columns: &[ColumnSpec],
    sentinels: &NullSentinels,
) -> Result<ProjectedTable> {
    let mut indices = Vec::with_capacity(columns.len());
    for spec in columns {
        let index = source
            .column_index(spec.source)
            .ok_or(IngestError::MissingColumn {
                table,
                column: spec.source,
            })?;
        indices.push(index);
    }

    let rows = source
        .rows()
        .iter()
        .map(|row| {
            columns
                .iter()
                .zip(&indices)
                .map(|(spec, &index)| {
                    let raw = row.get(index).map_or("", String::as_str);
                    coerce(raw, spec.ty, sentinels)
                })
                .collect()
        })
        .collect();

    Ok(ProjectedTable {
        columns: columns.iter().map(|c| c.target).collect(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_source() -> SourceTable {
        SourceTable::new(
            vec![
                "driverId".to_string(),
                "driverRef".to_string(),
                "code".to_string(),
                "dob".to_string(),
            ],
            vec![
                vec![
                    "1".to_string(),
                    "hamilton".to_string(),
                    "HAM".to_string(),
                    "1985-01-07".to_string(),
                ],
                vec![
                    "2".to_string(),
                    "heidfeld".to_string(),
                    r"\N".to_string(),
                    "bad-date".to_string(),
                ],
            ],
        )
    }

    const SPEC: &[ColumnSpec] = &[
        ColumnSpec::new("driverId", "driver_id", FieldType::Integer),
        ColumnSpec::new("code", "code", FieldType::Text),
        ColumnSpec::new("dob", "dob", FieldType::Date),
    ];

    #[test]
    fn test_project_selects_and_renames() {
        let projected =
            project("drivers", &sample_source(), SPEC, &NullSentinels::default()).unwrap();

        assert_eq!(projected.columns, vec!["driver_id", "code", "dob"]);
        assert_eq!(projected.rows[0][0], Value::Integer(1));
        assert_eq!(projected.rows[0][1], Value::Text("HAM".to_string()));
    }

    #[test]
    fn test_project_preserves_row_count_on_bad_cells() {
        let source = sample_source();
        let projected = project("drivers", &source, SPEC, &NullSentinels::default()).unwrap();

        // Row 2 has a sentinel code and an unparsable dob; both cells null,
        // the row survives.
        assert_eq!(projected.len(), source.len());
        assert_eq!(projected.rows[1][1], Value::Null);
        assert_eq!(projected.rows[1][2], Value::Null);
    }

    #[test]
    fn test_project_ignores_extra_source_columns() {
        // driverRef is present in the source but not in the spec
        let projected =
            project("drivers", &sample_source(), SPEC, &NullSentinels::default()).unwrap();
        assert!(!projected.columns.contains(&"driverRef"));
    }

    #[test]
    fn test_project_missing_column_is_an_error() {
        let source = SourceTable::new(vec!["driverId".to_string()], vec![]);
        let err = project("drivers", &source, SPEC, &NullSentinels::default()).unwrap_err();

        assert!(matches!(
            err,
            IngestError::MissingColumn {
                table: "drivers",
                column: "code"
            }
        ));
    }
}
