//! Row reshaping: one source row → one or more normalized records.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tds_model::{
    CategoryKey, MeasurementKind, NormalizedRecord, RawTable, RecordValue, Result,
    SPECIALTY_CODE_FIELD, SPECIALTY_DESCRIPTION_FIELD, ShapeError, normalize_field_name,
};
use tracing::{debug, info, info_span};

use crate::classify::{EntityMetadataMap, HeaderLayout, MeasurementColumn};

/// How measurement categories within a row become output records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryPolicy {
    /// One record per (row, category) pair.
    #[default]
    PerCategory,
    /// One record per row. The category label comes from the last Time column,
    /// and each measurement from the last column of its kind, in column order.
    LastWins,
}

impl CategoryPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PerCategory => "per-category",
            Self::LastWins => "last-wins",
        }
    }
}

impl fmt::Display for CategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Measurement columns that feed one output record per row.
#[derive(Debug)]
struct RecordPlan {
    category: Option<CategoryKey>,
    columns: BTreeMap<MeasurementKind, usize>,
}

/// Reshapes every row of `table`.
///
/// Metadata fields come first (normalized key names, map order), followed by
/// `specialty_description`, `specialty_code`, and one field per
/// [`MeasurementKind`]. Empty or absent measurements become `Missing`.
///
/// # Errors
///
/// - [`ShapeError::MissingColumn`] if a mapped metadata label is not in `table`
/// - [`ShapeError::DuplicateField`] if two output fields normalize to one name
pub fn reshape(
    table: &RawTable,
    metadata: &EntityMetadataMap,
    policy: CategoryPolicy,
) -> Result<Vec<NormalizedRecord>> {
    let measurements: Vec<MeasurementColumn> = table
        .labels()
        .iter()
        .enumerate()
        .filter(|(_, label)| !metadata.claims(label))
        .filter_map(|(position, label)| {
            label.measurement_kind().map(|kind| MeasurementColumn {
                position,
                label: label.clone(),
                kind,
            })
        })
        .collect();

    build_records(table, metadata, &measurements, policy)
}

/// Reshapes `table` using a classification produced by
/// [`classify_header`](crate::classify_header) for the same table.
pub fn reshape_table(
    table: &RawTable,
    layout: &HeaderLayout,
    policy: CategoryPolicy,
) -> Result<Vec<NormalizedRecord>> {
    let span = info_span!("reshape", policy = %policy, rows = table.height());
    let _guard = span.enter();
    let start = Instant::now();

    let records = build_records(table, &layout.metadata, &layout.measurements, policy)?;

    info!(
        metadata_keys = layout.metadata.len(),
        categories = layout.categories().len(),
        records = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "reshape complete"
    );
    Ok(records)
}

fn build_records(
    table: &RawTable,
    metadata: &EntityMetadataMap,
    measurements: &[MeasurementColumn],
    policy: CategoryPolicy,
) -> Result<Vec<NormalizedRecord>> {
    let metadata_fields = resolve_metadata_fields(table, metadata)?;

    let plans = match policy {
        CategoryPolicy::PerCategory => plan_per_category(measurements),
        CategoryPolicy::LastWins => vec![plan_last_wins(measurements)],
    };
    debug!(
        policy = %policy,
        rows = table.height(),
        categories = plans.len(),
        "reshape plan"
    );

    let mut records = Vec::with_capacity(table.height() * plans.len());
    for row in table.rows() {
        for plan in &plans {
            let mut record = NormalizedRecord::new();
            for (field, position) in &metadata_fields {
                record.push(field.clone(), RecordValue::metadata(&row[*position]))?;
            }
            let (description, code) = match &plan.category {
                Some(category) => (
                    RecordValue::Text(category.description.clone()),
                    RecordValue::Text(category.code.clone()),
                ),
                None => (RecordValue::Null, RecordValue::Null),
            };
            record.push(SPECIALTY_DESCRIPTION_FIELD, description)?;
            record.push(SPECIALTY_CODE_FIELD, code)?;
            for (kind, position) in &plan.columns {
                record.push(
                    kind.field_name(),
                    RecordValue::measurement(row.get(*position)),
                )?;
            }
            records.push(record);
        }
    }

    // Kinds with no column in the table still get a field on every record.
    for record in &mut records {
        for kind in MeasurementKind::ALL {
            record.fill_missing(kind.field_name());
        }
    }

    Ok(records)
}

/// Output field name and column position for each metadata key.
fn resolve_metadata_fields(
    table: &RawTable,
    metadata: &EntityMetadataMap,
) -> Result<Vec<(String, usize)>> {
    let reserved: Vec<&str> = [SPECIALTY_DESCRIPTION_FIELD, SPECIALTY_CODE_FIELD]
        .into_iter()
        .chain(MeasurementKind::ALL.map(MeasurementKind::field_name))
        .collect();

    let mut fields: Vec<(String, usize)> = Vec::with_capacity(metadata.len());
    for entry in metadata.iter() {
        let position = table
            .position(&entry.label)
            .ok_or_else(|| ShapeError::MissingColumn {
                key: entry.key.clone(),
                label: entry.label.to_string(),
            })?;
        let field = normalize_field_name(&entry.key);
        if reserved.contains(&field.as_str()) || fields.iter().any(|(name, _)| *name == field) {
            return Err(ShapeError::DuplicateField { field });
        }
        fields.push((field, position));
    }
    Ok(fields)
}

/// Groups measurement columns by category in first-appearance order.
fn plan_per_category(measurements: &[MeasurementColumn]) -> Vec<RecordPlan> {
    let mut plans: Vec<RecordPlan> = Vec::new();
    for column in measurements {
        let category = column.category();
        let index = match plans
            .iter()
            .position(|plan| plan.category.as_ref() == Some(&category))
        {
            Some(index) => index,
            None => {
                plans.push(RecordPlan {
                    category: Some(category),
                    columns: BTreeMap::new(),
                });
                plans.len() - 1
            }
        };
        let plan = &mut plans[index];
        if plan.columns.contains_key(&column.kind) {
            debug!(
                label = %column.label,
                column = column.position,
                "duplicate measurement column for category; keeping the first"
            );
            continue;
        }
        plan.columns.insert(column.kind, column.position);
    }
    plans
}

/// Single plan reproducing overwrite-as-you-scan semantics.
fn plan_last_wins(measurements: &[MeasurementColumn]) -> RecordPlan {
    let mut plan = RecordPlan {
        category: None,
        columns: BTreeMap::new(),
    };
    for column in measurements {
        if column.kind == MeasurementKind::Time {
            plan.category = Some(column.category());
        }
        plan.columns.insert(column.kind, column.position);
    }
    plan
}
