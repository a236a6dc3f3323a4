//! Dataset loader: CSV ingestion, cleaning, and typed materialization.
//!
//! Loading normalizes the raw file into a [`CleanedDataset`]:
//! - non-feature columns (row ordinal, surname, salary) are dropped if present
//! - all column names are lowercased before any lookup
//! - blanks in `tenure` are filled with zero and the column is made integral
//! - every row becomes a typed [`CustomerRecord`] and identifiers are indexed

use std::path::Path;

use polars::prelude::*;

use crate::error::ChurnError;
use crate::pipeline::schema::{
    CleanedDataset, CustomerRecord, CATEGORICAL_FEATURES, DROP_COLUMNS, ID_COLUMN, LABEL_COLUMN,
    NUMERIC_FEATURES,
};

/// Load and clean a churn modelling CSV file.
///
/// Fails with [`ChurnError::DataSource`] if the file is unreadable, a
/// required identifier/feature column is absent, or identifiers are
/// duplicated. The label column is allowed to be absent here; training
/// reports that as its own error.
pub fn load_dataset(path: &Path) -> Result<CleanedDataset, ChurnError> {
    let df = read_csv(path)?;
    let df = clean(df)?;
    materialize(&df)
}

fn read_csv(path: &Path) -> Result<DataFrame, ChurnError> {
    let lf = LazyCsvReader::new(path)
        .finish()
        .map_err(|e| {
            ChurnError::DataSource(format!("failed to open '{}': {}", path.display(), e))
        })?;

    lf.collect().map_err(|e| {
        ChurnError::DataSource(format!("failed to read '{}': {}", path.display(), e))
    })
}

/// Drop non-feature columns, lowercase names, repair the tenure column.
fn clean(df: DataFrame) -> Result<DataFrame, ChurnError> {
    // Tolerant drop: absence of any of these is not an error.
    let mut df = df.drop_many(DROP_COLUMNS);

    let lowered: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_lowercase())
        .collect();
    df.set_column_names(lowered)
        .map_err(|e| ChurnError::DataSource(format!("failed to normalize column names: {}", e)))?;

    if let Ok(tenure) = df.column("tenure") {
        let repaired = tenure
            .as_materialized_series()
            .fill_null(FillNullStrategy::Zero)
            .and_then(|s| s.cast(&DataType::Int64))
            .map_err(|e| ChurnError::DataSource(format!("failed to repair 'tenure': {}", e)))?;
        df.replace("tenure", repaired)
            .map_err(|e| ChurnError::DataSource(format!("failed to repair 'tenure': {}", e)))?;
    }

    Ok(df)
}

/// Convert the cleaned frame into typed records plus the identifier index.
fn materialize(df: &DataFrame) -> Result<CleanedDataset, ChurnError> {
    let mut required: Vec<&str> = vec![ID_COLUMN];
    required.extend(NUMERIC_FEATURES);
    required.extend(CATEGORICAL_FEATURES);
    for name in required {
        if df.column(name).is_err() {
            return Err(ChurnError::DataSource(format!(
                "required column '{}' not found in dataset",
                name
            )));
        }
    }

    let ids = i64_values(df, ID_COLUMN)?;
    let credit_scores = f64_values(df, "creditscore")?;
    let geographies = string_values(df, "geography")?;
    let genders = string_values(df, "gender")?;
    let ages = f64_values(df, "age")?;
    let tenures = i64_values(df, "tenure")?;
    let balances = f64_values(df, "balance")?;
    let products = f64_values(df, "numofproducts")?;
    let has_card = flag_values(df, "hascrcard")?;
    let active = flag_values(df, "isactivemember")?;

    let labels = if df.column(LABEL_COLUMN).is_ok() {
        Some(flag_values(df, LABEL_COLUMN)?)
    } else {
        None
    };

    let records: Vec<CustomerRecord> = (0..df.height())
        .map(|row| CustomerRecord {
            customer_id: ids[row],
            credit_score: credit_scores[row],
            geography: geographies[row].clone(),
            gender: genders[row].clone(),
            age: ages[row],
            tenure: tenures[row],
            balance: balances[row],
            num_of_products: products[row] as u32,
            has_cr_card: has_card[row],
            is_active_member: active[row],
        })
        .collect();

    CleanedDataset::new(records, labels)
        .map_err(|dup| ChurnError::DataSource(format!("duplicate customer id {} in dataset", dup)))
}

fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, ChurnError> {
    let cast = df
        .column(name)
        .and_then(|col| col.cast(&DataType::Float64))
        .map_err(|_| non_numeric(name))?;
    let ca = cast.f64().map_err(|_| non_numeric(name))?;
    ca.into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| missing_value(name, row)))
        .collect()
}

fn i64_values(df: &DataFrame, name: &str) -> Result<Vec<i64>, ChurnError> {
    let cast = df
        .column(name)
        .and_then(|col| col.cast(&DataType::Int64))
        .map_err(|_| non_numeric(name))?;
    let ca = cast.i64().map_err(|_| non_numeric(name))?;
    ca.into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| missing_value(name, row)))
        .collect()
}

/// Boolean-like column: boolean dtype or numeric 0/1, nonzero maps to true.
fn flag_values(df: &DataFrame, name: &str) -> Result<Vec<bool>, ChurnError> {
    let col = df.column(name).map_err(|_| non_numeric(name))?;
    if col.dtype() == &DataType::Boolean {
        let ca = col.bool().map_err(|_| non_numeric(name))?;
        return ca
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.ok_or_else(|| missing_value(name, row)))
            .collect();
    }
    Ok(f64_values(df, name)?.into_iter().map(|v| v != 0.0).collect())
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>, ChurnError> {
    let cast = df
        .column(name)
        .and_then(|col| col.cast(&DataType::String))
        .map_err(|_| ChurnError::DataSource(format!("column '{}' cannot be read as text", name)))?;
    let ca = cast
        .str()
        .map_err(|_| ChurnError::DataSource(format!("column '{}' cannot be read as text", name)))?;
    ca.into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.map(|s| s.to_string())
                .ok_or_else(|| missing_value(name, row))
        })
        .collect()
}

fn non_numeric(name: &str) -> ChurnError {
    ChurnError::DataSource(format!("column '{}' is missing or non-numeric", name))
}

fn missing_value(name: &str, row: usize) -> ChurnError {
    ChurnError::DataSource(format!(
        "column '{}' has a missing value at row {}",
        name, row
    ))
}
