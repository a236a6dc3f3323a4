#![allow(dead_code)]
//! Shared test utilities and fixture generators

use std::fmt::Write as _;
use std::path::PathBuf;
use tempfile::TempDir;

/// First generated customer id; ids increase by one per row.
pub const FIRST_CUSTOMER_ID: i64 = 15_600_000;

/// A hand-placed boundary customer: zero balance, inactive, blank tenure.
pub const EDGE_CUSTOMER_ID: i64 = 15_699_999;

/// Write a synthetic churn modelling CSV with `rows` generated customers
/// plus one boundary customer (`EDGE_CUSTOMER_ID`).
///
/// The data is deterministic and learnable: churners (every 4th row) are
/// older, have lower credit scores, higher balances, and are inactive.
/// Every 7th row (offset 3) has a blank tenure field. The file carries the
/// droppable columns (RowNumber, Surname, EstimatedSalary) as a real
/// source file would.
pub fn write_churn_csv(dir: &TempDir, rows: usize) -> PathBuf {
    let path = dir.path().join("churn.csv");
    let mut out = String::from(
        "RowNumber,CustomerId,Surname,CreditScore,Geography,Gender,Age,Tenure,\
         Balance,NumOfProducts,HasCrCard,IsActiveMember,EstimatedSalary,Exited\n",
    );

    for i in 0..rows {
        out.push_str(&churn_row(i));
    }

    // Boundary customer: zero balance and inactive must be valid input.
    writeln!(
        out,
        "{},{},Edge,600,France,Female,44,,0.00,1,0,0,43210.00,0",
        rows + 1,
        EDGE_CUSTOMER_ID
    )
    .unwrap();

    std::fs::write(&path, out).unwrap();
    path
}

fn churn_row(i: usize) -> String {
    let churned = i % 4 == 0;
    let geography = ["France", "Spain", "Germany"][i % 3];
    let gender = if i % 2 == 0 { "Male" } else { "Female" };
    let (age, credit, balance, active) = if churned {
        (55 + i % 10, 480 + i % 50, 120_000.0 + i as f64 * 13.5, 0)
    } else {
        (28 + i % 15, 640 + i % 120, (i % 5) as f64 * 20_000.0, 1)
    };
    let tenure = if i % 7 == 3 {
        String::new()
    } else {
        (i % 10).to_string()
    };

    format!(
        "{},{},Doe,{},{},{},{},{},{:.2},{},{},{},{:.2},{}\n",
        i + 1,
        FIRST_CUSTOMER_ID + i as i64,
        credit,
        geography,
        gender,
        age,
        tenure,
        balance,
        1 + i % 3,
        i % 2,
        active,
        40_000.0 + i as f64 * 7.0,
        churned as u8
    )
}

/// Write a churn CSV that never carries the droppable columns.
pub fn write_minimal_churn_csv(dir: &TempDir, rows: usize) -> PathBuf {
    let path = dir.path().join("minimal.csv");
    let mut out = String::from(
        "CustomerId,CreditScore,Geography,Gender,Age,Tenure,Balance,\
         NumOfProducts,HasCrCard,IsActiveMember,Exited\n",
    );
    for i in 0..rows {
        let full = churn_row(i);
        // Strip RowNumber, Surname, and EstimatedSalary from the full row.
        let fields: Vec<&str> = full.trim_end().split(',').collect();
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{}",
            fields[1],
            fields[3],
            fields[4],
            fields[5],
            fields[6],
            fields[7],
            fields[8],
            fields[9],
            fields[10],
            fields[11],
            fields[13]
        )
        .unwrap();
    }
    std::fs::write(&path, out).unwrap();
    path
}

/// Write a churn CSV without the Exited label column.
pub fn write_unlabeled_churn_csv(dir: &TempDir, rows: usize) -> PathBuf {
    let path = dir.path().join("unlabeled.csv");
    let mut out = String::from(
        "CustomerId,CreditScore,Geography,Gender,Age,Tenure,Balance,\
         NumOfProducts,HasCrCard,IsActiveMember\n",
    );
    for i in 0..rows {
        let full = churn_row(i);
        let fields: Vec<&str> = full.trim_end().split(',').collect();
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{}",
            fields[1],
            fields[3],
            fields[4],
            fields[5],
            fields[6],
            fields[7],
            fields[8],
            fields[9],
            fields[10],
            fields[11]
        )
        .unwrap();
    }
    std::fs::write(&path, out).unwrap();
    path
}

/// Write a churn CSV where every customer has the same label.
pub fn write_single_class_csv(dir: &TempDir, rows: usize) -> PathBuf {
    let path = dir.path().join("single_class.csv");
    let mut out = String::from(
        "CustomerId,CreditScore,Geography,Gender,Age,Tenure,Balance,\
         NumOfProducts,HasCrCard,IsActiveMember,Exited\n",
    );
    for i in 0..rows {
        writeln!(
            out,
            "{},{},France,Male,{},{},{:.2},1,1,1,0",
            FIRST_CUSTOMER_ID + i as i64,
            600 + i % 100,
            30 + i % 20,
            i % 10,
            (i % 6) as f64 * 15_000.0
        )
        .unwrap();
    }
    std::fs::write(&path, out).unwrap();
    path
}
