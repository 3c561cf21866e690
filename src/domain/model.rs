use crate::utils::error::{Result, TopsisError};
use serde::Deserialize;
use std::str::FromStr;

/// A delimited table as read from disk. The first column identifies the
/// alternative, the rest are criteria. Cells keep their original text.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn criteria_count(&self) -> usize {
        self.headers.len().saturating_sub(1)
    }

    pub fn criteria_headers(&self) -> &[String] {
        self.headers.get(1..).unwrap_or(&[])
    }

    /// Parses every criteria cell as a finite number.
    pub fn criteria_matrix(&self) -> Result<DecisionMatrix> {
        let headers = self.criteria_headers();
        let mut rows = Vec::with_capacity(self.rows.len());

        for (index, row) in self.rows.iter().enumerate() {
            let cells = row.get(1..).unwrap_or(&[]);
            if cells.len() != headers.len() {
                return Err(TopsisError::computation(format!(
                    "row {} has {} criteria values, expected {}",
                    index + 1,
                    cells.len(),
                    headers.len()
                )));
            }

            let values = cells
                .iter()
                .zip(headers)
                .map(|(cell, column)| parse_cell(cell, index + 1, column))
                .collect::<Result<Vec<f64>>>()?;
            rows.push(values);
        }

        DecisionMatrix::new(rows, headers.len())
    }
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<f64> {
    let non_numeric = || TopsisError::NonNumericData {
        row,
        column: column.to_string(),
        value: cell.to_string(),
    };

    let value: f64 = cell.trim().parse().map_err(|_| non_numeric())?;
    if !value.is_finite() {
        return Err(non_numeric());
    }
    Ok(value)
}

/// Row-major numeric matrix: one row per alternative, one column per criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionMatrix {
    rows: Vec<Vec<f64>>,
    columns: usize,
}

impl DecisionMatrix {
    pub fn new(rows: Vec<Vec<f64>>, columns: usize) -> Result<Self> {
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(TopsisError::computation(format!(
                "row {} has {} values, expected {}",
                index + 1,
                row.len(),
                columns
            )));
        }
        Ok(Self { rows, columns })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn column(&self, j: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |row| row.get(j).copied())
    }
}

/// Preference direction of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Higher raw values are preferred (`+`).
    Benefit,
    /// Lower raw values are preferred (`-`).
    Cost,
}

impl FromStr for Impact {
    type Err = TopsisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "+" => Ok(Self::Benefit),
            "-" => Ok(Self::Cost),
            other => Err(TopsisError::InvalidImpact {
                symbol: other.to_string(),
            }),
        }
    }
}

/// How equal scores are ranked. Both policies give tied rows the same rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TiePolicy {
    /// 1, 2, 2, 4
    #[default]
    Competition,
    /// 1, 2, 2, 3
    Dense,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub scores: Vec<f64>,
    pub ranks: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct RankedTable {
    pub table: Table,
    pub evaluation: Evaluation,
}
