use crate::domain::model::{RankedTable, Table};
use crate::utils::error::{Result, TopsisError};

pub const DEFAULT_SCORE_COLUMN: &str = "Topsis Score";
pub const DEFAULT_RANK_COLUMN: &str = "Rank";

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub delimiter: u8,
    pub score_column: String,
    pub rank_column: String,
    pub precision: Option<usize>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            score_column: DEFAULT_SCORE_COLUMN.to_string(),
            rank_column: DEFAULT_RANK_COLUMN.to_string(),
            precision: None,
        }
    }
}

/// Reads a delimited table whose first record is the header.
pub fn read_table(data: &[u8], delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(TopsisError::computation("input table has no header row"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(columns = headers.len(), rows = rows.len(), "Table parsed");
    Ok(Table { headers, rows })
}

/// Serialises the ranked table with the score and rank columns appended.
pub fn write_table(result: &RankedTable, options: &OutputOptions) -> Result<Vec<u8>> {
    let RankedTable { table, evaluation } = result;
    if table.rows.len() != evaluation.scores.len() || table.rows.len() != evaluation.ranks.len() {
        return Err(TopsisError::computation(format!(
            "{} rows but {} scores and {} ranks",
            table.rows.len(),
            evaluation.scores.len(),
            evaluation.ranks.len()
        )));
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(Vec::new());

    let mut header: Vec<&str> = table.headers.iter().map(String::as_str).collect();
    header.push(&options.score_column);
    header.push(&options.rank_column);
    writer.write_record(&header)?;

    for ((row, score), rank) in table
        .rows
        .iter()
        .zip(&evaluation.scores)
        .zip(&evaluation.ranks)
    {
        let score = format_score(*score, options.precision);
        let rank = rank.to_string();
        writer.write_record(
            row.iter()
                .map(String::as_str)
                .chain([score.as_str(), rank.as_str()]),
        )?;
    }

    writer
        .into_inner()
        .map_err(|e| TopsisError::computation(format!("failed to flush output table: {}", e.error())))
}

fn format_score(score: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, score),
        None => score.to_string(),
    }
}
