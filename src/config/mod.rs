pub mod cli;
pub mod toml_config;

use crate::core::table::{DEFAULT_RANK_COLUMN, DEFAULT_SCORE_COLUMN};
use crate::core::ConfigProvider;
use crate::domain::model::TiePolicy;
use crate::utils::error::{Result, TopsisError};
use crate::utils::validation::{
    validate_delimiter, validate_non_empty_string, validate_path, validate_range, Validate,
};
use toml_config::{TomlConfig, MAX_PRECISION};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "topsis")]
#[command(about = "Rank the rows of a table with TOPSIS")]
pub struct CliConfig {
    /// Input table; the first column identifies each row
    pub input: String,

    /// Comma-separated weights, one per criteria column (e.g. "1,1,1,2")
    #[arg(allow_hyphen_values = true)]
    pub weights: String,

    /// Comma-separated impacts, '+' for benefit and '-' for cost (e.g. "-,+,+,+")
    #[arg(allow_hyphen_values = true)]
    pub impacts: String,

    /// Output table
    pub output: String,

    /// TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Field delimiter for input and output
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// How tied scores are ranked
    #[arg(long, value_enum)]
    pub ties: Option<TiePolicy>,

    /// Round scores to this many decimal places
    #[arg(long)]
    pub precision: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merges the settings file, if any, with command-line overrides.
    pub fn into_run_config(self) -> Result<RunConfig> {
        let mut run = RunConfig::new(self.input, self.weights, self.impacts, self.output);

        if let Some(path) = &self.config {
            tracing::debug!("Loading settings from: {}", path);
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            run.apply_file(&file);
        }

        if let Some(delimiter) = self.delimiter {
            run.delimiter = delimiter;
        }
        if let Some(ties) = self.ties {
            run.ties = ties;
        }
        if self.precision.is_some() {
            run.precision = self.precision;
        }

        Ok(run)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_path: String,
    pub weights: String,
    pub impacts: String,
    pub output_path: String,
    pub delimiter: char,
    pub ties: TiePolicy,
    pub score_column: String,
    pub rank_column: String,
    pub precision: Option<usize>,
}

impl RunConfig {
    pub fn new(
        input_path: impl Into<String>,
        weights: impl Into<String>,
        impacts: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            weights: weights.into(),
            impacts: impacts.into(),
            output_path: output_path.into(),
            delimiter: ',',
            ties: TiePolicy::default(),
            score_column: DEFAULT_SCORE_COLUMN.to_string(),
            rank_column: DEFAULT_RANK_COLUMN.to_string(),
            precision: None,
        }
    }

    pub fn apply_file(&mut self, file: &TomlConfig) {
        if let Some(delimiter) = file.delimiter() {
            self.delimiter = delimiter;
        }
        if let Some(name) = file.score_column() {
            self.score_column = name.to_string();
        }
        if let Some(name) = file.rank_column() {
            self.rank_column = name.to_string();
        }
        if let Some(precision) = file.precision() {
            self.precision = Some(precision);
        }
        if let Some(ties) = file.ties() {
            self.ties = ties;
        }
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_path("output", &self.output_path)?;
        validate_delimiter("delimiter", self.delimiter)?;
        validate_non_empty_string("score column", &self.score_column)?;
        validate_non_empty_string("rank column", &self.rank_column)?;

        if self.score_column == self.rank_column {
            return Err(TopsisError::InvalidConfigValueError {
                field: "rank column".to_string(),
                value: self.rank_column.clone(),
                reason: "Score and rank columns need different names".to_string(),
            });
        }

        if let Some(precision) = self.precision {
            validate_range("precision", precision, 0, MAX_PRECISION)?;
        }

        Ok(())
    }
}

impl ConfigProvider for RunConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn weights(&self) -> &str {
        &self.weights
    }

    fn impacts(&self) -> &str {
        &self.impacts
    }

    fn delimiter(&self) -> u8 {
        // Checked to be ASCII by `validate`.
        self.delimiter as u8
    }

    fn tie_policy(&self) -> TiePolicy {
        self.ties
    }

    fn score_column(&self) -> &str {
        &self.score_column
    }

    fn rank_column(&self) -> &str {
        &self.rank_column
    }

    fn precision(&self) -> Option<usize> {
        self.precision
    }
}
