use crate::core::table::{read_table, write_table, OutputOptions};
use crate::core::topsis::Topsis;
use crate::core::{ConfigProvider, Pipeline, RankedTable, Storage, Table};
use crate::utils::error::{Result, TopsisError};
use crate::utils::validation::{parse_impacts, parse_weights, split_impacts};

pub struct TopsisPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> TopsisPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_options(&self) -> OutputOptions {
        OutputOptions {
            delimiter: self.config.delimiter(),
            score_column: self.config.score_column().to_string(),
            rank_column: self.config.rank_column().to_string(),
            precision: self.config.precision(),
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for TopsisPipeline<S, C> {
    fn extract(&self) -> Result<Table> {
        tracing::debug!("Reading input table from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path())?;
        read_table(&data, self.config.delimiter())
    }

    fn transform(&self, table: Table) -> Result<RankedTable> {
        let weights = parse_weights(self.config.weights())?;
        let symbols = split_impacts(self.config.impacts());

        let columns = table.criteria_count();
        if weights.len() != columns || symbols.len() != columns {
            return Err(TopsisError::ParameterMismatch {
                weights: weights.len(),
                impacts: symbols.len(),
                columns,
            });
        }

        let matrix = table.criteria_matrix()?;
        let impacts = parse_impacts(&symbols)?;

        tracing::debug!(
            "Evaluating {} alternatives over criteria {:?}",
            matrix.row_count(),
            table.criteria_headers()
        );

        let evaluation =
            Topsis::new(self.config.tie_policy()).evaluate(&matrix, &weights, &impacts)?;
        Ok(RankedTable { table, evaluation })
    }

    fn load(&self, result: RankedTable) -> Result<String> {
        let data = write_table(&result, &self.output_options())?;

        tracing::debug!("Writing {} bytes to {}", data.len(), self.config.output_path());
        self.storage.write_file(self.config.output_path(), &data)?;

        Ok(self.config.output_path().to_string())
    }
}
