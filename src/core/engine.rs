use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct RankingEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RankingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load in order. Nothing is written unless
    /// the evaluation succeeded.
    pub fn run(&self) -> Result<String> {
        tracing::info!("Loading input table");
        let table = self.pipeline.extract()?;
        tracing::info!(
            "Loaded {} rows with {} criteria",
            table.rows.len(),
            table.criteria_count()
        );

        tracing::info!("Computing TOPSIS scores");
        let ranked = self.pipeline.transform(table)?;
        if let Some(best) = ranked
            .evaluation
            .ranks
            .iter()
            .position(|&rank| rank == 1)
            .and_then(|i| ranked.table.rows.get(i))
            .and_then(|row| row.first())
        {
            tracing::info!("Top ranked alternative: {}", best);
        }

        tracing::info!("Writing result table");
        let output_path = self.pipeline.load(ranked)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
