use crate::domain::model::{RankedTable, Table, TiePolicy};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    /// Comma-separated weights as given by the caller.
    fn weights(&self) -> &str;
    /// Comma-separated impact symbols as given by the caller.
    fn impacts(&self) -> &str;
    fn delimiter(&self) -> u8;
    fn tie_policy(&self) -> TiePolicy;
    fn score_column(&self) -> &str;
    fn rank_column(&self) -> &str;
    fn precision(&self) -> Option<usize>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Table>;
    fn transform(&self, table: Table) -> Result<RankedTable>;
    fn load(&self, result: RankedTable) -> Result<String>;
}
