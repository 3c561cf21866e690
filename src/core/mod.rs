pub mod engine;
pub mod pipeline;
pub mod rank;
pub mod table;
pub mod topsis;

pub use crate::domain::model::{RankedTable, Table};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
