pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, RunConfig};
pub use crate::core::{engine::RankingEngine, pipeline::TopsisPipeline, topsis::Topsis};
pub use crate::domain::model::{DecisionMatrix, Evaluation, Impact, RankedTable, Table, TiePolicy};
pub use crate::utils::error::{ErrorCategory, Result, TopsisError};
