use crate::domain::model::TiePolicy;
use crate::utils::error::{Result, TopsisError};
use crate::utils::validation::{
    validate_delimiter, validate_non_empty_string, validate_range, Validate,
};
use serde::Deserialize;
use std::path::Path;

pub const MAX_PRECISION: usize = 17;

/// Optional settings file. Every section and key may be left out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub ranking: Option<RankingConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub score_column: Option<String>,
    pub rank_column: Option<String>,
    pub precision: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankingConfig {
    pub ties: Option<TiePolicy>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TopsisError::ConfigError {
            message: format!("cannot read settings file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TopsisError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| TopsisError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn delimiter(&self) -> Option<char> {
        self.input.as_ref().and_then(|i| i.delimiter)
    }

    pub fn score_column(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.score_column.as_deref())
    }

    pub fn rank_column(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.rank_column.as_deref())
    }

    pub fn precision(&self) -> Option<usize> {
        self.output.as_ref().and_then(|o| o.precision)
    }

    pub fn ties(&self) -> Option<TiePolicy> {
        self.ranking.as_ref().and_then(|r| r.ties)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(delimiter) = self.delimiter() {
            validate_delimiter("input.delimiter", delimiter)?;
        }
        if let Some(name) = self.score_column() {
            validate_non_empty_string("output.score_column", name)?;
        }
        if let Some(name) = self.rank_column() {
            validate_non_empty_string("output.rank_column", name)?;
        }
        if let Some(precision) = self.precision() {
            validate_range("output.precision", precision, 0, MAX_PRECISION)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[input]
delimiter = ";"

[output]
score_column = "Score"
rank_column = "Position"
precision = 4

[ranking]
ties = "dense"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.delimiter(), Some(';'));
        assert_eq!(config.score_column(), Some("Score"));
        assert_eq!(config.rank_column(), Some("Position"));
        assert_eq!(config.precision(), Some(4));
        assert_eq!(config.ties(), Some(TiePolicy::Dense));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.delimiter(), None);
        assert_eq!(config.ties(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TOPSIS_TEST_SCORE_COLUMN", "Closeness");

        let toml_content = r#"
[output]
score_column = "${TOPSIS_TEST_SCORE_COLUMN}"
rank_column = "${TOPSIS_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.score_column(), Some("Closeness"));
        assert_eq!(config.rank_column(), Some("${TOPSIS_TEST_UNSET_VARIABLE}"));

        std::env::remove_var("TOPSIS_TEST_SCORE_COLUMN");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = TomlConfig::from_toml_str("[ranking]\nmethod = \"average\"\n").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);

        let err = TomlConfig::from_toml_str("[ranking]\nties = \"average\"\n").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[output]\nprecision = 40\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[output]\nscore_column = \" \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[input]\ndelimiter = \"\\t\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.delimiter(), Some('\t'));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlConfig::from_file("/no/such/settings.toml").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
