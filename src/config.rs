use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a transpose treats rows of unequal length.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransposeMode {
    /// Stop at the first column where any row has run out.
    StripOnMissing,
    /// Fill missing entries with `T::default()` until every row has run out.
    DefaultOnMissing,
    /// Fail with `InconsistentRowLength` at the first column where some,
    /// but not all, rows have run out.
    ErrorOnMissing,
}

impl Default for TransposeMode {
    fn default() -> Self {
        TransposeMode::ErrorOnMissing
    }
}

impl FromStr for TransposeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strip" | "strip_on_missing" => Ok(TransposeMode::StripOnMissing),
            "default" | "default_on_missing" => Ok(TransposeMode::DefaultOnMissing),
            "error" | "error_on_missing" => Ok(TransposeMode::ErrorOnMissing),
            _ => Err(format!(
                "Unknown transpose mode: {}. Expected one of `strip`, `default` or `error`",
                s
            )),
        }
    }
}
