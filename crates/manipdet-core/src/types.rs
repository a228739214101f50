//! Run-mode tags shared by logging and validation.

use serde::{Deserialize, Serialize};

/// The kind of experiment run being executed.
///
/// The set of mode names is open: anything that is not a known tag is
/// carried through as `Custom` and treated like `Eval` when the log file
/// name is assembled. Only `Finetune` changes the required configuration
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunMode {
    Finetune,
    Eval,
    Custom(String),
}

impl RunMode {
    /// Never fails: unknown tags become `Custom`.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "finetune" => RunMode::Finetune,
            "eval" => RunMode::Eval,
            other => RunMode::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunMode::Finetune => "finetune",
            RunMode::Eval => "eval",
            RunMode::Custom(tag) => tag.as_str(),
        }
    }

    pub fn is_finetune(&self) -> bool {
        matches!(self, RunMode::Finetune)
    }
}
