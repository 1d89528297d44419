use serde::{Deserialize, Serialize};
use std::fmt;

/// Steps of the calculator flow.
///
/// `Config → Summary → Submission → Done`; every step except `Config` can
/// go back one step. Nothing advances on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorStep {
    #[default]
    Config,
    Summary,
    Submission,
    Done,
}

impl CalculatorStep {
    /// Next step, or `None` when the move is not allowed. Leaving `Config`
    /// needs at least one compute or storage item.
    pub fn next(self, has_items: bool) -> Option<CalculatorStep> {
        match self {
            CalculatorStep::Config if has_items => Some(CalculatorStep::Summary),
            CalculatorStep::Config => None,
            CalculatorStep::Summary => Some(CalculatorStep::Submission),
            CalculatorStep::Submission => Some(CalculatorStep::Done),
            CalculatorStep::Done => None,
        }
    }

    pub fn back(self) -> Option<CalculatorStep> {
        match self {
            CalculatorStep::Config => None,
            CalculatorStep::Summary => Some(CalculatorStep::Config),
            CalculatorStep::Submission => Some(CalculatorStep::Summary),
            CalculatorStep::Done => Some(CalculatorStep::Submission),
        }
    }

    /// Items may only be added or removed while configuring.
    pub fn allows_editing(self) -> bool {
        self == CalculatorStep::Config
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorStep::Config => "config",
            CalculatorStep::Summary => "summary",
            CalculatorStep::Submission => "submission",
            CalculatorStep::Done => "done",
        }
    }
}

impl fmt::Display for CalculatorStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
