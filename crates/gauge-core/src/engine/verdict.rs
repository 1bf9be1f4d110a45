use serde::{Deserialize, Serialize};

/// Outcome of an item, or of one evaluation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
    /// No verdict yet. A normal waiting state, not a failure.
    Pending,
    /// Transient; needs the disambiguation flow. Never stored.
    Ambiguous,
}

impl Verdict {
    pub fn as_final(&self) -> Option<FinalVerdict> {
        match self {
            Verdict::Pass => Some(FinalVerdict::Pass),
            Verdict::Fail => Some(FinalVerdict::Fail),
            Verdict::Pending | Verdict::Ambiguous => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
            Verdict::Pending => "pending",
            Verdict::Ambiguous => "ambiguous",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verdict that may be recorded in the result store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalVerdict {
    Pass,
    Fail,
}

impl From<FinalVerdict> for Verdict {
    fn from(v: FinalVerdict) -> Self {
        match v {
            FinalVerdict::Pass => Verdict::Pass,
            FinalVerdict::Fail => Verdict::Fail,
        }
    }
}

impl std::fmt::Display for FinalVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Verdict::from(*self).fmt(f)
    }
}

/// Result of evaluating one layer's condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Verdict(Verdict),
    /// The chain test matched; continue with the next layer. Never a verdict.
    AdvanceToNextLayer,
}
