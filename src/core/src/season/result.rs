use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageSeverity {
    Success,
    Warning,
}

/// What an advance call did, in terms the caller can surface directly
/// to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceOutcome {
    pub weeks_advanced: u8,
    pub message: String,
    pub severity: MessageSeverity,
}

impl AdvanceOutcome {
    pub fn success(weeks_advanced: u8, message: String) -> Self {
        AdvanceOutcome {
            weeks_advanced,
            message,
            severity: MessageSeverity::Success,
        }
    }

    pub fn warning(message: &str) -> Self {
        AdvanceOutcome {
            weeks_advanced: 0,
            message: String::from(message),
            severity: MessageSeverity::Warning,
        }
    }
}
