use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteStatus {
    Success,
    Error,
}

/// Outcome of a write that did not fail outright.
///
/// A report with [`WriteStatus::Error`] is a soft failure: nothing went wrong
/// on the wire, but nothing was written either. Callers have to check it.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
pub struct WriteReport {
    pub status: WriteStatus,
    pub message: String,
}

impl WriteReport {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: WriteStatus::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: WriteStatus::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == WriteStatus::Success
    }
}
