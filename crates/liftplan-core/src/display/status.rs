//! Status and confirmation messages.

use std::fmt;

use crate::editor::SyncStatus;

/// Outcome line for operations without a resource to show.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{label} {}", self.message)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Clean => f.write_str("saved"),
            SyncStatus::Dirty => f.write_str("unsaved changes"),
            SyncStatus::Saving => f.write_str("saving"),
            SyncStatus::Failed { message } => write!(f, "save failed: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Plan deleted");
        assert_eq!(success.to_string(), "Success: Plan deleted\n");

        let failure = OperationStatus::failure("Deletion not confirmed");
        assert!(failure.to_string().starts_with("Error:"));
    }

    #[test]
    fn test_sync_status_display() {
        let failed = SyncStatus::Failed {
            message: "Plan with ID 3 not found".to_string(),
        };
        assert_eq!(failed.to_string(), "save failed: Plan with ID 3 not found");
        assert_eq!(SyncStatus::Dirty.to_string(), "unsaved changes");
    }
}
