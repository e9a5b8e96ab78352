//! Status and confirmation message types for operation feedback.

use std::fmt;

/// Wrapper type for displaying operation confirmation messages.
///
/// Editing operations never fail loudly; a rejected edit is reported as a
/// failure status instead of an error.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }

    /// Status for an editing operation described by `action`.
    pub fn for_edit(applied: bool, action: &str) -> Self {
        if applied {
            Self::success(action)
        } else {
            Self::failure(format!(
                "{action} was rejected (position out of range, blank text, or invalid link)"
            ))
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", if self.success { "Success:" } else { "Error:" }, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Template archived");
        assert_eq!(format!("{success}"), "Success: Template archived\n");

        let failure = OperationStatus::failure("Nothing to archive");
        assert!(format!("{failure}").contains("Error:"));
    }

    #[test]
    fn test_rejected_edit_mentions_action() {
        let status = OperationStatus::for_edit(false, "Removed step 4");
        assert!(!status.success);
        assert!(status.message.starts_with("Removed step 4 was rejected"));
    }
}
