//! Mapping of planner errors to MCP errors.

use liftplan_core::PlanError;
use rmcp::ErrorData;

/// Converts a planner error, prefixed with `message`.
///
/// Errors caused by the request itself are reported as invalid parameters so
/// that the client can correct and retry; everything else is internal.
pub fn to_mcp_error(message: &str, error: &PlanError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PlanError::PlanNotFound { .. }
        | PlanError::NodeNotFound { .. }
        | PlanError::ExerciseNotFound { .. }
        | PlanError::InvalidPath { .. }
        | PlanError::InvalidInput { .. }
        | PlanError::ReadOnly { .. }
        | PlanError::SaveInProgress { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_request_errors_are_invalid_params() {
        let error = to_mcp_error("Failed to edit plan", &PlanError::ReadOnly { plan_id: 4 });
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(
            error.message,
            "Failed to edit plan: Plan 4 is read-only for this user"
        );
    }

    #[test]
    fn test_concurrent_save_is_invalid_params() {
        let error = to_mcp_error("Failed to edit plan", &PlanError::SaveInProgress { plan_id: 4 });
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_other_errors_are_internal() {
        let error = to_mcp_error(
            "Failed to save plan",
            &PlanError::reconcile("missing temporary id"),
        );
        assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    }
}
