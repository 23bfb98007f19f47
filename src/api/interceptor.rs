use super::error::{ApiError, TransportError, NETWORK_ERROR};
use tracing::debug;

/// Relabels transport failures before they reach service callers.
///
/// - a failure whose message is [`NETWORK_ERROR`] becomes [`ApiError::Connection`],
///   whatever else it carries;
/// - an HTTP 401 becomes [`ApiError::Unauthorized`];
/// - everything else is passed through as [`ApiError::Transport`].
///
/// No error is ever dropped.
pub fn intercept(error: TransportError) -> ApiError {
    if error.message == NETWORK_ERROR {
        debug!(status = ?error.status, "network failure relabeled");
        return ApiError::Connection;
    }

    if error.status == Some(401) {
        debug!("unauthorized response relabeled");
        return ApiError::Unauthorized;
    }

    ApiError::Transport(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_error_wins_over_status() {
        let error = TransportError {
            message: NETWORK_ERROR.to_string(),
            status: Some(401),
            body: Some(json!({"detail": "ignored"})),
        };
        assert_eq!(intercept(error), ApiError::Connection);
        assert_eq!(intercept(TransportError::network()), ApiError::Connection);
    }

    #[test]
    fn test_unauthorized_is_opaque() {
        let mapped = intercept(TransportError::status(401, Some(json!({"error": "token expired"}))));
        assert_eq!(mapped, ApiError::Unauthorized);
        assert_eq!(mapped.to_string(), "something went wrong");
    }

    #[test]
    fn test_other_errors_pass_through_unchanged() {
        for original in [
            TransportError::status(404, None),
            TransportError::status(500, Some(json!("boom"))),
            TransportError::status(403, None),
            TransportError::other("network error"),
        ] {
            assert_eq!(intercept(original.clone()), ApiError::Transport(original.clone()));
        }
    }

    #[test]
    fn test_connection_message() {
        assert_eq!(ApiError::Connection.to_string(), "connection error");
    }
}
