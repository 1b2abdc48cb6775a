//! Bearer-token authentication for the operator routes.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::info;

use crate::state::AppState;

/// Middleware gating the contest execute/reset routes. Settlement is an
/// operator action, never a public one.
pub async fn operator_auth(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected) = app_state.operator_token.as_deref() else {
        info!("Operator routes disabled: OPERATOR_TOKEN not configured");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let token = extract_bearer_token(&headers)?;
    if token != expected {
        info!("Rejected operator request with invalid token");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let auth_header = headers
        .get("authorization")
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_str()
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::BAD_REQUEST)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc123"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        let headers = HeaderMap::new();
        assert_eq!(
            extract_bearer_token(&headers).unwrap_err(),
            StatusCode::UNAUTHORIZED
        );

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc123"));
        assert_eq!(
            extract_bearer_token(&headers).unwrap_err(),
            StatusCode::BAD_REQUEST
        );
    }
}
