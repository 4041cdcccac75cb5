// SPDX-License-Identifier: Apache-2.0

use crate::http::handlers::{api_error_response, status_for};
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use baret_api::ApiError;
use baret_model::Role;

/// Identity resolved from the bearer table, stored in request extensions
/// for the role-gated handlers.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: String,
    pub role: Role,
}

/// `/v1/version` stays public so deploy tooling can probe the build
/// without credentials; the infra endpoints are outside `/v1` entirely.
fn requires_auth(path: &str) -> bool {
    path.starts_with("/v1/") && path != "/v1/version"
}

pub(crate) async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if !state.api.require_auth || !requires_auth(request.uri().path()) {
        return next.run(request).await;
    }

    let presented = request
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    let resolved = presented.and_then(|token| state.api.resolve_token(token));
    match resolved {
        Some(entry) => {
            let context = AuthContext {
                user: entry.user.clone(),
                role: entry.role,
            };
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        None => {
            let err = ApiError::unauthenticated();
            api_error_response(status_for(err.code), err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_and_infra_paths_skip_the_token_check() {
        assert!(!requires_auth("/healthz"));
        assert!(!requires_auth("/readyz"));
        assert!(!requires_auth("/metrics"));
        assert!(!requires_auth("/v1/version"));
        assert!(requires_auth("/v1/dashboard/summary"));
        assert!(requires_auth("/v1/export/risk-assessments.pdf"));
    }
}
