use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    routing::MethodRouter,
};

use crate::app::errors::json_error;
use crate::app::usecase::UserUseCase;
use crate::context::AuthContext;

#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<UserUseCase>,
}

pub async fn auth_middleware(State(state): State<AuthState>, mut req: Request, next: Next) -> Response {
    let Some(token) = extract_bearer(req.headers()) else {
        tracing::debug!(path = %req.uri().path(), "missing bearer token");
        return unauthorized();
    };

    let user_id = match state.users.verify(token) {
        Ok(user_id) => user_id,
        Err(_) => {
            tracing::debug!(path = %req.uri().path(), "rejected bearer token");
            return unauthorized();
        }
    };

    req.extensions_mut().insert(AuthContext::new(user_id));
    next.run(req).await
}

fn unauthorized() -> Response {
    json_error(StatusCode::UNAUTHORIZED, "Unauthorized")
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// The chain-wide interceptor installed before authenticated routes.
#[derive(Clone)]
pub struct Interceptor {
    state: AuthState,
}

impl Interceptor {
    pub const NAME: &'static str = "auth";

    pub fn new(users: Arc<UserUseCase>) -> Self {
        Self {
            state: AuthState { users },
        }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Wraps one binding; only matched routes pass through the check.
    pub fn apply(&self, handler: MethodRouter) -> MethodRouter {
        handler.route_layer(axum::middleware::from_fn_with_state(
            self.state.clone(),
            auth_middleware,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn extracts_bearer_tokens() {
        assert_eq!(extract_bearer(&headers("Bearer abc")), Some("abc"));
        assert_eq!(extract_bearer(&headers("Bearer   abc  ")), Some("abc"));
    }

    #[test]
    fn rejects_other_schemes_and_blank_tokens() {
        assert_eq!(extract_bearer(&headers("Basic abc")), None);
        assert_eq!(extract_bearer(&headers("Bearer ")), None);
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }
}
