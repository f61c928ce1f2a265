use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{on, MethodFilter, MethodRouter},
    Json,
};

use crate::app::dto::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse, WebResponse};
use crate::app::errors::ApiError;
use crate::app::extract::JsonBody;
use crate::app::usecase::UserUseCase;
use crate::catalog::Endpoint;
use crate::context::AuthContext;

pub struct UserController {
    use_case: Arc<UserUseCase>,
}

impl UserController {
    pub fn new(use_case: Arc<UserUseCase>) -> Self {
        Self { use_case }
    }

    pub(super) fn handler(self: &Arc<Self>, endpoint: Endpoint, filter: MethodFilter) -> Option<MethodRouter> {
        let route = match endpoint {
            Endpoint::RegisterUser => on(filter, register),
            Endpoint::LoginUser => on(filter, login),
            Endpoint::LogoutUser => on(filter, logout),
            Endpoint::UpdateCurrentUser => on(filter, update),
            Endpoint::CurrentUser => on(filter, current),
            _ => return None,
        };
        Some(route.layer(Extension(Arc::clone(self))))
    }
}

type UserResult = Result<Json<WebResponse<UserResponse>>, ApiError>;

pub async fn register(
    Extension(controller): Extension<Arc<UserController>>,
    JsonBody(body): JsonBody<RegisterUserRequest>,
) -> UserResult {
    let user = controller.use_case.create(body).inspect_err(|e| {
        tracing::warn!(error = %e, "failed to register user");
    })?;
    Ok(Json(WebResponse::ok(user)))
}

pub async fn login(
    Extension(controller): Extension<Arc<UserController>>,
    JsonBody(body): JsonBody<LoginUserRequest>,
) -> UserResult {
    let user = controller.use_case.login(body).inspect_err(|e| {
        tracing::warn!(error = %e, "failed to login user");
    })?;
    Ok(Json(WebResponse::ok(user)))
}

pub async fn current(
    Extension(controller): Extension<Arc<UserController>>,
    Extension(auth): Extension<AuthContext>,
) -> UserResult {
    let user = controller.use_case.current(auth.user_id())?;
    Ok(Json(WebResponse::ok(user)))
}

pub async fn update(
    Extension(controller): Extension<Arc<UserController>>,
    Extension(auth): Extension<AuthContext>,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> UserResult {
    let user = controller
        .use_case
        .update(auth.user_id(), body)
        .inspect_err(|e| tracing::warn!(user_id = %auth.user_id(), error = %e, "failed to update user"))?;
    Ok(Json(WebResponse::ok(user)))
}

pub async fn logout(
    Extension(controller): Extension<Arc<UserController>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<WebResponse<bool>>, ApiError> {
    let done = controller.use_case.logout(auth.user_id())?;
    tracing::info!(user_id = %auth.user_id(), "user logged out");
    Ok(Json(WebResponse::ok(done)))
}
