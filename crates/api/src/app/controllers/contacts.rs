use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::{on, MethodFilter, MethodRouter},
    Json,
};

use crate::app::dto::{
    ContactResponse, CreateContactRequest, SearchContactQuery, UpdateContactRequest, WebResponse,
};
use crate::app::errors::ApiError;
use crate::app::extract::{JsonBody, QueryParams};
use crate::app::usecase::ContactUseCase;
use crate::catalog::Endpoint;
use crate::context::AuthContext;

pub struct ContactController {
    use_case: Arc<ContactUseCase>,
}

impl ContactController {
    pub fn new(use_case: Arc<ContactUseCase>) -> Self {
        Self { use_case }
    }

    pub(super) fn handler(self: &Arc<Self>, endpoint: Endpoint, filter: MethodFilter) -> Option<MethodRouter> {
        let route = match endpoint {
            Endpoint::ListContacts => on(filter, list),
            Endpoint::CreateContact => on(filter, create),
            Endpoint::UpdateContact => on(filter, update),
            Endpoint::GetContact => on(filter, get),
            Endpoint::DeleteContact => on(filter, delete),
            _ => return None,
        };
        Some(route.layer(Extension(Arc::clone(self))))
    }
}

type ContactResult = Result<Json<WebResponse<ContactResponse>>, ApiError>;

pub async fn list(
    Extension(controller): Extension<Arc<ContactController>>,
    Extension(auth): Extension<AuthContext>,
    QueryParams(query): QueryParams<SearchContactQuery>,
) -> Result<Json<WebResponse<Vec<ContactResponse>>>, ApiError> {
    let (contacts, paging) = controller.use_case.search(auth.user_id(), query)?;
    Ok(Json(WebResponse::paged(contacts, paging)))
}

pub async fn create(
    Extension(controller): Extension<Arc<ContactController>>,
    Extension(auth): Extension<AuthContext>,
    JsonBody(body): JsonBody<CreateContactRequest>,
) -> ContactResult {
    let contact = controller
        .use_case
        .create(auth.user_id(), body)
        .inspect_err(|e| tracing::warn!(user_id = %auth.user_id(), error = %e, "failed to create contact"))?;
    Ok(Json(WebResponse::ok(contact)))
}

pub async fn update(
    Extension(controller): Extension<Arc<ContactController>>,
    Extension(auth): Extension<AuthContext>,
    Path(contact_id): Path<String>,
    JsonBody(body): JsonBody<UpdateContactRequest>,
) -> ContactResult {
    let contact = controller.use_case.update(auth.user_id(), &contact_id, body)?;
    Ok(Json(WebResponse::ok(contact)))
}

pub async fn get(
    Extension(controller): Extension<Arc<ContactController>>,
    Extension(auth): Extension<AuthContext>,
    Path(contact_id): Path<String>,
) -> ContactResult {
    let contact = controller.use_case.get(auth.user_id(), &contact_id)?;
    Ok(Json(WebResponse::ok(contact)))
}

pub async fn delete(
    Extension(controller): Extension<Arc<ContactController>>,
    Extension(auth): Extension<AuthContext>,
    Path(contact_id): Path<String>,
) -> Result<Json<WebResponse<bool>>, ApiError> {
    let done = controller.use_case.delete(auth.user_id(), &contact_id)?;
    Ok(Json(WebResponse::ok(done)))
}
