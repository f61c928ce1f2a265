use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::{on, MethodFilter, MethodRouter},
    Json,
};

use crate::app::dto::{AddressResponse, CreateAddressRequest, UpdateAddressRequest, WebResponse};
use crate::app::errors::ApiError;
use crate::app::extract::JsonBody;
use crate::app::usecase::AddressUseCase;
use crate::catalog::Endpoint;
use crate::context::AuthContext;

pub struct AddressController {
    use_case: Arc<AddressUseCase>,
}

impl AddressController {
    pub fn new(use_case: Arc<AddressUseCase>) -> Self {
        Self { use_case }
    }

    pub(super) fn handler(self: &Arc<Self>, endpoint: Endpoint, filter: MethodFilter) -> Option<MethodRouter> {
        let route = match endpoint {
            Endpoint::ListAddresses => on(filter, list),
            Endpoint::CreateAddress => on(filter, create),
            Endpoint::UpdateAddress => on(filter, update),
            Endpoint::GetAddress => on(filter, get),
            Endpoint::DeleteAddress => on(filter, delete),
            _ => return None,
        };
        Some(route.layer(Extension(Arc::clone(self))))
    }
}

type AddressResult = Result<Json<WebResponse<AddressResponse>>, ApiError>;

pub async fn list(
    Extension(controller): Extension<Arc<AddressController>>,
    Extension(auth): Extension<AuthContext>,
    Path(contact_id): Path<String>,
) -> Result<Json<WebResponse<Vec<AddressResponse>>>, ApiError> {
    let addresses = controller.use_case.list(auth.user_id(), &contact_id)?;
    Ok(Json(WebResponse::ok(addresses)))
}

pub async fn create(
    Extension(controller): Extension<Arc<AddressController>>,
    Extension(auth): Extension<AuthContext>,
    Path(contact_id): Path<String>,
    JsonBody(body): JsonBody<CreateAddressRequest>,
) -> AddressResult {
    let address = controller
        .use_case
        .create(auth.user_id(), &contact_id, body)
        .inspect_err(|e| tracing::warn!(%contact_id, error = %e, "failed to create address"))?;
    Ok(Json(WebResponse::ok(address)))
}

pub async fn update(
    Extension(controller): Extension<Arc<AddressController>>,
    Extension(auth): Extension<AuthContext>,
    Path((contact_id, address_id)): Path<(String, String)>,
    JsonBody(body): JsonBody<UpdateAddressRequest>,
) -> AddressResult {
    let address = controller
        .use_case
        .update(auth.user_id(), &contact_id, &address_id, body)?;
    Ok(Json(WebResponse::ok(address)))
}

pub async fn get(
    Extension(controller): Extension<Arc<AddressController>>,
    Extension(auth): Extension<AuthContext>,
    Path((contact_id, address_id)): Path<(String, String)>,
) -> AddressResult {
    let address = controller.use_case.get(auth.user_id(), &contact_id, &address_id)?;
    Ok(Json(WebResponse::ok(address)))
}

pub async fn delete(
    Extension(controller): Extension<Arc<AddressController>>,
    Extension(auth): Extension<AuthContext>,
    Path((contact_id, address_id)): Path<(String, String)>,
) -> Result<Json<WebResponse<bool>>, ApiError> {
    let done = controller.use_case.delete(auth.user_id(), &contact_id, &address_id)?;
    Ok(Json(WebResponse::ok(done)))
}
