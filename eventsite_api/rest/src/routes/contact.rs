use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use eventsite_core_contact_contracts::{ContactSendMessageError, ContactService};
use eventsite_models::contact::ContactSubmission;
use tracing::debug;

use crate::{
    errors::{error, COULD_NOT_SEND_MESSAGE, INVALID_REQUEST_BODY},
    models::contact::{ApiContactResponse, ApiContactSubmission},
};

pub const CONTACT_ROUTE: &str = "/api/mail/contact";

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(CONTACT_ROUTE, routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    payload: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            debug!(%rejection, "rejected contact form request body");
            return error(StatusCode::BAD_REQUEST, INVALID_REQUEST_BODY);
        }
    };

    let submission = match ContactSubmission::try_from(submission) {
        Ok(submission) => submission,
        Err(err) => {
            debug!(%err, "rejected invalid contact form submission");
            return error(StatusCode::BAD_REQUEST, err.to_string());
        }
    };

    match service.send_message(submission).await {
        Ok(()) => Json(ApiContactResponse::sent()).into_response(),
        Err(ContactSendMessageError::Other(err)) => {
            tracing::error!("failed to send contact message: {err:#}");
            error(StatusCode::INTERNAL_SERVER_ERROR, COULD_NOT_SEND_MESSAGE)
        }
        Err(err) => {
            tracing::error!("failed to send contact message: {err}");
            error(StatusCode::INTERNAL_SERVER_ERROR, COULD_NOT_SEND_MESSAGE)
        }
    }
}
