use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::api::envelope::{EmptyPayload, Envelope};
use crate::api::errors::ApiError;
use crate::api::router::AppState;
use crate::application::dto::{CreateDocumentRequest, CreatedDocumentDto, DocumentDto};

pub const CONTENT_HASH_HEADER: &str = "x-content-hash";

/// POST /
/// Store a new document
#[utoipa::path(
    post,
    path = "/",
    tag = "documents",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document stored", body = Envelope<CreatedDocumentDto>),
        (status = 400, description = "Invalid content or extension", body = Envelope<EmptyPayload>),
        (status = 500, description = "Store failure", body = Envelope<EmptyPayload>)
    )
)]
pub async fn create_document_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateDocumentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<CreatedDocumentDto>>), ApiError> {
    let Json(request) = payload?;

    let ctx = state.operation_context();
    let created = state.create_use_case.execute(&ctx, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(StatusCode::CREATED, created)),
    ))
}

/// GET /{id}
/// Fetch a document with its metadata
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "documents",
    params(
        ("id" = String, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Document found", body = Envelope<DocumentDto>),
        (status = 400, description = "Malformed document ID", body = Envelope<EmptyPayload>),
        (status = 404, description = "Document not found", body = Envelope<EmptyPayload>),
        (status = 500, description = "Store failure", body = Envelope<EmptyPayload>)
    )
)]
pub async fn get_document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<DocumentDto>>, ApiError> {
    let ctx = state.operation_context();
    let document = state.get_use_case.execute(&ctx, &id).await?;

    Ok(Json(Envelope::success(
        StatusCode::OK,
        DocumentDto::from(document),
    )))
}

/// GET /{id}/raw
/// Fetch only the document text
#[utoipa::path(
    get,
    path = "/{id}/raw",
    tag = "documents",
    params(
        ("id" = String, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Raw document content", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed document ID", body = Envelope<EmptyPayload>),
        (status = 404, description = "Document not found", body = Envelope<EmptyPayload>)
    )
)]
pub async fn raw_document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let ctx = state.operation_context();
    let document = state.get_use_case.execute(&ctx, &id).await?;

    let mut response = document.content().to_string().into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    // hex digests are always valid header values
    if let Ok(value) = HeaderValue::from_str(document.content_hash().as_hex()) {
        headers.insert(HeaderName::from_static(CONTENT_HASH_HEADER), value);
    }

    Ok(response)
}
