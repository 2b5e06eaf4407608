use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::envelope::EmptyPayload;
use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{CreateDocumentRequest, CreatedDocumentDto, DocumentDto};

/// OpenAPI specification for the textbin API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "textbin API",
        version = "1.0.0",
        description = "Text paste storage with generated short IDs and SHA-256 content hashes"
    ),
    servers(
        (url = "http://localhost:9000", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::documents::create_document_handler,
        crate::api::handlers::documents::get_document_handler,
        crate::api::handlers::documents::raw_document_handler,
    ),
    components(
        schemas(
            CreateDocumentRequest,
            CreatedDocumentDto,
            DocumentDto,
            EmptyPayload,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "documents", description = "Document create and read operations")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
