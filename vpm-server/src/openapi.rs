//! OpenAPI documentation configuration
//!
//! Generates the OpenAPI 3 specification served at `/api-docs/openapi.json`.

use utoipa::OpenApi;
use vpm_core::{Product, RankedProduct};

use crate::handlers::{
    HealthResponse, ReadyResponse, SimilarityRequest, SimilarityResponse, UploadResponse,
};

/// Visual Product Matcher API - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Visual Product Matcher API",
        version = "0.1.0",
        description = r#"
## Visual product search

Upload or link an image and get back catalog products ranked by similarity.

### How It Works

1. **Upload** a query image via `POST /upload` (or use any absolute image URL)
2. **Search** with `POST /similarity` using the returned `imageUrl`
3. Refine locally by minimum score; ordering never changes

Similarity is a deterministic placeholder: a SHA-256 hash of the image
reference and product identity blended with each product's seed score.
No image content is analysed.
"#,
        license(name = "MIT OR Apache-2.0")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    tags(
        (name = "Search", description = "Query image upload and similarity ranking"),
        (name = "Catalog", description = "Product catalog access"),
        (name = "Health", description = "Service health and readiness endpoints")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::health::ready,
        crate::handlers::products::list_products,
        crate::handlers::similarity::similarity_handler,
        crate::handlers::upload::upload_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ReadyResponse,
            Product,
            RankedProduct,
            SimilarityRequest,
            SimilarityResponse,
            UploadResponse,
        )
    )
)]
pub struct ApiDoc;
