#![forbid(unsafe_code)]

use lazy_static::lazy_static;
use poem::http::Method;
use poem::middleware::Cors;
use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;

// GLS Utilities
use crate::utils::catalog::Catalog;
use crate::utils::config::{init_runtime_context, RuntimeCtx};
use crate::v1::games_list::ListGamesApi;
use crate::v1::health_check::HealthCheckApi;

// Modules
pub mod client;
pub mod utils;
pub mod v1;

// ***************************************************************************
//                                Constants
// ***************************************************************************
pub const SERVER_NAME : &str = "GlsServer"; // for poem logging

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Lazily initialize the parameters variable so that it has a 'static lifetime.
// We exit if we can't establish the runtime context.
lazy_static! {
    pub static ref RUNTIME_CTX: RuntimeCtx = init_runtime_context();
}

// The catalog is a fixture: constructed once at first use, never mutated,
// shared across requests without synchronization.
lazy_static! {
    pub static ref CATALOG: Catalog = Catalog::standard();
}

// ***************************************************************************
//                              Public Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// build_app:
// ---------------------------------------------------------------------------
/** Assemble the complete HTTP application: the catalog and health endpoints,
 * the generated OpenAPI spec and Swagger UI, and the CORS policy that admits
 * any origin for GET and preflight OPTIONS.  Factored out of main so tests
 * can exercise the same endpoint tree the server runs.
 */
pub fn build_app(server_url: &str) -> impl Endpoint {
    // Create a tuple with all the endpoint structs.
    let endpoints = (ListGamesApi, HealthCheckApi);
    let api_service =
        OpenApiService::new(endpoints, "GLS Server", env!("CARGO_PKG_VERSION"))
            .server(server_url.to_string());

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/docs", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .nest("/", api_service)
        .with(Cors::new().allow_methods([Method::GET, Method::OPTIONS]))
}
