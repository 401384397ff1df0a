#![forbid(unsafe_code)]

use poem_openapi::{ payload::Json, Object, OpenApi };

// Static status reported to liveness probes.
const RUNNING_STATUS: &str = "API is running";

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct HealthCheckApi;

#[derive(Object, Debug)]
pub struct RespHealthCheck
{
    status: String,
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl HealthCheckApi {
    /** Liveness probe for deployment and monitoring tooling.  Always
     * succeeds and has no side effects.
     */
    #[oai(path = "/health", method = "get")]
    async fn health_check(&self) -> Json<RespHealthCheck> {
        Json(RespHealthCheck::new())
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespHealthCheck {
    fn new() -> Self {
        Self {status: RUNNING_STATUS.to_string()}
    }
}
