#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ param::Query, payload::Json, Object, OpenApi };
use anyhow::Result;

use crate::utils::catalog::GameRecord;
use crate::utils::gls_utils::{self, RequestDebug};
use log::error;

use crate::CATALOG;

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct ListGamesApi;

#[derive(Object)]
struct ReqListGames
{
    search: Option<String>,
}

#[derive(Object, Debug)]
pub struct RespListGames
{
    success: bool,
    count: i32,
    data: Vec<GameRecord>,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqListGames {
    type Req = ReqListGames;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request parameters:");
        s.push_str("\n    search: ");
        s.push_str(self.search.as_deref().unwrap_or("<absent>"));
        s
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl ListGamesApi {
    /** List the game catalog, optionally filtered by a case-insensitive
     * substring match on the name field.  Every outcome is an HTTP 200,
     * including a filter that matches nothing.
     */
    #[oai(path = "/api/games", method = "get")]
    async fn list_games(&self, http_req: &Request, search: Query<Option<String>>) -> Json<RespListGames> {
        // Package the request parameters.
        let req = ReqListGames { search: search.0 };

        // -------------------- Process Request ----------------------
        let resp = match RespListGames::process(http_req, &req) {
            Ok(r) => r,
            Err(e) => {
                // Unreachable in practice: the filter accepts any input.
                let msg = "ERROR: ".to_owned() + e.to_string().as_str();
                error!("{}", msg);
                RespListGames::new(vec!())
            }
        };

        Json(resp)
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespListGames {
    /// Create a new response.  The count always mirrors the data length.
    fn new(data: Vec<GameRecord>) -> Self {
        Self {success: true, count: data.len() as i32, data}
    }

    /// Process the request.
    fn process(http_req: &Request, req: &ReqListGames) -> Result<RespListGames, anyhow::Error> {
        // Conditional logging depending on log level.
        gls_utils::debug_request(http_req, req);

        // Filter the catalog, preserving definition order.
        let data = CATALOG.search(req.search.as_deref());
        Ok(Self::new(data))
    }
}
