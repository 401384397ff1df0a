#![forbid(unsafe_code)]

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

// Conservative cap on a single catalog request.
const REQUEST_TIMEOUT_SECS: u64 = 10;

// ***************************************************************************
//                              Wire Definitions
// ***************************************************************************
// ---------------------------------------------------------------------------
// Game:
// ---------------------------------------------------------------------------
/** A game as received from the catalog service.  This mirrors the published
 * wire format rather than reusing the server's type, keeping the client
 * compilable against the contract alone.
 */
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Game {
    pub id: i32,
    pub name: String,
    pub developer: String,
    pub platform: String,
    #[serde(rename = "releaseYear")]
    pub release_year: i32,
    pub rating: f64,
}

// ---------------------------------------------------------------------------
// RespEnvelope:
// ---------------------------------------------------------------------------
// A missing success flag deserializes to false and is treated as an
// invalid response, per the client-consumed contract.
#[derive(Debug, Deserialize)]
struct RespEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<Game>,
}

// ***************************************************************************
//                                  Errors
// ***************************************************************************
/// FetchError enumerates the ways a single catalog query can fail.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network unreachable, DNS failure, connection reset, timeout.
    #[error("{}", .0)]
    Transport(String),

    /// The service answered with a non-success status code.
    #[error("Failed to load game data. Status: {}", .0)]
    HttpStatus(u16),

    /// Undecodable body, or a success flag that is false or missing.
    #[error("Invalid response from server")]
    InvalidResponse,
}

// ***************************************************************************
//                              View State Machine
// ***************************************************************************
// ---------------------------------------------------------------------------
// ViewState:
// ---------------------------------------------------------------------------
/** Exactly one of these is presented at any time.  Loading fully replaces
 * the previous state's content; an Error never keeps stale results around.
 */
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error(String),
    Success(Vec<Game>),
}

// ---------------------------------------------------------------------------
// QueryToken:
// ---------------------------------------------------------------------------
/** Identity of one initiated query.  A completion is applied only when its
 * token still matches the view's latest generation, so an earlier, slower
 * request can never overwrite a later, faster one.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryToken {
    generation: u64,
}

// ---------------------------------------------------------------------------
// GamesView:
// ---------------------------------------------------------------------------
pub struct GamesView {
    base_url: String,
    http: reqwest::Client,
    search: String,
    generation: u64,
    state: ViewState,
}

impl GamesView {
    // -----------------------------------------------------------------------
    // new:
    // -----------------------------------------------------------------------
    /** Create a view pointed at the catalog service.  The view starts in
     * Loading; callers issue the initial query with current_token().
     */
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            search: String::new(),
            generation: 0,
            state: ViewState::Loading,
        })
    }

    // -----------------------------------------------------------------------
    // accessors:
    // -----------------------------------------------------------------------
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    /** Token for the query generation currently in flight. */
    pub fn current_token(&self) -> QueryToken {
        QueryToken { generation: self.generation }
    }

    // -----------------------------------------------------------------------
    // set_search:
    // -----------------------------------------------------------------------
    /** Record a new search term and begin a fresh query cycle.  Any prior
     * in-flight query is superseded from this moment on.
     */
    pub fn set_search(&mut self, term: &str) -> QueryToken {
        self.search = term.to_string();
        self.begin_query()
    }

    // -----------------------------------------------------------------------
    // clear_search:
    // -----------------------------------------------------------------------
    /** The no-results affordance: drop the term and re-query the unfiltered
     * catalog.
     */
    pub fn clear_search(&mut self) -> QueryToken {
        self.set_search("")
    }

    // -----------------------------------------------------------------------
    // retry:
    // -----------------------------------------------------------------------
    /** The error-state affordance: re-issue the current term in full. */
    pub fn retry(&mut self) -> QueryToken {
        self.begin_query()
    }

    fn begin_query(&mut self) -> QueryToken {
        self.generation += 1;
        self.state = ViewState::Loading;
        QueryToken { generation: self.generation }
    }

    // -----------------------------------------------------------------------
    // fetch:
    // -----------------------------------------------------------------------
    /** Perform the HTTP GET for the current search term.  The token rides
     * along unchanged so the caller can pair the completion with apply().
     */
    pub async fn fetch(&self, token: QueryToken) -> (QueryToken, Result<Vec<Game>, FetchError>) {
        (token, self.fetch_games().await)
    }

    async fn fetch_games(&self) -> Result<Vec<Game>, FetchError> {
        let url = format!("{}/api/games", self.base_url);
        let mut request = self.http.get(&url);
        if !self.search.is_empty() {
            request = request.query(&[("search", self.search.as_str())]);
        }

        let resp = request.send().await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = resp.text().await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        decode_envelope(&body)
    }

    // -----------------------------------------------------------------------
    // apply:
    // -----------------------------------------------------------------------
    /** Apply a completed query.  Completions from superseded generations are
     * discarded outright; a failure replaces any previously shown records.
     */
    pub fn apply(&mut self, token: QueryToken, result: Result<Vec<Game>, FetchError>) {
        if token.generation != self.generation {
            return;
        }
        self.state = match result {
            Ok(games) => ViewState::Success(games),
            Err(e) => ViewState::Error(
                format!("Failed to load game data. Please refresh the page. ({})", e)),
        };
    }

    // -----------------------------------------------------------------------
    // run_query:
    // -----------------------------------------------------------------------
    /** Fetch and apply in one step, for callers that await serially. */
    pub async fn run_query(&mut self, token: QueryToken) {
        let (token, result) = self.fetch(token).await;
        self.apply(token, result);
    }
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// decode_envelope:
// ---------------------------------------------------------------------------
/** Decode a response body into the record list, enforcing the success flag. */
fn decode_envelope(body: &str) -> Result<Vec<Game>, FetchError> {
    let envelope: RespEnvelope =
        serde_json::from_str(body).map_err(|_| FetchError::InvalidResponse)?;
    if !envelope.success {
        return Err(FetchError::InvalidResponse);
    }
    Ok(envelope.data)
}
