//! End-to-end tests for the catalog service HTTP surface, run against the
//! same endpoint tree the server binary mounts.

use poem::test::TestClient;
use poem::Endpoint;

use gls_server::build_app;

fn client() -> TestClient<impl Endpoint> {
    TestClient::new(build_app("http://localhost:5000"))
}

// ---------------------------------------------------------------------------
// /api/games
// ---------------------------------------------------------------------------
#[tokio::test]
async fn list_all_games_unfiltered() {
    let cli = client();
    let resp = cli.get("/api/games").send().await;
    resp.assert_status_is_ok();

    let json = resp.json().await;
    let obj = json.value().object();
    assert!(obj.get("success").bool());
    assert_eq!(obj.get("count").i64(), 6);

    let data = obj.get("data").array();
    assert_eq!(data.len(), 6);

    // Original definition order is preserved.
    assert_eq!(data.get(0).object().get("id").i64(), 1);
    assert_eq!(data.get(0).object().get("name").string(),
               "The Legend of Zelda: Breath of the Wild");
    assert_eq!(data.get(5).object().get("name").string(), "Hollow Knight");
}

#[tokio::test]
async fn search_matches_single_record() {
    let cli = client();
    let resp = cli.get("/api/games").query("search", &"witcher").send().await;
    resp.assert_status_is_ok();

    let json = resp.json().await;
    let obj = json.value().object();
    assert!(obj.get("success").bool());
    assert_eq!(obj.get("count").i64(), 1);

    let data = obj.get("data").array();
    assert_eq!(data.len(), 1);
    let game = data.get(0).object();
    assert_eq!(game.get("name").string(), "The Witcher 3: Wild Hunt");
    assert_eq!(game.get("developer").string(), "CD Projekt Red");
    assert_eq!(game.get("releaseYear").i64(), 2015);
}

#[tokio::test]
async fn search_is_case_insensitive() {
    let cli = client();

    let upper = cli.get("/api/games").query("search", &"ZELDA").send().await;
    upper.assert_status_is_ok();
    let upper_json = upper.json().await;
    let upper_obj = upper_json.value().object();

    let lower = cli.get("/api/games").query("search", &"zelda").send().await;
    lower.assert_status_is_ok();
    let lower_json = lower.json().await;
    let lower_obj = lower_json.value().object();

    assert_eq!(upper_obj.get("count").i64(), 1);
    assert_eq!(lower_obj.get("count").i64(), 1);
    assert_eq!(upper_obj.get("data").array().get(0).object().get("id").i64(),
               lower_obj.get("data").array().get(0).object().get("id").i64());
}

#[tokio::test]
async fn whitespace_search_returns_everything() {
    let cli = client();
    let resp = cli.get("/api/games").query("search", &"   ").send().await;
    resp.assert_status_is_ok();

    let json = resp.json().await;
    assert_eq!(json.value().object().get("count").i64(), 6);
}

#[tokio::test]
async fn unmatched_search_is_success_with_empty_data() {
    let cli = client();
    let resp = cli.get("/api/games").query("search", &"xyzzynonexistent").send().await;
    resp.assert_status_is_ok();

    let json = resp.json().await;
    let obj = json.value().object();
    assert!(obj.get("success").bool());
    assert_eq!(obj.get("count").i64(), 0);
    assert_eq!(obj.get("data").array().len(), 0);
}

#[tokio::test]
async fn count_always_matches_data_length() {
    let cli = client();
    for term in ["", "the", "CD", "hollow", "xyzzynonexistent"] {
        let resp = cli.get("/api/games").query("search", &term).send().await;
        resp.assert_status_is_ok();

        let json = resp.json().await;
        let obj = json.value().object();
        assert_eq!(obj.get("count").i64(), obj.get("data").array().len() as i64);
    }
}

// ---------------------------------------------------------------------------
// /health
// ---------------------------------------------------------------------------
#[tokio::test]
async fn health_check_reports_running() {
    let cli = client();
    let resp = cli.get("/health").send().await;
    resp.assert_status_is_ok();

    let json = resp.json().await;
    assert_eq!(json.value().object().get("status").string(), "API is running");
}

// ---------------------------------------------------------------------------
// CORS
// ---------------------------------------------------------------------------
#[tokio::test]
async fn cors_preflight_succeeds_for_get() {
    let cli = client();
    let resp = cli
        .options("/api/games")
        .header("Origin", "http://example.com")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await;
    resp.assert_status_is_ok();
    // Preflight answers carry headers only.
    resp.assert_text("").await;
}

#[tokio::test]
async fn cross_origin_get_is_allowed() {
    let cli = client();
    let resp = cli
        .get("/api/games")
        .header("Origin", "http://example.com")
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.assert_header_exist("access-control-allow-origin");
}
