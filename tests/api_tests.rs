use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use lume::{create_router, AppState, AssetStore};

const ARROW_FILLED: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M1 1"/></svg>"#;
const ARROW_STROKE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M2 2"/></svg>"#;
const CALENDAR: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"><rect/></svg>"#;
const HOME: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><circle/></svg>"#;

/// Create a test app over a temporary asset directory.
fn create_test_app() -> (TempDir, axum::Router) {
    let dir = tempfile::tempdir().unwrap();
    let icons = dir.path().join("icons");
    std::fs::create_dir(&icons).unwrap();

    std::fs::write(icons.join("arrow-filled.svg"), ARROW_FILLED).unwrap();
    std::fs::write(icons.join("arrow-stroke.svg"), ARROW_STROKE).unwrap();
    std::fs::write(icons.join("calendar.svg"), CALENDAR).unwrap();
    std::fs::write(icons.join("home-duo_solid.svg"), HOME).unwrap();
    std::fs::write(icons.join("photo.png"), [0x89u8, 0x50, 0x4e, 0x47]).unwrap();
    std::fs::write(icons.join("readme.txt"), "not an icon").unwrap();
    std::fs::write(dir.path().join("style.css"), "body {}").unwrap();

    let state = AppState::new(AssetStore::new(&icons), dir.path());
    (dir, create_router(state))
}

/// Helper to get response body as string.
async fn body_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_string(response.into_body()).await)
}

async fn post_json(app: &axum::Router, uri: &str, json: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_string(response.into_body()).await)
}

/// Poll preload progress until the session leaves the loading state.
async fn wait_for_previews(app: &axum::Router) -> serde_json::Value {
    for _ in 0..500 {
        let (_, body) = get(app, "/ui/progress").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        if json["state"] != "pending" {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("previews never finished loading");
}

/// Open the page, then wait for its previews.
async fn open_page(app: &axum::Router, uri: &str) -> String {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK);
    wait_for_previews(app).await;
    body
}

// ============================================================================
// Health endpoint tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, app) = create_test_app();

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

// ============================================================================
// Listing endpoint tests
// ============================================================================

#[tokio::test]
async fn test_list_icons() {
    let (_dir, app) = create_test_app();

    let (status, body) = get(&app, "/api/icons").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let icons = json.as_array().unwrap();
    assert_eq!(icons.len(), 4);

    let mut filenames: Vec<&str> = icons
        .iter()
        .map(|i| i["filename"].as_str().unwrap())
        .collect();
    filenames.sort();
    assert_eq!(
        filenames,
        vec![
            "arrow-filled.svg",
            "arrow-stroke.svg",
            "calendar.svg",
            "home-duo_solid.svg"
        ]
    );

    let calendar = icons
        .iter()
        .find(|i| i["filename"] == "calendar.svg")
        .unwrap();
    assert_eq!(calendar["name"], "calendar");
    assert_eq!(calendar["size"], CALENDAR.len());
    assert_eq!(calendar["dimensions"], "32×32");
    assert_eq!(calendar["url"], "/icons/calendar.svg");
    assert_eq!(calendar["downloadUrl"], "/api/download/calendar.svg");
    assert!(calendar["lastModified"].is_string());

    let home = icons
        .iter()
        .find(|i| i["filename"] == "home-duo_solid.svg")
        .unwrap();
    assert_eq!(home["dimensions"], "Unknown");
}

#[tokio::test]
async fn test_list_icons_unreadable_directory() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(AssetStore::new(dir.path().join("missing")), dir.path());
    let app = create_router(state);

    let (status, body) = get(&app, "/api/icons").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Failed to read icons directory");
}

// ============================================================================
// Download endpoint tests
// ============================================================================

#[tokio::test]
async fn test_download_icon() {
    let (_dir, app) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/download/arrow-stroke.svg")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/svg+xml"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"arrow-stroke.svg\""
    );

    let body = body_string(response.into_body()).await;
    assert_eq!(body, ARROW_STROKE);
}

#[tokio::test]
async fn test_download_rejects_other_extensions() {
    let (_dir, app) = create_test_app();

    let (status, body) = get(&app, "/api/download/photo.png").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Only SVG files are allowed");
}

#[tokio::test]
async fn test_download_rejects_path_traversal() {
    let (_dir, app) = create_test_app();

    let (status, _) = get(&app, "/api/download/..%2Fstyle.svg").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_name_with_inner_dots() {
    let (dir, app) = create_test_app();
    std::fs::write(dir.path().join("icons").join("v1..2.svg"), CALENDAR).unwrap();

    let (_, body) = get(&app, "/api/icons").await;
    assert!(body.contains(r#""filename":"v1..2.svg""#));

    let (status, body) = get(&app, "/api/download/v1..2.svg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, CALENDAR);
}

#[tokio::test]
async fn test_download_escapes_quotes_in_disposition() {
    let (dir, app) = create_test_app();
    std::fs::write(dir.path().join("icons").join("say\"hi\".svg"), HOME).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/download/say%22hi%22.svg")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        r#"attachment; filename="say\"hi\".svg""#
    );
}

#[tokio::test]
async fn test_download_missing_icon() {
    let (_dir, app) = create_test_app();

    let (status, body) = get(&app, "/api/download/missing.svg").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Icon not found");
}

// ============================================================================
// Static file tests
// ============================================================================

#[tokio::test]
async fn test_icon_passthrough() {
    let (_dir, app) = create_test_app();

    let (status, body) = get(&app, "/icons/calendar.svg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, CALENDAR);
}

#[tokio::test]
async fn test_public_root_is_served() {
    let (_dir, app) = create_test_app();

    let (status, body) = get(&app, "/style.css").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "body {}");
}

// ============================================================================
// Page and fragment tests
// ============================================================================

#[tokio::test]
async fn test_index_renders_all_groups() {
    let (_dir, app) = create_test_app();

    let page = open_page(&app, "/").await;
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains(r#"<main id="results">"#));

    let (status, body) = get(&app, "/ui/grid").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Showing all 3 icons (4 total variants)"));
    assert!(body.contains(r#"data-icon-group="arrow""#));
    assert!(body.contains(r#"data-icon-group="calendar""#));
    assert!(body.contains(r#"data-icon-group="home""#));
    assert!(body.contains(r#"<option value="filled" selected>Filled</option>"#));
}

#[tokio::test]
async fn test_index_applies_query() {
    let (_dir, app) = create_test_app();

    let page = open_page(&app, "/?q=CAL&sort=name-desc&view=large").await;
    assert!(page.contains(r#"value="CAL""#));
    assert!(page.contains(r#"<option value="name-desc" selected>"#));
    assert!(page.contains(r#"<option value="large" selected>"#));

    let (_, body) = get(&app, "/ui/grid?q=CAL&sort=name-desc&view=large").await;
    assert!(body.contains("Showing 1 of 3 icons (4 total variants)"));
    assert!(body.contains("minmax(280px, 1fr)"));
    assert!(!body.contains(r#"data-icon-group="arrow""#));
}

#[tokio::test]
async fn test_progress_reports_completed_preload() {
    let (_dir, app) = create_test_app();
    get(&app, "/").await;

    let progress = wait_for_previews(&app).await;

    assert_eq!(progress["state"], "ready");
    assert_eq!(progress["loaded"], 4);
    assert_eq!(progress["total"], 4);
    assert_eq!(progress["percent"], 100);
}

#[tokio::test]
async fn test_progress_before_first_page_is_pending() {
    let (_dir, app) = create_test_app();

    let (status, body) = get(&app, "/ui/progress").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["state"], "pending");
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn test_index_with_unreadable_directory_shows_error_panel() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(AssetStore::new(dir.path().join("missing")), dir.path());
    let app = create_router(state);

    let page = open_page(&app, "/").await;

    assert!(page.contains("Failed to load icons"));
    let progress = wait_for_previews(&app).await;
    assert_eq!(progress["state"], "failed");
}

#[tokio::test]
async fn test_reload_shows_rewritten_icon() {
    let (dir, app) = create_test_app();
    open_page(&app, "/").await;

    std::fs::write(
        dir.path().join("icons").join("calendar.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 48 40"><path d="NEW-PATH"/></svg>"#,
    )
    .unwrap();
    open_page(&app, "/").await;

    let (_, card) = get(&app, "/ui/cards/calendar").await;
    assert!(card.contains("NEW-PATH"));
    assert!(card.contains("48×40"));
    assert!(!card.contains("<rect"));
}

#[tokio::test]
async fn test_grid_plain_search() {
    let (_dir, app) = create_test_app();
    open_page(&app, "/").await;

    let (status, body) = get(&app, "/ui/grid?q=ar").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"data-icon-group="arrow""#));
    assert!(body.contains(r#"data-icon-group="calendar""#));
    assert!(!body.contains(r#"data-icon-group="home""#));
}

#[tokio::test]
async fn test_grid_invalid_regex_shows_no_results() {
    let (_dir, app) = create_test_app();
    open_page(&app, "/").await;

    let (status, body) = get(&app, "/ui/grid?q=%28arrow&regex=true").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No icons found matching your search criteria."));
    assert!(!body.contains("icon-card"));
}

#[tokio::test]
async fn test_grid_regex_search() {
    let (_dir, app) = create_test_app();
    open_page(&app, "/").await;

    let (_, body) = get(&app, "/ui/grid?q=%5Ehome%7Ccalendar%24&regex=true").await;

    assert!(body.contains(r#"data-icon-group="home""#));
    assert!(body.contains(r#"data-icon-group="calendar""#));
    assert!(!body.contains(r#"data-icon-group="arrow""#));
}

#[tokio::test]
async fn test_select_variant() {
    let (_dir, app) = create_test_app();
    open_page(&app, "/").await;

    let (status, body) = post_json(&app, "/ui/cards/arrow/variant", r#"{"variant":"stroke"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<option value="stroke" selected>Stroke</option>"#));
    assert!(body.contains(r#"data-url="/api/download/arrow-stroke.svg""#));
    assert!(body.contains("M2 2"));

    let (_, card) = get(&app, "/ui/cards/arrow").await;
    assert!(card.contains(r#"data-filename="arrow-stroke.svg""#));
}

#[tokio::test]
async fn test_select_variant_errors() {
    let (_dir, app) = create_test_app();
    open_page(&app, "/").await;

    let (status, _) = post_json(&app, "/ui/cards/arrow/variant", r#"{"variant":"thin"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&app, "/ui/cards/arrow/variant", r#"{"variant":"bold"}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_json(&app, "/ui/cards/nope/variant", r#"{"variant":"filled"}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_copy_markup() {
    let (_dir, app) = create_test_app();
    open_page(&app, "/").await;

    let (status, body) = post_json(&app, "/ui/cards/arrow/copy", "").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["markup"], ARROW_FILLED);
    assert_eq!(json["confirmMs"], 1500);
    assert!(json["card"].as_str().unwrap().contains("Copied!"));
}

#[tokio::test]
async fn test_card_for_unknown_group() {
    let (_dir, app) = create_test_app();
    open_page(&app, "/").await;

    let (status, body) = get(&app, "/ui/cards/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Icon group not found: unknown");
}
