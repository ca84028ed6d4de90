//! End-to-end handler tests over the embedded house seed.

mod support;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use halloween_route::config::MapSettings;
use support::seeded_app;

fn app() -> Router {
    seeded_app(MapSettings::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(app(), Request::get(uri).body(Body::empty()).unwrap()).await
}

fn ids(body: &Value) -> Vec<String> {
    body["houses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["repository"], "ok");
}

#[tokio::test]
async fn test_unfiltered_listing_returns_whole_seed_in_order() {
    let (status, body) = get("/v1/houses?at=2025-10-31T12:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(
        ids(&body),
        vec![
            "emerald-lane",
            "midnight-crypt",
            "pumpkin-patch",
            "haunted-harbor",
            "candle-hollow"
        ]
    );
    assert_eq!(body["reference"], "2025-10-31T12:00:00");
}

#[tokio::test]
async fn test_open_now_on_friday_evening() {
    let (_, body) = get("/v1/houses?openNow=true&at=2025-10-31T18:45").await;
    assert_eq!(
        ids(&body),
        vec!["emerald-lane", "pumpkin-patch", "haunted-harbor"]
    );
    for house in body["houses"].as_array().unwrap() {
        assert_eq!(house["openNow"], true);
    }
}

#[tokio::test]
async fn test_open_now_after_midnight_includes_overnight_slot() {
    let (_, body) = get("/v1/houses?openNow=true&at=2025-10-31T00:30").await;
    assert_eq!(ids(&body), vec!["midnight-crypt"]);
}

#[tokio::test]
async fn test_accessibility_requires_every_tag() {
    let (_, body) = get("/v1/houses?accessibility=wheelchair").await;
    assert_eq!(ids(&body), vec!["emerald-lane", "pumpkin-patch"]);

    let (_, body) = get("/v1/houses?accessibility=wheelchair,stroller").await;
    assert_eq!(ids(&body), vec!["emerald-lane"]);
}

#[tokio::test]
async fn test_candy_accepts_any_level() {
    let (_, body) = get("/v1/houses?candy=yellow,red").await;
    assert_eq!(
        ids(&body),
        vec!["midnight-crypt", "haunted-harbor", "candle-hollow"]
    );
}

#[tokio::test]
async fn test_unknown_label_is_bad_request() {
    let (status, body) = get("/v1/houses?scare=terrifying").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("terrifying"));
}

#[tokio::test]
async fn test_bad_reference_time_is_bad_request() {
    let (status, _) = get("/v1/houses?at=tomorrow").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_radius_around_origin() {
    let (status, body) = get("/v1/houses?radiusKm=1&lat=32.794&lng=34.9896").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["emerald-lane"]);
}

#[tokio::test]
async fn test_radius_without_origin_is_bad_request() {
    let (status, body) = get("/v1/houses?radiusKm=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("lat"));
}

#[tokio::test]
async fn test_favorites_only() {
    let (_, body) =
        get("/v1/houses?favoritesOnly=true&favorites=pumpkin-patch,midnight-crypt").await;
    assert_eq!(ids(&body), vec!["midnight-crypt", "pumpkin-patch"]);

    let (_, body) = get("/v1/houses?favoritesOnly=true").await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_house_detail() {
    let (status, body) = get("/v1/houses/midnight-crypt?at=2025-10-30T23:30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "midnight-crypt");
    assert_eq!(body["openNow"], true);
    assert_eq!(body["displayImage"], "/images/midnight-crypt.jpg");
    assert_eq!(body["opening"]["state"], "open");
    assert_eq!(body["hoursLabels"], json!(["Thu 19:00 – 01:00"]));
    assert_eq!(
        body["navigation"]["waze"],
        "https://www.waze.com/ul?ll=32.806%2C34.999&navigate=yes"
    );
}

#[tokio::test]
async fn test_house_detail_next_opening() {
    let (_, body) = get("/v1/houses/emerald-lane?at=2025-10-30T12:00").await;
    assert_eq!(body["openNow"], false);
    assert_eq!(body["nextOpening"], "2025-10-30T17:00:00");
    assert_eq!(body["opening"]["state"], "opensAt");
    assert_eq!(body["opening"]["at"], "2025-10-30T17:00:00");
    assert_eq!(body["displayImage"], "/haunted-house-placeholder.svg");
}

#[tokio::test]
async fn test_paused_house_is_never_open() {
    let (_, body) = get("/v1/houses/candle-hollow?at=2025-10-31T19:00").await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["openNow"], false);
}

#[tokio::test]
async fn test_unknown_house_is_not_found() {
    let (status, body) = get("/v1/houses/no-such-house").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_route_preview() {
    let request = Request::post("/v1/routes/preview")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "houseIds": ["pumpkin-patch", "ghost", "emerald-lane", "pumpkin-patch"]
            })
            .to_string(),
        ))
        .unwrap();

    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["skipped"], json!(["ghost"]));
    assert_eq!(body["plan"]["name"], "My Halloween route");
    assert_eq!(body["plan"]["isOfflineReady"], false);

    let stop_ids: Vec<&str> = body["plan"]["stops"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["houseId"].as_str().unwrap())
        .collect();
    assert_eq!(stop_ids, vec!["pumpkin-patch", "emerald-lane"]);
    assert_eq!(body["stops"][1]["id"], "emerald-lane");
}

#[tokio::test]
async fn test_map_config_without_public_token() {
    let (status, body) = get("/v1/map/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], false);
    assert!(body.get("accessToken").is_none());
    assert!(body["message"].as_str().unwrap().contains("MAPBOX_PUBLIC_TOKEN"));
    assert_eq!(body["viewport"]["zoom"], 10.0);
}

#[tokio::test]
async fn test_map_config_with_public_token() {
    let app = seeded_app(MapSettings {
        public_token: Some("pk.browser".to_string()),
        ..MapSettings::default()
    });
    let (_, body) = send(app, Request::get("/v1/map/config").body(Body::empty()).unwrap()).await;
    assert_eq!(body["enabled"], true);
    assert_eq!(body["accessToken"], "pk.browser");
}

#[tokio::test]
async fn test_map_usage_fails_open_with_cache_header() {
    let response = app()
        .oneshot(Request::get("/api/map-usage").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "private, max-age=60"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["allowed"], true);
    assert_eq!(body["reason"], "missing_mapbox_admin_token");
    assert_eq!(body["fallbackUrl"], "/static/halloween-map-fallback.png");
}

#[tokio::test]
async fn test_map_availability_alias() {
    let (status, body) = get("/v1/map/availability").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], true);
    assert_eq!(body["limit"], 50000);
}
