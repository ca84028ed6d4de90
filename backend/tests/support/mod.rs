#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::Router;
use chrono::{FixedOffset, TimeZone, Utc};

use halloween_route::config::MapSettings;
use halloween_route::db::LocalRepository;
use halloween_route::http::{create_router, AppState};
use halloween_route::models::{CandyLevel, House, HouseStatus, HoursSlot, ScareLevel};
use halloween_route::services::{AvailabilityCache, MapQuotaGatekeeper};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Every variable the configuration loader reads.
pub const CONFIG_VARS: &[&str] = &[
    "HALLOWEEN_CONFIG",
    "HOST",
    "PORT",
    "MAPBOX_SECRET_TOKEN",
    "MAPBOX_USAGE_TOKEN_ID",
    "MAPBOX_MONTHLY_LIMIT",
    "MAPBOX_USAGE_THRESHOLD",
    "MAPBOX_USAGE_OVERRIDE",
    "MAPBOX_API_BASE",
    "MAPBOX_PUBLIC_TOKEN",
    "CACHED_MAP_URL",
    "HOUSES_PATH",
    "VENUE_UTC_OFFSET",
];

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

/// Like [`with_scoped_env`], starting from a clean configuration environment.
pub fn with_config_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let mut all: Vec<(&str, Option<&str>)> = CONFIG_VARS.iter().map(|k| (*k, None)).collect();
    all.extend_from_slice(changes);
    with_scoped_env(&all, f)
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Bare active house with the given hours.
pub fn house(id: &str, status: HouseStatus, hours: Vec<HoursSlot>) -> House {
    House {
        id: id.to_string(),
        title: format!("House {}", id),
        description: String::new(),
        address: "1 Elm Street".to_string(),
        city: "Haifa".to_string(),
        latitude: 32.79,
        longitude: 34.98,
        status,
        scare_level: ScareLevel::Medium,
        accessibility: vec![],
        dietary: vec![],
        candy_level: CandyLevel::Green,
        default_image: true,
        image_url: None,
        hours,
        contact_instructions: None,
        allow_knock: true,
        route_notes: None,
        decoration_votes: 0,
        check_ins: 0,
        last_updated: Utc.with_ymd_and_hms(2025, 10, 30, 12, 0, 0).unwrap(),
    }
}

/// Router over the embedded seed with the given map settings.
pub fn seeded_app(map: MapSettings) -> Router {
    let repository = Arc::new(LocalRepository::seeded().expect("seed loads"));
    let gatekeeper =
        MapQuotaGatekeeper::from_settings(map).expect("usage client builds");
    let availability = Arc::new(AvailabilityCache::new(Arc::new(gatekeeper)));
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    create_router(AppState::new(repository, availability, offset))
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    format!("http://{}", addr)
}
