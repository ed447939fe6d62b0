//! HTTP-surface tests that run without a reachable database: the pool builds
//! lazily, and the routes exercised here never acquire a connection.

use actix_web::{App, test, web};
use countries_api::{Config, Db, api, routes};
use std::path::Path;

fn test_config(cache_dir: &Path) -> Config {
    Config {
        cache_dir: cache_dir.to_path_buf(),
        ..Config::default()
    }
}

macro_rules! test_app {
    ($config:expr) => {{
        let config: Config = $config;
        let db = Db::connect(&config).expect("lazy pool build");
        test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(api::Client::default()))
                .app_data(web::Data::new(config))
                .configure(routes::configure),
        )
        .await
    }};
}

#[actix_web::test]
async fn banner_lists_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app!(test_config(dir.path()));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("Countries API"));
    assert!(body["endpoints"].is_object());
    assert!(body["endpoints"]["/countries"].is_string());
}

#[actix_web::test]
async fn image_before_any_refresh_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app!(test_config(dir.path()));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/countries/image").to_request(),
    )
    .await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Summary image not found");
}

#[actix_web::test]
async fn image_is_served_once_present() {
    let dir = tempfile::tempdir().unwrap();
    // Any bytes will do; the handler serves the cache file as-is.
    std::fs::write(dir.path().join("summary.png"), b"\x89PNG\r\n\x1a\nstub").unwrap();
    let app = test_app!(test_config(dir.path()));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/countries/image").to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .unwrap(),
        "image/png"
    );
}
