use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use movie_core::SnapshotPaths;
use movie_server::config::{EnvVars, ServerConfig};
use movie_server::build_app;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tower::ServiceExt;

fn write_snapshot(dir: &Path) -> SnapshotPaths {
    let paths = SnapshotPaths::in_dir(dir);
    let movies = json!([
        {"id": 42, "title": "The Answer", "tagline": "Don't panic.", "vote_average": 8.1, "runtime": 109,
         "release_date": "28/04/05", "overview": "Earth is demolished.", "budget": 50000000},
        {"id": "7", "title": "Se7en", "tagline": null, "vote_average": 8, "runtime": 127,
         "release_date": "22/09/1995", "overview": "Two detectives."},
        {"id": 3, "title": "Ishtar", "vote_average": 5.2}
    ]);
    fs::write(&paths.file, serde_json::to_vec(&movies).unwrap()).unwrap();
    paths
}

async fn call(app: Router, uri: &str) -> (StatusCode, Bytes) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

#[tokio::test]
async fn ping_answers_pong() {
    let dir = tempdir().unwrap();
    let app = build_app(&ServerConfig::development(write_snapshot(dir.path())));
    let (status, body) = call(app, "/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"pong!");
}

#[tokio::test]
async fn list_projects_four_fields_in_snapshot_order() {
    let dir = tempdir().unwrap();
    let app = build_app(&ServerConfig::development(write_snapshot(dir.path())));

    let (status, body) = call(app, "/api/movies").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    for item in arr {
        let mut keys: Vec<_> = item.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["id", "tagline", "title", "vote_average"]);
    }
    assert_eq!(arr[0]["id"], json!(42));
    assert_eq!(arr[1]["id"], json!("7"));
    assert_eq!(arr[1]["vote_average"], json!(8));
    assert_eq!(arr[2]["title"], "Ishtar");
}

#[tokio::test]
async fn detail_matches_text_id_against_numeric_record() {
    let dir = tempdir().unwrap();
    let app = build_app(&ServerConfig::development(write_snapshot(dir.path())));

    let (status, body) = call(app.clone(), "/api/movies/42").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["title"], "The Answer");
    assert_eq!(json["runtime"], json!(109));
    assert_eq!(json["budget"], json!(50000000));

    let (status, body) = call(app, "/api/movies/7").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["title"], "Se7en");
}

#[tokio::test]
async fn detail_miss_is_404_with_message() {
    let dir = tempdir().unwrap();
    let app = build_app(&ServerConfig::development(write_snapshot(dir.path())));

    let (status, body) = call(app, "/api/movies/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({"message": "Movie not found"}));
}

#[tokio::test]
async fn broken_snapshot_degrades_to_empty_not_5xx() {
    let dir = tempdir().unwrap();
    let paths = SnapshotPaths::in_dir(dir.path());
    let app = build_app(&ServerConfig::development(paths.clone()));

    // missing file
    let (status, body) = call(app.clone(), "/api/movies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));

    // malformed file
    fs::write(&paths.file, "not json").unwrap();
    let (status, body) = call(app.clone(), "/api/movies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));

    let (status, _) = call(app, "/api/movies/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn every_request_rereads_the_snapshot() {
    let dir = tempdir().unwrap();
    let paths = write_snapshot(dir.path());
    let app = build_app(&ServerConfig::development(paths.clone()));

    let (_, body) = call(app.clone(), "/api/movies").await;
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap().as_array().unwrap().len(), 3);

    fs::write(&paths.file, r#"[{"id": 1, "title": "Only"}]"#).unwrap();
    let (_, body) = call(app, "/api/movies").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Only");
}

#[tokio::test]
async fn production_serves_bundle_with_index_fallback() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let build = dir.path().join("build");
    fs::create_dir_all(&build).unwrap();
    fs::write(build.join("index.html"), "<html>app</html>").unwrap();
    fs::write(build.join("app.js"), "console.log(1)").unwrap();

    let env = EnvVars { node_env: Some("production".into()), ..Default::default() };
    let config = ServerConfig::resolve("127.0.0.1".into(), Some(snapshot.file.clone()), build, &env).unwrap();
    let app = build_app(&config);

    let (status, body) = call(app.clone(), "/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"console.log(1)");

    let (status, body) = call(app.clone(), "/movies/42/anything").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"<html>app</html>");

    let (status, _) = call(app, "/api/movies/42").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn development_has_no_static_fallback() {
    let dir = tempdir().unwrap();
    let app = build_app(&ServerConfig::development(write_snapshot(dir.path())));
    let (status, _) = call(app, "/index.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mixed_type_snapshot_is_served_unchanged() {
    let dir = tempdir().unwrap();
    let paths = SnapshotPaths::in_dir(dir.path());
    let movies = json!([
        {"id": 862, "title": "Toy Story", "vote_average": 7.7, "runtime": 81},
        {"id": "8844", "title": "Jumanji", "vote_average": "6.9", "runtime": "104", "release_date": 19951215},
        {"id": true, "title": 1984, "vote_average": null},
        null,
        "not a movie"
    ]);
    fs::write(&paths.file, serde_json::to_vec(&movies).unwrap()).unwrap();
    let app = build_app(&ServerConfig::development(paths));

    let (status, body) = call(app.clone(), "/api/movies").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 5);
    assert_eq!(arr[1]["vote_average"], json!("6.9"));
    assert_eq!(arr[2]["title"], json!(1984));
    assert_eq!(arr[4], json!({"id": null, "title": null, "tagline": null, "vote_average": null}));

    let (status, body) = call(app.clone(), "/api/movies/8844").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["runtime"], json!("104"));
    assert_eq!(json["release_date"], json!(19951215));

    let (status, _) = call(app, "/api/movies/true").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn trailing_slash_matches_the_same_routes() {
    let dir = tempdir().unwrap();
    let app = build_app(&ServerConfig::development(write_snapshot(dir.path())));

    let (status, body) = call(app.clone(), "/api/movies/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap().as_array().unwrap().len(), 3);

    let (status, body) = call(app.clone(), "/api/movies/42/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap()["title"], "The Answer");

    let (status, body) = call(app, "/api/ping/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"pong!");
}
