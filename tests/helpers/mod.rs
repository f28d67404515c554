//! Shared setup for the HTTP tests: an on-disk database in a temp dir, a
//! fresh encryption key and a small static site.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use inscription::{AppState, config::Config, middleware::RateLimiter};
use inscription_registration::{Command, EmailCipher, Query};
use inscription_shared::State;
use temp_dir::TempDir;
use tower::ServiceExt;

pub const INDEX_HTML: &str = "<!doctype html><title>Accueil</title>";

pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub async fn oneshot(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }
}

/// Write a config file into `dir` and load it, so defaults go through the
/// same layering as in production.
pub fn setup_config(dir: &TempDir, extra: &str) -> anyhow::Result<Config> {
    let site = dir.child("site");
    std::fs::create_dir_all(&site)?;
    std::fs::write(site.join("index.html"), INDEX_HTML)?;

    let path = dir.child("config.toml");
    std::fs::write(
        &path,
        format!(
            "[database]\nurl = \"sqlite:{}\"\nmax_connections = 5\n\n[site]\nroot = \"{}\"\n\n[backup]\nfolder = \"{}\"\n\n{extra}",
            dir.child("db.sqlite3").display(),
            site.display(),
            dir.child("backups").display(),
        ),
    )?;

    Ok(Config::load(Some(path.display().to_string()))?)
}

pub async fn setup_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let config = setup_config(&dir, "")?;

    let pool = inscription::db::create_pool(&config.database.url, 1).await?;
    inscription_db::migrate(&pool).await?;

    let cipher = EmailCipher::new(&EmailCipher::generate_key())?;
    let state = AppState {
        command: Command::new(
            State {
                read_db: pool.clone(),
                write_db: pool.clone(),
            },
            cipher.clone(),
        ),
        query: Query::new(pool.clone(), cipher),
        limiter: RateLimiter::new(&config.rate_limit),
        pool,
        config,
    };
    let router = inscription::routes::router(state.clone());

    Ok(TestApp { dir, state, router })
}

pub fn post_json(uri: &str, client: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", client)
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn get(uri: &str, client: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-forwarded-for", client)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
