use std::{path::Path, sync::Arc};

use axum::{
    body::Body,
    extract::State,
    http::{Request, Response, StatusCode},
    middleware::Next,
    response::IntoResponse,
};

use crate::config::Config;

/// Database, journal and config files are never served as static content.
const PRIVATE_EXTENSIONS: [&str; 4] = ["db", "sqlite", "sqlite3", "toml"];
const PRIVATE_SUFFIXES: [&str; 3] = ["-wal", "-shm", "-journal"];

/// Paths of the static site that must answer 404 even when the file exists.
#[derive(Clone, Debug)]
pub struct PrivateFiles {
    dirs: Arc<Vec<String>>,
}

impl PrivateFiles {
    pub fn new(config: &Config) -> Self {
        let dirs = Path::new(&config.backup.folder)
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| vec![name.to_owned()])
            .unwrap_or_default();

        Self {
            dirs: Arc::new(dirs),
        }
    }

    pub fn is_private(&self, path: &str) -> bool {
        let Ok(path) = urlencoding::decode(path) else {
            return true;
        };

        let mut segments = path
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty())
            .peekable();

        while let Some(segment) = segments.next() {
            if segment.starts_with('.') || self.dirs.iter().any(|dir| dir == segment) {
                return true;
            }

            if segments.peek().is_none() {
                return is_private_file(segment);
            }
        }

        false
    }
}

fn is_private_file(name: &str) -> bool {
    let name = name.to_lowercase();

    let extension = Path::new(&name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    PRIVATE_EXTENSIONS.contains(&extension)
        || PRIVATE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Hide private files of the site root behind a plain 404
pub async fn private_files_middleware(
    State(private): State<PrivateFiles>,
    req: Request<Body>,
    next: Next,
) -> Response<Body> {
    if private.is_private(req.uri().path()) {
        tracing::debug!("Refused private path {}", req.uri().path());
        return StatusCode::NOT_FOUND.into_response();
    }

    next.run(req).await
}
