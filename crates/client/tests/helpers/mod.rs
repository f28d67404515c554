use std::sync::Arc;

use axum::Router;
use inscription_client::{ContactForm, FormSubmissionHandler, HttpSubmitter, StatusRegion};
use tokio::{net::TcpListener, sync::Mutex};

/// Serve `router` on an ephemeral port and return its `/inscription` URL.
pub async fn spawn_stub(router: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(format!("http://{addr}/inscription"))
}

pub fn setup_handler(endpoint: impl Into<String>, form: ContactForm) -> FormSubmissionHandler {
    FormSubmissionHandler::new(
        Arc::new(HttpSubmitter::new(endpoint)),
        Arc::new(Mutex::new(form)),
        Arc::new(Mutex::new(StatusRegion::default())),
        "fr",
    )
}
