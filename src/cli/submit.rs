use std::sync::Arc;

use anyhow::Result;
use inscription::config::Config;
use inscription_client::{ContactForm, FormSubmissionHandler, HttpSubmitter, StatusRegion};
use tokio::sync::Mutex;

/// Run the contact form handler once and print the rendered alert.
pub async fn submit(
    config: Config,
    form: ContactForm,
    endpoint_override: Option<String>,
) -> Result<()> {
    let endpoint = endpoint_override.unwrap_or(config.client.endpoint);
    tracing::debug!(endpoint = %endpoint, "Submitting contact form");

    let status = Arc::new(Mutex::new(StatusRegion::default()));
    let handler = FormSubmissionHandler::new(
        Arc::new(HttpSubmitter::new(endpoint)),
        Arc::new(Mutex::new(form)),
        status.clone(),
        config.client.locale,
    );

    let delivery = handler.submit().await.delivery().await;
    let status = status.lock().await;

    println!("{}", status.text);
    tracing::debug!(class = %status.class_name, ?delivery, "Contact form submitted");

    Ok(())
}
