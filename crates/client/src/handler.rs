use std::sync::Arc;

use tokio::{sync::Mutex, task::JoinHandle};

use crate::{Alert, ContactForm, StatusRegion, Submitter, ValidationError, validate};

/// How an accepted submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// The endpoint answered with a truthy `success`; the form was reset.
    Accepted(String),
    /// The endpoint answered with a falsy `success`; the form was kept.
    Rejected(String),
    /// No usable answer; the form was kept.
    ConnectionFailed,
}

/// Result of [`FormSubmissionHandler::submit`].
#[derive(Debug)]
pub enum Submission {
    /// Nothing was sent; the reason is already shown in the status region.
    Blocked(ValidationError),
    /// The exchange runs on its own task.
    InFlight(JoinHandle<Delivery>),
}

impl Submission {
    /// Wait for the outcome, `None` when the submission was blocked.
    pub async fn delivery(self) -> Option<Delivery> {
        match self {
            Self::Blocked(_) => None,
            // A panicking task is reported like an unreachable endpoint
            Self::InFlight(handle) => Some(handle.await.unwrap_or(Delivery::ConnectionFailed)),
        }
    }
}

/// Validates the contact form, submits it and renders the outcome.
///
/// Overlapping submissions are not guarded against: each one renders its own
/// outcome when its response arrives, so the last response wins.
#[derive(Clone)]
pub struct FormSubmissionHandler {
    submitter: Arc<dyn Submitter>,
    form: Arc<Mutex<ContactForm>>,
    status: Arc<Mutex<StatusRegion>>,
    locale: String,
}

impl FormSubmissionHandler {
    pub fn new(
        submitter: Arc<dyn Submitter>,
        form: Arc<Mutex<ContactForm>>,
        status: Arc<Mutex<StatusRegion>>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            submitter,
            form,
            status,
            locale: locale.into(),
        }
    }

    pub fn form(&self) -> Arc<Mutex<ContactForm>> {
        self.form.clone()
    }

    pub fn status(&self) -> Arc<Mutex<StatusRegion>> {
        self.status.clone()
    }

    pub async fn submit(&self) -> Submission {
        let payload = self.form.lock().await.payload();

        if let Err(err) = validate(&payload) {
            self.status
                .lock()
                .await
                .show(&Alert::err(err.message(&self.locale)));

            return Submission::Blocked(err);
        }

        let submitter = self.submitter.clone();
        let form = self.form.clone();
        let status = self.status.clone();
        let locale = self.locale.to_owned();

        Submission::InFlight(tokio::spawn(async move {
            let (alert, delivery) = match submitter.submit(&payload).await {
                Ok(outcome) if outcome.success => {
                    form.lock().await.reset();
                    (
                        Alert::ok(format!("✅ {}", outcome.message)),
                        Delivery::Accepted(outcome.message),
                    )
                }
                Ok(outcome) => (
                    Alert::err(format!("❌ {}", outcome.message)),
                    Delivery::Rejected(outcome.message),
                ),
                Err(err) => {
                    tracing::debug!(error = %err, "inscription submission failed");
                    (
                        Alert::err(format!("❌ {}", crate::connection_error(&locale))),
                        Delivery::ConnectionFailed,
                    )
                }
            };

            status.lock().await.show(&alert);

            delivery
        }))
    }
}
