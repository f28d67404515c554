use inscription_shared::InscriptionPayload;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("response is not JSON: {0}")]
    Body(#[from] serde_json::Error),

    #[error("response is not a JSON object: {0}")]
    NotAnObject(Value),
}

/// Reply of the endpoint, read leniently.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteOutcome {
    pub success: bool,
    pub message: String,
}

impl RemoteOutcome {
    /// Interpret any JSON body: `success` follows JavaScript truthiness and a
    /// non-string `message` is rendered as JSON text.
    pub fn from_json(value: &Value) -> Self {
        let success = match value.get("success") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        };

        let message = match value.get("message") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.to_owned(),
            Some(other) => other.to_string(),
        };

        Self { success, message }
    }
}

/// Delivers one payload to the inscription endpoint.
#[async_trait::async_trait]
pub trait Submitter: Send + Sync + 'static {
    async fn submit(&self, payload: &InscriptionPayload) -> Result<RemoteOutcome, TransportError>;
}

/// `POST`s the payload as JSON. The status code is ignored, only the body counts.
#[derive(Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, payload: &InscriptionPayload) -> Result<RemoteOutcome, TransportError> {
        let bytes = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?
            .bytes()
            .await?;

        let value: Value = serde_json::from_slice(&bytes)?;
        if !value.is_object() {
            return Err(TransportError::NotAnObject(value));
        }

        Ok(RemoteOutcome::from_json(&value))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_truthiness() {
        let truthy = [
            json!({"success": true}),
            json!({"success": 1}),
            json!({"success": -0.5}),
            json!({"success": "no"}),
            json!({"success": []}),
            json!({"success": {}}),
        ];
        for value in truthy {
            assert!(RemoteOutcome::from_json(&value).success, "{value}");
        }

        let falsy = [
            json!({"success": false}),
            json!({"success": 0}),
            json!({"success": ""}),
            json!({"success": null}),
            json!({}),
            json!([]),
            json!("success"),
        ];
        for value in falsy {
            assert!(!RemoteOutcome::from_json(&value).success, "{value}");
        }
    }

    #[test]
    fn test_message_rendering() {
        let outcome = RemoteOutcome::from_json(&json!({"success": false, "message": "Duplicate email"}));
        assert_eq!(outcome.message, "Duplicate email");

        assert_eq!(RemoteOutcome::from_json(&json!({"message": 42})).message, "42");
        assert_eq!(RemoteOutcome::from_json(&json!({"message": null})).message, "");
        assert_eq!(RemoteOutcome::from_json(&json!({"success": true})).message, "");
    }
}
