use serde::{Deserialize, Serialize};

/// Body of `POST /inscription`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InscriptionPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Reply of `POST /inscription`, for both accepted and refused submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InscriptionReply {
    pub success: bool,
    pub message: String,
}

impl InscriptionReply {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
