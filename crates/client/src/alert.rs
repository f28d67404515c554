use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum AlertKind {
    #[strum(serialize = "ok")]
    Ok,
    #[strum(serialize = "err")]
    Err,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
}

impl Alert {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: AlertKind::Ok,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: AlertKind::Err,
        }
    }

    pub fn class_name(&self) -> String {
        format!("alert show {}", self.kind)
    }
}

/// The `#formAlert` element: one visible message at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRegion {
    pub text: String,
    pub class_name: String,
}

impl StatusRegion {
    pub fn show(&mut self, alert: &Alert) {
        self.text = alert.message.to_owned();
        self.class_name = alert.class_name();
    }

    pub fn is_shown(&self) -> bool {
        self.class_name.split_whitespace().any(|c| c == "show")
    }
}
