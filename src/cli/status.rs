use std::sync::Mutex;

use crate::error::Error;

/// The single outstanding message shown to the user. Setting a new one
/// replaces the previous; there is no history.
#[derive(Debug, Default)]
pub struct StatusLine {
    message: Mutex<Option<String>>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        if let Ok(mut message) = self.message.lock() {
            *message = None;
        }
    }

    pub fn set(&self, error: &Error) {
        if let Ok(mut message) = self.message.lock() {
            *message = Some(error.to_string());
        }
    }

    pub fn current(&self) -> Option<String> {
        self.message.lock().ok().and_then(|m| m.clone())
    }
}
