use std::future::Future;
use std::sync::Mutex;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Capability to place text on the user's clipboard.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send;
}

/// Clipboard that holds the copied text until the HTTP layer hands it to the browser.
#[derive(Debug, Default)]
pub struct CapturedClipboard {
    text: Mutex<Option<String>>,
}

impl CapturedClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the most recently copied text, leaving the clipboard empty.
    pub fn take(&self) -> Option<String> {
        self.text.lock().ok().and_then(|mut text| text.take())
    }
}

impl ClipboardWriter for CapturedClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut slot = self
            .text
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".to_string()))?;
        *slot = Some(text.to_string());
        Ok(())
    }
}
