//! Copy-to-clipboard control
//!
//! A two-state machine: a click copies the source and shows "copied"
//! feedback; a reset scheduled [`COPY_FEEDBACK_DELAY`] later returns it
//! to idle. Only the reset belonging to the most recent click may do so.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ClipboardError;

/// How long "copied" feedback stays visible after a click
pub const COPY_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

/// System clipboard seen by the copy control
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    deny: bool,
}

impl MemoryClipboard {
    /// Create an empty clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard that rejects every write
    pub fn denied() -> Self {
        Self {
            contents: None,
            deny: true,
        }
    }

    /// Last text written, if any
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.deny {
            return Err(ClipboardError::PermissionDenied);
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Feedback state of the copy control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CopyState {
    #[default]
    Idle,
    Copied,
}

impl CopyState {
    /// Name used in the `data-state` attribute
    pub fn name(&self) -> &'static str {
        match self {
            CopyState::Idle => "idle",
            CopyState::Copied => "copied",
        }
    }
}

/// Identifies the reset scheduled by one click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResetToken(u64);

/// The copy control's state machine
#[derive(Debug, Default)]
pub struct CopyButton {
    state: CopyState,
    /// Generation of the last issued token
    generation: u64,
    /// The only token allowed to reset to idle
    pending: Option<ResetToken>,
}

impl CopyButton {
    /// Create an idle button
    pub fn new() -> Self {
        Self::default()
    }

    /// Current feedback state
    pub fn state(&self) -> CopyState {
        self.state
    }

    /// The reset currently allowed to fire, if any
    pub fn pending(&self) -> Option<ResetToken> {
        self.pending
    }

    /// Handle a click: copy `text`, show feedback, supersede older resets
    ///
    /// The returned token must be delivered to [`CopyButton::expire`]
    /// after [`COPY_FEEDBACK_DELAY`]. Clipboard failures are logged and
    /// otherwise ignored; feedback is shown regardless.
    pub fn click(&mut self, clipboard: &mut dyn Clipboard, text: &str) -> ResetToken {
        if let Err(e) = clipboard.write_text(text) {
            warn!(error = %e, "copy to clipboard failed");
        }

        self.generation += 1;
        let token = ResetToken(self.generation);
        self.pending = Some(token);
        self.state = CopyState::Copied;
        debug!(generation = self.generation, "copy feedback shown");
        token
    }

    /// Deliver a scheduled reset
    ///
    /// Returns `true` if this reset returned the button to idle; stale
    /// tokens from superseded clicks are ignored.
    pub fn expire(&mut self, token: ResetToken) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        self.state = CopyState::Idle;
        true
    }

    /// Return to idle and invalidate any pending reset
    pub fn teardown(&mut self) {
        self.pending = None;
        self.state = CopyState::Idle;
    }
}
