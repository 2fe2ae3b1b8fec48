//! Presentation shell
//!
//! Wraps serialized markup with an optional filename header and a
//! copy-to-clipboard control. The control's visibility follows pointer
//! hover; its feedback follows the [`CopyButton`] state machine.

mod copy_button;
mod timer;

pub use copy_button::{Clipboard, CopyButton, CopyState, MemoryClipboard, ResetToken, COPY_FEEDBACK_DELAY};
pub use timer::TimerQueue;

use crate::markup::{escape, write_escaped};
use crate::render::RenderResult;

/// Events the shell schedules on the UI loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// Return copy feedback to idle, if still current
    ResetCopy(ResetToken),
}

/// One rendered code block and its interaction state
#[derive(Debug)]
pub struct CodeBlockShell {
    result: RenderResult,
    file_name: Option<String>,
    copyable: bool,
    hovered: bool,
    copy: CopyButton,
}

impl CodeBlockShell {
    /// Wrap a render result
    pub fn new(result: RenderResult, file_name: Option<String>, copyable: bool) -> Self {
        Self {
            result,
            file_name,
            copyable,
            hovered: false,
            copy: CopyButton::new(),
        }
    }

    /// The wrapped render result
    pub fn result(&self) -> &RenderResult {
        &self.result
    }

    /// Text the copy control writes: the original source, untouched
    pub fn copy_text(&self) -> &str {
        &self.result.source
    }

    /// Whether the block has a copy control
    pub fn is_copyable(&self) -> bool {
        self.copyable
    }

    /// Whether the pointer is over the block
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Current copy feedback state
    pub fn copy_state(&self) -> CopyState {
        self.copy.state()
    }

    /// Pointer entered the block; the copy control becomes fully opaque
    pub fn pointer_over(&mut self) {
        self.hovered = true;
    }

    /// Pointer left the block
    pub fn pointer_out(&mut self) {
        self.hovered = false;
    }

    /// Handle a click on the copy control
    ///
    /// Copies the source and schedules the feedback reset on `timers`.
    /// Returns `None` for blocks without a copy control.
    pub fn click_copy(
        &mut self,
        clipboard: &mut dyn Clipboard,
        timers: &mut TimerQueue<ShellEvent>,
    ) -> Option<ResetToken> {
        if !self.copyable {
            return None;
        }
        let token = self.copy.click(clipboard, &self.result.source);
        timers.schedule(COPY_FEEDBACK_DELAY, ShellEvent::ResetCopy(token));
        Some(token)
    }

    /// Deliver an event from the UI loop; returns `true` if state changed
    pub fn handle(&mut self, event: ShellEvent) -> bool {
        match event {
            ShellEvent::ResetCopy(token) => self.copy.expire(token),
        }
    }

    /// Reset interaction state when the block is removed
    pub fn teardown(&mut self) {
        self.copy.teardown();
        self.hovered = false;
    }

    /// Render the block as an HTML fragment reflecting current state
    pub fn to_html(&self) -> String {
        let mut out = String::new();

        if let Some(name) = &self.file_name {
            out.push_str("<pre class=\"language-filename\"><code>");
            write_escaped(&mut out, name);
            out.push_str("</code></pre>");
        }

        if self.copyable {
            out.push_str("<div class=\"copyable-code-block\" data-state=\"");
            out.push_str(self.copy.state().name());
            out.push_str("\">");
        }

        out.push_str("<pre class=\"");
        write_escaped(&mut out, &self.result.language_class);
        if self.file_name.is_some() {
            out.push_str(" has-filename");
        }
        out.push_str("\">");
        out.push_str(&self.result.markup);
        out.push_str("</pre>");

        if self.copyable {
            self.write_copy_control(&mut out);
            out.push_str("</div>");
        }

        out
    }

    fn write_copy_control(&self, out: &mut String) {
        let opacity = if self.hovered { "opacity-100" } else { "opacity-20" };
        let copied = self.copy.state() == CopyState::Copied;
        let (clipboard_icon, check_icon) = if copied { ("hidden", "block") } else { ("block", "hidden") };

        out.push_str("<div class=\"copy-control ");
        out.push_str(opacity);
        out.push_str("\"><button type=\"button\" class=\"copy-button\" aria-label=\"Copy code\" data-copy=\"");
        out.push_str(&escape(&self.result.source));
        out.push_str("\"><span class=\"icon-clipboard ");
        out.push_str(clipboard_icon);
        out.push_str("\"></span><span class=\"icon-check ");
        out.push_str(check_icon);
        out.push_str("\"></span></button></div>");
    }
}
