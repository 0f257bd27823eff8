//! Pure rendering of the chat panel.
//!
//! The whole message list is rebuilt from the transcript and the loading flag on
//! every call, so two renders of the same state are always identical.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use super::conversation_state::Message;
use crate::cli::text::wrap;
use crate::gemini_client::Role;

pub const TYPING_INDICATOR: &str = "● ● ●";
const TIME_FORMAT: &str = "%H:%M";

/// Bubbles never take the full panel width.
const BUBBLE_RATIO: f32 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub role: Role,
    pub align: Align,
    pub text: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub bubbles: Vec<Bubble>,
    pub typing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    User,
    Model,
    Timestamp,
    Typing,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLine {
    pub kind: LineKind,
    pub text: String,
}

pub fn render(messages: &[Message], loading: bool) -> ChatView {
    let bubbles = messages
        .iter()
        .map(|message| Bubble {
            role: message.role,
            align: match message.role {
                Role::User => Align::Right,
                Role::Model => Align::Left,
            },
            text: tidy_text(&message.text),
            time: message.timestamp.format(TIME_FORMAT).to_string(),
        })
        .collect();

    ChatView {
        bubbles,
        typing: loading,
    }
}

impl ChatView {
    /// Lays the view out as terminal lines for a panel `width` columns wide.
    pub fn lines(&self, width: usize) -> Vec<ViewLine> {
        let width = width.max(8);
        let bubble_width = ((width as f32 * BUBBLE_RATIO) as usize).max(4);
        let mut lines = Vec::new();

        for (index, bubble) in self.bubbles.iter().enumerate() {
            if index > 0 {
                lines.push(ViewLine {
                    kind: LineKind::Spacer,
                    text: String::new(),
                });
            }

            let kind = match bubble.role {
                Role::User => LineKind::User,
                Role::Model => LineKind::Model,
            };
            for text in wrap(&bubble.text, bubble_width) {
                lines.push(ViewLine {
                    kind,
                    text: align(&text, bubble.align, width),
                });
            }
            lines.push(ViewLine {
                kind: LineKind::Timestamp,
                text: align(&bubble.time, bubble.align, width),
            });
        }

        if self.typing {
            lines.push(ViewLine {
                kind: LineKind::Spacer,
                text: String::new(),
            });
            lines.push(ViewLine {
                kind: LineKind::Typing,
                text: TYPING_INDICATOR.to_string(),
            });
        }

        lines
    }
}

/// Scroll state of the message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageViewport {
    pub scroll_top: usize,
    pub scroll_height: usize,
    pub height: usize,
}

impl MessageViewport {
    pub fn new(height: usize) -> Self {
        Self {
            scroll_top: 0,
            scroll_height: 0,
            height: height.max(1),
        }
    }

    pub fn set_content_height(&mut self, lines: usize) {
        self.scroll_height = lines;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.scroll_height;
    }

    /// Lines currently on screen; the offset is clamped to the last full page.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self
            .scroll_top
            .min(self.scroll_height.saturating_sub(self.height));
        let end = (start + self.height).min(self.scroll_height);
        start..end
    }
}

/// `**bold**` only when the opener starts a word and the markers hug the text.
fn emphasis() -> &'static Regex {
    static EMPHASIS: OnceLock<Regex> = OnceLock::new();
    EMPHASIS.get_or_init(|| {
        Regex::new(r"(^|[\s(])\*\*([^\s*](?:[^*]*[^\s*])?)\*\*").expect("valid emphasis pattern")
    })
}

fn blank_runs() -> &'static Regex {
    static BLANK_RUNS: OnceLock<Regex> = OnceLock::new();
    BLANK_RUNS.get_or_init(|| Regex::new(r"\n{3,}").expect("valid blank-run pattern"))
}

/// Drops markdown bold markers and collapses runs of blank lines.
fn tidy_text(text: &str) -> String {
    let text = emphasis().replace_all(text.trim(), "$1$2");
    blank_runs().replace_all(&text, "\n\n").into_owned()
}

fn align(text: &str, align: Align, width: usize) -> String {
    match align {
        Align::Left => text.to_string(),
        Align::Right => format!("{:>width$}", text, width = width),
    }
}
