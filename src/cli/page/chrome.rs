//! Navigation, mobile menu and chat launcher state.
//!
//! All visual state is derived from [`PageState`] by the pure functions below.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::content::Section;

/// Scroll offset past which the navbar switches to its compact style.
pub const SCROLL_THRESHOLD: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub scroll_y: u32,
    pub scrolled: bool,
    pub menu_open: bool,
    pub chat_open: bool,
    pub unread: bool,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            scroll_y: 0,
            scrolled: false,
            menu_open: false,
            chat_open: false,
            unread: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatToggle {
    Opened,
    Closed,
}

impl PageState {
    /// Returns true when the navbar needs re-rendering.
    pub fn on_scroll(&mut self, scroll_y: u32) -> bool {
        self.scroll_y = scroll_y;
        let scrolled = scroll_y > SCROLL_THRESHOLD;
        if scrolled == self.scrolled {
            return false;
        }
        self.scrolled = scrolled;
        debug!("Navbar scrolled={}", scrolled);
        true
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Follows an in-page link. Links in the mobile menu close it.
    pub fn follow_link(&mut self, href: &str) -> Option<Section> {
        let section = Section::from_anchor(href)?;
        if self.menu_open {
            self.toggle_menu();
        }
        Some(section)
    }

    pub fn toggle_chat(&mut self) -> ChatToggle {
        self.chat_open = !self.chat_open;
        if self.chat_open {
            self.unread = false;
            ChatToggle::Opened
        } else {
            ChatToggle::Closed
        }
    }

    pub fn open_chat(&mut self) -> Option<ChatToggle> {
        (!self.chat_open).then(|| self.toggle_chat())
    }

    pub fn close_chat(&mut self) -> Option<ChatToggle> {
        self.chat_open.then(|| self.toggle_chat())
    }

    /// A reply landed; flag it when nobody is looking at the panel.
    pub fn on_reply(&mut self) {
        if !self.chat_open {
            self.unread = true;
        }
    }
}

/// Set of CSS-style class names describing one view region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassSet(BTreeSet<&'static str>);

impl ClassSet {
    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }
}

impl<const N: usize> From<[&'static str; N]> for ClassSet {
    fn from(classes: [&'static str; N]) -> Self {
        Self(classes.into_iter().collect())
    }
}

impl fmt::Display for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0.iter().copied().collect::<Vec<_>>().join(" ");
        f.write_str(&joined)
    }
}

pub fn nav_classes(state: &PageState) -> ClassSet {
    if state.scrolled {
        ClassSet::from(["glass-morphism", "py-3"])
    } else {
        ClassSet::from(["bg-transparent", "py-6"])
    }
}

pub fn mobile_menu_classes(state: &PageState) -> ClassSet {
    if state.menu_open {
        ClassSet::from(["md:hidden"])
    } else {
        ClassSet::from(["hidden", "md:hidden"])
    }
}

pub fn menu_icon(state: &PageState) -> &'static str {
    if state.menu_open {
        "fa-times"
    } else {
        "fa-bars"
    }
}

pub fn chat_window_classes(state: &PageState) -> ClassSet {
    if state.chat_open {
        ClassSet::from(["scale-100", "opacity-100"])
    } else {
        ClassSet::from(["scale-0", "opacity-0", "pointer-events-none"])
    }
}

pub fn launcher_icon(state: &PageState) -> &'static str {
    if state.chat_open {
        "fa-times"
    } else {
        "fa-comment-dots"
    }
}

/// Everything the chrome looks like for a given state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChromeView {
    pub nav: ClassSet,
    pub mobile_menu: ClassSet,
    pub menu_icon: &'static str,
    pub chat_window: ClassSet,
    pub launcher_icon: &'static str,
    pub unread_badge: bool,
}

impl From<&PageState> for ChromeView {
    fn from(state: &PageState) -> Self {
        Self {
            nav: nav_classes(state),
            mobile_menu: mobile_menu_classes(state),
            menu_icon: menu_icon(state),
            chat_window: chat_window_classes(state),
            launcher_icon: launcher_icon(state),
            unread_badge: state.unread,
        }
    }
}
