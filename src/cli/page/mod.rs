//! The static marketing page, laid out for the terminal.

pub mod chrome;
pub mod content;

use std::io::{self, Write};

use crossterm::style::Stylize;
use serde::Serialize;

use chrome::{ChromeView, PageState};
use crate::cli::text::wrap;
use content::{
    Contact, Hero, NavItem, Section, Service, TeamMember, ASSISTANT_NAME, ASSISTANT_STATUS, BRAND,
    CONTACT, FOOTER, GET_STARTED, HERO, MISSION, NAV_ITEMS, SERVICES, SERVICES_HEADING, TEAM,
    TEAM_HEADING,
};

/// How a line should be styled when printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Brand,
    Eyebrow,
    Heading,
    Body,
    Muted,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine {
    pub tone: Tone,
    pub text: String,
}

impl PageLine {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(Tone::Body, "")
    }
}

/// Navbar, plus the mobile menu when it is open.
pub fn render_nav(state: &PageState) -> Vec<PageLine> {
    let links = NAV_ITEMS
        .iter()
        .map(|item| item.label.to_uppercase())
        .collect::<Vec<_>>()
        .join("  ");
    let chrome = ChromeView::from(state);
    let icon = match chrome.menu_icon {
        "fa-times" => "✕",
        _ => "☰",
    };
    let bar = format!("{}.  {}  [{}]  {}", BRAND, links, GET_STARTED.label, icon);

    let mut lines = Vec::new();
    if chrome.nav.contains("py-3") {
        lines.push(PageLine::new(Tone::Brand, bar));
    } else {
        lines.push(PageLine::blank());
        lines.push(PageLine::new(Tone::Brand, bar));
        lines.push(PageLine::blank());
    }

    if !chrome.mobile_menu.contains("hidden") {
        for item in NAV_ITEMS {
            lines.push(PageLine::new(Tone::Link, format!("  {} ({})", item.label, item.href)));
        }
        lines.push(PageLine::new(Tone::Link, "  Contact Us (#contact)"));
    }
    lines
}

pub fn render_section(section: Section, width: usize) -> Vec<PageLine> {
    let mut lines = Vec::new();
    match section {
        Section::Home => {
            lines.push(PageLine::new(Tone::Eyebrow, HERO.badge.to_uppercase()));
            lines.push(PageLine::new(Tone::Heading, HERO.headline));
            push_wrapped(&mut lines, Tone::Body, HERO.pitch, width);
            lines.push(PageLine::new(
                Tone::Link,
                format!(
                    "[{}] {}    [{}] {}",
                    HERO.primary_cta.label,
                    HERO.primary_cta.href,
                    HERO.secondary_cta.label,
                    HERO.secondary_cta.href
                ),
            ));
        }
        Section::Services => {
            lines.push(PageLine::new(Tone::Eyebrow, SERVICES_HEADING.0.to_uppercase()));
            lines.push(PageLine::new(Tone::Heading, SERVICES_HEADING.1));
            for service in SERVICES {
                lines.push(PageLine::blank());
                lines.push(PageLine::new(Tone::Heading, format!("▸ {}", service.title)));
                push_wrapped(&mut lines, Tone::Body, service.description, width);
                lines.push(PageLine::new(Tone::Link, "  Learn more → #contact"));
            }
        }
        Section::About => {
            lines.push(PageLine::new(Tone::Eyebrow, MISSION.0.to_uppercase()));
            lines.push(PageLine::new(Tone::Heading, MISSION.1));
            push_wrapped(&mut lines, Tone::Body, MISSION.2, width);
        }
        Section::Team => {
            lines.push(PageLine::new(Tone::Eyebrow, TEAM_HEADING.to_uppercase()));
            for member in TEAM {
                lines.push(PageLine::blank());
                lines.push(PageLine::new(Tone::Heading, member.name));
                lines.push(PageLine::new(Tone::Link, member.role));
                push_wrapped(&mut lines, Tone::Muted, member.bio, width);
            }
        }
        Section::Contact => {
            lines.push(PageLine::new(Tone::Eyebrow, "GET IN TOUCH"));
            lines.push(PageLine::new(Tone::Heading, CONTACT.heading));
            lines.push(PageLine::new(Tone::Body, format!("✉ {}", CONTACT.email)));
            lines.push(PageLine::blank());
            for field in CONTACT.form_fields {
                lines.push(PageLine::new(Tone::Muted, format!("[ {:<28} ]", field)));
            }
            lines.push(PageLine::new(Tone::Link, format!("[ {} ]", CONTACT.submit_label)));
            lines.push(PageLine::new(
                Tone::Muted,
                format!("Inquiries are not sent from here; write to {}.", CONTACT.email),
            ));
        }
    }
    lines
}

/// Launcher button and, when open, the chat window header.
pub fn render_launcher(state: &PageState) -> Vec<PageLine> {
    let chrome = ChromeView::from(state);
    let glyph = match chrome.launcher_icon {
        "fa-times" => "✕",
        _ => "💬",
    };
    let badge = if chrome.unread_badge { " ●" } else { "" };
    let mut lines = vec![PageLine::new(
        Tone::Link,
        format!("({}{}) {}", glyph, badge, ASSISTANT_NAME),
    )];
    if !chrome.chat_window.contains("pointer-events-none") {
        lines.push(PageLine::new(
            Tone::Muted,
            format!("{} · {}", ASSISTANT_NAME, ASSISTANT_STATUS.to_uppercase()),
        ));
    }
    lines
}

pub fn render_page(state: &PageState, width: usize) -> Vec<PageLine> {
    let mut lines = render_nav(state);
    for section in Section::ALL {
        lines.push(PageLine::blank());
        lines.push(PageLine::new(Tone::Muted, "─".repeat(width.min(80))));
        lines.extend(render_section(section, width));
    }
    lines.push(PageLine::blank());
    lines.push(PageLine::new(Tone::Muted, FOOTER));
    lines.extend(render_launcher(state));
    lines
}

/// Prints page lines with their tone applied.
pub fn write_lines(output: &mut dyn Write, lines: &[PageLine]) -> io::Result<()> {
    for line in lines {
        let text = line.text.as_str();
        match line.tone {
            Tone::Brand => writeln!(output, "{}", text.bold().blue())?,
            Tone::Eyebrow => writeln!(output, "{}", text.blue())?,
            Tone::Heading => writeln!(output, "{}", text.bold())?,
            Tone::Body => writeln!(output, "{}", text)?,
            Tone::Muted => writeln!(output, "{}", text.dark_grey())?,
            Tone::Link => writeln!(output, "{}", text.cyan())?,
        }
    }
    Ok(())
}

fn push_wrapped(lines: &mut Vec<PageLine>, tone: Tone, text: &str, width: usize) {
    lines.extend(wrap(text, width).into_iter().map(|line| PageLine::new(tone, line)));
}

/// Serializable view-model of the whole page.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub brand: &'static str,
    pub nav_items: &'static [NavItem],
    pub hero: Hero,
    pub services: &'static [Service],
    pub mission: (&'static str, &'static str, &'static str),
    pub team: &'static [TeamMember],
    pub contact: Contact,
    pub footer: &'static str,
    pub state: PageState,
    pub chrome: ChromeView,
}

impl PageView {
    pub fn new(state: &PageState) -> Self {
        Self {
            brand: BRAND,
            nav_items: &NAV_ITEMS,
            hero: HERO,
            services: &SERVICES,
            mission: MISSION,
            team: &TEAM,
            contact: CONTACT,
            footer: FOOTER,
            state: state.clone(),
            chrome: ChromeView::from(state),
        }
    }
}
