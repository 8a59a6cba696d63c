use std::borrow::Cow;

use ratatui::prelude::Stylize;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::present::{BadgeTone, RateTier};

/// Accent color used for prompts, highlights, and status badges.
pub const ACCENT: Color = Color::Indexed(208);

/// Produce a dimmed line for secondary descriptions and hints.
pub fn secondary_line<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    let owned = text.into().into_owned();
    Line::from(owned.dim())
}

/// Dimmed text chunk for inline usage.
pub fn secondary_span<'a>(text: impl Into<Cow<'a, str>>) -> Span<'a> {
    let owned = text.into().into_owned();
    Span::from(owned).dim()
}

/// Apply the accent and bold modifiers for list selections.
pub fn selection_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tier_color(tier: RateTier) -> Color {
    match tier {
        RateTier::Low => Color::Green,
        RateTier::Medium => Color::Yellow,
        RateTier::High => Color::Red,
    }
}

pub fn badge_style(tone: BadgeTone) -> Style {
    match tone {
        BadgeTone::Inclusion => Style::default().fg(Color::Green),
        BadgeTone::Exclusion => Style::default().fg(Color::Red),
        BadgeTone::Cancer => Style::default().fg(Color::Cyan),
    }
}

/// Rows whose rule text is the cluster's representative.
pub fn cluster_center_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}
