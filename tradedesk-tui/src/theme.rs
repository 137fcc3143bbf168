//! Style tokens for the TradeDesk TUI.
//!
//! Dark background, amber accent, green/red for money. Everything
//! that colors a value goes through a helper here so the pages stay
//! free of raw color literals.

use ratatui::style::{Color, Modifier, Style};

const ACCENT: Color = Color::Rgb(255, 179, 71);
const POSITIVE: Color = Color::Rgb(80, 220, 120);
const NEGATIVE: Color = Color::Rgb(240, 84, 84);
const WARNING: Color = Color::Rgb(250, 200, 80);
const NEUTRAL: Color = Color::Rgb(130, 160, 220);
const MUTED: Color = Color::Rgb(128, 128, 140);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(Color::White)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Money color: gains green, losses red.
pub fn pnl(value: f64) -> Style {
    if value >= 0.0 {
        positive()
    } else {
        negative()
    }
}

/// Win-rate color bands, percentage in 0..=100.
pub fn win_rate(pct: f64) -> Style {
    match pct {
        p if p >= 60.0 => positive(),
        p if p >= 45.0 => accent(),
        p if p >= 30.0 => neutral(),
        _ => warning(),
    }
}

/// Open positions render blue-ish, closed ones green (mirrors the
/// status badges of the journal table).
pub fn trade_status(is_open: bool) -> Style {
    if is_open {
        neutral()
    } else {
        positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pnl_color_splits_on_sign() {
        assert_eq!(pnl(100.0), positive());
        assert_eq!(pnl(0.0), positive());
        assert_eq!(pnl(-0.01), negative());
    }

    #[test]
    fn win_rate_bands() {
        assert_eq!(win_rate(75.0), positive());
        assert_eq!(win_rate(50.0), accent());
        assert_eq!(win_rate(35.0), neutral());
        assert_eq!(win_rate(10.0), warning());
    }

    #[test]
    fn status_styles_differ() {
        assert_ne!(trade_status(true), trade_status(false));
    }
}
