use ratatui::prelude::*;

use crate::models::UnitStatus;

/// Long price form used in headers and the selection card
pub fn format_price(price: u64) -> String {
    if price >= 1_000_000 {
        format!("{:.1} млн", price as f64 / 1e6)
    } else {
        format!("{} тыс", (price as f64 / 1e3).round() as u64)
    }
}

/// Compact price form used on unit tiles
pub fn short_price(price: u64) -> String {
    if price >= 1_000_000 {
        format!("{:.1}", price as f64 / 1e6)
    } else {
        format!("{}т", (price as f64 / 1e3).round() as u64)
    }
}

pub fn status_color(status: UnitStatus) -> Color {
    match status {
        UnitStatus::Available => Color::Green,
        UnitStatus::Booked => Color::Yellow,
        UnitStatus::Sold => Color::DarkGray,
    }
}

pub fn status_glyph(status: UnitStatus) -> &'static str {
    match status {
        UnitStatus::Available => "✓",
        UnitStatus::Booked => "◐",
        UnitStatus::Sold => "✕",
    }
}

/// Renders a filter/building chip
pub fn chip<'a>(text: String, active: bool) -> Span<'a> {
    if active {
        Span::styled(format!(" {} ", text), Style::default().fg(Color::Black).bg(Color::Yellow).bold())
    } else {
        Span::styled(format!(" {} ", text), Style::default().fg(Color::Gray))
    }
}
