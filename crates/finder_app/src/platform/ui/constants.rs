use ratatui::style::Color;

pub const HEADER_HEIGHT: u16 = 3;
pub const SEARCH_BAR_HEIGHT: u16 = 3;
pub const SEARCH_BUTTON_WIDTH: u16 = 16;

pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 5;
pub const SUGGESTION_HEIGHT: u16 = 3;
pub const SUGGESTION_GAP: u16 = 2;

pub const DETAIL_MAX_WIDTH: u16 = 78;
pub const DETAIL_MAX_HEIGHT: u16 = 18;
pub const CLOSE_LABEL: &str = "[x]";

pub const ACCENT: Color = Color::Rgb(37, 99, 235);
pub const HEADER_BG: Color = Color::Rgb(15, 23, 42);
pub const STATUS_BG: Color = Color::Rgb(0, 95, 135);
pub const MUTED: Color = Color::Rgb(148, 163, 184);
