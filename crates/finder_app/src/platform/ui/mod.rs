pub mod constants;
pub mod layout;
pub mod render;

/// Which part of the screen receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    /// Result cards, or the suggestions when there are no results.
    Grid,
}

/// Frontend-only state that the core does not track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    pub focus: Focus,
    pub highlight: usize,
    /// Cursor position in the query, in characters.
    pub cursor: usize,
    pub scroll_row: usize,
}
