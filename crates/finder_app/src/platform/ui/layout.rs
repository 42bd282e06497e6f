use finder_core::{AppViewModel, CoverView};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use super::constants::*;

/// Where everything was drawn in the last frame; used for mouse hit testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub search_input: Rect,
    pub search_button: Rect,
    pub body: Rect,
    pub status: Rect,
    pub results_heading: Option<Rect>,
    pub cards: Vec<(usize, Rect)>,
    pub suggestions: Vec<(usize, Rect)>,
    pub grid_columns: usize,
    pub grid_rows: usize,
    pub detail: Option<DetailLayout>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailLayout {
    pub panel: Rect,
    pub close: Rect,
    pub fields: Rect,
    pub cover_line: Option<Rect>,
    pub link_line: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    SearchInput,
    SearchButton,
    Card(usize),
    Suggestion(usize),
    DetailClose,
    DetailCover,
    DetailLink,
    DetailPanel,
    Backdrop,
    Nothing,
}

pub fn compute(area: Rect, view: &AppViewModel, scroll_row: usize) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(SEARCH_BAR_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let search = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(SEARCH_BUTTON_WIDTH)])
        .split(chunks[1]);

    let mut layout = ScreenLayout {
        header: chunks[0],
        search_input: search[0],
        search_button: search[1],
        body: chunks[2],
        status: chunks[3],
        grid_columns: 1,
        grid_rows: 1,
        ..ScreenLayout::default()
    };

    if !view.cards.is_empty() {
        place_cards(&mut layout, view.cards.len(), scroll_row);
    } else if let Some(suggestions) = &view.suggestions {
        let widths: Vec<u16> = suggestions
            .iter()
            .map(|s| s.label.chars().count() as u16 + 4)
            .collect();
        place_suggestions(&mut layout, &widths);
    }

    if let Some(detail) = &view.detail {
        let has_cover = matches!(detail.cover, CoverView::Image { .. });
        layout.detail = Some(place_detail(area, has_cover, detail.catalog_url.is_some()));
    }

    layout
}

fn place_cards(layout: &mut ScreenLayout, count: usize, scroll_row: usize) {
    let body = layout.body;
    layout.results_heading = Some(Rect::new(body.x, body.y, body.width, body.height.min(1)));
    let grid = Rect::new(
        body.x,
        body.y.saturating_add(2),
        body.width,
        body.height.saturating_sub(2),
    );

    let columns = usize::from((grid.width / CARD_WIDTH).max(1));
    let rows = usize::from((grid.height / CARD_HEIGHT).max(1));
    layout.grid_columns = columns;
    layout.grid_rows = rows;

    for index in 0..count {
        let row = index / columns;
        if row < scroll_row || row >= scroll_row + rows {
            continue;
        }
        let column = (index % columns) as u16;
        let visible_row = (row - scroll_row) as u16;
        let rect = Rect::new(
            grid.x + column * CARD_WIDTH,
            grid.y + visible_row * CARD_HEIGHT,
            CARD_WIDTH.min(grid.width),
            CARD_HEIGHT,
        )
        .intersection(grid);
        if !rect.is_empty() {
            layout.cards.push((index, rect));
        }
    }
}

/// Suggestions flow left to right below a three-line introduction, wrapping as needed.
fn place_suggestions(layout: &mut ScreenLayout, widths: &[u16]) {
    let body = layout.body;
    let left = body.x + SUGGESTION_GAP;
    let right = body.right();
    let mut x = left;
    let mut y = body.y + 4;
    let mut columns = 0;
    let mut current = 0;

    for (index, &width) in widths.iter().enumerate() {
        if x + width > right && x > left {
            x = left;
            y += SUGGESTION_HEIGHT;
            current = 0;
        }
        let rect = Rect::new(x, y, width, SUGGESTION_HEIGHT).intersection(body);
        if !rect.is_empty() {
            layout.suggestions.push((index, rect));
        }
        x += width + SUGGESTION_GAP;
        current += 1;
        columns = columns.max(current);
    }
    layout.grid_columns = columns.max(1);
}

fn place_detail(area: Rect, has_cover: bool, has_link: bool) -> DetailLayout {
    let width = DETAIL_MAX_WIDTH.min(area.width.saturating_sub(4));
    let height = DETAIL_MAX_HEIGHT.min(area.height.saturating_sub(2));
    let panel = centered_rect(width, height, area);
    let close_width = CLOSE_LABEL.len() as u16;
    let close = Rect::new(
        panel.x + panel.width.saturating_sub(close_width + 2),
        panel.y,
        close_width.min(panel.width),
        panel.height.min(1),
    );
    let inner = Rect::new(
        panel.x + 1,
        panel.y + 1,
        panel.width.saturating_sub(2),
        panel.height.saturating_sub(2),
    );

    let mut bottom = inner.bottom();
    let mut take_line = |present: bool| {
        if present && bottom > inner.y {
            bottom -= 1;
            Some(Rect::new(inner.x, bottom, inner.width, 1))
        } else {
            None
        }
    };
    let link_line = take_line(has_link);
    let cover_line = take_line(has_cover);

    let fields = Rect::new(inner.x, inner.y, inner.width, bottom.saturating_sub(inner.y));

    DetailLayout {
        panel,
        close,
        fields,
        cover_line,
        link_line,
    }
}

/// Helper to create a centered popup area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

impl ScreenLayout {
    /// Resolves a click. While the detail panel is open it captures every click.
    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let pos = Position::new(column, row);

        if let Some(detail) = &self.detail {
            if detail.close.contains(pos) {
                return Hit::DetailClose;
            }
            if detail.cover_line.is_some_and(|r| r.contains(pos)) {
                return Hit::DetailCover;
            }
            if detail.link_line.is_some_and(|r| r.contains(pos)) {
                return Hit::DetailLink;
            }
            if detail.panel.contains(pos) {
                return Hit::DetailPanel;
            }
            return Hit::Backdrop;
        }

        if self.search_button.contains(pos) {
            return Hit::SearchButton;
        }
        if self.search_input.contains(pos) {
            return Hit::SearchInput;
        }
        if let Some((index, _)) = self.cards.iter().find(|(_, r)| r.contains(pos)) {
            return Hit::Card(*index);
        }
        if let Some((index, _)) = self.suggestions.iter().find(|(_, r)| r.contains(pos)) {
            return Hit::Suggestion(*index);
        }
        Hit::Nothing
    }

    /// First grid row to show so that `highlight` stays visible.
    pub fn scroll_for(&self, highlight: usize, scroll_row: usize) -> usize {
        let row = highlight / self.grid_columns.max(1);
        let rows = self.grid_rows.max(1);
        if row < scroll_row {
            row
        } else if row >= scroll_row + rows {
            row + 1 - rows
        } else {
            scroll_row
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finder_core::{update, AppState, Book, Msg};

    fn view_with_books(count: usize, select: Option<usize>) -> AppViewModel {
        let (state, _) = update(AppState::new(), Msg::QueryChanged("emma".to_string()));
        let (state, _) = update(state, Msg::SearchSubmitted);
        let books = (0..count)
            .map(|i| Book {
                cover_id: Some(i as u64 + 1),
                key: Some(format!("/works/OL{i}W")),
                ..Book::new(format!("Book {i}"))
            })
            .collect();
        let (mut state, _) = update(state, Msg::SearchSucceeded { search_id: 1, books });
        if let Some(index) = select {
            state = update(state, Msg::BookClicked(index)).0;
        }
        state.view()
    }

    #[test]
    fn cards_fill_rows_of_the_grid() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = compute(area, &view_with_books(7, None), 0);

        assert_eq!(layout.grid_columns, 3);
        assert_eq!(layout.cards.len(), 7);
        let (_, first) = layout.cards[0];
        let (_, fourth) = layout.cards[3];
        assert_eq!(first.x, fourth.x);
        assert_eq!(fourth.y, first.y + CARD_HEIGHT);

        let hit = layout.hit(first.x + 2, first.y + 1);
        assert_eq!(hit, Hit::Card(0));
    }

    #[test]
    fn scrolled_grid_skips_hidden_rows() {
        let area = Rect::new(0, 0, 62, 20);
        let layout = compute(area, &view_with_books(20, None), 0);
        assert_eq!(layout.grid_columns, 2);
        assert_eq!(layout.grid_rows, 2);
        assert_eq!(layout.cards.len(), 4);

        let scrolled = compute(area, &view_with_books(20, None), 3);
        let indices: Vec<_> = scrolled.cards.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![6, 7, 8, 9]);
    }

    #[test]
    fn scroll_follows_the_highlight() {
        let layout = ScreenLayout {
            grid_columns: 2,
            grid_rows: 2,
            ..ScreenLayout::default()
        };
        assert_eq!(layout.scroll_for(1, 0), 0);
        assert_eq!(layout.scroll_for(5, 0), 1);
        assert_eq!(layout.scroll_for(0, 3), 0);
    }

    #[test]
    fn clicks_inside_the_panel_are_contained() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = compute(area, &view_with_books(3, Some(1)), 0);
        let detail = layout.detail.clone().expect("detail layout");

        assert_eq!(layout.hit(detail.panel.x + 3, detail.panel.y + 2), Hit::DetailPanel);
        assert_eq!(layout.hit(detail.close.x + 1, detail.close.y), Hit::DetailClose);
        assert_eq!(layout.hit(0, 0), Hit::Backdrop);

        let link = detail.link_line.expect("link line");
        assert_eq!(layout.hit(link.x, link.y), Hit::DetailLink);
        let cover = detail.cover_line.expect("cover line");
        assert_eq!(cover.y + 1, link.y);
        assert_eq!(layout.hit(cover.x, cover.y), Hit::DetailCover);

        // A card under the backdrop is not reachable while the panel is open.
        let (_, card) = layout.cards[0];
        assert_ne!(layout.hit(card.x + 1, card.y + 1), Hit::Card(0));
    }

    #[test]
    fn suggestions_are_clickable_in_the_empty_state() {
        let area = Rect::new(0, 0, 100, 30);
        let view = AppState::new().view();
        let layout = compute(area, &view, 0);

        assert_eq!(layout.suggestions.len(), 4);
        assert!(layout.cards.is_empty());
        let (_, third) = layout.suggestions[2];
        assert_eq!(layout.hit(third.x + 1, third.y + 1), Hit::Suggestion(2));
        assert_eq!(
            layout.hit(layout.search_button.x + 1, layout.search_button.y + 1),
            Hit::SearchButton
        );
    }
}
