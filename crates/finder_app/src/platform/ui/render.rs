use finder_core::{AppViewModel, BookCardView, BookDetailView, CoverView, RETRY_HINT};
use ratatui::layout::{Alignment, Position};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::constants::*;
use super::layout::{self, DetailLayout, ScreenLayout};
use super::{Focus, UiState};

/// Draws one frame and returns the layout it used.
pub fn draw(frame: &mut Frame, view: &AppViewModel, ui: &UiState) -> ScreenLayout {
    let layout = layout::compute(frame.area(), view, ui.scroll_row);

    draw_header(frame, layout.header);
    draw_search_bar(frame, view, ui, &layout);
    draw_body(frame, view, ui, &layout);
    draw_status_bar(frame, view, layout.status);

    if let (Some(detail), Some(detail_layout)) = (&view.detail, &layout.detail) {
        draw_detail(frame, detail, detail_layout);
    } else if ui.focus == Focus::Input {
        // Border (1) plus the characters before the cursor.
        let max_x = layout.search_input.right().saturating_sub(2);
        let cursor_x = (layout.search_input.x + 1 + ui.cursor as u16).min(max_x);
        frame.set_cursor_position(Position::new(cursor_x, layout.search_input.y + 1));
    }

    layout
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Discover Your Next ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                "Great Read",
                Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "Search through millions of books from the Open Library collection",
            Style::default().fg(MUTED),
        )),
    ];
    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(HEADER_BG));
    frame.render_widget(header, area);
}

fn draw_search_bar(frame: &mut Frame, view: &AppViewModel, ui: &UiState, layout: &ScreenLayout) {
    let border_style = if ui.focus == Focus::Input && view.detail.is_none() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search ");

    let text = if view.query.is_empty() {
        Span::styled(
            "Search by book title, author, or ISBN...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(view.query.as_str(), Style::default().fg(Color::White))
    };
    frame.render_widget(Paragraph::new(Line::from(text)).block(block), layout.search_input);

    let (label, style) = if view.search_enabled {
        (
            "Search",
            Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD),
        )
    } else {
        ("Searching...", Style::default().fg(Color::Gray).bg(Color::DarkGray))
    };
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, layout.search_button);
}

fn draw_body(frame: &mut Frame, view: &AppViewModel, ui: &UiState, layout: &ScreenLayout) {
    let body = layout.body;

    if view.loading {
        let mut lines = vec![Line::from(""), Line::from("Searching our library...")];
        if let Some(bytes) = view.bytes_received {
            lines.push(Line::from(Span::styled(
                format!("{} KB received", bytes / 1024),
                Style::default().fg(MUTED),
            )));
        }
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
        return;
    }

    if let Some(error) = &view.error {
        let width = body.width.min(72);
        let area = Rect::new(body.x + (body.width - width) / 2, body.y + 1, width, body.height.min(4));
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::Red));
        let lines = vec![
            Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(RETRY_HINT, Style::default().fg(Color::Red))),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    if let Some(suggestions) = &view.suggestions {
        let intro = vec![
            Line::from(Span::styled(
                "Start Your Literary Journey",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Enter a book title above to explore millions of books from around the world",
                Style::default().fg(MUTED),
            )),
        ];
        let intro_area = Rect::new(body.x, body.y + 1, body.width, body.height.min(2));
        frame.render_widget(Paragraph::new(intro).alignment(Alignment::Center), intro_area);

        for (index, rect) in &layout.suggestions {
            let Some(suggestion) = suggestions.get(*index) else {
                continue;
            };
            let highlighted = ui.focus == Focus::Grid && ui.highlight == *index;
            let style = if highlighted {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let widget = Paragraph::new(suggestion.label.as_str())
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(widget, *rect);
        }
        return;
    }

    if let (Some(heading), Some(area)) = (&view.results_heading, layout.results_heading) {
        frame.render_widget(
            Paragraph::new(Span::styled(
                heading.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            area,
        );
    }
    for (index, rect) in &layout.cards {
        if let Some(card) = view.cards.get(*index) {
            let highlighted = ui.focus == Focus::Grid && ui.highlight == *index;
            draw_card(frame, card, highlighted, *rect);
        }
    }
}

fn draw_card(frame: &mut Frame, card: &BookCardView, highlighted: bool, area: Rect) {
    let border_style = if highlighted {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = block.inner(area);
    let width = usize::from(inner.width);

    let cover = match card.cover {
        CoverView::Image { .. } => Span::styled("[cover]", Style::default().fg(Color::Green)),
        CoverView::Placeholder => Span::styled("[no cover]", Style::default().fg(Color::DarkGray)),
    };
    let mut meta = vec![cover];
    if let Some(year) = card.year {
        meta.push(Span::raw(format!(" {year}")));
    }

    let lines = vec![
        Line::from(Span::styled(
            truncate(&card.title, width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(truncate(&card.author, width), Style::default().fg(MUTED))),
        Line::from(meta),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status_bar(frame: &mut Frame, view: &AppViewModel, area: Rect) {
    let left_text = if view.loading {
        " Searching...".to_string()
    } else if !view.cards.is_empty() {
        format!(" {} results", view.cards.len())
    } else {
        " Ready".to_string()
    };
    let right_text = if view.detail.is_some() {
        " Esc/x:Close  o:Open page  c:Open cover  Ctrl+Q:Quit "
    } else {
        " Enter:Search/Open  Tab:Focus  \u{2190}\u{2191}\u{2193}\u{2192}:Move  Esc:Back  Ctrl+Q:Quit "
    };

    let available_width = usize::from(area.width);
    let left_len = left_text.chars().count();
    let right_len = right_text.chars().count();
    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{left_text}{:padding$}{right_text}", "")
    } else {
        format!("{left_text:available_width$}")
    };

    frame.render_widget(
        Paragraph::new(status_str).style(Style::default().fg(Color::White).bg(STATUS_BG)),
        area,
    );
}

fn draw_detail(frame: &mut Frame, detail: &BookDetailView, layout: &DetailLayout) {
    frame.render_widget(Clear, layout.panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Book Details ")
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    frame.render_widget(block, layout.panel);
    frame.render_widget(
        Paragraph::new(CLOSE_LABEL).style(Style::default().fg(Color::LightRed)),
        layout.close,
    );

    let label = Style::default().fg(MUTED).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            detail.title.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(detail.authors.as_str(), Style::default().fg(MUTED))),
        Line::from(""),
    ];
    if let Some(year) = detail.first_published {
        lines.push(Line::from(vec![
            Span::styled("First Published  ", label),
            Span::raw(year.to_string()),
        ]));
    }
    if let Some(publisher) = &detail.publisher {
        lines.push(Line::from(vec![
            Span::styled("Publisher        ", label),
            Span::raw(publisher.as_str()),
        ]));
    }
    if let Some(pages) = detail.pages {
        lines.push(Line::from(vec![
            Span::styled("Pages            ", label),
            Span::raw(pages.to_string()),
        ]));
    }
    if let Some(isbn) = &detail.isbn {
        lines.push(Line::from(vec![
            Span::styled("ISBN             ", label),
            Span::raw(isbn.as_str()),
        ]));
    }
    if detail.cover == CoverView::Placeholder {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No Cover Available",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        layout.fields,
    );

    if let (CoverView::Image { url }, Some(area)) = (&detail.cover, layout.cover_line) {
        frame.render_widget(
            Paragraph::new(link_line("c", "Cover", url, usize::from(area.width))),
            area,
        );
    }
    if let (Some(url), Some(area)) = (&detail.catalog_url, layout.link_line) {
        frame.render_widget(
            Paragraph::new(link_line(
                "o",
                "View on Open Library",
                url,
                usize::from(area.width),
            )),
            area,
        );
    }
}

fn link_line(key: &str, label: &str, url: &str, width: usize) -> Line<'static> {
    let prefix = format!("[{key}] {label}: ");
    let remaining = width.saturating_sub(prefix.chars().count());
    Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(
            truncate(url, remaining),
            Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED),
        ),
    ])
}

/// Cuts `text` to `width` characters, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('\u{2026}');
    cut
}
