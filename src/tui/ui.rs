use crate::index::format::SymbolKind;
use crate::query::MatchRecord;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_query_input(f, app, chunks[0]);
    draw_results_list(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn draw_query_input(f: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.query.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search (Enter: print URL, Esc: quit) "),
        );

    f.render_widget(input, area);

    if app.corrupt.is_none() {
        f.set_cursor_position((area.x + app.query.len() as u16 + 1, area.y + 1));
    }
}

fn draw_results_list(f: &mut Frame, app: &App, area: Rect) {
    let typed_len = app.query.trim().to_lowercase().len();

    let items: Vec<ListItem> = app
        .results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let style = if i == app.selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::styled(
                    format!("{:>9} ", result.kind.label()),
                    Style::default().fg(kind_color(result.kind)),
                ),
            ];
            spans.extend(name_spans(result, typed_len));

            if let Some(alias_of) = &result.alias_of {
                spans.push(Span::styled(
                    format!(": {}", alias_of),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if result.deprecated {
                spans.push(Span::styled(
                    " [deprecated]",
                    Style::default().fg(Color::Red),
                ));
            }
            if result.deleted {
                spans.push(Span::styled(" [deleted]", Style::default().fg(Color::Red)));
            }
            spans.push(Span::styled(
                format!("  {}", result.url),
                Style::default().fg(Color::DarkGray),
            ));

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Results ({}) ", app.results.len())),
    );

    let mut state = ListState::default();
    if !app.results.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Split a match's name into scope prefix, the part the user typed, and the
/// remaining suffix, mirroring how `suffix_length` delimits the match.
/// Falls back to an unstyled span when the split would cut a UTF-8
/// character (or the typed length exceeds the name).
fn name_spans<'a>(result: &'a MatchRecord, typed_len: usize) -> Vec<Span<'a>> {
    let name = result.name.as_str();
    let typed_start = name
        .len()
        .checked_sub(typed_len + result.suffix_length);
    let suffix_start = name.len() - result.suffix_length.min(name.len());

    match typed_start {
        Some(typed_start)
            if name.is_char_boundary(typed_start) && name.is_char_boundary(suffix_start) =>
        {
            vec![
                Span::styled(&name[..typed_start], Style::default().fg(Color::DarkGray)),
                Span::styled(
                    &name[typed_start..suffix_start],
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(&name[suffix_start..]),
            ]
        }
        _ => vec![Span::raw(name)],
    }
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let style = if app.corrupt.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let status = Paragraph::new(app.status_message.as_str()).style(style);

    f.render_widget(status, area);
}

/// Kind label colors, matching the grouping used by `output::print_matches`
fn kind_color(kind: SymbolKind) -> Color {
    match kind {
        SymbolKind::Namespace
        | SymbolKind::Class
        | SymbolKind::Struct
        | SymbolKind::Union
        | SymbolKind::Typedef
        | SymbolKind::Enum => Color::Cyan,
        SymbolKind::Function | SymbolKind::Define => Color::Blue,
        SymbolKind::Variable | SymbolKind::Enumerator => Color::White,
        SymbolKind::Group | SymbolKind::Page => Color::Green,
        SymbolKind::Directory | SymbolKind::File => Color::Yellow,
    }
}
