use crate::checklist::models::View;
use crate::store::Store;
use crate::tui::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, List, ListItem, ListState, Paragraph},
};

const ACTIVE_COLOR: Color = Color::Indexed(86);
const INACTIVE_COLOR: Color = Color::Indexed(12);

pub fn draw<S: Store>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app);
    match app.state.view {
        View::List => draw_task_list(frame, chunks[1], app),
        View::Add => draw_add_form(frame, chunks[1], app),
    }
    draw_footer(frame, chunks[2], app);
}

fn draw_header<S: Store>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let header_text = match app.state.view {
        View::List => "Tasks:",
        View::Add => "What's the task?",
    };
    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).title("Checklist"))
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(header, area);
}

fn draw_task_list<S: Store>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(INACTIVE_COLOR));

    if app.state.is_empty() {
        let hint = Paragraph::new("No tasks. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = app
        .state
        .items
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let row = format!("{}. {}", i + 1, label);
            let line = if app.state.is_done(i) {
                Line::from(vec![
                    Span::styled(
                        row,
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                    ),
                    Span::styled(" ✓", Style::default().fg(Color::Green)),
                ])
            } else {
                Line::from(Span::raw(row))
            };
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(
            Style::default()
                .fg(ACTIVE_COLOR)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = ListState::default();
    list_state.select(Some(app.state.cursor));

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_add_form<S: Store>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let input = &app.input;
    let field_width = input.width as u16 + 2;
    let field_area = Rect {
        x: area.x,
        y: area.y,
        width: field_width.min(area.width),
        height: 3.min(area.height),
    };

    let (text, caret_column) = input.visible();
    let line = if input.is_empty() {
        Line::from(Span::styled(
            input.placeholder.as_str(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(text)
    };

    let field = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACTIVE_COLOR)),
    );
    frame.render_widget(field, field_area);

    if field_area.width > 2 && field_area.height > 2 {
        let max_x = field_area.x + field_area.width - 2;
        let cursor_x = (field_area.x + 1 + caret_column as u16).min(max_x);
        frame.set_cursor(cursor_x, field_area.y + 1);
    }
}

fn draw_footer<S: Store>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let footer_text = match app.state.view {
        View::List => format!(
            "Items: {} | Done: {} | j/k: navigate | Space: done | a: add | d: delete | q: quit",
            app.total_items(),
            app.completed_items()
        ),
        View::Add => "ADD | Enter: save | Esc: cancel | Tab: back to list | Ctrl+C: quit".to_string(),
    };

    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));

    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::tui::app::AppOptions;
    use crate::tui::persistence::Persister;
    use crossterm::event::{KeyCode, KeyEvent};
    use ratatui::{Terminal, backend::TestBackend};

    fn fresh_app() -> App<MemoryStore> {
        App::load(Persister::new(MemoryStore::new()), AppOptions::default()).unwrap()
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key_event(KeyEvent::from(code)).unwrap();
    }

    #[allow(deprecated)]
    fn render(app: &App<MemoryStore>) -> (String, Terminal<TestBackend>) {
        let mut terminal = Terminal::new(TestBackend::new(100, 14)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();

        let buf = terminal.backend().buffer();
        let area = buf.area;
        let mut lines = Vec::new();
        for y in area.y..area.y + area.height {
            let mut line = String::new();
            for x in area.x..area.x + area.width {
                line.push_str(buf.get(x, y).symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        (lines.join("\n"), terminal)
    }

    #[test]
    fn test_list_view_numbers_rows_and_marks_cursor() {
        let app = fresh_app();
        let (screen, _) = render(&app);

        assert!(screen.contains("Tasks:"));
        assert!(screen.contains("> 1. Do a thing"));
        assert!(screen.contains("2. do another thing"));
        assert!(!screen.contains("> 2."));
        assert!(screen.contains("Items: 2 | Done: 0"));
    }

    #[test]
    fn test_done_rows_are_marked() {
        let mut app = fresh_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        let (screen, _) = render(&app);

        assert!(screen.contains("> 2. do another thing ✓"));
        assert!(screen.contains("Done: 1"));
    }

    #[test]
    fn test_empty_list_shows_hint() {
        let mut app = fresh_app();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('d'));
        let (screen, _) = render(&app);
        assert!(screen.contains("No tasks. Press 'a' to add one."));
    }

    #[test]
    fn test_add_view_shows_placeholder_when_empty() {
        let mut app = fresh_app();
        press(&mut app, KeyCode::Char('a'));
        let (screen, _) = render(&app);

        assert!(screen.contains("What's the task?"));
        assert!(screen.contains("Do the thing"));
        assert!(!screen.contains("1. Do a thing"));
    }

    #[test]
    fn test_add_view_shows_typed_text_and_cursor() {
        let mut app = fresh_app();
        press(&mut app, KeyCode::Char('a'));
        for c in "Buy milk".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        let (screen, mut terminal) = render(&app);

        assert!(screen.contains("Buy milk"));
        assert!(!screen.contains("Do the thing"));
        // margin 1 + header 3 puts the field's top border at row 4
        assert_eq!(terminal.get_cursor().unwrap(), (1 + 1 + 8, 5));
    }

    #[test]
    fn test_render_does_not_mutate_state() {
        let app = fresh_app();
        let before = app.state.clone();
        let _ = render(&app);
        assert_eq!(app.state, before);
    }
}
