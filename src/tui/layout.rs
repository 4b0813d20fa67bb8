use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::tui::app::{ActivePane, TuiApp};

const HELP: &str = "j/k:Nav  n/p:Page  Tab:Pane  o:Open  R:Refresh  X:Reset seen  q:Quit";

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55), // Items pane
            Constraint::Min(8),         // Preview pane
            Constraint::Length(1),      // Status bar
        ])
        .split(frame.area());

    render_items_pane(frame, app, chunks[0], colors);
    render_preview_pane(frame, app, chunks[1], colors);
    render_status_bar(frame, app, chunks[2], colors);
}

fn border_style(active: bool, colors: &ColorConfig) -> Style {
    if active {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn render_items_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Items;

    // Two lines per card: headline, then "source • date"
    let items: Vec<ListItem> = app
        .items
        .iter()
        .map(|item| {
            ListItem::new(Text::from(vec![
                Line::from(Span::styled(
                    item.display_title().to_string(),
                    Style::default()
                        .fg(colors.headline)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", item.meta_line()),
                    Style::default().fg(colors.meta),
                )),
            ]))
        })
        .collect();

    let title = format!(
        " Headlines ({}) [{}/{}] ",
        app.items.len(),
        if app.items.is_empty() { 0 } else { app.item_index + 1 },
        app.items.len()
    );

    let highlight_style = if is_active {
        Style::default()
            .bg(colors.selection_bg_active)
            .fg(colors.selection_fg_active)
    } else {
        Style::default()
            .bg(colors.selection_bg_inactive)
            .fg(colors.selection_fg_inactive)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.item_list_state);
}

fn render_preview_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Preview;

    let content = match app.selected_item() {
        Some(item) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    item.display_title().to_string(),
                    Style::default()
                        .fg(colors.headline)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    item.meta_line(),
                    Style::default().fg(colors.meta),
                )),
            ];
            if item.has_link() {
                lines.push(Line::from(Span::styled(
                    item.link.clone(),
                    Style::default().fg(colors.link),
                )));
            }
            if !item.summary.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(item.summary.clone()));
            }
            Text::from(lines)
        }
        None => Text::from("Waiting for headlines..."),
    };

    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.preview_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let (status, fg) = if app.is_refreshing {
        ("Refreshing feeds...".to_string(), colors.busy_fg)
    } else if let Some(ref msg) = app.status_message {
        (msg.clone(), colors.status_fg)
    } else {
        (HELP.to_string(), colors.status_fg)
    };

    let paragraph = Paragraph::new(status).style(Style::default().fg(fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
