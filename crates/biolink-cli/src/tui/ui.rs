//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Form, InputMode, Phase};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer_chunks[1]);

    draw_header(frame, app, outer_chunks[0]);
    draw_links_pane(frame, app, pane_chunks[0]);

    match app.active_form() {
        Some(form) => draw_form(frame, app, form, pane_chunks[1]),
        None => draw_detail_pane(frame, app, pane_chunks[1]),
    }

    draw_status_bar(frame, app, outer_chunks[2]);

    if let Some(message) = &app.acknowledgement {
        draw_acknowledgement(frame, message);
    } else if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Preview of the public page header
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let settings = &app.settings;
    let title = if settings.title.is_empty() {
        Span::styled("(no title)", Style::default().add_modifier(Modifier::DIM))
    } else {
        Span::styled(
            settings.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(vec![
            title,
            Span::raw("  "),
            Span::styled(
                settings.subtitle.as_str(),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ]),
        Line::from(vec![
            Span::styled("Image: ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(settings.profile_image_or_placeholder()),
            Span::styled("   Page: ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(app.public_url.as_str()),
        ]),
    ];

    let block = Block::default().title(" Biolink ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Draw the link list (left)
fn draw_links_pane(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.input_mode == InputMode::Normal;
    let max_len = area.width.saturating_sub(8) as usize;

    let items: Vec<ListItem> = app
        .links
        .iter()
        .enumerate()
        .map(|(position, link)| {
            let style = if link.hidden {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };

            let mut title_spans = vec![
                Span::styled(format!("{:>2}. ", position + 1), style),
                Span::styled(truncate(&link.title, max_len), style),
            ];
            if link.hidden {
                title_spans.push(Span::styled(
                    " [hidden]",
                    Style::default().fg(Color::DarkGray),
                ));
            }

            let url_line = Line::from(vec![Span::styled(
                format!("    {}", truncate(&link.url, max_len)),
                Style::default().add_modifier(Modifier::DIM),
            )]);

            ListItem::new(vec![Line::from(title_spans), url_line])
        })
        .collect();

    let border_style = if is_active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let title = format!(
        " Links ({}, {} hidden) ",
        app.links.len(),
        app.hidden_count()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if app.links.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No links yet. Press a to add one.",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let highlight_style = if is_active {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style);

    let mut state = ListState::default();
    state.select(Some(app.link_index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the selected link's details (right)
fn draw_detail_pane(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let content = if let Some(link) = app.current_link() {
        vec![
            Line::from(vec![Span::styled("Title: ", bold), Span::raw(&link.title)]),
            Line::from(""),
            Line::from(vec![Span::styled("URL: ", bold), Span::raw(&link.url)]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Visible: ", bold),
                Span::raw(if link.hidden { "no" } else { "yes" }),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("ID: ", bold),
                Span::styled(&link.id, Style::default().add_modifier(Modifier::DIM)),
            ]),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Select a link to view details",
                Style::default().add_modifier(Modifier::DIM),
            )]),
        ]
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Draw the active form (right) and place the cursor in the focused field
fn draw_form(frame: &mut Frame, app: &App, form: &Form, area: Rect) {
    let title = match app.input_mode {
        InputMode::AddForm => " Add link ",
        InputMode::EditDraft => " Edit link ",
        InputMode::SettingsForm => " Page settings ",
        InputMode::Normal => "",
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let mut lines = Vec::new();
    for (index, field) in form.fields.iter().enumerate() {
        let focused = index == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(field.label, label_style)));
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::raw(field.input.value()),
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Enter:save  Tab:next field  Esc:cancel",
        Style::default().add_modifier(Modifier::DIM),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);

    // Each field takes three lines; the input is the second
    if let Some(field) = form.fields.get(form.focus) {
        let cursor_x = area.x + 1 + 2 + field.input.cursor() as u16;
        let cursor_y = area.y + 1 + (form.focus as u16) * 3 + 1;
        if cursor_x < area.right() && cursor_y < area.bottom() {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if app.phase == Phase::Submitting {
        "Saving...".to_string()
    } else if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        match app.input_mode {
            InputMode::Normal => {
                "a:add  e:edit  J/K:move  h:hide  d:del  s:settings  p:page  ?:help  q:quit"
                    .to_string()
            }
            _ => "Enter:save  Tab:next field  Esc:cancel".to_string(),
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

fn centered(frame: &Frame, width: u16, height: u16) -> Rect {
    let area = frame.area();
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Draw the acknowledgement modal
fn draw_acknowledgement(frame: &mut Frame, message: &str) {
    let popup_area = centered(frame, 44, 6);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Saved ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, popup_area);
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let popup_area = centered(frame, 50, 22);

    // Clear the popup area
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Move selection"),
        Line::from("  g/G         First/last link"),
        Line::from("  Enter       Open link in browser"),
        Line::from("  p           Open public page"),
        Line::from(""),
        Line::from("Links:"),
        Line::from("  a           Add link"),
        Line::from("  e           Edit link"),
        Line::from("  J/K         Move link down/up"),
        Line::from("  h, Space    Hide/show link"),
        Line::from("  d           Delete link"),
        Line::from(""),
        Line::from("  s           Page settings"),
        Line::from("  r           Reload"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, popup_area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
