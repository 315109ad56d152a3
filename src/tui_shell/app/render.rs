use super::*;

const KEY_HINTS: &str =
    "Tab focus  j/k move  n new  e edit  D delete  a add snippet  x remove snippet  r reload  q quit";

fn ts_ui_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[year]-[month repr:numerical padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]Z",
        )
        .expect("valid time format")
    })
}

pub(in crate::tui_shell) fn fmt_ts_ui(ts: &str) -> String {
    OffsetDateTime::parse(ts, &Rfc3339)
        .ok()
        .and_then(|dt| dt.format(ts_ui_format()).ok())
        .unwrap_or_else(|| ts.to_string())
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

pub(super) fn draw<S: TuiStore>(frame: &mut ratatui::Frame, app: &App<S>) {
    let area = frame.area();
    if app.controller.is_loading() {
        let y = area.y + area.height / 2;
        frame.render_widget(
            Paragraph::new("Loading...").alignment(ratatui::layout::Alignment::Center),
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1.min(area.height),
            },
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    // Header
    let count = app.controller.projects().len();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "snipdeck",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} project{}", count, if count == 1 { "" } else { "s" }),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);
    draw_projects(frame, body[0], app);
    draw_snippets(frame, body[1], app);

    draw_footer(frame, chunks[2], app);

    if let Some(m) = &app.modal {
        modal::draw_modal(frame, m, app.controller.selected());
    }
}

fn draw_projects<S: TuiStore>(frame: &mut ratatui::Frame, area: Rect, app: &App<S>) {
    let block = pane_block("Projects", app.focus == Focus::Projects);
    let projects = app.controller.projects();
    if projects.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No projects yet",
                Style::default().fg(Color::Gray),
            )))
            .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = projects
        .iter()
        .map(|p| {
            let mut lines = vec![Line::from(Span::styled(
                p.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            if let Some(d) = p.description() {
                lines.push(Line::from(Span::styled(d, Style::default().fg(Color::Gray))));
            }
            ListItem::new(lines)
        })
        .collect();

    let mut state = ListState::default();
    state.select(
        app.controller
            .selected()
            .and_then(|s| projects.iter().position(|p| p.id == s.id)),
    );
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_snippets<S: TuiStore>(frame: &mut ratatui::Frame, area: Rect, app: &App<S>) {
    let focused = app.focus == Focus::Snippets;
    let Some(project) = app.controller.selected() else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Select a project to view code snippets",
                Style::default().fg(Color::Gray),
            )))
            .block(pane_block("Code snippets", focused)),
            area,
        );
        return;
    };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Min(0),
        ])
        .split(area);

    let mut header = vec![Line::from(Span::styled(
        project.name.as_str(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(d) = project.description() {
        header.push(Line::from(d));
    }
    frame.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::BOTTOM)),
        parts[0],
    );

    let snippets = app.controller.snippets();
    let block = pane_block("Code snippets", focused);
    if snippets.is_empty() {
        let msg = if app.controller.is_fetching_snippets() {
            "Loading..."
        } else {
            "No code snippets yet"
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(msg, Style::default().fg(Color::Gray))))
                .block(block),
            parts[1],
        );
        return;
    }

    let items: Vec<ListItem> = snippets
        .iter()
        .map(|s| {
            ListItem::new(Line::from(vec![
                Span::raw(s.title.as_str()),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", language_label(&s.language)),
                    Style::default().fg(Color::Green),
                ),
            ]))
        })
        .collect();
    let mut state = ListState::default();
    state.select(Some(app.snippet_cursor.min(snippets.len() - 1)));
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, parts[1], &mut state);

    if let Some(s) = app.highlighted_snippet() {
        let title = format!(
            "{} - {} - {}",
            s.title,
            language_label(&s.language),
            fmt_ts_ui(&s.created_at)
        );
        let lines: Vec<Line> = s.code.lines().map(Line::from).collect();
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(title)),
            parts[2],
        );
    }
}

fn draw_footer<S: TuiStore>(frame: &mut ratatui::Frame, area: Rect, app: &App<S>) {
    let mut lines = Vec::new();
    match app.controller.notices().latest() {
        Some(n) => {
            let style = match n.level {
                NoticeLevel::Info => Style::default().fg(Color::White),
                NoticeLevel::Error => Style::default().fg(Color::Red),
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", fmt_ts_ui(&n.at)),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(n.message.as_str(), style),
            ]));
        }
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(Span::styled(
        KEY_HINTS,
        Style::default().fg(Color::Gray),
    )));
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP)),
        area,
    );
}
