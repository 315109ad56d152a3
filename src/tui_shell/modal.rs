use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::gate::{DELETE_CONFIRMATION, DeleteGate, GateOutcome};
use crate::model::{Project, language_label};

use super::form::{FormEvent, ProjectField, ProjectForm, SnippetField, SnippetForm};
use super::input::Input;

fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn error_line(error: Option<&str>) -> Line<'_> {
    match error {
        Some(e) => Line::from(Span::styled(e, Style::default().fg(Color::Red))),
        None => Line::from(""),
    }
}

fn hint_line(hint: &str) -> Line<'_> {
    Line::from(Span::styled(hint, Style::default().fg(Color::Gray)))
}

fn draw_input(frame: &mut ratatui::Frame, area: Rect, title: &str, input: &Input, focused: bool) {
    frame.render_widget(
        Paragraph::new(input.buf.as_str()).block(field_block(title, focused)),
        area,
    );
    if focused {
        let (_, col) = input.cursor_pos();
        frame.set_cursor_position((area.x + 1 + col, area.y + 1));
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &super::Modal, selected: Option<&Project>) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 90);

    match modal {
        super::Modal::AddProject(form) => draw_project_form(frame, area, w, "New project", form),
        super::Modal::EditProject(form) => draw_project_form(frame, area, w, "Edit project", form),
        super::Modal::AddSnippet(form) => draw_snippet_form(frame, area, w, form),
        super::Modal::DeleteProject(gate) => draw_delete_gate(frame, area, w, gate, selected),
    }
}

fn draw_project_form(frame: &mut ratatui::Frame, area: Rect, w: u16, title: &str, form: &ProjectForm) {
    let box_area = centered(area, w, 12);
    frame.render_widget(Clear, box_area);
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    draw_input(frame, parts[0], "Name", &form.name, form.field == ProjectField::Name);
    draw_input(
        frame,
        parts[1],
        "Description",
        &form.description,
        form.field == ProjectField::Description,
    );
    frame.render_widget(Paragraph::new(error_line(form.error)), parts[2]);
    frame.render_widget(
        Paragraph::new(hint_line("Tab next field  Enter save  Esc cancel")),
        parts[3],
    );
}

fn draw_snippet_form(frame: &mut ratatui::Frame, area: Rect, w: u16, form: &SnippetForm) {
    let h = area.height.saturating_sub(4).clamp(14, 30);
    let box_area = centered(area, w, h);
    frame.render_widget(Clear, box_area);
    let block = Block::default().borders(Borders::ALL).title("Add code snippet");
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    draw_input(frame, parts[0], "Title", &form.title, form.field == SnippetField::Title);

    let language_focused = form.field == SnippetField::Language;
    let arrow = if language_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("< ", arrow),
            Span::styled(
                language_label(form.language()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" >", arrow),
        ]))
        .block(field_block("Language", language_focused)),
        parts[1],
    );

    let code_focused = form.field == SnippetField::Code;
    let code_area = parts[2];
    let (row, col) = form.code.cursor_pos();
    let visible = code_area.height.saturating_sub(2);
    let scroll = row.saturating_sub(visible.saturating_sub(1));
    let lines: Vec<Line> = form.code.buf.split('\n').map(Line::from).collect();
    frame.render_widget(
        Paragraph::new(lines)
            .scroll((scroll, 0))
            .block(field_block("Code", code_focused)),
        code_area,
    );
    if code_focused {
        frame.set_cursor_position((code_area.x + 1 + col, code_area.y + 1 + row - scroll));
    }

    frame.render_widget(Paragraph::new(error_line(form.error)), parts[3]);
    frame.render_widget(
        Paragraph::new(hint_line(
            "Tab next field  Left/Right language  Ctrl+S save  Esc cancel",
        )),
        parts[4],
    );
}

fn draw_delete_gate(
    frame: &mut ratatui::Frame,
    area: Rect,
    w: u16,
    gate: &DeleteGate,
    selected: Option<&Project>,
) {
    let box_area = centered(area, w.min(70), 11);
    frame.render_widget(Clear, box_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title("Delete project");
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let name = selected.map(|p| p.name.as_str()).unwrap_or("this project");
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(format!(
                "This permanently deletes \"{}\" and all of its code snippets.",
                name
            )),
            Line::from(format!("Type \"{}\" to confirm.", DELETE_CONFIRMATION)),
        ])
        .wrap(Wrap { trim: false }),
        parts[0],
    );

    let masked = gate.masked();
    frame.render_widget(
        Paragraph::new(masked.as_str()).block(field_block("Password", true)),
        parts[1],
    );
    frame.set_cursor_position((
        parts[1].x + 1 + masked.chars().count() as u16,
        parts[1].y + 1,
    ));

    frame.render_widget(Paragraph::new(error_line(gate.error())), parts[2]);
    frame.render_widget(
        Paragraph::new(hint_line("Enter delete  Esc cancel")),
        parts[3],
    );
}

pub(super) fn handle_modal_key<S: super::TuiStore>(app: &mut super::App<S>, key: KeyEvent) {
    enum ModalAction {
        None,
        Close,
        SubmitProject {
            edit: bool,
            name: String,
            description: String,
        },
        SubmitSnippet {
            title: String,
            code: String,
            language: String,
        },
        ConfirmDelete,
    }

    let action = {
        let Some(m) = app.modal.as_mut() else {
            return;
        };
        let edit = matches!(m, super::Modal::EditProject(_));

        match m {
            super::Modal::AddProject(form) | super::Modal::EditProject(form) => {
                match form.handle_key(key) {
                    FormEvent::Cancel => ModalAction::Close,
                    FormEvent::Submit => match form.validate() {
                        Some((name, description)) => ModalAction::SubmitProject {
                            edit,
                            name,
                            description,
                        },
                        None => ModalAction::None,
                    },
                    FormEvent::None => ModalAction::None,
                }
            }
            super::Modal::AddSnippet(form) => match form.handle_key(key) {
                FormEvent::Cancel => ModalAction::Close,
                FormEvent::Submit => match form.validate() {
                    Some((title, code, language)) => ModalAction::SubmitSnippet {
                        title,
                        code,
                        language,
                    },
                    None => ModalAction::None,
                },
                FormEvent::None => ModalAction::None,
            },
            super::Modal::DeleteProject(gate) => match key.code {
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Enter => match gate.submit(|| ()) {
                    GateOutcome::Confirmed(()) => ModalAction::ConfirmDelete,
                    GateOutcome::Rejected => ModalAction::None,
                },
                KeyCode::Backspace => {
                    gate.pop();
                    ModalAction::None
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    gate.push(c);
                    ModalAction::None
                }
                _ => ModalAction::None,
            },
        }
    };

    match action {
        ModalAction::None => {}
        ModalAction::Close => app.close_modal(),
        ModalAction::SubmitProject {
            edit,
            name,
            description,
        } => app.submit_project(edit, &name, &description),
        ModalAction::SubmitSnippet {
            title,
            code,
            language,
        } => app.submit_snippet(&title, &code, &language),
        ModalAction::ConfirmDelete => app.confirm_delete(),
    }
}
