//! Uncommitted field values for the add/edit dialogs.
//!
//! Forms only validate and hand back trimmed values. Talking to the store
//! is the caller's job.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{DEFAULT_LANGUAGE, LANGUAGES, Project};

use super::input::Input;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum FormEvent {
    None,
    Cancel,
    Submit,
}

/// Plain text editing shared by every field. Returns false for keys it
/// does not handle.
fn edit_text(input: &mut Input, key: KeyEvent, multiline: bool) -> bool {
    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Enter if multiline => input.insert_char('\n'),
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            input.insert_char(c)
        }
        _ => return false,
    }
    true
}

fn is_submit_chord(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ProjectField {
    Name,
    Description,
}

#[derive(Debug)]
pub(super) struct ProjectForm {
    pub(super) name: Input,
    pub(super) description: Input,
    pub(super) field: ProjectField,
    pub(super) error: Option<&'static str>,
}

impl ProjectForm {
    pub(super) fn new() -> Self {
        Self {
            name: Input::default(),
            description: Input::default(),
            field: ProjectField::Name,
            error: None,
        }
    }

    /// Prefilled from the project being edited.
    pub(super) fn editing(project: &Project) -> Self {
        Self {
            name: Input::with_text(&project.name),
            description: Input::with_text(project.description().unwrap_or_default()),
            ..Self::new()
        }
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        if is_submit_chord(key) {
            return FormEvent::Submit;
        }
        match key.code {
            KeyCode::Esc => return FormEvent::Cancel,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.field = match self.field {
                    ProjectField::Name => ProjectField::Description,
                    ProjectField::Description => ProjectField::Name,
                };
                return FormEvent::None;
            }
            KeyCode::Enter => return FormEvent::Submit,
            _ => {}
        }
        let input = match self.field {
            ProjectField::Name => &mut self.name,
            ProjectField::Description => &mut self.description,
        };
        if edit_text(input, key, false) {
            self.error = None;
        }
        FormEvent::None
    }

    /// Trimmed `(name, description)`, or `None` with the error set.
    pub(super) fn validate(&mut self) -> Option<(String, String)> {
        let name = self.name.buf.trim();
        if name.is_empty() {
            self.error = Some("Name is required");
            self.field = ProjectField::Name;
            return None;
        }
        Some((name.to_string(), self.description.buf.trim().to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum SnippetField {
    Title,
    Language,
    Code,
}

impl SnippetField {
    fn next(self) -> Self {
        match self {
            SnippetField::Title => SnippetField::Language,
            SnippetField::Language => SnippetField::Code,
            SnippetField::Code => SnippetField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            SnippetField::Title => SnippetField::Code,
            SnippetField::Language => SnippetField::Title,
            SnippetField::Code => SnippetField::Language,
        }
    }
}

#[derive(Debug)]
pub(super) struct SnippetForm {
    pub(super) title: Input,
    pub(super) code: Input,
    pub(super) language: usize,
    pub(super) field: SnippetField,
    pub(super) error: Option<&'static str>,
}

impl SnippetForm {
    pub(super) fn new() -> Self {
        Self {
            title: Input::default(),
            code: Input::default(),
            language: LANGUAGES
                .iter()
                .position(|l| *l == DEFAULT_LANGUAGE)
                .unwrap_or(0),
            field: SnippetField::Title,
            error: None,
        }
    }

    pub(super) fn language(&self) -> &'static str {
        LANGUAGES.get(self.language).copied().unwrap_or(DEFAULT_LANGUAGE)
    }

    fn cycle_language(&mut self, forward: bool) {
        let n = LANGUAGES.len();
        self.language = if forward {
            (self.language + 1) % n
        } else {
            (self.language + n - 1) % n
        };
    }

    /// `Enter` adds a line in the code field, so submitting is `Ctrl+S`.
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        if is_submit_chord(key) {
            return FormEvent::Submit;
        }
        match key.code {
            KeyCode::Esc => return FormEvent::Cancel,
            KeyCode::Tab => {
                self.field = self.field.next();
                return FormEvent::None;
            }
            KeyCode::BackTab => {
                self.field = self.field.prev();
                return FormEvent::None;
            }
            _ => {}
        }

        match self.field {
            SnippetField::Title => {
                if key.code == KeyCode::Enter {
                    self.field = SnippetField::Language;
                } else if edit_text(&mut self.title, key, false) {
                    self.error = None;
                }
            }
            SnippetField::Language => match key.code {
                KeyCode::Left | KeyCode::Up => self.cycle_language(false),
                KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => self.cycle_language(true),
                KeyCode::Enter => self.field = SnippetField::Code,
                _ => {}
            },
            SnippetField::Code => {
                if edit_text(&mut self.code, key, true) {
                    self.error = None;
                }
            }
        }
        FormEvent::None
    }

    /// Trimmed `(title, code, language)`, or `None` with the error set.
    pub(super) fn validate(&mut self) -> Option<(String, String, String)> {
        let title = self.title.buf.trim();
        let code = self.code.buf.trim();
        if title.is_empty() || code.is_empty() {
            self.error = Some("Title and code are required");
            self.field = if title.is_empty() {
                SnippetField::Title
            } else {
                SnippetField::Code
            };
            return None;
        }
        Some((
            title.to_string(),
            code.to_string(),
            self.language().to_string(),
        ))
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/form_tests.rs"]
mod tests;
