//! Typed confirmation before a project is deleted.
//!
//! The phrase ships with the client, so anyone can read it. This is a
//! speed bump against accidental deletes, not an access check; the store
//! decides who may delete what.

/// Text the user must type to confirm a project delete.
pub const DELETE_CONFIRMATION: &str = "delete";

pub const INCORRECT_MESSAGE: &str = "Incorrect password";

#[derive(Debug, PartialEq, Eq)]
pub enum GateOutcome<T> {
    /// The phrase matched and the callback ran; the dialog should close.
    Confirmed(T),
    /// Mismatch: input cleared, error set, dialog stays open.
    Rejected,
}

#[derive(Debug, Default)]
pub struct DeleteGate {
    input: String,
    error: Option<&'static str>,
}

impl DeleteGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// One bullet per typed character.
    pub fn masked(&self) -> String {
        "\u{2022}".repeat(self.input.chars().count())
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn set_input(&mut self, s: &str) {
        self.input = s.to_string();
        self.error = None;
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
        self.error = None;
    }

    pub fn pop(&mut self) {
        self.input.pop();
        self.error = None;
    }

    /// Compare the input verbatim against [`DELETE_CONFIRMATION`].
    pub fn submit<T>(&mut self, on_confirm: impl FnOnce() -> T) -> GateOutcome<T> {
        if self.input == DELETE_CONFIRMATION {
            self.input.clear();
            self.error = None;
            return GateOutcome::Confirmed(on_confirm());
        }
        tracing::debug!("delete confirmation rejected");
        self.input.clear();
        self.error = Some(INCORRECT_MESSAGE);
        GateOutcome::Rejected
    }
}

#[cfg(test)]
#[path = "tests/gate_tests.rs"]
mod tests;
