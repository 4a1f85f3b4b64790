//! Book payload validation rules

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::BookPayload,
};

/// Operation a payload is validated for; picks the message phrasing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Add,
    Update,
}

impl BookAction {
    fn failure_prefix(self) -> &'static str {
        match self {
            BookAction::Add => "Gagal menambahkan buku",
            BookAction::Update => "Gagal memperbarui buku",
        }
    }
}

/// Validation rules, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    MissingName,
    ReadPageExceedsPageCount,
}

impl Violation {
    pub fn message(self, action: BookAction) -> String {
        let detail = match self {
            Violation::MissingName => "Mohon isi nama buku",
            Violation::ReadPageExceedsPageCount => {
                "readPage tidak boleh lebih besar dari pageCount"
            }
        };
        format!("{}. {}", action.failure_prefix(), detail)
    }
}

/// First rule the payload breaks, if any
pub fn first_violation(payload: &BookPayload) -> Option<Violation> {
    let errors = payload.validate().err()?;
    if errors.errors().contains_key("name") {
        Some(Violation::MissingName)
    } else {
        Some(Violation::ReadPageExceedsPageCount)
    }
}

/// Check a payload, mapping the first broken rule to a client error
pub fn check_book_payload(payload: &BookPayload, action: BookAction) -> AppResult<()> {
    match first_violation(payload) {
        Some(violation) => Err(AppError::Validation(violation.message(action))),
        None => Ok(()),
    }
}
