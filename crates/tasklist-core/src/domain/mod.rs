//! Domain entities - the core business objects.

mod todo_item;
mod todo_list;
mod user;

pub use todo_item::{ItemChange, NewTodoItem, TodoItem, UpdateItemInput};
pub use todo_list::{ListChange, NewTodoList, TodoList, UpdateListInput};
pub use user::{NewUser, SignUpInput, User};

/// Store-assigned user identifier.
pub type UserId = i32;
/// Store-assigned list identifier.
pub type ListId = i32;
/// Store-assigned item identifier.
pub type ItemId = i32;

use crate::error::DomainError;

/// Reject an empty or whitespace-only text field.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}
