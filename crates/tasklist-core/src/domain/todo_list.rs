use serde::{Deserialize, Serialize};

use super::{ListId, require_text};
use crate::error::DomainError;

/// A named list owned by one or more users through the `users_lists` join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub title: String,
    pub description: String,
}

/// Fields for a list that does not exist yet.
#[derive(Debug, Clone, Default)]
pub struct NewTodoList {
    pub title: String,
    pub description: String,
}

impl NewTodoList {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("title", &self.title)
    }
}

/// Partial update of a list. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateListInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A single column assignment of a list patch.
///
/// The variants are the complete set of patchable columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    Title(String),
    Description(String),
}

impl UpdateListInput {
    /// At least one field must be present and every present field non-empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.is_none() && self.description.is_none() {
            return Err(DomainError::InvalidInput("update has no values".to_string()));
        }
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        Ok(())
    }

    /// Present fields in declared order: title, then description.
    pub fn into_changes(self) -> Vec<ListChange> {
        let mut changes = Vec::with_capacity(2);
        if let Some(title) = self.title {
            changes.push(ListChange::Title(title));
        }
        if let Some(description) = self.description {
            changes.push(ListChange::Description(description));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_rejected() {
        let err = UpdateListInput::default().validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_blank_title_rejected() {
        let input = UpdateListInput {
            title: Some("  ".to_string()),
            description: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_changes_follow_declared_order() {
        let input = UpdateListInput {
            title: Some("Chores".to_string()),
            description: Some("weekly".to_string()),
        };
        input.validate().unwrap();

        assert_eq!(
            input.into_changes(),
            vec![
                ListChange::Title("Chores".to_string()),
                ListChange::Description("weekly".to_string()),
            ]
        );
    }

    #[test]
    fn test_new_list_requires_title() {
        assert!(NewTodoList::new("", "no title").validate().is_err());
        assert!(NewTodoList::new("Groceries", "").validate().is_ok());
    }
}
