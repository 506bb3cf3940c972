use serde::{Deserialize, Serialize};

use super::{ItemId, require_text};
use crate::error::DomainError;

/// A task. Reachable only through `lists_items` and then `users_lists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub done: bool,
}

/// Fields for an item that does not exist yet.
#[derive(Debug, Clone, Default)]
pub struct NewTodoItem {
    pub title: String,
    pub description: String,
    pub done: bool,
}

impl NewTodoItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            done: false,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("title", &self.title)
    }
}

/// Partial update of an item. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateItemInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
}

/// A single column assignment of an item patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemChange {
    Title(String),
    Description(String),
    Done(bool),
}

impl UpdateItemInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.is_none() && self.description.is_none() && self.done.is_none() {
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

    /// Present fields in declared order: title, description, done.
    pub fn into_changes(self) -> Vec<ItemChange> {
        let mut changes = Vec::with_capacity(3);
        if let Some(title) = self.title {
            changes.push(ItemChange::Title(title));
        }
        if let Some(description) = self.description {
            changes.push(ItemChange::Description(description));
        }
        if let Some(done) = self.done {
            changes.push(ItemChange::Done(done));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_rejected() {
        let err = UpdateItemInput::default().validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_done_only_patch_is_valid() {
        let input = UpdateItemInput {
            done: Some(true),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
        assert_eq!(input.into_changes(), vec![ItemChange::Done(true)]);
    }

    #[test]
    fn test_empty_description_rejected() {
        let input = UpdateItemInput {
            description: Some(String::new()),
            done: Some(false),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_changes_follow_declared_order() {
        let input = UpdateItemInput {
            done: Some(true),
            title: Some("Oat milk".to_string()),
            description: Some("2 litres".to_string()),
        };

        assert_eq!(
            input.into_changes(),
            vec![
                ItemChange::Title("Oat milk".to_string()),
                ItemChange::Description("2 litres".to_string()),
                ItemChange::Done(true),
            ]
        );
    }
}
