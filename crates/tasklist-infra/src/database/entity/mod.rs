//! SeaORM entities for the task-list schema.

pub mod lists_items;
pub mod todo_item;
pub mod todo_list;
pub mod user;
pub mod users_lists;
