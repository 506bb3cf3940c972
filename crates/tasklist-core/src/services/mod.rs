//! Application services - the core operations the HTTP layer calls.

mod auth;
mod cache;
mod item;
mod list;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::AuthService;
pub use cache::{EntityCache, ITEM_NAMESPACE, LIST_NAMESPACE};
pub use item::ItemService;
pub use list::ListService;
