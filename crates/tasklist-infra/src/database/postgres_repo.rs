//! PostgreSQL repository implementations.
//!
//! Lists and items are never selected by id alone: every query carries an
//! ownership subquery over `users_lists` (and `lists_items` for items), so
//! another user's row is indistinguishable from a missing one.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Query, SelectStatement};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

use tasklist_core::domain::{
    ItemChange, ItemId, ListChange, ListId, NewTodoItem, NewTodoList, NewUser, TodoItem, TodoList,
    User, UserId,
};
use tasklist_core::error::RepoError;
use tasklist_core::ports::{TodoItemRepository, TodoListRepository, UserRepository};

use super::entity::{lists_items, todo_item, todo_list, user, users_lists};
use super::postgres_base::{PostgresRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresRepository<user::Entity>;

/// PostgreSQL list repository.
pub type PostgresTodoListRepository = PostgresRepository<todo_list::Entity>;

/// PostgreSQL item repository.
pub type PostgresTodoItemRepository = PostgresRepository<todo_item::Entity>;

/// `SELECT list_id FROM users_lists WHERE user_id = ?`
fn owned_list_ids(user_id: UserId) -> SelectStatement {
    Query::select()
        .column(users_lists::Column::ListId)
        .from(users_lists::Entity)
        .and_where(users_lists::Column::UserId.eq(user_id))
        .to_owned()
}

/// Ids of the items reachable by `user_id`, optionally narrowed to one list.
fn owned_item_ids(user_id: UserId, list_id: Option<ListId>) -> SelectStatement {
    let mut query = Query::select();
    query
        .column((lists_items::Entity, lists_items::Column::ItemId))
        .from(lists_items::Entity)
        .inner_join(
            users_lists::Entity,
            Expr::col((users_lists::Entity, users_lists::Column::ListId))
                .equals((lists_items::Entity, lists_items::Column::ListId)),
        )
        .and_where(Expr::col((users_lists::Entity, users_lists::Column::UserId)).eq(user_id));

    if let Some(list_id) = list_id {
        query.and_where(Expr::col((lists_items::Entity, lists_items::Column::ListId)).eq(list_id));
    }

    query
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<UserId, RepoError> {
        let model = user::ActiveModel {
            name: Set(new_user.name),
            username: Set(new_user.username),
            password_hash: Set(new_user.password_hash),
            ..Default::default()
        };

        let result = user::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.last_insert_id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl TodoListRepository for PostgresTodoListRepository {
    async fn create(&self, user_id: UserId, list: NewTodoList) -> Result<ListId, RepoError> {
        // Dropping the transaction without commit rolls it back
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let inserted = todo_list::Entity::insert(todo_list::ActiveModel {
            title: Set(list.title),
            description: Set(list.description),
            ..Default::default()
        })
        .exec(&txn)
        .await
        .map_err(map_db_err)?;
        let list_id = inserted.last_insert_id;

        users_lists::Entity::insert(users_lists::ActiveModel {
            user_id: Set(user_id),
            list_id: Set(list_id),
            ..Default::default()
        })
        .exec(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(list_id)
    }

    async fn get_all(&self, user_id: UserId) -> Result<Vec<TodoList>, RepoError> {
        let lists = todo_list::Entity::find()
            .filter(todo_list::Column::Id.in_subquery(owned_list_ids(user_id)))
            .order_by_asc(todo_list::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(lists.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> Result<Option<TodoList>, RepoError> {
        let list = todo_list::Entity::find_by_id(list_id)
            .filter(todo_list::Column::Id.in_subquery(owned_list_ids(user_id)))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(list.map(Into::into))
    }

    async fn delete(&self, user_id: UserId, list_id: ListId) -> Result<(), RepoError> {
        let result = todo_list::Entity::delete_many()
            .filter(todo_list::Column::Id.eq(list_id))
            .filter(todo_list::Column::Id.in_subquery(owned_list_ids(user_id)))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn update(
        &self,
        user_id: UserId,
        list_id: ListId,
        changes: &[ListChange],
    ) -> Result<(), RepoError> {
        let mut update = todo_list::Entity::update_many()
            .filter(todo_list::Column::Id.eq(list_id))
            .filter(todo_list::Column::Id.in_subquery(owned_list_ids(user_id)));

        for change in changes {
            update = match change {
                ListChange::Title(v) => {
                    update.col_expr(todo_list::Column::Title, Expr::value(v.clone()))
                }
                ListChange::Description(v) => {
                    update.col_expr(todo_list::Column::Description, Expr::value(v.clone()))
                }
            };
        }

        let result = update.exec(&self.db).await.map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl TodoItemRepository for PostgresTodoItemRepository {
    async fn create(&self, list_id: ListId, item: NewTodoItem) -> Result<ItemId, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let inserted = todo_item::Entity::insert(todo_item::ActiveModel {
            title: Set(item.title),
            description: Set(item.description),
            done: Set(item.done),
            ..Default::default()
        })
        .exec(&txn)
        .await
        .map_err(map_db_err)?;
        let item_id = inserted.last_insert_id;

        lists_items::Entity::insert(lists_items::ActiveModel {
            list_id: Set(list_id),
            item_id: Set(item_id),
            ..Default::default()
        })
        .exec(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(item_id)
    }

    async fn get_all(&self, user_id: UserId, list_id: ListId) -> Result<Vec<TodoItem>, RepoError> {
        let items = todo_item::Entity::find()
            .filter(todo_item::Column::Id.in_subquery(owned_item_ids(user_id, Some(list_id))))
            .order_by_asc(todo_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(items.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<Option<TodoItem>, RepoError> {
        let item = todo_item::Entity::find_by_id(item_id)
            .filter(todo_item::Column::Id.in_subquery(owned_item_ids(user_id, None)))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(item.map(Into::into))
    }

    async fn delete(&self, user_id: UserId, item_id: ItemId) -> Result<(), RepoError> {
        let result = todo_item::Entity::delete_many()
            .filter(todo_item::Column::Id.eq(item_id))
            .filter(todo_item::Column::Id.in_subquery(owned_item_ids(user_id, None)))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn update(
        &self,
        user_id: UserId,
        item_id: ItemId,
        changes: &[ItemChange],
    ) -> Result<(), RepoError> {
        let mut update = todo_item::Entity::update_many()
            .filter(todo_item::Column::Id.eq(item_id))
            .filter(todo_item::Column::Id.in_subquery(owned_item_ids(user_id, None)));

        for change in changes {
            update = match change {
                ItemChange::Title(v) => {
                    update.col_expr(todo_item::Column::Title, Expr::value(v.clone()))
                }
                ItemChange::Description(v) => {
                    update.col_expr(todo_item::Column::Description, Expr::value(v.clone()))
                }
                ItemChange::Done(v) => update.col_expr(todo_item::Column::Done, Expr::value(*v)),
            };
        }

        let result = update.exec(&self.db).await.map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
