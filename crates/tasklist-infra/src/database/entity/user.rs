//! User entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::users_lists::Entity")]
    UsersLists,
}

impl Related<super::users_lists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UsersLists.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for tasklist_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            password_hash: model.password_hash,
        }
    }
}
