use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todo_lists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::users_lists::Entity")]
    UsersLists,
    #[sea_orm(has_many = "super::lists_items::Entity")]
    ListsItems,
}

impl Related<super::users_lists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UsersLists.def()
    }
}

impl Related<super::lists_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListsItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for tasklist_core::domain::TodoList {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
        }
    }
}
