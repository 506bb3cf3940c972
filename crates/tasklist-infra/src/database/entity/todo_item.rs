use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todo_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub done: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lists_items::Entity")]
    ListsItems,
}

impl Related<super::lists_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListsItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for tasklist_core::domain::TodoItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            done: model.done,
        }
    }
}
