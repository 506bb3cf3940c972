//! Containment link: which list holds which item.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lists_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub list_id: i32,
    pub item_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::todo_list::Entity",
        from = "Column::ListId",
        to = "super::todo_list::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TodoList,
    #[sea_orm(
        belongs_to = "super::todo_item::Entity",
        from = "Column::ItemId",
        to = "super::todo_item::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TodoItem,
}

impl Related<super::todo_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TodoList.def()
    }
}

impl Related<super::todo_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TodoItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
