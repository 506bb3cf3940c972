//! Users, lists, items and the two link tables. Link rows cascade with
//! either side, and each (owner, owned) pair is unique.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TodoLists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TodoLists::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TodoLists::Title).string().not_null())
                    .col(
                        ColumnDef::new(TodoLists::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TodoItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TodoItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TodoItems::Title).string().not_null())
                    .col(
                        ColumnDef::new(TodoItems::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(TodoItems::Done)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UsersLists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UsersLists::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UsersLists::UserId).integer().not_null())
                    .col(ColumnDef::new(UsersLists::ListId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_lists_user")
                            .from(UsersLists::Table, UsersLists::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_lists_list")
                            .from(UsersLists::Table, UsersLists::ListId)
                            .to(TodoLists::Table, TodoLists::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_lists_pair")
                    .table(UsersLists::Table)
                    .col(UsersLists::UserId)
                    .col(UsersLists::ListId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ListsItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ListsItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ListsItems::ListId).integer().not_null())
                    .col(ColumnDef::new(ListsItems::ItemId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lists_items_list")
                            .from(ListsItems::Table, ListsItems::ListId)
                            .to(TodoLists::Table, TodoLists::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lists_items_item")
                            .from(ListsItems::Table, ListsItems::ItemId)
                            .to(TodoItems::Table, TodoItems::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lists_items_pair")
                    .table(ListsItems::Table)
                    .col(ListsItems::ListId)
                    .col(ListsItems::ItemId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ListsItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UsersLists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TodoItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TodoLists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Username,
    PasswordHash,
}

#[derive(DeriveIden)]
enum TodoLists {
    Table,
    Id,
    Title,
    Description,
}

#[derive(DeriveIden)]
enum TodoItems {
    Table,
    Id,
    Title,
    Description,
    Done,
}

#[derive(DeriveIden)]
enum UsersLists {
    Table,
    Id,
    UserId,
    ListId,
}

#[derive(DeriveIden)]
enum ListsItems {
    Table,
    Id,
    ListId,
    ItemId,
}
