//! Create reservations table
//!
//! One row per booked `[start_time, end_time)` slot of a room on a calendar
//! day. `version` backs optimistic concurrency on edits.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_rooms::Rooms;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::Title).string().not_null())
                    .col(ColumnDef::new(Reservations::Date).date().not_null())
                    .col(ColumnDef::new(Reservations::StartTime).time().not_null())
                    .col(ColumnDef::new(Reservations::EndTime).time().not_null())
                    .col(ColumnDef::new(Reservations::Description).text())
                    .col(ColumnDef::new(Reservations::RoomId).integer().not_null())
                    .col(
                        ColumnDef::new(Reservations::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_room")
                            .from(Reservations::Table, Reservations::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_room_date")
                    .table(Reservations::Table)
                    .col(Reservations::RoomId)
                    .col(Reservations::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_date")
                    .table(Reservations::Table)
                    .col(Reservations::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    Title,
    Date,
    StartTime,
    EndTime,
    Description,
    RoomId,
    Version,
    CreatedAt,
    UpdatedAt,
}
