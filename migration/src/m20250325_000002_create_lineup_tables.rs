use sea_orm_migration::prelude::*;

use crate::m20250324_000001_create_league_tables::{Matches, Players, Teams};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lineups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lineups::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Lineups::TeamId).string().not_null())
                    .col(ColumnDef::new(Lineups::MatchId).string().not_null())
                    .col(
                        ColumnDef::new(Lineups::Formation)
                            .string()
                            .not_null()
                            .default("custom"),
                    )
                    .col(
                        ColumnDef::new(Lineups::IsStarting)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Lineups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Lineups::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lineups_team")
                            .from(Lineups::Table, Lineups::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lineups_match")
                            .from(Lineups::Table, Lineups::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Only one lineup per team and match
        manager
            .create_index(
                Index::create()
                    .name("idx_lineups_match_team")
                    .table(Lineups::Table)
                    .col(Lineups::MatchId)
                    .col(Lineups::TeamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MatchPlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchPlayers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MatchPlayers::LineupId).string().not_null())
                    .col(ColumnDef::new(MatchPlayers::PlayerId).string().not_null())
                    .col(ColumnDef::new(MatchPlayers::TeamId).string().not_null())
                    .col(
                        ColumnDef::new(MatchPlayers::IsStarter)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(MatchPlayers::Position).string().not_null())
                    .col(
                        ColumnDef::new(MatchPlayers::SubstitutedInAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchPlayers::SubstitutedOutAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_players_lineup")
                            .from(MatchPlayers::Table, MatchPlayers::LineupId)
                            .to(Lineups::Table, Lineups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_players_player")
                            .from(MatchPlayers::Table, MatchPlayers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_players_team")
                            .from(MatchPlayers::Table, MatchPlayers::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_match_players_lineup")
                    .table(MatchPlayers::Table)
                    .col(MatchPlayers::LineupId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MatchPlayers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lineups::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Lineups {
    Table,
    Id,
    TeamId,
    MatchId,
    Formation,
    IsStarting,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum MatchPlayers {
    Table,
    Id,
    LineupId,
    PlayerId,
    TeamId,
    IsStarter,
    Position,
    SubstitutedInAt,
    SubstitutedOutAt,
}
