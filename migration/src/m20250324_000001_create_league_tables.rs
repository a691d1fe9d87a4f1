use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create teams table, stadium is stored inline
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teams::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(ColumnDef::new(Teams::ShortName).string().not_null())
                    .col(ColumnDef::new(Teams::Logo).string().null())
                    .col(ColumnDef::new(Teams::Website).string().null())
                    .col(ColumnDef::new(Teams::StadiumName).string().null())
                    .col(ColumnDef::new(Teams::StadiumCity).string().null())
                    .col(ColumnDef::new(Teams::StadiumSurface).string().null())
                    .col(
                        ColumnDef::new(Teams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Teams::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create players table
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Players::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Players::FirstName).string().not_null())
                    .col(ColumnDef::new(Players::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Players::Position)
                            .string()
                            .not_null()
                            .default("undefined"),
                    )
                    .col(ColumnDef::new(Players::Nationality).string().null())
                    .col(ColumnDef::new(Players::ImageUrl).string().null())
                    .col(ColumnDef::new(Players::DateOfBirth).date().null())
                    .col(ColumnDef::new(Players::TeamId).string().null())
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_team")
                            .from(Players::Table, Players::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create referees table
        manager
            .create_table(
                Table::create()
                    .table(Referees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Referees::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Referees::Name).string().not_null())
                    .col(ColumnDef::new(Referees::PhotoUrl).string().null())
                    .col(
                        ColumnDef::new(Referees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Referees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create matches table
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Matches::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Matches::HomeTeamId).string().not_null())
                    .col(ColumnDef::new(Matches::AwayTeamId).string().not_null())
                    .col(ColumnDef::new(Matches::HomeTeamLineupId).string().null())
                    .col(ColumnDef::new(Matches::AwayTeamLineupId).string().null())
                    .col(ColumnDef::new(Matches::RefereeId).uuid().null())
                    .col(
                        ColumnDef::new(Matches::ScheduledDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::Status)
                            .string()
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(Matches::HomeTeamScore).integer().null())
                    .col(ColumnDef::new(Matches::AwayTeamScore).integer().null())
                    .col(ColumnDef::new(Matches::Rating).integer().null())
                    .col(
                        ColumnDef::new(Matches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Matches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_home_team")
                            .from(Matches::Table, Matches::HomeTeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_away_team")
                            .from(Matches::Table, Matches::AwayTeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_referee")
                            .from(Matches::Table, Matches::RefereeId)
                            .to(Referees::Table, Referees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create match_events table
        manager
            .create_table(
                Table::create()
                    .table(MatchEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchEvents::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MatchEvents::MatchId).string().not_null())
                    .col(ColumnDef::new(MatchEvents::EventType).string().not_null())
                    .col(
                        ColumnDef::new(MatchEvents::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchEvents::MinuteOfMatch)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MatchEvents::PlayerId).string().null())
                    .col(
                        ColumnDef::new(MatchEvents::SecondaryPlayerId)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(MatchEvents::TeamId).string().null())
                    .col(ColumnDef::new(MatchEvents::Description).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_events_match")
                            .from(MatchEvents::Table, MatchEvents::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_events_player")
                            .from(MatchEvents::Table, MatchEvents::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_events_secondary_player")
                            .from(MatchEvents::Table, MatchEvents::SecondaryPlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_events_team")
                            .from(MatchEvents::Table, MatchEvents::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_players_team")
                    .table(Players::Table)
                    .col(Players::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_matches_scheduled_date")
                    .table(Matches::Table)
                    .col(Matches::ScheduledDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_match_events_match")
                    .table(MatchEvents::Table)
                    .col(MatchEvents::MatchId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MatchEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Referees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Teams {
    Table,
    Id,
    Name,
    ShortName,
    Logo,
    Website,
    StadiumName,
    StadiumCity,
    StadiumSurface,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Players {
    Table,
    Id,
    FirstName,
    LastName,
    Position,
    Nationality,
    ImageUrl,
    DateOfBirth,
    TeamId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Referees {
    Table,
    Id,
    Name,
    PhotoUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Matches {
    Table,
    Id,
    HomeTeamId,
    AwayTeamId,
    HomeTeamLineupId,
    AwayTeamLineupId,
    RefereeId,
    ScheduledDate,
    Status,
    HomeTeamScore,
    AwayTeamScore,
    Rating,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MatchEvents {
    Table,
    Id,
    MatchId,
    EventType,
    Timestamp,
    MinuteOfMatch,
    PlayerId,
    SecondaryPlayerId,
    TeamId,
    Description,
}
