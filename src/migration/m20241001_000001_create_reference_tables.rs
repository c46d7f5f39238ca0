//! Airports, routes, airplane types, airplanes, flights and crews.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Airports::Table)
                    .if_not_exists()
                    .col(pk_uuid(Airports::Id))
                    .col(string_len(Airports::Name, 255))
                    .col(string_len(Airports::ClosestBigCity, 255))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Routes::Table)
                    .if_not_exists()
                    .col(pk_uuid(Routes::Id))
                    .col(uuid(Routes::SourceId))
                    .col(uuid(Routes::DestinationId))
                    .col(integer(Routes::Distance).check(Expr::col(Routes::Distance).gt(0)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_routes_source")
                            .from(Routes::Table, Routes::SourceId)
                            .to(Airports::Table, Airports::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_routes_destination")
                            .from(Routes::Table, Routes::DestinationId)
                            .to(Airports::Table, Airports::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AirplaneTypes::Table)
                    .if_not_exists()
                    .col(pk_uuid(AirplaneTypes::Id))
                    .col(string_len(AirplaneTypes::Name, 255))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Airplanes::Table)
                    .if_not_exists()
                    .col(pk_uuid(Airplanes::Id))
                    .col(string_len(Airplanes::Name, 255))
                    .col(integer(Airplanes::Rows).check(Expr::col(Airplanes::Rows).gt(0)))
                    .col(
                        integer(Airplanes::SeatsInRow)
                            .check(Expr::col(Airplanes::SeatsInRow).between(1, 26)),
                    )
                    .col(uuid(Airplanes::AirplaneTypeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_airplanes_airplane_type")
                            .from(Airplanes::Table, Airplanes::AirplaneTypeId)
                            .to(AirplaneTypes::Table, AirplaneTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Flights::Table)
                    .if_not_exists()
                    .col(pk_uuid(Flights::Id))
                    .col(string_len(Flights::Code, 7))
                    .col(uuid(Flights::RouteId))
                    .col(uuid(Flights::AirplaneId))
                    .col(timestamp_with_time_zone(Flights::DepartureTime))
                    .col(timestamp_with_time_zone(Flights::ArrivalTime))
                    .check(Expr::col(Flights::DepartureTime).lt(Expr::col(Flights::ArrivalTime)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flights_route")
                            .from(Flights::Table, Flights::RouteId)
                            .to(Routes::Table, Routes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flights_airplane")
                            .from(Flights::Table, Flights::AirplaneId)
                            .to(Airplanes::Table, Airplanes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_flights_code")
                    .table(Flights::Table)
                    .col(Flights::Code)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Crews::Table)
                    .if_not_exists()
                    .col(pk_uuid(Crews::Id))
                    .col(string_len(Crews::FirstName, 255))
                    .col(string_len(Crews::LastName, 255))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Crews::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Flights::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Airplanes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AirplaneTypes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Routes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Airports::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Airports {
    Table,
    Id,
    Name,
    ClosestBigCity,
}

#[derive(DeriveIden)]
enum Routes {
    Table,
    Id,
    SourceId,
    DestinationId,
    Distance,
}

#[derive(DeriveIden)]
enum AirplaneTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Airplanes {
    Table,
    Id,
    Name,
    Rows,
    SeatsInRow,
    AirplaneTypeId,
}

#[derive(DeriveIden)]
pub(super) enum Flights {
    Table,
    Id,
    Code,
    RouteId,
    AirplaneId,
    DepartureTime,
    ArrivalTime,
}

#[derive(DeriveIden)]
enum Crews {
    Table,
    Id,
    FirstName,
    LastName,
}
