use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Value};

use crate::booking::seat;

/// (flight_id, row, seat) is covered by the `tickets_flight_row_seat_key` unique index.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub row: i32,
    pub seat: String,
    pub flight_id: Uuid,
    pub order_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::flights::Entity",
        from = "Column::FlightId",
        to = "super::flights::Column::Id",
        on_delete = "Cascade"
    )]
    Flights,
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id",
        on_delete = "Cascade"
    )]
    Orders,
}

impl Related<super::flights::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flights.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Every insert or update is checked against the flight's airplane layout,
    /// whichever code path does the saving.
    async fn before_save<C>(self, db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let (Some(flight_id), Some(row), Some(seat_label)) = (
            value_of(&self.flight_id),
            value_of(&self.row),
            value_of(&self.seat),
        ) else {
            return Err(DbErr::Custom(
                "ticket requires a flight, a row and a seat".into(),
            ));
        };

        let airplane = super::flights::Entity::find_by_id(flight_id)
            .find_also_related(super::airplanes::Entity)
            .one(db)
            .await?
            .and_then(|(_, airplane)| airplane)
            .ok_or_else(|| DbErr::Custom(format!("flight {flight_id} does not exist")))?;

        seat::validate(&seat_label, row, airplane.seats_in_row, airplane.rows)
            .map_err(|err| DbErr::Custom(err.to_string()))?;

        Ok(self)
    }
}

fn value_of<V>(value: &ActiveValue<V>) -> Option<V>
where
    V: Clone + Into<Value>,
{
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v.clone()),
        ActiveValue::NotSet => None,
    }
}
