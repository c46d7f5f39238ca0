use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "airplanes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::airplane_types::Entity",
        from = "Column::AirplaneTypeId",
        to = "super::airplane_types::Column::Id",
        on_delete = "Cascade"
    )]
    AirplaneTypes,
    #[sea_orm(has_many = "super::flights::Entity")]
    Flights,
}

impl Related<super::airplane_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AirplaneTypes.def()
    }
}

impl Related<super::flights::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flights.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
