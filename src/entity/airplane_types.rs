use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "airplane_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::airplanes::Entity")]
    Airplanes,
}

impl Related<super::airplanes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Airplanes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
