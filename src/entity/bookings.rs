use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub court_name: String,
    pub player_name: String,
    pub start_time: DateTimeWithTimeZone,
    pub duration_hours: f64,
    pub status: String,
    pub price_cents: i64,
    pub owner_email: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courts::Entity",
        from = "Column::CourtName",
        to = "super::courts::Column::Name"
    )]
    Courts,
}

impl Related<super::courts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
