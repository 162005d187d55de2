//! Reservation entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub status: ReservationStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ReservationStatus {
    #[sea_orm(string_value = "reserved")]
    Reserved,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<ReservationStatus> for bites_core::domain::ReservationStatus {
    fn from(value: ReservationStatus) -> Self {
        match value {
            ReservationStatus::Reserved => Self::Reserved,
        }
    }
}

impl From<bites_core::domain::ReservationStatus> for ReservationStatus {
    fn from(value: bites_core::domain::ReservationStatus) -> Self {
        match value {
            bites_core::domain::ReservationStatus::Reserved => Self::Reserved,
        }
    }
}

/// Conversion from SeaORM Model to domain Reservation.
impl From<Model> for bites_core::domain::Reservation {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            post_id: model.post_id,
            status: model.status.into(),
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from domain Reservation to SeaORM ActiveModel.
impl From<bites_core::domain::Reservation> for ActiveModel {
    fn from(reservation: bites_core::domain::Reservation) -> Self {
        Self {
            id: Set(reservation.id),
            user_id: Set(reservation.user_id),
            post_id: Set(reservation.post_id),
            status: Set(reservation.status.into()),
            created_at: Set(reservation.created_at.into()),
        }
    }
}
