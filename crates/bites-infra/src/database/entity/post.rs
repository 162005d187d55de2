//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub location: String,
    pub campus_location: CampusLocation,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub start_time: Option<DateTimeWithTimeZone>,
    pub end_time: DateTimeWithTimeZone,
    pub total_quantity: i32,
    /// Legacy duplicate of `total_quantity`, kept for pre-migration rows.
    pub quantity: i32,
    pub quantity_left: i32,
    pub image_path: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

/// Stored as the display name, e.g. "South Campus".
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum CampusLocation {
    #[sea_orm(string_value = "South Campus")]
    South,
    #[sea_orm(string_value = "North Campus")]
    North,
    #[sea_orm(string_value = "East Campus")]
    East,
    #[sea_orm(string_value = "West Campus")]
    West,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservation,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<CampusLocation> for bites_core::domain::CampusLocation {
    fn from(value: CampusLocation) -> Self {
        match value {
            CampusLocation::South => Self::South,
            CampusLocation::North => Self::North,
            CampusLocation::East => Self::East,
            CampusLocation::West => Self::West,
        }
    }
}

impl From<bites_core::domain::CampusLocation> for CampusLocation {
    fn from(value: bites_core::domain::CampusLocation) -> Self {
        match value {
            bites_core::domain::CampusLocation::South => Self::South,
            bites_core::domain::CampusLocation::North => Self::North,
            bites_core::domain::CampusLocation::East => Self::East,
            bites_core::domain::CampusLocation::West => Self::West,
        }
    }
}

/// Conversion from SeaORM Model to domain Post.
impl From<Model> for bites_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            location: model.location,
            campus_location: model.campus_location.into(),
            description: model.description,
            start_time: model.start_time.map(Into::into),
            end_time: model.end_time.into(),
            total_quantity: model.total_quantity,
            quantity: model.quantity,
            quantity_left: model.quantity_left,
            image_path: model.image_path,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from domain Post to SeaORM ActiveModel.
impl From<bites_core::domain::Post> for ActiveModel {
    fn from(post: bites_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            user_id: Set(post.user_id),
            title: Set(post.title),
            location: Set(post.location),
            campus_location: Set(post.campus_location.into()),
            description: Set(post.description),
            start_time: Set(post.start_time.map(Into::into)),
            end_time: Set(post.end_time.into()),
            total_quantity: Set(post.total_quantity),
            quantity: Set(post.quantity),
            quantity_left: Set(post.quantity_left),
            image_path: Set(post.image_path),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
