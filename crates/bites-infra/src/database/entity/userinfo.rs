//! Profile entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "userinfo")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for bites_core::domain::UserInfo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nickname: model.nickname,
            avatar_url: model.avatar_url,
        }
    }
}

impl From<bites_core::domain::UserInfo> for ActiveModel {
    fn from(profile: bites_core::domain::UserInfo) -> Self {
        Self {
            id: Set(profile.id),
            nickname: Set(profile.nickname),
            avatar_url: Set(profile.avatar_url),
        }
    }
}
