//! User entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use warden_core::domain::{User, UserDraft};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub nickname: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub role_ids: Vec<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            nickname: model.nickname,
            telephone: model.telephone,
            email: model.email,
            roles: model.role_ids,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        Self {
            id: Set(user.id),
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            nickname: Set(user.nickname),
            telephone: Set(user.telephone),
            email: Set(user.email),
            role_ids: Set(user.roles),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}

impl From<UserDraft> for ActiveModel {
    fn from(draft: UserDraft) -> Self {
        let now = Utc::now();
        Self {
            id: NotSet,
            username: Set(draft.username),
            password_hash: Set(draft.password_hash),
            nickname: Set(draft.nickname),
            telephone: Set(draft.telephone),
            email: Set(draft.email),
            role_ids: Set(draft.roles),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
