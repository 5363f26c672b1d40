//! Role entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use warden_core::domain::{Role, RoleDraft};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(column_name = "description", column_type = "Text")]
    pub desc: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Role.
impl From<Model> for Role {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            desc: model.desc,
        }
    }
}

/// Conversion from Domain Role to SeaORM ActiveModel.
impl From<Role> for ActiveModel {
    fn from(role: Role) -> Self {
        Self {
            id: Set(role.id),
            title: Set(role.title),
            desc: Set(role.desc),
        }
    }
}

/// New roles leave the id to the database sequence.
impl From<RoleDraft> for ActiveModel {
    fn from(draft: RoleDraft) -> Self {
        Self {
            id: NotSet,
            title: Set(draft.title),
            desc: Set(draft.desc),
        }
    }
}
