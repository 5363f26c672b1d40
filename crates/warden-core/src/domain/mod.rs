//! Domain entities - the core business objects.

mod resource;
mod role;
mod user;

pub use resource::{FromDraft, Resource};
pub use role::{Role, RoleDraft, RoleFilter, RolePatch};
pub use user::{User, UserDraft, UserFilter, UserPatch};
