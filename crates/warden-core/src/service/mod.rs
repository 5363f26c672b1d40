//! Application services - orchestrate ports on behalf of the HTTP layer.

mod resource;
mod user;

#[cfg(test)]
pub(crate) mod fake;

pub use resource::ResourceService;
pub use user::{AuthToken, UserProfile, UserService};
