use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FromDraft, Resource};

/// User entity - represents an account in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub nickname: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    /// Ids of the roles assigned to this user.
    pub roles: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating or fully replacing a user.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub username: String,
    pub password_hash: String,
    pub nickname: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub roles: Vec<i32>,
}

/// Fields for a partial user update.
///
/// `password_hash` is only ever set by the password flows, never from a
/// request body.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub password_hash: Option<String>,
    pub nickname: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub roles: Option<Vec<i32>>,
}

/// List filter for users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring of the username.
    pub username: Option<String>,
}

impl Resource for User {
    type Id = i32;
    type Draft = UserDraft;
    type Patch = UserPatch;
    type Filter = UserFilter;

    const NAME: &'static str = "user";

    fn id(&self) -> i32 {
        self.id
    }

    fn replace(&mut self, draft: UserDraft) {
        self.username = draft.username;
        self.password_hash = draft.password_hash;
        self.nickname = draft.nickname;
        self.telephone = draft.telephone;
        self.email = draft.email;
        self.roles = draft.roles;
        self.updated_at = Utc::now();
    }

    fn merge(&mut self, patch: UserPatch) {
        if let Some(hash) = patch.password_hash {
            self.password_hash = hash;
        }
        if let Some(nickname) = patch.nickname {
            self.nickname = Some(nickname);
        }
        if let Some(telephone) = patch.telephone {
            self.telephone = Some(telephone);
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(roles) = patch.roles {
            self.roles = roles;
        }
        self.updated_at = Utc::now();
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.id != other.id && self.username == other.username
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        filter.username.as_deref().is_none_or(|needle| {
            self.username
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }
}

impl FromDraft for User {
    fn from_draft(id: i32, draft: UserDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: draft.username,
            password_hash: draft.password_hash,
            nickname: draft.nickname,
            telephone: draft.telephone,
            email: draft.email,
            roles: draft.roles,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User::from_draft(
            7,
            UserDraft {
                username: "alice".to_string(),
                password_hash: "$argon2id$secret".to_string(),
                nickname: None,
                telephone: None,
                email: Some("alice@example.com".to_string()),
                roles: vec![1],
            },
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
        assert_eq!(json["roles"], serde_json::json!([1]));
    }
}
