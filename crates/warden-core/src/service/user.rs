use std::sync::{Arc, OnceLock};

use crate::domain::{Role, User, UserDraft, UserFilter, UserPatch};
use crate::error::DomainError;
use crate::pagination::Page;
use crate::ports::{PasswordService, Repository, TokenService, UserRepository};

use super::ResourceService;

/// Profile fields supplied when creating or patching a user.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub nickname: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
}

/// A freshly issued access token.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
}

/// User administration on top of the generic resource service: password
/// hashing, role checks and login.
#[derive(Clone)]
pub struct UserService {
    resource: ResourceService<User>,
    users: Arc<dyn UserRepository>,
    roles: ResourceService<Role>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
    /// Hash checked when the username is unknown, so a miss costs the same
    /// as a wrong password.
    decoy_hash: Arc<OnceLock<String>>,
}

const DECOY_PASSWORD: &str = "warden-decoy-password";

impl UserService {
    pub fn new<R>(
        users: Arc<R>,
        roles: ResourceService<Role>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self
    where
        R: UserRepository + 'static,
    {
        let repo: Arc<dyn Repository<User>> = users.clone();
        Self {
            resource: ResourceService::new(repo),
            users,
            roles,
            passwords,
            tokens,
            decoy_hash: Arc::new(OnceLock::new()),
        }
    }

    pub async fn list(
        &self,
        offset: u64,
        limit: u64,
        filter: &UserFilter,
    ) -> Result<Page<User>, DomainError> {
        self.resource.list(offset, limit, filter).await
    }

    pub async fn retrieve(&self, id: i32) -> Result<User, DomainError> {
        self.resource.retrieve(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.resource.delete(id).await
    }

    /// Create a user with a hashed password. Every role id must exist.
    pub async fn create(
        &self,
        username: String,
        password: &str,
        profile: UserProfile,
        roles: Vec<i32>,
    ) -> Result<User, DomainError> {
        self.ensure_roles_exist(&roles).await?;
        let password_hash = self.passwords.hash(password)?;

        self.resource
            .create(UserDraft {
                username,
                password_hash,
                nickname: profile.nickname,
                telephone: profile.telephone,
                email: profile.email,
                roles,
            })
            .await
    }

    /// Update profile fields and, if given, the role assignment.
    pub async fn partial_update(
        &self,
        id: i32,
        profile: UserProfile,
        roles: Option<Vec<i32>>,
    ) -> Result<User, DomainError> {
        if let Some(roles) = &roles {
            self.ensure_roles_exist(roles).await?;
        }

        self.resource
            .partial_update(
                id,
                UserPatch {
                    password_hash: None,
                    nickname: profile.nickname,
                    telephone: profile.telephone,
                    email: profile.email,
                    roles,
                },
            )
            .await
    }

    /// Set a new password without knowing the old one.
    pub async fn reset_password(&self, id: i32, password: &str) -> Result<User, DomainError> {
        let password_hash = self.passwords.hash(password)?;
        let user = self.set_password_hash(id, password_hash).await?;
        tracing::info!(user_id = id, "Password reset");
        Ok(user)
    }

    /// Replace the password after verifying the current one.
    pub async fn change_password(
        &self,
        id: i32,
        current: &str,
        new_password: &str,
    ) -> Result<User, DomainError> {
        let user = self.resource.retrieve(id).await?;
        if !self.passwords.verify(current, &user.password_hash)? {
            tracing::warn!(user_id = id, "Password change rejected: wrong current password");
            return Err(DomainError::Unauthorized);
        }

        let password_hash = self.passwords.hash(new_password)?;
        self.set_password_hash(id, password_hash).await
    }

    /// Check credentials and issue an access token carrying the role titles.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthToken, DomainError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            self.verify_decoy(password);
            tracing::debug!("Login rejected: unknown username");
            return Err(DomainError::Unauthorized);
        };

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "Login rejected: wrong password");
            return Err(DomainError::Unauthorized);
        }

        let titles = self.role_titles(&user.roles).await?;
        let access_token = self.tokens.generate_token(user.id, &user.username, titles)?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(AuthToken {
            access_token,
            expires_in: self.tokens.expiration_seconds(),
            user,
        })
    }

    fn verify_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.passwords.hash(DECOY_PASSWORD).unwrap_or_default());
        // Result ignored
        let _ = self.passwords.verify(password, decoy);
    }

    async fn set_password_hash(&self, id: i32, password_hash: String) -> Result<User, DomainError> {
        self.resource
            .partial_update(
                id,
                UserPatch {
                    password_hash: Some(password_hash),
                    ..UserPatch::default()
                },
            )
            .await
    }

    async fn ensure_roles_exist(&self, roles: &[i32]) -> Result<(), DomainError> {
        for &id in roles {
            match self.roles.retrieve(id).await {
                Ok(_) => {}
                Err(DomainError::NotFound { .. }) => {
                    return Err(DomainError::Validation(format!("role {id} does not exist")));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    async fn role_titles(&self, ids: &[i32]) -> Result<Vec<String>, DomainError> {
        let mut titles = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.roles.retrieve(id).await {
                Ok(role) => titles.push(role.title),
                Err(DomainError::NotFound { .. }) => {
                    tracing::warn!(role_id = id, "User references a deleted role");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoleDraft;
    use crate::ports::{AuthError, TokenClaims};
    use crate::service::fake::FakeRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stores passwords reversed so tests can see hashing happened.
    struct ReversingPasswords;

    impl PasswordService for ReversingPasswords {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(password.chars().rev().collect())
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(self.hash(password)? == hash)
        }
    }

    /// Reversing passwords that count `verify` calls.
    #[derive(Default)]
    struct CountingPasswords {
        verifies: AtomicUsize,
    }

    impl PasswordService for CountingPasswords {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            ReversingPasswords.hash(password)
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            self.verifies.fetch_add(1, Ordering::SeqCst);
            ReversingPasswords.verify(password, hash)
        }
    }

    struct PlainTokens;

    impl TokenService for PlainTokens {
        fn generate_token(
            &self,
            user_id: i32,
            username: &str,
            roles: Vec<String>,
        ) -> Result<String, AuthError> {
            Ok(format!("{user_id}:{username}:{}", roles.join(",")))
        }

        fn validate_token(&self, _token: &str) -> Result<TokenClaims, AuthError> {
            Err(AuthError::InvalidToken("not supported".to_string()))
        }

        fn expiration_seconds(&self) -> i64 {
            3600
        }
    }

    async fn setup() -> (UserService, ResourceService<Role>) {
        let roles: ResourceService<Role> =
            ResourceService::new(Arc::new(FakeRepository::<Role>::default()));
        roles
            .create(RoleDraft {
                title: "admin".to_string(),
                desc: String::new(),
            })
            .await
            .unwrap();

        let users = UserService::new(
            Arc::new(FakeRepository::<User>::default()),
            roles.clone(),
            Arc::new(ReversingPasswords),
            Arc::new(PlainTokens),
        );
        (users, roles)
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let (users, _) = setup().await;

        let user = users
            .create("alice".to_string(), "secret", UserProfile::default(), vec![1])
            .await
            .unwrap();

        assert_eq!(user.password_hash, "terces");
        assert_eq!(user.roles, vec![1]);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_role() {
        let (users, _) = setup().await;

        let err = users
            .create("alice".to_string(), "secret", UserProfile::default(), vec![1, 9])
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(ref msg) if msg == "role 9 does not exist"));
    }

    #[tokio::test]
    async fn test_login_issues_token_with_role_titles() {
        let (users, _) = setup().await;
        users
            .create("alice".to_string(), "secret", UserProfile::default(), vec![1])
            .await
            .unwrap();

        let token = users.login("alice", "secret").await.unwrap();
        assert_eq!(token.access_token, "1:alice:admin");
        assert_eq!(token.expires_in, 3600);

        assert!(matches!(
            users.login("alice", "wrong").await.unwrap_err(),
            DomainError::Unauthorized
        ));
        assert!(matches!(
            users.login("bob", "secret").await.unwrap_err(),
            DomainError::Unauthorized
        ));
    }

    #[tokio::test]
    async fn test_change_password_requires_current_password() {
        let (users, _) = setup().await;
        let user = users
            .create("alice".to_string(), "secret", UserProfile::default(), vec![])
            .await
            .unwrap();

        assert!(matches!(
            users.change_password(user.id, "nope", "fresh").await.unwrap_err(),
            DomainError::Unauthorized
        ));

        users.change_password(user.id, "secret", "fresh").await.unwrap();
        assert!(users.login("alice", "fresh").await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_password_on_missing_user() {
        let (users, _) = setup().await;

        let err = users.reset_password(42, "fresh").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity_type: "user", .. }));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_untouched_fields() {
        let (users, _) = setup().await;
        let user = users
            .create(
                "alice".to_string(),
                "secret",
                UserProfile {
                    nickname: Some("Al".to_string()),
                    ..UserProfile::default()
                },
                vec![],
            )
            .await
            .unwrap();

        let updated = users
            .partial_update(
                user.id,
                UserProfile {
                    email: Some("alice@example.com".to_string()),
                    ..UserProfile::default()
                },
                Some(vec![1]),
            )
            .await
            .unwrap();

        assert_eq!(updated.nickname.as_deref(), Some("Al"));
        assert_eq!(updated.email.as_deref(), Some("alice@example.com"));
        assert_eq!(updated.roles, vec![1]);
        assert_eq!(updated.password_hash, "terces");
    }

    #[tokio::test]
    async fn test_unknown_username_still_checks_a_hash() {
        let roles: ResourceService<Role> =
            ResourceService::new(Arc::new(FakeRepository::<Role>::default()));
        let passwords = Arc::new(CountingPasswords::default());
        let users = UserService::new(
            Arc::new(FakeRepository::<User>::default()),
            roles,
            passwords.clone(),
            Arc::new(PlainTokens),
        );
        users
            .create("alice".to_string(), "secret", UserProfile::default(), vec![])
            .await
            .unwrap();

        assert!(matches!(
            users.login("alice", "wrong").await.unwrap_err(),
            DomainError::Unauthorized
        ));
        assert_eq!(passwords.verifies.load(Ordering::SeqCst), 1);

        assert!(matches!(
            users.login("bob", "secret").await.unwrap_err(),
            DomainError::Unauthorized
        ));
        assert_eq!(passwords.verifies.load(Ordering::SeqCst), 2);
    }
}
