//! Application state - shared across all handlers.

use std::sync::Arc;

use warden_core::domain::{Role, User};
use warden_core::ports::{PasswordService, Repository, TokenService, UserRepository};
use warden_core::service::{ResourceService, UserService};
use warden_infra::{DatabaseConfig, DatabaseConnections, InMemoryRepository};

#[cfg(feature = "postgres")]
use warden_infra::database::{PostgresRoleRepository, PostgresUserRepository};

/// Shared application state, built once in `main` and injected through
/// `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub roles: ResourceService<Role>,
    pub users: UserService,
    pub tokens: Arc<dyn TokenService>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the state on PostgreSQL when configured and reachable,
    /// otherwise on in-memory repositories.
    pub async fn new(
        db_config: Option<&DatabaseConfig>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        #[cfg(feature = "postgres")]
        {
            let Some(config) = db_config else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                return Self::in_memory(tokens, passwords);
            };

            match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    let roles = Arc::new(PostgresRoleRepository::new(conn.main.clone()));
                    let users = Arc::new(PostgresUserRepository::new(conn.main.clone()));

                    tracing::info!("Application state initialized (postgres)");
                    Self::with_repositories(roles, users, tokens, passwords, Some(conn))
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory(tokens, passwords)
                }
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            Self::in_memory(tokens, passwords)
        }
    }

    /// State over empty in-memory repositories. Data is lost on restart.
    pub fn in_memory(tokens: Arc<dyn TokenService>, passwords: Arc<dyn PasswordService>) -> Self {
        tracing::info!("Application state initialized (in-memory)");
        Self::with_repositories(
            Arc::new(InMemoryRepository::<Role>::new()),
            Arc::new(InMemoryRepository::<User>::new()),
            tokens,
            passwords,
            None,
        )
    }

    fn with_repositories<R, U>(
        roles: Arc<R>,
        users: Arc<U>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        db: Option<Arc<DatabaseConnections>>,
    ) -> Self
    where
        R: Repository<Role> + 'static,
        U: UserRepository + 'static,
    {
        let roles = ResourceService::new(roles);
        let users = UserService::new(users, roles.clone(), passwords, Arc::clone(&tokens));

        Self {
            roles,
            users,
            tokens,
            db,
        }
    }

    /// Database reachability for the health endpoint; `None` when running
    /// in-memory.
    pub async fn database_up(&self) -> Option<bool> {
        #[cfg(feature = "postgres")]
        {
            if let Some(db) = &self.db {
                return Some(db.ping().await);
            }
        }
        None
    }
}
