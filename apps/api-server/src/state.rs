//! Application state - shared across all handlers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use signup_core::error::RepoError;
use signup_core::ports::{CredentialHasher, FileStore, HashingError, UserRepository};
use signup_infra::database::InMemoryUserRepository;
use signup_infra::{Argon2PasswordService, LocalFileStore};

#[cfg(feature = "postgres")]
use signup_infra::database::{DatabaseConnections, PostgresUserRepository};

use crate::config::AppConfig;

/// Per-request limits.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Deadline applied to every user store call.
    pub store_timeout: Duration,
    pub max_form_bytes: usize,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub files: Arc<dyn FileStore>,
    pub limits: Limits,
    /// Which user store backs this process: `"postgres"` or `"memory"`.
    pub store_kind: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, HashingError> {
        let hasher: Arc<dyn CredentialHasher> =
            Arc::new(Argon2PasswordService::with_cost(config.hash_cost)?);

        // Initialize database connections if configured
        #[cfg(feature = "postgres")]
        let (users, store_kind): (Arc<dyn UserRepository>, &'static str) = {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => (
                        Arc::new(PostgresUserRepository::new(connections.main, hasher)),
                        "postgres",
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (Arc::new(InMemoryUserRepository::new(hasher)), "memory")
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (Arc::new(InMemoryUserRepository::new(hasher)), "memory")
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (users, store_kind): (Arc<dyn UserRepository>, &'static str) = {
            tracing::info!("Running without postgres feature - using in-memory repository");
            (Arc::new(InMemoryUserRepository::new(hasher)), "memory")
        };

        let files: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(&config.upload_dir));

        tracing::info!(
            store = store_kind,
            upload_dir = %config.upload_dir,
            "Application state initialized"
        );

        Ok(Self {
            users,
            files,
            limits: Limits {
                store_timeout: config.store_timeout,
                max_form_bytes: config.max_form_bytes,
            },
            store_kind,
        })
    }

    /// Assemble state from ready-made parts.
    pub fn from_parts(
        users: Arc<dyn UserRepository>,
        files: Arc<dyn FileStore>,
        limits: Limits,
    ) -> Self {
        Self {
            users,
            files,
            limits,
            store_kind: "memory",
        }
    }

    /// Run a user store call under the configured deadline.
    pub async fn with_deadline<T, F>(&self, call: F) -> Result<T, RepoError>
    where
        F: Future<Output = Result<T, RepoError>>,
    {
        let deadline = self.limits.store_timeout;
        tokio::time::timeout(deadline, call)
            .await
            .map_err(|_| RepoError::Timeout(deadline))?
    }
}
