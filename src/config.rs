use std::env;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::store::FirestoreConfig;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://coursebook.db?mode=rwc";

#[derive(Clone, Debug)]
pub enum StoreBackend {
    Memory,
    Sqlite { database_url: String },
    Firestore(FirestoreConfig),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup so it can be exercised without touching the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let kind = lookup("COURSE_STORE").unwrap_or_else(|| "memory".to_string());
        let backend = match kind.as_str() {
            "memory" => StoreBackend::Memory,
            "sqlite" => StoreBackend::Sqlite {
                database_url: lookup("DATABASE_URL")
                    .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            },
            "firestore" => {
                let project_id = lookup("FIRESTORE_PROJECT_ID").ok_or_else(|| {
                    AppError::Config("FIRESTORE_PROJECT_ID is not set".to_string())
                })?;
                let mut firestore = FirestoreConfig::new(project_id);
                if let Some(database) = lookup("FIRESTORE_DATABASE") {
                    firestore.database = database;
                }
                if let Some(collection) = lookup("FIRESTORE_COLLECTION") {
                    firestore.collection = collection;
                }
                if let Some(base_url) = lookup("FIRESTORE_BASE_URL") {
                    firestore.base_url = base_url;
                }
                firestore.token = lookup("FIRESTORE_TOKEN");
                firestore.api_key = lookup("FIRESTORE_API_KEY");
                StoreBackend::Firestore(firestore)
            }
            other => {
                return Err(AppError::Config(format!(
                    "COURSE_STORE must be memory, sqlite or firestore, got {}",
                    other
                )));
            }
        };

        Ok(Self { bind_addr, backend })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_memory_store() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(matches!(config.backend, StoreBackend::Memory));
    }

    #[test]
    fn sqlite_uses_database_url() {
        let config = config_from(&[
            ("COURSE_STORE", "sqlite"),
            ("DATABASE_URL", "sqlite::memory:"),
        ])
        .unwrap();
        match config.backend {
            StoreBackend::Sqlite { database_url } => assert_eq!(database_url, "sqlite::memory:"),
            other => panic!("unexpected backend: {:?}", other),
        }
    }

    #[test]
    fn firestore_requires_project() {
        let err = config_from(&[("COURSE_STORE", "firestore")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let config = config_from(&[
            ("COURSE_STORE", "firestore"),
            ("FIRESTORE_PROJECT_ID", "demo"),
            ("FIRESTORE_TOKEN", "secret"),
        ])
        .unwrap();
        match config.backend {
            StoreBackend::Firestore(firestore) => {
                assert_eq!(firestore.project_id, "demo");
                assert_eq!(firestore.collection, "Courses");
                assert_eq!(firestore.database, "(default)");
                assert_eq!(firestore.token.as_deref(), Some("secret"));
                assert!(firestore.api_key.is_none());
            }
            other => panic!("unexpected backend: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_store() {
        let err = config_from(&[("COURSE_STORE", "postgres")]).unwrap_err();
        assert!(err.to_string().contains("COURSE_STORE"));
    }
}
