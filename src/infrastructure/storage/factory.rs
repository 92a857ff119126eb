//! Storage factory for runtime backend selection

use std::sync::Arc;

use mongodb::Database;

use crate::domain::storage::{Storage, StorageEntity};

use super::in_memory::InMemoryStorage;
use super::mongo::MongoStorage;

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// MongoDB storage
    Mongo,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "mongo" | "mongodb" => Some(Self::Mongo),
            _ => None,
        }
    }
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates an in-memory storage instance
    pub fn create_in_memory<E>() -> Arc<dyn Storage<E>>
    where
        E: StorageEntity + 'static,
    {
        Arc::new(InMemoryStorage::<E>::new())
    }

    /// Creates a MongoDB storage instance over an established database handle
    pub fn create_mongo_with_database<E>(
        database: &Database,
        collection_name: &str,
    ) -> Arc<dyn Storage<E>>
    where
        E: StorageEntity + 'static,
    {
        Arc::new(MongoStorage::<E>::new(database, collection_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::TeamMember;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!(StorageType::from_str("memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::from_str("in-memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::from_str("mongodb"), Some(StorageType::Mongo));
        assert_eq!(StorageType::from_str("MongoDB"), Some(StorageType::Mongo));
        assert_eq!(StorageType::from_str("postgres"), None);
    }

    #[tokio::test]
    async fn test_create_in_memory() {
        let storage = StorageFactory::create_in_memory::<TeamMember>();
        assert_eq!(storage.count().await.unwrap(), 0);
    }
}
