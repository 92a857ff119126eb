//! MongoDB storage implementation
//!
//! Documents are keyed on their own `id` field (a service-assigned UUID
//! string), not on Mongo's `_id`, matching what the services store and
//! query elsewhere.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, from_document, to_document, Document};
use mongodb::{Client, Collection, Database};

use crate::config::DatastoreConfig;
use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Connect to the configured MongoDB deployment and select the database
pub async fn connect(config: &DatastoreConfig) -> Result<Database, DomainError> {
    let client = Client::with_uri_str(&config.uri)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to MongoDB: {}", e)))?;

    Ok(client.database(&config.database))
}

/// MongoDB-backed implementation of the generic storage trait
pub struct MongoStorage<E>
where
    E: StorageEntity,
{
    collection: Collection<Document>,
    collection_name: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E> MongoStorage<E>
where
    E: StorageEntity,
{
    /// Creates storage over one collection of the given database
    pub fn new(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection::<Document>(collection_name),
            collection_name: collection_name.to_string(),
            _entity: PhantomData,
        }
    }

    fn decode(&self, document: Document) -> Result<E, DomainError> {
        from_document(document).map_err(|e| {
            DomainError::storage(format!(
                "Failed to decode document from '{}': {}",
                self.collection_name, e
            ))
        })
    }

    fn encode(&self, entity: &E) -> Result<Document, DomainError> {
        to_document(entity).map_err(|e| {
            DomainError::storage(format!(
                "Failed to encode document for '{}': {}",
                self.collection_name, e
            ))
        })
    }
}

impl<E> fmt::Debug for MongoStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoStorage")
            .field("collection", &self.collection_name)
            .finish()
    }
}

#[async_trait]
impl<E> Storage<E> for MongoStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let document = self
            .collection
            .find_one(doc! { "id": key.as_str() })
            .await
            .map_err(|e| DomainError::storage(format!("find_one failed: {}", e)))?;

        document.map(|d| self.decode(d)).transpose()
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| DomainError::storage(format!("find failed: {}", e)))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| DomainError::storage(format!("cursor failed: {}", e)))?;

        documents.into_iter().map(|d| self.decode(d)).collect()
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        if self.exists(entity.key()).await? {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                entity.key().as_str()
            )));
        }

        let document = self.encode(&entity)?;

        self.collection
            .insert_one(document)
            .await
            .map_err(|e| DomainError::storage(format!("insert_one failed: {}", e)))?;

        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let document = self.encode(&entity)?;

        let result = self
            .collection
            .replace_one(doc! { "id": entity.key().as_str() }, document)
            .await
            .map_err(|e| DomainError::storage(format!("replace_one failed: {}", e)))?;

        if result.matched_count == 0 {
            return Err(DomainError::not_found(format!(
                "Entity with key '{}' not found",
                entity.key().as_str()
            )));
        }

        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let result = self
            .collection
            .delete_one(doc! { "id": key.as_str() })
            .await
            .map_err(|e| DomainError::storage(format!("delete_one failed: {}", e)))?;

        Ok(result.deleted_count > 0)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.collection
            .delete_many(doc! {})
            .await
            .map_err(|e| DomainError::storage(format!("delete_many failed: {}", e)))?;

        Ok(())
    }
}
