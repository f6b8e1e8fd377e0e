use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::engine::types::UniqueId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub field_id: i64,
    pub name: String,
    pub is_primary_key: bool,
    pub data_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

impl CollectionSchema {
    pub fn field_name(&self, field_id: i64) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.field_id == field_id)
            .map(|field| field.name.as_str())
    }
}

#[derive(Debug)]
pub struct Collection {
    id: UniqueId,
    schema: CollectionSchema,
}

impl Collection {
    pub fn new(id: UniqueId, schema: CollectionSchema) -> Self {
        Self { id, schema }
    }

    pub fn id(&self) -> UniqueId {
        self.id
    }

    pub fn schema(&self) -> &CollectionSchema {
        &self.schema
    }
}

/// Collections loaded on this node.
#[derive(Debug, Default)]
pub struct CollectionManager {
    collections: DashMap<UniqueId, Arc<Collection>>,
}

impl CollectionManager {
    pub fn get(&self, collection_id: UniqueId) -> Option<Arc<Collection>> {
        self.collections
            .get(&collection_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn put(&self, collection: Collection) {
        self.collections
            .insert(collection.id(), Arc::new(collection));
    }

    pub fn remove(&self, collection_id: UniqueId) -> bool {
        self.collections.remove(&collection_id).is_some()
    }
}
