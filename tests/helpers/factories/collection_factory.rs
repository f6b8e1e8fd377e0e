use crate::engine::segments::{Collection, CollectionSchema, FieldSchema};
use crate::engine::types::UniqueId;

pub const PK_FIELD_ID: i64 = 100;
pub const AGE_FIELD_ID: i64 = 101;
pub const VECTOR_FIELD_ID: i64 = 102;

pub struct CollectionFactory {
    id: UniqueId,
    name: String,
}

impl CollectionFactory {
    pub fn new() -> Self {
        Self {
            id: 1,
            name: "books".to_string(),
        }
    }

    pub fn with_id(mut self, id: UniqueId) -> Self {
        self.id = id;
        self
    }

    pub fn schema(&self) -> CollectionSchema {
        let field = |field_id, name: &str, is_primary_key, data_type: &str| FieldSchema {
            field_id,
            name: name.to_string(),
            is_primary_key,
            data_type: data_type.to_string(),
        };
        CollectionSchema {
            name: self.name.clone(),
            fields: vec![
                field(PK_FIELD_ID, "pk", true, "Int64"),
                field(AGE_FIELD_ID, "age", false, "Int64"),
                field(VECTOR_FIELD_ID, "embedding", false, "FloatVector"),
            ],
        }
    }

    pub fn create(self) -> Collection {
        let schema = self.schema();
        Collection::new(self.id, schema)
    }
}
