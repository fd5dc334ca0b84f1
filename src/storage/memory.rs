//! In-memory document store
//!
//! Backs local development and tests. Set mutations take the document entry
//! lock for the whole read-modify-write, so concurrent membership updates on
//! the same document serialize instead of clobbering each other.

use super::store::DocumentStore;
use crate::utils::error::{BoardError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Value, json};

/// DashMap-backed store; tables are created on first write
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: DashMap<String, DashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_doc<F>(&self, table: &str, id: &str, mutate: F) -> Result<Value>
    where
        F: FnOnce(&mut Value),
    {
        let table = self
            .tables
            .get(table)
            .ok_or_else(|| BoardError::not_found(format!("No such table: {table}")))?;
        let mut entry = table
            .get_mut(id)
            .ok_or_else(|| BoardError::not_found(format!("No such document: {id}")))?;
        mutate(entry.value_mut());
        Ok(entry.value().clone())
    }
}

/// Read a multi-valued field in either of its stored shapes into an array
fn field_as_vec(doc: &Value, field: &str) -> Vec<String> {
    match doc.get(field) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(joined)) => joined.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, table: &str, id: &str) -> Result<Option<Value>> {
        Ok(self
            .tables
            .get(table)
            .and_then(|t| t.get(id).map(|doc| doc.value().clone())))
    }

    async fn put(&self, table: &str, id: &str, doc: Value) -> Result<()> {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    async fn update(&self, table: &str, id: &str, patch: Value) -> Result<Value> {
        let fields = match patch {
            Value::Object(fields) => fields,
            _ => return Err(BoardError::bad_request("Update patch must be an object")),
        };
        self.with_doc(table, id, |doc| {
            if let Value::Object(existing) = doc {
                for (key, value) in fields {
                    existing.insert(key, value);
                }
            }
        })
    }

    async fn delete(&self, table: &str, id: &str) -> Result<()> {
        if let Some(table) = self.tables.get(table) {
            table.remove(id);
        }
        Ok(())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Value>> {
        Ok(self
            .tables
            .get(table)
            .map(|t| t.iter().map(|doc| doc.value().clone()).collect())
            .unwrap_or_default())
    }

    async fn add_to_set(&self, table: &str, id: &str, field: &str, value: &str) -> Result<Value> {
        self.with_doc(table, id, |doc| {
            let mut items = field_as_vec(doc, field);
            if !items.iter().any(|item| item == value) {
                items.push(value.to_string());
            }
            doc[field] = json!(items);
        })
    }

    async fn remove_from_set(
        &self,
        table: &str,
        id: &str,
        field: &str,
        value: &str,
    ) -> Result<Value> {
        self.with_doc(table, id, |doc| {
            let mut items = field_as_vec(doc, field);
            items.retain(|item| item != value);
            doc[field] = json!(items);
        })
    }
}
