//! Document store interface
//!
//! The persistent store is an external collaborator; this trait captures the
//! key-value/document operations handlers need. It is injected into the
//! server explicitly (no module-scope singleton), so tests and alternative
//! backends slot in behind the same interface.

use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A key-value/document store: get-by-key, put, update-by-key,
/// delete-by-key, full scan, and element-level set mutation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by key, or None when absent
    async fn get(&self, table: &str, id: &str) -> Result<Option<Value>>;

    /// Insert or replace a document
    async fn put(&self, table: &str, id: &str, doc: Value) -> Result<()>;

    /// Shallow-merge `patch` into an existing document and return the result
    async fn update(&self, table: &str, id: &str, patch: Value) -> Result<Value>;

    /// Delete a document by key
    async fn delete(&self, table: &str, id: &str) -> Result<()>;

    /// Return every document in a table; callers filter in memory
    async fn scan(&self, table: &str) -> Result<Vec<Value>>;

    /// Atomically add an element to a multi-valued field.
    ///
    /// This exists so two concurrent membership updates cannot overwrite
    /// each other, which whole-field replacement would allow. The field is
    /// rewritten in array form. Adding an element that is already present
    /// is a no-op.
    async fn add_to_set(&self, table: &str, id: &str, field: &str, value: &str) -> Result<Value>;

    /// Atomically remove an element from a multi-valued field
    async fn remove_from_set(
        &self,
        table: &str,
        id: &str,
        field: &str,
        value: &str,
    ) -> Result<Value>;
}
