//! Storage layer for the job board
//!
//! [`StorageLayer`] is a typed facade over an injected [`DocumentStore`]
//! backend. Handlers only ever go through the facade; the backend is chosen
//! at startup from configuration.

mod memory;
mod store;

pub use memory::MemoryStore;
pub use store::DocumentStore;

use crate::config::StorageConfig;
use crate::core::models::{Application, Job, Lab, User};
use crate::utils::error::{BoardError, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Fields on a lab document holding member associations
pub const FIELD_PROFESSOR_IDS: &str = "professorIds";
pub const FIELD_LAB_ASSISTANT_IDS: &str = "labAssistantIds";
/// Field on a user document holding lab associations
pub const FIELD_LAB_IDS: &str = "labIds";

/// Typed access to the document store
#[derive(Clone)]
pub struct StorageLayer {
    store: Arc<dyn DocumentStore>,
    tables: Tables,
}

#[derive(Debug, Clone)]
struct Tables {
    users: String,
    labs: String,
    jobs: String,
    applications: String,
}

impl StorageLayer {
    /// Create a storage layer from configuration.
    ///
    /// Only the in-memory backend ships with this crate; a managed NoSQL
    /// backend would implement [`DocumentStore`] and be selected here.
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let store: Arc<dyn DocumentStore> = match config.backend.as_str() {
            "memory" => {
                info!("Initializing in-memory document store");
                Arc::new(MemoryStore::new())
            }
            other => {
                return Err(BoardError::config(format!(
                    "Unknown storage backend: {other}"
                )));
            }
        };
        Ok(Self::with_store(store, config))
    }

    /// Wrap an already-constructed backend (dependency injection for tests)
    pub fn with_store(store: Arc<dyn DocumentStore>, config: &StorageConfig) -> Self {
        Self {
            store,
            tables: Tables {
                users: config.tables.users.clone(),
                labs: config.tables.labs.clone(),
                jobs: config.tables.jobs.clone(),
                applications: config.tables.applications.clone(),
            },
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(doc: Value) -> Result<T> {
        Ok(serde_json::from_value(doc)?)
    }

    fn encode<T: Serialize>(entity: &T) -> Result<Value> {
        Ok(serde_json::to_value(entity)?)
    }

    async fn get_typed<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
    ) -> Result<Option<T>> {
        match self.store.get(table, id).await? {
            Some(doc) => Ok(Some(Self::decode(doc)?)),
            None => Ok(None),
        }
    }

    async fn scan_typed<T: serde::de::DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        self.store
            .scan(table)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    // Users

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.get_typed(&self.tables.users, id).await
    }

    pub async fn put_user(&self, user: &User) -> Result<()> {
        self.store
            .put(&self.tables.users, &user.id, Self::encode(user)?)
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.scan_typed(&self.tables.users).await
    }

    pub async fn update_user(&self, id: &str, patch: Value) -> Result<User> {
        Self::decode(self.store.update(&self.tables.users, id, patch).await?)
    }

    pub async fn add_user_lab(&self, user_id: &str, lab_id: &str) -> Result<()> {
        self.store
            .add_to_set(&self.tables.users, user_id, FIELD_LAB_IDS, lab_id)
            .await?;
        Ok(())
    }

    pub async fn remove_user_lab(&self, user_id: &str, lab_id: &str) -> Result<()> {
        self.store
            .remove_from_set(&self.tables.users, user_id, FIELD_LAB_IDS, lab_id)
            .await?;
        Ok(())
    }

    // Labs

    pub async fn get_lab(&self, id: &str) -> Result<Option<Lab>> {
        self.get_typed(&self.tables.labs, id).await
    }

    pub async fn put_lab(&self, lab: &Lab) -> Result<()> {
        self.store
            .put(&self.tables.labs, &lab.id, Self::encode(lab)?)
            .await
    }

    pub async fn list_labs(&self) -> Result<Vec<Lab>> {
        self.scan_typed(&self.tables.labs).await
    }

    pub async fn update_lab(&self, id: &str, patch: Value) -> Result<Lab> {
        Self::decode(self.store.update(&self.tables.labs, id, patch).await?)
    }

    pub async fn delete_lab(&self, id: &str) -> Result<()> {
        self.store.delete(&self.tables.labs, id).await
    }

    /// Add a member id to one of the lab's association fields
    pub async fn add_lab_member(&self, lab_id: &str, field: &str, user_id: &str) -> Result<Lab> {
        Self::decode(
            self.store
                .add_to_set(&self.tables.labs, lab_id, field, user_id)
                .await?,
        )
    }

    /// Remove a member id from one of the lab's association fields
    pub async fn remove_lab_member(
        &self,
        lab_id: &str,
        field: &str,
        user_id: &str,
    ) -> Result<Lab> {
        Self::decode(
            self.store
                .remove_from_set(&self.tables.labs, lab_id, field, user_id)
                .await?,
        )
    }

    // Jobs

    pub async fn get_job(&self, id: &str) -> Result<Option<Job>> {
        self.get_typed(&self.tables.jobs, id).await
    }

    pub async fn put_job(&self, job: &Job) -> Result<()> {
        self.store
            .put(&self.tables.jobs, &job.id, Self::encode(job)?)
            .await
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.scan_typed(&self.tables.jobs).await
    }

    pub async fn update_job(&self, id: &str, patch: Value) -> Result<Job> {
        Self::decode(self.store.update(&self.tables.jobs, id, patch).await?)
    }

    pub async fn delete_job(&self, id: &str) -> Result<()> {
        self.store.delete(&self.tables.jobs, id).await
    }

    /// Fetch a job and resolve its lab association into the `lab` snapshot
    /// so guards have the data they need.
    pub async fn get_job_with_lab(&self, id: &str) -> Result<Option<Job>> {
        let Some(mut job) = self.get_job(id).await? else {
            return Ok(None);
        };
        if job.lab.is_none() {
            if let Some(lab_id) = &job.lab_id {
                job.lab = self.get_lab(lab_id).await?;
            }
        }
        Ok(Some(job))
    }

    // Applications

    pub async fn get_application(&self, id: &str) -> Result<Option<Application>> {
        self.get_typed(&self.tables.applications, id).await
    }

    pub async fn put_application(&self, application: &Application) -> Result<()> {
        self.store
            .put(
                &self.tables.applications,
                &application.id,
                Self::encode(application)?,
            )
            .await
    }

    pub async fn list_applications(&self) -> Result<Vec<Application>> {
        self.scan_typed(&self.tables.applications).await
    }

    pub async fn update_application(&self, id: &str, patch: Value) -> Result<Application> {
        Self::decode(
            self.store
                .update(&self.tables.applications, id, patch)
                .await?,
        )
    }

    pub async fn delete_application(&self, id: &str) -> Result<()> {
        self.store.delete(&self.tables.applications, id).await
    }

    /// Duplicate-application check: scan for an existing (job, student) pair
    pub async fn find_application(
        &self,
        job_id: &str,
        student_id: &str,
    ) -> Result<Option<Application>> {
        Ok(self
            .list_applications()
            .await?
            .into_iter()
            .find(|app| app.job_id == job_id && app.student_id == student_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    fn layer() -> StorageLayer {
        StorageLayer::new(&StorageConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_lab_round_trip() {
        let storage = layer();
        let mut lab = Lab::new("L1");
        lab.professor_id = Some("P1".to_string());
        storage.put_lab(&lab).await.unwrap();

        let loaded = storage.get_lab("L1").await.unwrap().unwrap();
        assert_eq!(loaded.professor_id.as_deref(), Some("P1"));
    }

    #[tokio::test]
    async fn test_job_with_lab_resolution() {
        let storage = layer();
        let mut lab = Lab::new("L1");
        lab.professor_id = Some("P1".to_string());
        storage.put_lab(&lab).await.unwrap();

        let mut job = Job::new("J1");
        job.lab_id = Some("L1".to_string());
        storage.put_job(&job).await.unwrap();

        let resolved = storage.get_job_with_lab("J1").await.unwrap().unwrap();
        let lab = resolved.lab.expect("lab snapshot resolved");
        assert_eq!(lab.professor_id.as_deref(), Some("P1"));
    }

    #[tokio::test]
    async fn test_job_with_dangling_lab_id() {
        let storage = layer();
        let mut job = Job::new("J1");
        job.lab_id = Some("missing".to_string());
        storage.put_job(&job).await.unwrap();

        // Resolution failure leaves the snapshot empty; guards then deny
        let resolved = storage.get_job_with_lab("J1").await.unwrap().unwrap();
        assert!(resolved.lab.is_none());
    }

    #[tokio::test]
    async fn test_find_application() {
        let storage = layer();
        let app = Application::new("AP1", "J1", "S1");
        storage.put_application(&app).await.unwrap();

        assert!(storage.find_application("J1", "S1").await.unwrap().is_some());
        assert!(storage.find_application("J1", "S2").await.unwrap().is_none());
        assert!(storage.find_application("J2", "S1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lab_member_documents_stay_typed() {
        let storage = layer();
        storage.put_lab(&Lab::new("L1")).await.unwrap();

        let lab = storage
            .add_lab_member("L1", FIELD_LAB_ASSISTANT_IDS, "A1")
            .await
            .unwrap();
        assert_eq!(
            crate::auth::rbac::normalize(lab.lab_assistant_ids.as_ref()),
            vec!["A1"]
        );

        let lab = storage
            .remove_lab_member("L1", FIELD_LAB_ASSISTANT_IDS, "A1")
            .await
            .unwrap();
        assert!(crate::auth::rbac::normalize(lab.lab_assistant_ids.as_ref()).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_backend_rejected() {
        let mut config = StorageConfig::default();
        config.backend = "dynamodb".to_string();
        assert!(StorageLayer::new(&config).is_err());
    }
}
