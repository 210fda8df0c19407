use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use super::{AbstractRecord, AbstractRepository, AbstractSubmission, find_by_param};
use crate::error::{CalboardError, CalboardResult};
use crate::store::JsonFile;

/// Submissions kept in one `abstracts.json` file.
///
/// Records are addressed by id or by the slug of their journal name.
#[derive(Debug)]
pub struct FileAbstractRepository {
    file: JsonFile<AbstractRecord>,
    lock: Mutex<()>,
}

impl FileAbstractRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileAbstractRepository {
            file: JsonFile::new(path),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl AbstractRepository for FileAbstractRepository {
    async fn get_by_id(&self, id: &str) -> CalboardResult<Option<AbstractSubmission>> {
        let _guard = self.lock.lock().await;
        let records = self.file.load().await?;
        Ok(find_by_param(&records, id).map(|r| r.submission.clone()))
    }

    async fn list(&self) -> CalboardResult<Vec<AbstractRecord>> {
        let _guard = self.lock.lock().await;
        self.file.load().await
    }

    #[instrument(skip_all, fields(journal = %submission.journal_name))]
    async fn create(&self, submission: &AbstractSubmission) -> CalboardResult<String> {
        let _guard = self.lock.lock().await;
        let mut records = self.file.load().await?;

        let id = uuid::Uuid::new_v4().to_string();
        records.push(AbstractRecord {
            id: id.clone(),
            submission: submission.clone(),
        });
        self.file.save(&records).await?;

        debug!(id = %id, "Stored submission");
        Ok(id)
    }

    #[instrument(skip(self, submission))]
    async fn update(&self, id: &str, submission: &AbstractSubmission) -> CalboardResult<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.file.load().await?;

        let record_id = find_by_param(&records, id)
            .map(|r| r.id.clone())
            .ok_or_else(|| CalboardError::SubmissionNotFound(id.to_string()))?;
        if let Some(record) = records.iter_mut().find(|r| r.id == record_id) {
            record.submission = submission.clone();
        }

        self.file.save(&records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::tests::complete_submission;

    #[tokio::test]
    async fn test_create_then_lookup_by_id_and_slug() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileAbstractRepository::new(dir.path().join("abstracts.json"));

        let id = repo.create(&complete_submission()).await.unwrap();

        assert_eq!(repo.get_by_id(&id).await.unwrap(), Some(complete_submission()));
        assert!(
            repo.get_by_id("journal-of-applied-widgets")
                .await
                .unwrap()
                .is_some()
        );
        assert_eq!(repo.get_by_id("nope").await.unwrap(), None);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_values() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileAbstractRepository::new(dir.path().join("abstracts.json"));
        let id = repo.create(&complete_submission()).await.unwrap();

        let mut edited = complete_submission();
        edited.title = "On Gadgets".to_string();
        repo.update(&id, &edited).await.unwrap();

        let stored = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.title, "On Gadgets");
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileAbstractRepository::new(dir.path().join("abstracts.json"));

        let err = repo.update("missing", &complete_submission()).await.unwrap_err();
        assert!(matches!(err, CalboardError::SubmissionNotFound(_)));
    }
}
