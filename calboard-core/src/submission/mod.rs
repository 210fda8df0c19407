//! Abstract / article submission form.
//!
//! A journal submission is validated client-side before it is sent. In edit
//! mode the form first loads the stored record; an unknown id sends the user
//! back to the dashboard root.

mod file;

pub use file::FileAbstractRepository;

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use validator::{Validate, ValidationErrors};

use crate::error::CalboardResult;
use crate::notify::{Notifier, Severity};

/// Form values of a journal abstract submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AbstractSubmission {
    #[validate(length(min = 1, message = "Journal name is required"))]
    pub journal_name: String,
    #[validate(length(min = 1, message = "ISSN is required"))]
    pub issn: String,
    #[validate(length(min = 1, message = "Publisher is required"))]
    pub publisher: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Affiliation is required"))]
    pub affiliation: String,
    #[validate(length(min = 1, message = "Author name is required"))]
    pub author_name: String,
    #[serde(rename = "abstract")]
    #[validate(length(min = 1, message = "Abstract is required"))]
    pub abstract_text: String,
    #[serde(rename = "linkDOI")]
    #[validate(length(min = 1, message = "Link or DOI is required"))]
    pub link_doi: String,
    #[serde(default)]
    #[validate(length(max = 20000, message = "Article type must not exceed 20000 characters"))]
    pub article_type: String,
}

/// A stored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractRecord {
    pub id: String,
    #[serde(flatten)]
    pub submission: AbstractSubmission,
}

impl AbstractRecord {
    /// Param-cased journal name, as used in edit URLs.
    pub fn slug(&self) -> String {
        slug::slugify(&self.submission.journal_name)
    }
}

/// Resolve a record by id, or by the param-cased journal name.
pub fn find_by_param<'a>(
    records: &'a [AbstractRecord],
    param: &str,
) -> Option<&'a AbstractRecord> {
    records
        .iter()
        .find(|r| r.id == param)
        .or_else(|| records.iter().find(|r| r.slug() == param))
}

/// Backend for submissions.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AbstractRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> CalboardResult<Option<AbstractSubmission>>;

    async fn list(&self) -> CalboardResult<Vec<AbstractRecord>>;

    /// Store a new submission and return its id.
    async fn create(&self, submission: &AbstractSubmission) -> CalboardResult<String>;

    async fn update(&self, id: &str, submission: &AbstractSubmission) -> CalboardResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// Where the form sends the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    SubmissionList,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Field errors; nothing was sent.
    Invalid(ValidationErrors),
    Saved(Route),
    /// The backend rejected the request; the form keeps its values.
    Failed,
}

pub struct SubmissionForm {
    repository: Arc<dyn AbstractRepository>,
    notifier: Arc<dyn Notifier>,
    mode: FormMode,
    defaults: AbstractSubmission,
    values: AbstractSubmission,
}

impl std::fmt::Debug for SubmissionForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionForm")
            .field("mode", &self.mode)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl SubmissionForm {
    pub fn new(
        repository: Arc<dyn AbstractRepository>,
        notifier: Arc<dyn Notifier>,
        mode: FormMode,
    ) -> Self {
        SubmissionForm {
            repository,
            notifier,
            mode,
            defaults: AbstractSubmission::default(),
            values: AbstractSubmission::default(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn values(&self) -> &AbstractSubmission {
        &self.values
    }

    pub fn set_values(&mut self, values: AbstractSubmission) {
        self.values = values;
    }

    /// Back to the loaded values (or empty ones when creating).
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
    }

    /// In edit mode, fetch the record being edited.
    ///
    /// Returns a redirect when the record does not exist.
    #[instrument(skip_all)]
    pub async fn load(&mut self) -> Option<Route> {
        let FormMode::Edit(id) = &self.mode else {
            return None;
        };

        match self.repository.get_by_id(id).await {
            Ok(Some(submission)) => {
                self.defaults = submission.clone();
                self.values = submission;
                None
            }
            Ok(None) => {
                self.notifier.notify("Submission not found", Severity::Error);
                Some(Route::Root)
            }
            Err(e) => {
                error!(id = %id, error = %e, "Failed to fetch submission");
                self.notifier.notify(
                    "An error occurred while fetching submission details",
                    Severity::Error,
                );
                None
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn submit(&mut self, values: AbstractSubmission) -> SubmitOutcome {
        if let Err(errors) = values.validate() {
            self.values = values;
            return SubmitOutcome::Invalid(errors);
        }

        let result = match &self.mode {
            FormMode::Edit(id) => self.repository.update(id, &values).await,
            FormMode::Create => self.repository.create(&values).await.map(|id| {
                info!(id = %id, "Created submission");
            }),
        };

        match result {
            Ok(()) => {
                // An edited record now holds the saved values.
                if let FormMode::Edit(_) = self.mode {
                    self.defaults = values;
                }
                self.reset();
                let message = match self.mode {
                    FormMode::Create => "Create success!",
                    FormMode::Edit(_) => "Update success!",
                };
                self.notifier.notify(message, Severity::Success);
                SubmitOutcome::Saved(Route::SubmissionList)
            }
            Err(e) => {
                error!(error = %e, "Submission failed");
                self.values = values;
                self.notifier
                    .notify("An error occurred. Please try again.", Severity::Error);
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalboardError;
    use crate::notify::MockNotifier;
    use mockall::predicate::eq;

    pub(super) fn complete_submission() -> AbstractSubmission {
        AbstractSubmission {
            journal_name: "Journal of Applied Widgets".to_string(),
            issn: "1234-5678".to_string(),
            publisher: "Widget Press".to_string(),
            title: "On Widgets".to_string(),
            affiliation: "University of Somewhere".to_string(),
            author_name: "A. Author".to_string(),
            abstract_text: "widgets, gadgets".to_string(),
            link_doi: "10.1000/xyz123".to_string(),
            article_type: String::new(),
        }
    }

    fn notifier_expecting(message: &'static str, severity: Severity) -> Arc<MockNotifier> {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(eq(message), eq(severity))
            .times(1)
            .return_const(());
        Arc::new(notifier)
    }

    #[test]
    fn test_missing_required_fields() {
        let errors = AbstractSubmission::default().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("journal_name"));
        assert!(fields.contains_key("link_doi"));
        assert!(!fields.contains_key("article_type"));
    }

    #[test]
    fn test_article_type_length_limit() {
        let mut submission = complete_submission();
        submission.article_type = "x".repeat(20001);
        assert!(submission.validate().is_err());
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(complete_submission()).unwrap();
        assert!(json.get("journalName").is_some());
        assert!(json.get("abstract").is_some());
        assert!(json.get("linkDOI").is_some());
    }

    #[test]
    fn test_find_by_param_matches_id_or_slug() {
        let records = vec![AbstractRecord {
            id: "abc".to_string(),
            submission: complete_submission(),
        }];
        assert!(find_by_param(&records, "abc").is_some());
        assert!(find_by_param(&records, "journal-of-applied-widgets").is_some());
        assert!(find_by_param(&records, "other").is_none());
    }

    #[tokio::test]
    async fn test_create_success_redirects_to_list() {
        let mut repo = MockAbstractRepository::new();
        repo.expect_create().times(1).returning(|_| Ok("new-id".to_string()));
        let notifier = notifier_expecting("Create success!", Severity::Success);

        let mut form = SubmissionForm::new(Arc::new(repo), notifier, FormMode::Create);
        let outcome = form.submit(complete_submission()).await;

        assert!(matches!(outcome, SubmitOutcome::Saved(Route::SubmissionList)));
        assert_eq!(form.values(), &AbstractSubmission::default());
    }

    #[tokio::test]
    async fn test_invalid_values_stay_in_form() {
        let mut repo = MockAbstractRepository::new();
        repo.expect_create().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let mut form = SubmissionForm::new(Arc::new(repo), Arc::new(notifier), FormMode::Create);
        let mut values = complete_submission();
        values.issn.clear();

        let outcome = form.submit(values.clone()).await;
        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected validation errors");
        };
        assert!(errors.field_errors().contains_key("issn"));
        assert_eq!(form.values(), &values);
    }

    #[tokio::test]
    async fn test_edit_of_missing_record_redirects_root() {
        let mut repo = MockAbstractRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        let notifier = notifier_expecting("Submission not found", Severity::Error);

        let mut form =
            SubmissionForm::new(Arc::new(repo), notifier, FormMode::Edit("gone".to_string()));
        assert_eq!(form.load().await, Some(Route::Root));
    }

    #[tokio::test]
    async fn test_edit_loads_and_resets_to_loaded_values() {
        let mut repo = MockAbstractRepository::new();
        repo.expect_get_by_id()
            .with(eq("abc"))
            .returning(|_| Ok(Some(complete_submission())));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let mut form = SubmissionForm::new(
            Arc::new(repo),
            Arc::new(notifier),
            FormMode::Edit("abc".to_string()),
        );
        assert_eq!(form.load().await, None);

        let mut edited = complete_submission();
        edited.title = "Changed".to_string();
        form.set_values(edited);
        form.reset();
        assert_eq!(form.values(), &complete_submission());
    }

    #[tokio::test]
    async fn test_successful_edit_resets_to_saved_values() {
        let mut repo = MockAbstractRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Ok(Some(complete_submission())));
        repo.expect_update().times(1).returning(|_, _| Ok(()));
        let notifier = notifier_expecting("Update success!", Severity::Success);

        let mut form =
            SubmissionForm::new(Arc::new(repo), notifier, FormMode::Edit("abc".to_string()));
        form.load().await;

        let mut edited = complete_submission();
        edited.title = "On Gadgets".to_string();
        let outcome = form.submit(edited.clone()).await;

        assert!(matches!(outcome, SubmitOutcome::Saved(Route::SubmissionList)));
        assert_eq!(form.values(), &edited);
        form.reset();
        assert_eq!(form.values(), &edited);
    }

    #[tokio::test]
    async fn test_failed_update_notifies_error() {
        let mut repo = MockAbstractRepository::new();
        repo.expect_update()
            .returning(|_, _| Err(CalboardError::Store("offline".into())));
        let notifier = notifier_expecting("An error occurred. Please try again.", Severity::Error);

        let mut form =
            SubmissionForm::new(Arc::new(repo), notifier, FormMode::Edit("abc".to_string()));
        let outcome = form.submit(complete_submission()).await;

        assert!(matches!(outcome, SubmitOutcome::Failed));
        assert_eq!(form.values(), &complete_submission());
    }
}
