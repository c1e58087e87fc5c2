//! State machine for one upload-and-analyze attempt.
//!
//! Generic over the file handle so the transitions stay independent of
//! browser types. The component layer owns exactly one task at a time and
//! drives it: select → submit → complete.

use shared::Prediction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadTask<F> {
    file: Option<F>,
    status: UploadStatus,
    result: Option<Prediction>,
}

impl<F> Default for UploadTask<F> {
    fn default() -> Self {
        Self {
            file: None,
            status: UploadStatus::Idle,
            result: None,
        }
    }
}

impl<F: Clone> UploadTask<F> {
    /// Replaces any previously selected file and drops the stale result.
    pub fn select_file(&mut self, file: F) {
        self.file = Some(file);
        self.result = None;
        self.status = UploadStatus::Idle;
    }

    /// Guarded submission: returns the file to upload, or `None` when no
    /// file is selected or a submission is already in flight. In the `None`
    /// case no state changes and no request must be issued.
    pub fn begin_submit(&mut self) -> Option<F> {
        if self.status == UploadStatus::Uploading {
            return None;
        }
        let file = self.file.clone()?;
        self.status = UploadStatus::Uploading;
        self.result = None;
        Some(file)
    }

    /// Records the outcome of the in-flight submission. Returns `true` when
    /// the caller must refresh the history view (exactly the success case);
    /// on failure the file is retained so the same attempt can be resubmitted.
    pub fn complete(&mut self, outcome: Result<Prediction, String>) -> bool {
        match outcome {
            Ok(prediction) => {
                self.result = Some(prediction);
                self.file = None;
                self.status = UploadStatus::Succeeded;
                true
            }
            Err(_) => {
                self.status = UploadStatus::Failed;
                false
            }
        }
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn result(&self) -> Option<&Prediction> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(label: &str) -> Prediction {
        Prediction {
            prediction: label.to_string(),
            confidence: Some(0.92),
            probability: None,
            probabilities: None,
            precision: None,
            recall: None,
            confusion_matrix: None,
        }
    }

    #[test]
    fn submit_without_file_is_a_noop() {
        let mut task: UploadTask<&str> = UploadTask::default();

        assert_eq!(task.begin_submit(), None);
        assert_eq!(task.status(), UploadStatus::Idle);
    }

    #[test]
    fn submit_while_in_flight_is_a_noop() {
        let mut task = UploadTask::default();
        task.select_file("scan.png");

        assert_eq!(task.begin_submit(), Some("scan.png"));
        assert_eq!(task.begin_submit(), None);
        assert_eq!(task.status(), UploadStatus::Uploading);
    }

    #[test]
    fn success_clears_file_and_requests_one_refresh() {
        let mut task = UploadTask::default();
        task.select_file("scan.png");
        task.begin_submit().unwrap();

        let refresh = task.complete(Ok(prediction("Tumor")));

        assert!(refresh);
        assert_eq!(task.status(), UploadStatus::Succeeded);
        assert!(task.file().is_none());
        assert_eq!(task.result().unwrap().prediction, "Tumor");
    }

    #[test]
    fn failure_retains_file_and_skips_refresh() {
        let mut task = UploadTask::default();
        task.select_file("scan.png");
        task.begin_submit().unwrap();

        let refresh = task.complete(Err("analysis unsuccessful".to_string()));

        assert!(!refresh);
        assert_eq!(task.status(), UploadStatus::Failed);
        assert_eq!(task.file(), Some(&"scan.png"));
        assert!(task.result().is_none());
    }

    #[test]
    fn failed_attempt_can_resubmit_the_same_file() {
        let mut task = UploadTask::default();
        task.select_file("scan.png");
        task.begin_submit().unwrap();
        task.complete(Err("boom".to_string()));

        assert_eq!(task.begin_submit(), Some("scan.png"));
        assert_eq!(task.status(), UploadStatus::Uploading);
    }

    #[test]
    fn selecting_a_new_file_clears_the_stale_result() {
        let mut task = UploadTask::default();
        task.select_file("first.png");
        task.begin_submit().unwrap();
        task.complete(Ok(prediction("Normal")));
        assert!(task.result().is_some());

        task.select_file("second.png");

        assert!(task.result().is_none());
        assert_eq!(task.status(), UploadStatus::Idle);
        assert_eq!(task.file(), Some(&"second.png"));
    }
}
