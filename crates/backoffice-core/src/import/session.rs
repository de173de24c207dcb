use std::fmt::Display;
use std::future::Future;

use tracing::{debug, info, warn};

use super::{ImportCandidate, ImportError, validate};

type Completion = Box<dyn Fn() + Send + Sync>;

/// State of the import modal: at most one staged file plus an inline error.
///
/// A candidate is created on selection and destroyed on close or on a
/// successful upload. A failed upload keeps it staged so the user can
/// retry without picking the file again.
#[derive(Default)]
pub struct ImportSession {
    open: bool,
    staged: Option<ImportCandidate>,
    error: Option<ImportError>,
    on_complete: Option<Completion>,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback fired after every successful upload.
    pub fn on_complete(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the modal, discarding any staged file and error.
    pub fn close(&mut self) {
        self.open = false;
        self.staged = None;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn staged(&self) -> Option<&ImportCandidate> {
        self.staged.as_ref()
    }

    pub fn error(&self) -> Option<&ImportError> {
        self.error.as_ref()
    }

    /// Validate and stage a newly selected file.
    ///
    /// A rejected file leaves nothing staged, including any earlier pick.
    pub fn select(&mut self, candidate: ImportCandidate) -> Result<(), ImportError> {
        self.open = true;
        self.error = None;

        if let Err(err) = validate(&candidate) {
            debug!(name = candidate.name(), error = %err, "import file rejected");
            self.staged = None;
            self.error = Some(err.clone());
            return Err(err);
        }

        debug!(name = candidate.name(), size = candidate.size(), "import file staged");
        self.staged = Some(candidate);
        Ok(())
    }

    /// Upload the staged file through `uploader`.
    ///
    /// On success the completion callback runs and the modal closes. On
    /// failure the error is generic, the modal stays open and the file
    /// stays staged.
    pub async fn upload<F, Fut, R, E>(&mut self, uploader: F) -> Result<R, ImportError>
    where
        F: FnOnce(ImportCandidate) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Display,
    {
        let Some(candidate) = self.staged.clone() else {
            self.error = Some(ImportError::NothingStaged);
            return Err(ImportError::NothingStaged);
        };

        self.error = None;
        let name = candidate.name().to_owned();

        match uploader(candidate).await {
            Ok(result) => {
                info!(name, "import uploaded");
                if let Some(callback) = &self.on_complete {
                    callback();
                }
                self.close();
                Ok(result)
            }
            Err(err) => {
                warn!(name, error = %err, "import upload failed");
                self.error = Some(ImportError::UploadFailed);
                Err(ImportError::UploadFailed)
            }
        }
    }
}

impl std::fmt::Debug for ImportSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportSession")
            .field("open", &self.open)
            .field("staged", &self.staged.as_ref().map(ImportCandidate::name))
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
