// ── Import validation & upload pipeline ──
//
// Gates a user-selected file on extension and size before it is staged,
// then hands the staged file to a caller-supplied upload function.

mod session;
mod template;
mod validate;

use bytes::Bytes;
use thiserror::Error;

pub use session::ImportSession;
pub use template::{TEMPLATE_FILE_NAME, TEMPLATE_HEADER, template_csv, write_template};
pub use validate::{ALLOWED_EXTENSIONS, MAX_FILE_SIZE, validate};

/// A file picked for import, before or after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCandidate {
    name: String,
    contents: Bytes,
}

impl ImportCandidate {
    pub fn new(name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Declared file name, including extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &Bytes {
        &self.contents
    }

    pub fn size(&self) -> u64 {
        u64::try_from(self.contents.len()).unwrap_or(u64::MAX)
    }
}

/// Import pipeline failures. All are shown inline and are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Unsupported file format '{name}'. Allowed: {allowed}")]
    InvalidFormat { name: String, allowed: String },

    #[error("File is too large ({size} bytes). Maximum is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("Upload failed. Please try again")]
    UploadFailed,

    #[error("No file selected")]
    NothingStaged,
}
