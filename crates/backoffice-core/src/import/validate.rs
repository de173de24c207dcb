use std::path::Path;

use super::{ImportCandidate, ImportError};

/// Extensions accepted for import, lowercase.
pub const ALLOWED_EXTENSIONS: &[&str] = &["csv", "xlsx"];

/// Size ceiling in bytes (10 MiB, inclusive).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Check a candidate against format and size, in that order.
///
/// Short-circuits on the first failure, so a huge `.pdf` reports
/// `InvalidFormat`, not `TooLarge`.
pub fn validate(candidate: &ImportCandidate) -> Result<(), ImportError> {
    let extension = Path::new(candidate.name())
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let allowed = extension
        .as_deref()
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext));
    if !allowed {
        return Err(ImportError::InvalidFormat {
            name: candidate.name().to_owned(),
            allowed: ALLOWED_EXTENSIONS
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    let size = candidate.size();
    if size > MAX_FILE_SIZE {
        return Err(ImportError::TooLarge {
            size,
            limit: MAX_FILE_SIZE,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(name: &str, size: usize) -> ImportCandidate {
        ImportCandidate::new(name, vec![b'x'; size])
    }

    #[test]
    fn accepts_allowed_extensions_case_insensitively() {
        assert_eq!(validate(&sized("products.csv", 10)), Ok(()));
        assert_eq!(validate(&sized("PRODUCTS.XLSX", 10)), Ok(()));
    }

    #[test]
    fn rejects_other_extensions() {
        for name in ["data.xls", "data.pdf", "data", "csv", "data.csv.exe"] {
            assert!(
                matches!(validate(&sized(name, 1)), Err(ImportError::InvalidFormat { .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        let limit = usize::try_from(MAX_FILE_SIZE).unwrap_or(usize::MAX);
        assert_eq!(validate(&sized("edge.csv", limit)), Ok(()));
        assert_eq!(
            validate(&sized("over.csv", limit + 1)),
            Err(ImportError::TooLarge {
                size: MAX_FILE_SIZE + 1,
                limit: MAX_FILE_SIZE,
            })
        );
    }

    #[test]
    fn format_is_checked_before_size() {
        let limit = usize::try_from(MAX_FILE_SIZE).unwrap_or(usize::MAX);
        assert!(matches!(
            validate(&sized("huge.pdf", limit + 1)),
            Err(ImportError::InvalidFormat { .. })
        ));
    }
}
