use crate::errors::WorkerError;

/// Suffix appended to the extensionless source key.
pub const OVERVIEW_SUFFIX: &str = "_overview.txt";

/// Derives the key the summary is stored under.
///
/// Everything from the first `.` onward is dropped, so `a.b.c` becomes
/// `a_overview.txt`. Keys without a `.` are rejected.
pub fn derive_overview_key(key: &str) -> Result<String, WorkerError> {
    let extension_pos = key.find('.').ok_or_else(|| {
        WorkerError::KeyDerivationError(format!("key '{key}' has no extension"))
    })?;
    Ok(format!("{}{OVERVIEW_SUFFIX}", &key[..extension_pos]))
}
