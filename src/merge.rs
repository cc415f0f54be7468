//! Positional merge of translated content with local metadata.
//!
//! Demo steps pair each translated record with literal data kept in code
//! (case counts, icons, expected responses). Both sequences are ordered the
//! same way; the merge refuses to guess when their lengths differ.

use crate::error::MergeError;

/// One translated entry and its local metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged<T, U> {
    pub translated: T,
    pub local: U,
}

/// Zip `translated` with `local` by position.
///
/// # Errors
/// `MergeError::LengthMismatch` when the sequences differ in length; no
/// partial result is produced.
pub fn merge<T, U: Clone>(translated: Vec<T>, local: &[U]) -> Result<Vec<Merged<T, U>>, MergeError> {
    if translated.len() != local.len() {
        return Err(MergeError::LengthMismatch {
            translated: translated.len(),
            local: local.len(),
        });
    }

    Ok(translated
        .into_iter()
        .zip(local.iter().cloned())
        .map(|(translated, local)| Merged { translated, local })
        .collect())
}
