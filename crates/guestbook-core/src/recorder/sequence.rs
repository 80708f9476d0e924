use crate::storage::Storage;

/// Largest sequence number that fits the five-digit name.
pub const MAX_SEQUENCE: u32 = 99_999;

/// File name for recording number `sequence`, e.g. `00042.wav`.
pub fn recording_name(sequence: u32) -> String {
    format!("{:05}.wav", sequence)
}

/// Lowest sequence number whose file does not exist yet.
///
/// Gaps left by deleted recordings are reused before anything above the
/// highest existing number.
pub fn first_unused<S: Storage>(storage: &S) -> Option<u32> {
    (0..=MAX_SEQUENCE).find(|&sequence| !storage.exists(&recording_name(sequence)))
}
