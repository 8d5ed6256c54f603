use crate::libs::error::ChimeraError;
use crate::libs::seq::is_base;

/// Percent identity of two aligned strings of equal length.
///
/// Only columns where at least one side carries a base are counted.
/// Returns `0.0` when no such column exists.
///
/// ```
/// use chimr::libs::identity::try_percent_identity;
/// let pid = try_percent_identity(b"AC-GT", b"ACTGA").unwrap();
/// assert_eq!(pid, 60.0);
/// assert!(try_percent_identity(b"ACGT", b"ACG").is_err());
/// ```
pub fn try_percent_identity(left: &[u8], right: &[u8]) -> Result<f32, ChimeraError> {
    if left.len() != right.len() {
        return Err(ChimeraError::IdentityLength {
            left: left.len(),
            right: right.len(),
        });
    }

    let mut num_bases = 0usize;
    let mut num_identical = 0usize;
    for (&l, &r) in left.iter().zip(right) {
        if is_base(l) || is_base(r) {
            num_bases += 1;
            if l == r {
                num_identical += 1;
            }
        }
    }

    if num_bases == 0 {
        return Ok(0.0);
    }

    Ok((num_identical * 100) as f32 / num_bases as f32)
}

/// Like [`try_percent_identity`], but reports a length mismatch and
/// returns the sentinel `-1.0`.
pub fn percent_identity(left: &[u8], right: &[u8]) -> f32 {
    match try_percent_identity(left, right) {
        Ok(pid) => pid,
        Err(e) => {
            log::warn!("{}", e);
            -1.0
        }
    }
}
