use crate::storage::Stream;

/// Seconds elapsed since `claim_start`, capped at `claim_end` and never negative.
fn elapsed(stream: &Stream, at: u64) -> u64 {
    let capped = at.min(stream.claim_end);
    capped.saturating_sub(stream.claim_start)
}

/// Number of whole windows released at `at`
///
/// Formula: floor((min(at, claim_end) - claim_start) / claim_window_unit)
pub fn window_index(stream: &Stream, at: u64) -> u64 {
    elapsed(stream, at) / stream.claim_window_unit
}

/// Amount released per ticket at `at`, floored to whole windows
///
/// Example:
/// - emission_rate: 1.0 per day, window: 1 day
/// - At day 6.5: 6 windows × 1.0 = 6.0
pub fn released_rounded(stream: &Stream, at: u64) -> Option<i128> {
    (window_index(stream, at) as i128).checked_mul(stream.emission_rate)
}

/// Amount released per ticket at `at`, interpolated continuously
///
/// Formula: elapsed × emission_rate / claim_window_unit
///
/// Example:
/// - emission_rate: 1.0 per day, window: 1 day
/// - At day 6.5: 6.5
pub fn released_fractioned(stream: &Stream, at: u64) -> Option<i128> {
    (elapsed(stream, at) as i128)
        .checked_mul(stream.emission_rate)?
        .checked_div(stream.claim_window_unit as i128)
}

/// Amount owed for the windows between `last_window` and `window`, before capping
pub fn owed_between(stream: &Stream, last_window: u64, window: u64) -> Option<i128> {
    let windows = window.checked_sub(last_window)?;
    (windows as i128).checked_mul(stream.emission_rate)
}
