use std::time::Duration;

/// Format the one-line status readout printed below the glyph grid.
///
/// Progress is omitted entirely when the container did not report a total
/// frame count, so there is no divide-by-zero and no bogus percentage.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ap_render::format_status;
/// let line = format_status(Duration::from_secs_f64(12.34), 100, 200, 1.0);
/// assert_eq!(line, "Time: 12.3s | Progress: 50.0% | Speed: 1.0x");
/// ```
#[must_use]
pub fn format_status(elapsed: Duration, frames: u64, total_frames: u64, speed: f32) -> String {
    let secs = elapsed.as_secs_f64();
    if total_frames > 0 {
        let progress = (frames as f64 / total_frames as f64) * 100.0;
        format!("Time: {secs:.1}s | Progress: {progress:.1}% | Speed: {speed:.1}x")
    } else {
        format!("Time: {secs:.1}s | Speed: {speed:.1}x")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_shown_with_known_total() {
        let line = format_status(Duration::from_secs(5), 30, 120, 1.0);
        assert_eq!(line, "Time: 5.0s | Progress: 25.0% | Speed: 1.0x");
    }

    #[test]
    fn progress_omitted_with_unknown_total() {
        let line = format_status(Duration::from_secs(5), 30, 0, 2.0);
        assert_eq!(line, "Time: 5.0s | Speed: 2.0x");
        assert!(!line.contains("Progress"));
    }

    #[test]
    fn speed_rounds_to_one_decimal() {
        let line = format_status(Duration::ZERO, 0, 0, 1.2100001);
        assert!(line.ends_with("Speed: 1.2x"));
    }
}
