/// Render elapsed seconds as `HH:MM:SS`.
///
/// Each field is zero-padded to two digits; hours keep growing past 99
/// rather than wrapping.
pub fn format_clock(elapsed_secs: u64) -> String {
    let hours = elapsed_secs / 3600;
    let minutes = (elapsed_secs / 60) % 60;
    let seconds = elapsed_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
