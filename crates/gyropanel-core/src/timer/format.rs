/// `HH:MM:SS`, zero padded. Hours are not wrapped at 24.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// `MM:SS.CC` from centiseconds. Minutes are not wrapped at 60.
pub fn format_centis(elapsed_cs: u64) -> String {
    let minutes = elapsed_cs / 6000;
    let seconds = (elapsed_cs / 100) % 60;
    let centis = elapsed_cs % 100;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}
