/// Progress bars for reading input files
use indicatif::{ProgressBar, ProgressStyle};

/// Byte-based progress bar for reading a file of `total` bytes.
///
/// The length is updated again once the input is opened, so `total` may be 0.
pub fn create_bytes_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {binary_bytes}/{binary_total_bytes} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━─");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// A progress bar that never draws, for quiet runs.
pub fn create_hidden_progress_bar() -> ProgressBar {
    ProgressBar::hidden()
}

/// Pick a visible or hidden bar.
pub fn input_progress_bar(enabled: bool, message: &str) -> ProgressBar {
    if enabled {
        create_bytes_progress_bar(0, message)
    } else {
        create_hidden_progress_bar()
    }
}
