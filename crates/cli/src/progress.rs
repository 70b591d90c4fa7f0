//! Progress indicators
//!
//! Spinners for geocoding lookups and a text gauge for the cumulative
//! carbon total.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Width of the carbon gauge in cells
pub const GAUGE_WIDTH: usize = 30;

/// Create a spinner for indeterminate progress
///
/// Draws to stderr and stays hidden when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {message}"));
}

/// Finish a spinner with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✗ {message}"));
}

/// Render a fraction in `[0, 1]` as a bar of `width` cells plus a percentage,
/// e.g. `[██████░░░░░░░░░] 40.0%`. Out-of-range input is clamped.
pub fn gauge(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {:.1}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        fraction * 100.0
    )
}

/// [`gauge`] coloured by how close it is to full
pub fn colored_gauge(fraction: f64, width: usize) -> String {
    let text = gauge(fraction, width);
    if fraction >= 1.0 {
        text.red().to_string()
    } else if fraction >= 0.5 {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}
