//! Line-oriented console output helpers for the demo driver.

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Print the main header.
///
/// ```text
/// GUFORAG CHAT API DEMO
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
    println!();
}

/// Print the start of a numbered demo step.
///
/// ```text
/// 1. CHAT (STREAMED RESPONSE)
/// ────────────────────────────────────────────────────────────
/// ```
pub fn print_step(step: u8, title: &str) {
    println!();
    println!("{}. {}", step, title);
    println!("{}", "─".repeat(LINE_WIDTH));
}

/// Print a success line.
pub fn status_ok(message: &str) {
    println!("✓ {}", message);
}

/// Print a failure line.
pub fn status_err(message: &str) {
    println!("✗ {}", message);
}
