//! Run-level log formatting helpers on top of the `log` facade.

/// Log a boxed header.
pub fn header(title: &str) {
    let border = "═".repeat(60);
    log::info!("{border}");
    log::info!("  {title}");
    log::info!("{border}");
}

/// Log a step in a process.
pub fn step(step_num: usize, total: usize, message: &str) {
    log::info!("[STEP {step_num}/{total}] {message}");
}

/// Log a separator line
pub fn separator() {
    log::info!("{}", "─".repeat(60));
}

/// Log a sub-item (indented)
pub fn sub_item(message: &str) {
    log::info!("    {message}");
}

/// Log a `label: value` summary block.
pub fn summary(title: &str, rows: &[(&str, String)]) {
    separator();
    log::info!("{title}");
    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (label, value) in rows {
        sub_item(&format!("{label:<width$}  {value}"));
    }
    separator();
}
