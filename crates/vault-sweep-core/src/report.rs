use chrono::Local;

use crate::vault::VaultFile;

/// Render the fixed tabular report: a header with generation timestamp and
/// total count, then one `| Filename | Path |` row per candidate.
pub fn render_report(candidates: &[VaultFile]) -> String {
    let mut report = String::from("# Unused Attachments Report\n\n");
    report.push_str(&format!(
        "Generated: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    report.push_str(&format!("Total: {}\n\n", candidates.len()));
    report.push_str("| Filename | Path |\n|---|---|\n");
    for file in candidates {
        report.push_str(&format!("| {} | {} |\n", file.name, file.path));
    }
    report
}
