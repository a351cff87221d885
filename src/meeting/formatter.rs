//! Plain-text meeting report.

use super::summary::MeetingSummary;
use chrono::Local;

/// Layout of the `Created Time` field.
pub const CREATED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BANNER_WIDTH: usize = 66;
const FOOTER_WIDTH: usize = 70;

/// Render the report, stamping it with the local wall-clock time.
pub fn format_summary(summary: &MeetingSummary) -> String {
    let created_time = Local::now().format(CREATED_TIME_FORMAT).to_string();
    format_summary_at(summary, &created_time)
}

/// Render the report with an explicit creation time.
pub fn format_summary_at(summary: &MeetingSummary, created_time: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    let mut lines: Vec<String> = vec![
        format!("╔{}╗", rule),
        format!("{:^width$}", summary.title, width = BANNER_WIDTH),
        format!("╚{}╝", rule),
        String::new(),
        "Meeting Overview".to_string(),
        "─".repeat(21),
        format!("• Organizer    : {}", summary.organizer),
        format!("• Host Name    : {}", summary.host.user_name),
        format!("• Host Email   : {}", summary.host.user_email),
        format!("• Host User ID : {}", summary.host.user),
        String::new(),
        "Guests Attending".to_string(),
        "─".repeat(21),
    ];

    if summary.has_guests() {
        lines.extend(
            summary
                .guests
                .iter()
                .enumerate()
                .map(|(i, guest)| format!("• Guest {}: {}", i + 1, guest.email)),
        );
    } else {
        lines.push("• No guests attending".to_string());
    }

    lines.extend([
        String::new(),
        "Summary".to_string(),
        "─".repeat(13),
        format!("• Total Guests       : {}", summary.guest_count()),
        format!("• Total Participants : {}", summary.participant_count()),
        format!(
            "• Guests Present     : {}",
            if summary.has_guests() { "Yes" } else { "No" }
        ),
        format!("• Created Time       : {}", created_time),
        String::new(),
        "=".repeat(FOOTER_WIDTH),
    ]);

    lines.join("\n").trim().to_string()
}
