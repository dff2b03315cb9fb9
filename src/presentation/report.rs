// Operator-facing terminal output
use crate::application::fetch_service::FetchSummary;
use crate::application::pipeline::{ChartOutcome, SkipReason};
use crate::domain::token::TokenSet;

const RULE_WIDTH: usize = 60;

pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title}\n{rule}")
}

pub fn token_summary(tokens: &TokenSet) -> String {
    format!(
        "\u{2713} Authentication successful!\n  Access Token: {}\n  Refresh Token: {}\n  Expires in: {} seconds",
        TokenSet::preview(&tokens.access_token),
        TokenSet::preview(&tokens.refresh_token),
        tokens.expires_in,
    )
}

pub fn fetch_summary(summary: &FetchSummary) -> String {
    let mut lines = vec![
        "Summary:".to_string(),
        format!("  User: {}", summary.user_id.as_deref().unwrap_or("Unknown")),
    ];
    for (category, count) in &summary.counts {
        lines.push(format!("  {}: {} records", capitalize(category.name()), count));
    }
    lines.join("\n")
}

pub fn chart_line(outcome: &ChartOutcome) -> String {
    match outcome {
        ChartOutcome::Written {
            path,
            average,
            days,
            ..
        } => format!("  \u{2713} {} (avg: {} over {} days)", path.display(), average, days),
        ChartOutcome::Skipped {
            chart_id,
            metric,
            reason: SkipReason::MissingDocument,
        } => format!("  - {} skipped: {} not found", chart_id, metric.file_name()),
        ChartOutcome::Skipped {
            chart_id,
            metric,
            reason: SkipReason::NoRecords,
        } => format!("  - {} skipped: no scored {} records", chart_id, metric),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
