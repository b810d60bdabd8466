use std::io::IsTerminal;
use chrono::{DateTime, TimeZone};
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::github::RateLimit;
use crate::model::{PullRequest, RequestedReview, Status};

/// Rendering options shared by every pull request in one report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Show successful and neutral builds too, not only pending/failed ones
    pub verbose: bool,
    /// Maximum number of individual build lines per pull request
    pub builds_to_show: usize,
    pub use_colors: bool,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format every pull request, separated by blank lines
pub fn format_pull_requests(prs: &[PullRequest], options: &FormatOptions) -> String {
    if prs.is_empty() {
        return "No open pull requests found.".to_string();
    }

    prs.iter()
        .map(|pr| format_pull_request(pr, options))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format a single pull request: URL, summary line, builds, then reviews
pub fn format_pull_request(pr: &PullRequest, options: &FormatOptions) -> String {
    let url = if options.use_colors {
        pr.url.underline().to_string()
    } else {
        pr.url.clone()
    };
    let mut lines = vec![url, summary_line(pr, options.use_colors)];

    let builds = build_lines(pr, options);
    if !builds.is_empty() {
        lines.push(indent(&builds));
    }

    let reviews = review_lines(pr);
    if !reviews.is_empty() {
        lines.push(indent(&reviews));
    }

    lines.join("\n")
}

fn indent(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary_line(pr: &PullRequest, use_colors: bool) -> String {
    let mut counters = Vec::new();
    if !pr.builds_are_ready() && pr.total_build_count() > 0 {
        counters.push(format!(
            "[builds {} / {}]",
            pr.ok_build_count(),
            pr.total_build_count()
        ));
    }
    if !pr.reviews_are_ready() && pr.total_review_count() > 0 {
        counters.push(format!(
            "[reviews {} / {}]",
            pr.ok_review_count(),
            pr.total_review_count()
        ));
    }

    let draft = if pr.is_draft { "[DRAFT]" } else { "" };
    let reserved = draft.len() + counters.iter().map(|c| c.len() + 1).sum::<usize>() + 1;
    let title = match get_terminal_width() {
        Some(width) if width > reserved + 10 => truncate_title(&pr.title, width - reserved),
        Some(_) => truncate_title(&pr.title, 20),
        None => pr.title.clone(),
    };

    let mut parts = Vec::new();
    if pr.is_draft {
        parts.push(if use_colors {
            draft.magenta().to_string()
        } else {
            draft.to_string()
        });
    }
    parts.push(match (use_colors, pr.is_ready_to_go()) {
        (true, true) => title.bold().green().to_string(),
        (true, false) => title.bold().to_string(),
        (false, _) => title,
    });
    parts.extend(counters);

    parts.join(" ")
}

fn build_lines(pr: &PullRequest, options: &FormatOptions) -> Vec<String> {
    let (shown, hidden): (Vec<&Status>, Vec<&Status>) = {
        let mut budget = options.builds_to_show;
        pr.statuses.iter().partition(|status| {
            let wanted = options.verbose || status.is_pending() || status.is_failed();
            if wanted && budget > 0 {
                budget -= 1;
                true
            } else {
                false
            }
        })
    };

    let mut lines: Vec<String> = shown
        .iter()
        .map(|status| format_status(status, options.use_colors))
        .collect();

    if !hidden.is_empty() {
        let tally = |predicate: fn(&Status) -> bool| hidden.iter().filter(|s| predicate(s)).count();
        let classified = [
            (tally(Status::is_pending), "pending"),
            (tally(Status::is_failed), "failed"),
            (tally(Status::is_neutral), "neutral"),
            (tally(Status::is_success), "succeeded"),
        ];
        let other = hidden.len() - classified.iter().map(|(n, _)| n).sum::<usize>();
        let counts: Vec<String> = classified
            .into_iter()
            .chain([(other, "other")])
            .filter(|(count, _)| *count > 0)
            .map(|(count, label)| format!("{} {}", count, label))
            .collect();
        lines.push(format!("[+ {} builds]", counts.join(" ")));
    }

    lines
}

/// Format one build as "<emoji> <name> [conclusion] <url>"
pub fn format_status(status: &Status, use_colors: bool) -> String {
    let mut parts = Vec::new();

    match status {
        Status::CheckRun(run) => {
            parts.push(format!("{} {} / {}", status.emoji(), run.suite_name, run.run_name));
            if status.is_completed() {
                if let Some(conclusion) = run.conclusion {
                    parts.push(format!("[{}]", conclusion.as_str()));
                }
            }
        }
        Status::Context(context) => {
            parts.push(format!("{} {}", status.emoji(), context.context));
            if status.is_completed() {
                parts.push(format!("[{}]", context.state.as_str()));
            }
        }
    }

    if status.is_failed() && !status.url().is_empty() {
        parts.push(if use_colors {
            status.url().underline().to_string()
        } else {
            status.url().to_string()
        });
    }

    parts.join(" ")
}

/// Format a team review request as "<emoji> <team>: @reviewer, ..."
pub fn format_requested_review(req: &RequestedReview) -> String {
    let prefix = format!("{} {}", req.emoji(), req.team_name);
    if req.received_reviews.is_empty() {
        prefix
    } else {
        let reviewers: Vec<String> = req
            .reviewers()
            .iter()
            .map(|reviewer| format!("@{}", reviewer))
            .collect();
        format!("{}: {}", prefix, reviewers.join(", "))
    }
}

fn review_lines(pr: &PullRequest) -> Vec<String> {
    if pr.is_draft {
        return Vec::new();
    }
    pr.requested_reviews
        .iter()
        .map(format_requested_review)
        .collect()
}

/// Header printed above each refresh in --wait mode
pub fn format_header<Tz: TimeZone>(now: &DateTime<Tz>, rate_limit: Option<RateLimit>, use_colors: bool) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let time = now.format("%I:%M:%S %P").to_string();
    let limit = format_rate_limit(rate_limit);
    if use_colors {
        format!("⌚️ {} {}", time, limit.dimmed())
    } else {
        format!("⌚️ {} {}", time, limit)
    }
}

/// Format remaining/total quota, padding "left" to the width of "total"
fn format_rate_limit(rate_limit: Option<RateLimit>) -> String {
    let RateLimit { limit, remaining } = rate_limit.unwrap_or_default();
    let total = limit.to_string();
    format!("[rate limit {:>width$}/{}]", remaining, total, width = total.len())
}
