//! Terminal rendering
//!
//! Panels for the run summary, score, fixes and CI timeline. A panel whose
//! data is absent is not printed at all.

use chrono::Local;
use colored::*;
use devpilot_core::domain::{
    CiStatus, FixRecord, JobHandle, JobStatus, RunRequest, RunSummary, Score, StatusView,
    TimelineEntry,
};
use devpilot_session::RunState;

/// Width of the score bar, in cells
const BAR_WIDTH: usize = 20;

pub fn print_launch(request: &RunRequest) {
    println!("{}", "Launching agent run:".bold());
    println!("  Repository: {}", request.repository_url().cyan());
    println!("  Team:       {}", request.team_name());
    println!("  Leader:     {}", request.leader_name());
    println!();
}

/// Prints one line per observable change of a followed run
#[derive(Default)]
pub struct Progress {
    announced: bool,
    polls: u32,
    poll_failures: u32,
}

impl Progress {
    pub fn observe(&mut self, state: &RunState) {
        if !self.announced {
            if let Some(job_id) = &state.job_id {
                self.announced = true;
                println!("{} Launched job {}", "▸".cyan(), job_id.cyan());
            }
        }

        if state.polls > self.polls {
            self.polls = state.polls;
            let status = state
                .job_status
                .as_ref()
                .map(colorize_job_status)
                .unwrap_or_else(|| "-".dimmed());
            let at = state
                .last_polled_at
                .map(|at| at.with_timezone(&Local).format("%H:%M:%S").to_string())
                .unwrap_or_default();
            println!("  {} poll #{} {}", at.dimmed(), self.polls, status);
        }

        if state.poll_failures > self.poll_failures {
            self.poll_failures = state.poll_failures;
            if let Some(error) = &state.transient_error {
                println!("  {} {}", "⚠".yellow(), error.yellow());
            }
        }
    }
}

/// Final rendering of a followed run
pub fn print_run(state: &RunState) {
    if let Some(error) = &state.error {
        println!("{} {}", "✗".red().bold(), error.red());
        println!();
    } else if matches!(state.job_status, Some(JobStatus::Completed)) {
        println!("{} {}", "✓".green().bold(), "Run completed".green());
        println!();
    }

    print_panels(
        state.summary.as_ref(),
        state.score.as_ref(),
        &state.fixes,
        &state.timeline,
    );
}

/// Rendering of a single status fetch
pub fn print_status(job: &JobHandle, view: &StatusView, failure: Option<&str>) {
    println!("{}", "Job Status:".bold());
    println!("  ID:     {}", job.job_id().cyan());
    println!("  Status: {}", colorize_job_status(&view.status));
    if let Some(failure) = failure {
        println!("  Error:  {}", failure.red());
    }
    println!();

    print_panels(view.summary.as_ref(), view.score.as_ref(), &view.fixes, &view.timeline);
}

fn print_panels(
    summary: Option<&RunSummary>,
    score: Option<&Score>,
    fixes: &[FixRecord],
    timeline: &[TimelineEntry],
) {
    if let Some(summary) = summary {
        print_summary(summary);
    }
    if let Some(score) = score {
        print_score(score);
    }
    if !fixes.is_empty() {
        print_fixes(fixes);
    }
    if !timeline.is_empty() {
        print_timeline(timeline);
    }
}

fn print_summary(summary: &RunSummary) {
    println!("{}", "Run Summary:".bold());
    println!("  Repository:     {}", or_dash(summary.repository.as_deref()));
    println!("  Branch:         {}", or_dash(summary.branch.as_deref()));
    println!("  Team:           {}", or_dash(summary.team_name.as_deref()));
    println!("  Leader:         {}", or_dash(summary.leader_name.as_deref()));
    println!("  Total failures: {}", or_dash(summary.total_failures));
    println!("  Fixes applied:  {}", or_dash(summary.fixes_applied));
    match &summary.ci_status {
        Some(ci) => println!("  CI status:      {}", colorize_ci_status(ci)),
        None => println!("  CI status:      -"),
    }
    println!("  Time taken:     {}", or_dash(summary.time_taken.as_deref()));
    println!();
}

fn print_score(score: &Score) {
    println!("{}", "Score:".bold());
    println!("  Base:               {}", or_dash(score.base));
    println!("  Speed bonus:        {}", or_dash(score.speed_bonus));
    println!("  Efficiency penalty: {}", or_dash(score.efficiency_penalty));
    println!(
        "  Final:              {} {}",
        score_bar(score.progress()).green(),
        or_dash(score.final_score).bold()
    );
    println!();
}

fn print_fixes(fixes: &[FixRecord]) {
    println!("{}", format!("Fixes ({}):", fixes.len()).bold());
    for fix in fixes {
        let status = if fix.is_fixed() {
            "✓ Fixed".green()
        } else {
            "✗ Failed".red()
        };
        let location = match (&fix.file, fix.line) {
            (Some(file), Some(line)) => format!("{}:{}", file, line),
            (Some(file), None) => file.clone(),
            (None, _) => "-".to_string(),
        };
        println!(
            "  {} {} [{}]",
            status,
            location.cyan(),
            or_dash(fix.bug_type.as_deref())
        );
        if let Some(message) = &fix.commit_message {
            println!("    {}", message.dimmed());
        }
    }
    println!();
}

fn print_timeline(timeline: &[TimelineEntry]) {
    println!("{}", "CI Timeline:".bold());
    for entry in timeline {
        let label = entry
            .progress_label()
            .unwrap_or_else(|| format!("#{}", or_dash(entry.iteration)));
        println!(
            "  {} {} {}",
            label,
            colorize_ci_status(&entry.ci_status),
            or_dash(entry.timestamp.as_deref()).dimmed()
        );
    }
    println!();
}

/// Renders a progress bar for a score in `0..=100`
fn score_bar(progress: f64) -> String {
    let filled = ((progress / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn colorize_job_status(status: &JobStatus) -> ColoredString {
    match status {
        JobStatus::Completed => status.as_str().green(),
        JobStatus::Failed => status.as_str().red(),
        JobStatus::InProgress(_) => status.as_str().yellow(),
    }
}

fn colorize_ci_status(status: &CiStatus) -> ColoredString {
    match status {
        CiStatus::Passed => status.as_str().green().bold(),
        CiStatus::Failed => status.as_str().red().bold(),
        CiStatus::Other(_) => status.as_str().yellow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bar_bounds() {
        assert_eq!(score_bar(0.0), "░".repeat(BAR_WIDTH));
        assert_eq!(score_bar(100.0), "█".repeat(BAR_WIDTH));
        assert_eq!(score_bar(50.0), format!("{}{}", "█".repeat(10), "░".repeat(10)));
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash::<i64>(None), "-");
        assert_eq!(or_dash(Some(3)), "3");
        assert_eq!(or_dash(Some("main")), "main");
    }
}
