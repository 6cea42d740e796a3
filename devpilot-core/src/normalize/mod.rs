//! Status payload normalizer
//!
//! Pure functions that map one raw status payload onto the view models in
//! [`crate::domain::view`]. Field lookups go through the resolution table
//! in `fields`, so both backend naming conventions are handled in one
//! place.

mod fields;
mod resolve;

pub use resolve::{Path, Resolver};

use serde_json::{Map, Value};

use crate::domain::{
    CiStatus, FixRecord, FixStatus, JobStatus, RawStatusPayload, RunSummary, Score, StatusView,
    TimelineEntry,
};

/// Normalizes one status payload
///
/// A summary or score is `None` unless at least one of its fields resolves;
/// fields that do not resolve stay `None` and are never defaulted. Fixes
/// and timeline entries keep the backend's order.
pub fn normalize(payload: &RawStatusPayload) -> StatusView {
    let resolver = Resolver::new(payload);
    let retry_limit = resolver.integer(fields::RETRY_LIMIT);

    StatusView {
        status: JobStatus::from_payload(payload),
        summary: summary(&resolver),
        score: score(&resolver),
        fixes: resolver.array("fixes").iter().map(fix).collect(),
        timeline: resolver
            .array("timeline")
            .iter()
            .map(|item| timeline_entry(item, retry_limit))
            .collect(),
        retry_limit,
    }
}

/// The backend-supplied error message of a payload, if any
pub fn failure_message(payload: &RawStatusPayload) -> Option<String> {
    Resolver::new(payload).string(fields::ERROR)
}

fn summary(resolver: &Resolver<'_>) -> Option<RunSummary> {
    let summary = RunSummary {
        repository: resolver.string(fields::REPOSITORY),
        branch: resolver.string(fields::BRANCH),
        team_name: resolver.string(fields::TEAM_NAME),
        leader_name: resolver.string(fields::LEADER_NAME),
        total_failures: resolver.integer(fields::TOTAL_FAILURES),
        fixes_applied: resolver.integer(fields::FIXES_APPLIED),
        ci_status: resolver
            .string(fields::CI_STATUS)
            .map(|status| CiStatus::parse(&status)),
        time_taken: resolver.string(fields::TIME_TAKEN),
    };

    (!summary.is_empty()).then_some(summary)
}

fn score(resolver: &Resolver<'_>) -> Option<Score> {
    let score = Score {
        base: resolver.number(fields::BASE),
        speed_bonus: resolver.number(fields::SPEED_BONUS),
        efficiency_penalty: resolver.number(fields::EFFICIENCY_PENALTY),
        final_score: resolver.number(fields::FINAL_SCORE),
    };

    (!score.is_empty()).then_some(score)
}

fn fix(item: &Value) -> FixRecord {
    let empty = Map::new();
    let resolver = Resolver::new(item.as_object().unwrap_or(&empty));

    FixRecord {
        file: resolver.string(fields::FIX_FILE),
        bug_type: resolver.string(fields::FIX_BUG_TYPE),
        line: resolver.integer(fields::FIX_LINE),
        commit_message: resolver.string(fields::FIX_COMMIT_MESSAGE),
        status: resolver.string(fields::FIX_STATUS).map(FixStatus::from),
    }
}

fn timeline_entry(item: &Value, payload_retry_limit: Option<i64>) -> TimelineEntry {
    let empty = Map::new();
    let resolver = Resolver::new(item.as_object().unwrap_or(&empty));

    TimelineEntry {
        iteration: resolver.integer(fields::TIMELINE_ITERATION),
        ci_status: CiStatus::parse(
            &resolver
                .string(fields::TIMELINE_CI_STATUS)
                .unwrap_or_default(),
        ),
        timestamp: resolver.string(fields::TIMELINE_TIMESTAMP),
        retry_limit: resolver
            .integer(fields::RETRY_LIMIT)
            .or(payload_retry_limit),
    }
}
