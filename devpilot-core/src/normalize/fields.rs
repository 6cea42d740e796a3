//! Field resolution table
//!
//! The backend has shipped two naming conventions: a nested camelCase
//! object (`runSummary`, `score`) and flat snake_case keys at the top
//! level. Every canonical field lists the paths it may be read from, most
//! preferred first.

use super::resolve::Path::{self, Flat, Nested};

const RUN_SUMMARY: &str = "runSummary";
const SCORE: &str = "score";

pub const REPOSITORY: &[Path] = &[Nested(RUN_SUMMARY, "repository"), Flat("repository")];
pub const BRANCH: &[Path] = &[Nested(RUN_SUMMARY, "branch"), Flat("branch")];
pub const TEAM_NAME: &[Path] = &[Nested(RUN_SUMMARY, "teamName"), Flat("team_name")];
pub const LEADER_NAME: &[Path] = &[Nested(RUN_SUMMARY, "leaderName"), Flat("leader_name")];
pub const TOTAL_FAILURES: &[Path] = &[
    Nested(RUN_SUMMARY, "totalFailures"),
    Flat("total_failures"),
];
pub const FIXES_APPLIED: &[Path] = &[Nested(RUN_SUMMARY, "fixesApplied"), Flat("fixes_applied")];
pub const CI_STATUS: &[Path] = &[Nested(RUN_SUMMARY, "ciStatus"), Flat("ci_status")];
pub const TIME_TAKEN: &[Path] = &[
    Nested(RUN_SUMMARY, "totalTime"),
    Nested(RUN_SUMMARY, "timeTaken"),
    Flat("total_time"),
    Flat("time_taken"),
];

pub const BASE: &[Path] = &[Nested(SCORE, "base"), Flat("base")];
pub const SPEED_BONUS: &[Path] = &[
    Nested(SCORE, "speedBonus"),
    Nested(SCORE, "speed_bonus"),
    Flat("speed_bonus"),
];
pub const EFFICIENCY_PENALTY: &[Path] = &[
    Nested(SCORE, "penalty"),
    Nested(SCORE, "efficiencyPenalty"),
    Nested(SCORE, "efficiency_penalty"),
    Flat("efficiency_penalty"),
];
pub const FINAL_SCORE: &[Path] = &[
    Nested(SCORE, "finalScore"),
    Nested(SCORE, "final_score"),
    Flat("final_score"),
];

/// Used both at payload level and on each timeline element
pub const RETRY_LIMIT: &[Path] = &[Flat("retryLimit"), Flat("retry_limit")];

pub const FIX_FILE: &[Path] = &[Flat("file")];
pub const FIX_BUG_TYPE: &[Path] = &[Flat("bug_type"), Flat("bugType")];
pub const FIX_LINE: &[Path] = &[Flat("line")];
pub const FIX_COMMIT_MESSAGE: &[Path] = &[Flat("commit_message"), Flat("commitMessage")];
pub const FIX_STATUS: &[Path] = &[Flat("status")];

pub const TIMELINE_ITERATION: &[Path] = &[Flat("iteration")];
pub const TIMELINE_CI_STATUS: &[Path] = &[Flat("ci_status"), Flat("status")];
pub const TIMELINE_TIMESTAMP: &[Path] = &[Flat("timestamp")];

pub const ERROR: &[Path] = &[Flat("error")];
