//! Task entity and sorting.
//!
//! Tasks carry two 1-4 ratings (difficulty, implementation complexity) and a
//! deadline. Four orderings are supported; the `priority` ordering combines
//! an urgency tier keyed to remaining time with both ratings.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lowest accepted rating for difficulty/implementation
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating for difficulty/implementation
pub const MAX_RATING: u8 = 4;

/// A single task in the toolbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within the collection; derived from the creation timestamp (ms)
    pub id: i64,
    pub name: String,
    /// 1 (easy) to 4 (very hard)
    pub difficulty: u8,
    pub deadline: DateTime<Utc>,
    /// 1 (straightforward) to 4 (novel)
    pub implementation: u8,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Orderings for the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Soonest deadline first
    #[default]
    Deadline,
    /// Hardest first
    Difficulty,
    /// Most complex to implement first
    Implementation,
    /// Highest computed priority score first
    Priority,
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortMode::Deadline => "deadline",
            SortMode::Difficulty => "difficulty",
            SortMode::Implementation => "implementation",
            SortMode::Priority => "priority",
        };
        f.write_str(name)
    }
}

/// Validate a 1-4 rating, naming the field in the error
pub fn validate_rating(field: &str, value: u8) -> Result<u8> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(value)
    } else {
        Err(Error::InvalidArgument(format!(
            "{field} must be between {MIN_RATING} and {MAX_RATING}, got {value}"
        )))
    }
}

/// Priority score for a task at a given instant.
///
/// Urgency tier by remaining days (100 if under one day, 50 under three,
/// 25 under seven, otherwise a decaying 20-minus-days floored at zero),
/// plus difficulty*10 plus implementation*5. Overdue tasks fall in the
/// top tier.
pub fn priority_score(task: &Task, now: DateTime<Utc>) -> f64 {
    let days_left = (task.deadline - now).num_milliseconds() as f64 / 86_400_000.0;

    let mut score = if days_left < 1.0 {
        100.0
    } else if days_left < 3.0 {
        50.0
    } else if days_left < 7.0 {
        25.0
    } else {
        (20.0 - days_left).max(0.0)
    };

    score += f64::from(task.difficulty) * 10.0;
    score += f64::from(task.implementation) * 5.0;
    score
}

/// Sort tasks in place according to `mode`.
///
/// Uses a stable sort throughout, so tasks comparing equal keep their
/// insertion order.
pub fn sort_tasks(tasks: &mut [Task], mode: SortMode, now: DateTime<Utc>) {
    match mode {
        SortMode::Deadline => tasks.sort_by_key(|task| task.deadline),
        SortMode::Difficulty => tasks.sort_by(|a, b| b.difficulty.cmp(&a.difficulty)),
        SortMode::Implementation => tasks.sort_by(|a, b| b.implementation.cmp(&a.implementation)),
        SortMode::Priority => tasks.sort_by(|a, b| {
            let a_score = priority_score(a, now);
            let b_score = priority_score(b, now);
            b_score
                .partial_cmp(&a_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn task(id: i64, difficulty: u8, implementation: u8, deadline: DateTime<Utc>) -> Task {
        Task {
            id,
            name: format!("task-{id}"),
            difficulty,
            deadline,
            implementation,
            completed: false,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn urgency_tiers() {
        let base = now();
        let soon = task(1, 1, 1, base + Duration::hours(6));
        let near = task(2, 1, 1, base + Duration::days(2));
        let week = task(3, 1, 1, base + Duration::days(5));
        let far = task(4, 1, 1, base + Duration::days(10));
        let distant = task(5, 1, 1, base + Duration::days(40));

        // difficulty 1 + implementation 1 contribute a constant 15
        assert_eq!(priority_score(&soon, base), 115.0);
        assert_eq!(priority_score(&near, base), 65.0);
        assert_eq!(priority_score(&week, base), 40.0);
        assert_eq!(priority_score(&far, base), 25.0);
        // decaying tier bottoms out at zero, never negative
        assert_eq!(priority_score(&distant, base), 15.0);
    }

    #[test]
    fn overdue_lands_in_top_tier() {
        let base = now();
        let overdue = task(1, 2, 3, base - Duration::days(4));
        assert_eq!(priority_score(&overdue, base), 100.0 + 20.0 + 15.0);
    }

    #[test]
    fn ratings_weigh_in() {
        let base = now();
        let light = task(1, 1, 1, base + Duration::days(10));
        let heavy = task(2, 4, 4, base + Duration::days(10));
        assert!(priority_score(&heavy, base) > priority_score(&light, base));
        assert_eq!(
            priority_score(&heavy, base) - priority_score(&light, base),
            3.0 * 10.0 + 3.0 * 5.0
        );
    }

    #[test]
    fn deadline_sort_soonest_first() {
        let base = now();
        let mut tasks = vec![
            task(1, 1, 1, base + Duration::days(5)),
            task(2, 1, 1, base + Duration::days(1)),
            task(3, 1, 1, base + Duration::days(3)),
        ];
        sort_tasks(&mut tasks, SortMode::Deadline, base);
        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn priority_sort_is_stable_on_ties() {
        let base = now();
        // identical scores: same tier, same ratings
        let mut tasks = vec![
            task(10, 2, 2, base + Duration::days(2)),
            task(20, 2, 2, base + Duration::days(2) + Duration::hours(3)),
            task(30, 2, 2, base + Duration::days(2) + Duration::hours(6)),
        ];
        let before: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        sort_tasks(&mut tasks, SortMode::Priority, base);
        let after: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn difficulty_sort_descending() {
        let base = now();
        let mut tasks = vec![
            task(1, 2, 1, base),
            task(2, 4, 1, base),
            task(3, 1, 1, base),
        ];
        sort_tasks(&mut tasks, SortMode::Difficulty, base);
        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn rating_validation_bounds() {
        assert!(validate_rating("difficulty", 1).is_ok());
        assert!(validate_rating("difficulty", 4).is_ok());
        assert!(validate_rating("difficulty", 0).is_err());
        assert!(validate_rating("implementation", 5).is_err());
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let base = now();
        let json = serde_json::to_value(task(1, 2, 3, base)).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
