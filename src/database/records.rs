use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};

use super::RecordId;

/// How many times `answer` was submitted for `target`.
/// One row per (target, answer) pair.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct AnswerStat {
    pub id: RecordId,
    pub target: String,
    pub answer: String,
    pub count: i32,
    pub updated_at: DateTime<Utc>,
}

impl AnswerStat {
    pub const INITIAL_COUNT: i32 = 1;

    pub fn new(id: RecordId, target: String, answer: String) -> Self {
        Self {
            id,
            target,
            answer,
            count: Self::INITIAL_COUNT,
            updated_at: Utc::now(),
        }
    }
}

/// One finished play session. Nothing records sessions yet.
#[allow(dead_code)]
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct Game {
    pub id: RecordId,
    pub user_id: String,
    pub mode: String,
    pub total_score: i32,
    pub created_at: DateTime<Utc>,
}

#[allow(dead_code)]
impl Game {
    pub fn new(id: RecordId, user_id: String, mode: String, total_score: i32) -> Self {
        Self {
            id,
            user_id,
            mode,
            total_score,
            created_at: Utc::now(),
        }
    }
}
