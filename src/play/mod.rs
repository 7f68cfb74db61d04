use log::debug;
use rocket::post;
use rocket::serde::{
    json::{serde_json::Value, Json},
    Deserialize, Serialize,
};

pub mod judge;

use judge::Verdict;

/// Body of a guess. Fields are taken as whatever json the client sent.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase", default)]
pub struct AnswerRequest {
    pub target_id: Option<Value>,
    pub target: Option<Value>,
    pub text: Option<Value>,
    pub time_sec: Option<Value>,
}

impl AnswerRequest {
    /// The guessed text. Anything but a json string counts as empty.
    pub fn guess(&self) -> &str {
        match &self.text {
            Some(Value::String(text)) => text,
            _ => "",
        }
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct AnswerResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_target_id: Option<String>,
}

impl From<Verdict> for AnswerResponse {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Rejected { reason } => Self {
                valid: false,
                canonical: None,
                reason: Some(reason.to_owned()),
                step_score: None,
                rarity_pct: None,
                next_target_id: None,
            },
            Verdict::Accepted {
                canonical,
                reason,
                step_score,
                rarity_pct,
                next_target_id,
            } => Self {
                valid: true,
                canonical: Some(canonical),
                reason: Some(reason.to_owned()),
                step_score: Some(step_score),
                rarity_pct: Some(rarity_pct),
                next_target_id: Some(next_target_id.to_owned()),
            },
        }
    }
}

/// Judges a single guess. Only an empty guess is rejected.
#[post("/play/answer", data = "<request>")]
pub fn answer(request: Json<AnswerRequest>) -> Json<AnswerResponse> {
    let request = request.into_inner();
    debug!(
        "answer for target {:?} ({:?}) after {:?}s",
        request.target_id, request.target, request.time_sec
    );

    let verdict = judge::judge(request.guess(), &mut rand::thread_rng());
    Json(verdict.into())
}
