//! Placeholder answer judge.
//!
//! Every non-empty guess is accepted and scored with random numbers until a
//! real word graph exists to check guesses against.

use std::ops::Range;

use rand::Rng;

pub const EMPTY_REASON: &str = "empty";
pub const TEST_RULE_REASON: &str = "طبق قاعده تستی";
pub const NEXT_TARGET_ID: &str = "آتش";

pub const STEP_SCORE_RANGE: Range<u32> = 100..200;
pub const RARITY_PCT_RANGE: Range<f64> = 0.0..5.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    Rejected {
        reason: &'static str,
    },
    Accepted {
        canonical: String,
        reason: &'static str,
        step_score: u32,
        rarity_pct: f64,
        next_target_id: &'static str,
    },
}

pub fn judge<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Verdict {
    if text.is_empty() {
        return Verdict::Rejected {
            reason: EMPTY_REASON,
        };
    }

    Verdict::Accepted {
        canonical: text.to_owned(),
        reason: TEST_RULE_REASON,
        step_score: rng.gen_range(STEP_SCORE_RANGE),
        rarity_pct: rng.gen_range(RARITY_PCT_RANGE),
        next_target_id: NEXT_TARGET_ID,
    }
}
