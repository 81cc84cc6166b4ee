//! Composite "smart score" for ranking players.
//!
//! A deterministic weighted sum of five signals, each brought onto a rough
//! 0-100 scale, plus a discrete bonus for high-quality players returning
//! from an absence:
//!
//! | Signal                      | Scaling                           | Weight |
//! |-----------------------------|-----------------------------------|--------|
//! | Predicted points, next event| ×10                               | 0.30   |
//! | Draft desirability score    | as is                             | 0.25   |
//! | Form                        | ×10                               | 0.15   |
//! | Transfer momentum           | `clamp(2·(in − out) + 50, 0, 100)`| 0.20   |
//! | Ownership                   | `min(2·percent, 100)`             | 0.10   |
//!
//! Missing inputs count as zero.

use super::player::Player;

const PREDICTED_WEIGHT: f64 = 0.30;
const DRAFT_SCORE_WEIGHT: f64 = 0.25;
const FORM_WEIGHT: f64 = 0.15;
const MOMENTUM_WEIGHT: f64 = 0.20;
const OWNERSHIP_WEIGHT: f64 = 0.10;

/// Comeback tiers: (max minutes, min ownership %, min draft score, bonus).
/// Checked in order; the first match wins. Bounds are strict.
const COMEBACK_TIERS: [(i64, f64, f64, f64); 2] = [(270, 30.0, 70.0, 20.0), (180, 20.0, 60.0, 10.0)];

/// Transfer momentum on a 0-100 scale; 50 means balanced transfers.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn transfer_momentum(balance: i64) -> f64 {
    (balance as f64).mul_add(2.0, 50.0).clamp(0.0, 100.0)
}

/// Ownership on a 0-100 scale.
#[must_use]
pub fn ownership_score(percent: f64) -> f64 {
    (percent * 2.0).min(100.0)
}

/// Bonus for players with few recent minutes but strong standing.
#[must_use]
pub fn comeback_bonus(minutes: i64, ownership_percent: f64, draft_score: f64) -> f64 {
    COMEBACK_TIERS
        .iter()
        .find(|(max_minutes, min_ownership, min_draft, _)| {
            minutes < *max_minutes && ownership_percent > *min_ownership && draft_score > *min_draft
        })
        .map_or(0.0, |(.., bonus)| *bonus)
}

/// Compute the smart score of a player.
///
/// Pure: identical inputs always give identical output.
#[must_use]
pub fn smart_score(player: &Player) -> f64 {
    let predicted = player.predicted() * 10.0;
    let draft_score = player.draft_score.unwrap_or(0.0);
    let form = player.form.unwrap_or(0.0) * 10.0;
    let momentum = transfer_momentum(player.transfer_balance());
    let ownership = ownership_score(player.ownership_percent());
    let bonus = comeback_bonus(player.minutes(), player.ownership_percent(), draft_score);

    predicted * PREDICTED_WEIGHT
        + draft_score * DRAFT_SCORE_WEIGHT
        + form * FORM_WEIGHT
        + momentum * MOMENTUM_WEIGHT
        + ownership * OWNERSHIP_WEIGHT
        + bonus
}
