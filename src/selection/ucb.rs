//! UCB1 banner selection
//!
//! `score = clicks / shows + sqrt(2 * ln(total_shows) / shows)`
//!
//! A rotation that has never been shown scores `+inf`, so every new banner
//! is explored once before any exploitation happens. Candidates are scanned
//! in ascending banner id and only a strictly greater score replaces the
//! current best, so ties resolve to the lowest banner id whatever the input
//! order.

use uuid::Uuid;

use crate::storage::Rotation;

/// Sum of `shows` over the candidate set.
pub fn total_shows(rotations: &[Rotation]) -> u64 {
    rotations
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.shows))
}

/// UCB1 score of a single rotation. `f64::INFINITY` when it has no shows.
pub fn score(rotation: &Rotation, total_shows: u64) -> f64 {
    if rotation.shows == 0 {
        return f64::INFINITY;
    }

    let shows = rotation.shows as f64;
    // ln(0) 会产生 NaN，调用方传入不一致的 total 时按 1 处理
    let total = total_shows.max(1) as f64;

    let mean = rotation.clicks as f64 / shows;
    let exploration = (2.0 * total.ln() / shows).sqrt();
    mean + exploration
}

/// Pick the banner to show. `None` for an empty candidate set.
pub fn choose(rotations: &[Rotation], total_shows: u64) -> Option<Uuid> {
    let mut candidates: Vec<&Rotation> = rotations.iter().collect();
    candidates.sort_by_key(|r| r.banner_id);

    let mut best: Option<(Uuid, f64)> = None;
    for rotation in candidates {
        let candidate_score = score(rotation, total_shows);
        match best {
            Some((_, best_score)) if candidate_score <= best_score => {}
            _ => best = Some((rotation.banner_id, candidate_score)),
        }
    }

    best.map(|(banner_id, _)| banner_id)
}
