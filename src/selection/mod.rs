pub mod ucb;

pub use ucb::{choose, score, total_shows};
