//! Battle arithmetic: accuracy, critical hits, damage and secondary chances
//!
//! Every roll draws from the battle's [`BattleRng`](crate::rng::BattleRng) and
//! uses the same 0-255 byte scale, so thresholds are compared against a draw in
//! `[0, 256)`.

pub mod accuracy;
pub mod chance;
pub mod critical;
pub mod damage;

pub use accuracy::{does_move_hit, hit_threshold};
pub use chance::secondary_effect_occurs;
pub use critical::{crit_threshold, is_critical};
pub use damage::{Strike, calculate as calculate_damage};
