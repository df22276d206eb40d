//! Score derived from horizontal progress

use super::level::Pipe;

/// Number of pipes whose left edge is strictly behind `player_x`.
///
/// Pipes are sorted by x, so counting stops at the first pipe not yet passed.
pub fn current_score(player_x: f64, pipes: &[Pipe]) -> u32 {
    pipes
        .iter()
        .take_while(|p| (p.x() as f64) < player_x)
        .count() as u32
}
