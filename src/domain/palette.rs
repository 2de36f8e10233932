// Default state palette, keyed by state count and comparison
use super::settings::{Comparison, StateOrder};

const GOOD: &str = "#01B8AA";
const FAIR: &str = "#8AD4EB";
const NEUTRAL: &str = "#F2C80F";
const POOR: &str = "#FE9666";
const BAD: &str = "#FD625E";

/// Ramps run from the first-matched boundary to the last
fn ramp(count: usize) -> &'static [&'static str] {
    match count {
        0 => &[],
        1 => &[GOOD],
        2 => &[GOOD, BAD],
        3 => &[GOOD, NEUTRAL, BAD],
        4 => &[GOOD, NEUTRAL, POOR, BAD],
        _ => &[GOOD, FAIR, NEUTRAL, POOR, BAD],
    }
}

/// Colors for a state list of `count` entries. Ascending lists (`<`, `<=`) reverse the
/// ramp; lists longer than the ramp repeat it.
pub fn default_colors(count: usize, comparison: Comparison) -> Vec<&'static str> {
    let mut colors: Vec<&'static str> = ramp(count).to_vec();
    if comparison.state_order() == StateOrder::Ascending {
        colors.reverse();
    }
    if colors.is_empty() {
        return colors;
    }
    (0..count).map(|i| colors[i % colors.len()]).collect()
}
