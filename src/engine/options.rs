//! UCI-visible options: `Hash`, `Threads` (fixed at 1, no SMP search),
//! and `Move Overhead`. `setoption` updates an `UciOptions` value held by
//! the engine wrapper; applying a `Hash` change reallocates the
//! transposition table.

use std::time::Duration;

/// Lower/upper bounds advertised in the `option` lines and enforced on
/// `setoption`.
const MIN_HASH_MB: usize = 1;
const MAX_HASH_MB: usize = 33_554_432;
const DEFAULT_HASH_MB: usize = 16;
const DEFAULT_MOVE_OVERHEAD_MS: u64 = 10;
const MAX_MOVE_OVERHEAD_MS: u64 = 5000;

#[derive(Clone, Copy, Debug)]
pub struct UciOptions {
    pub hash_mb: usize,
    /// Accepted and validated, but the search itself is single-threaded;
    /// multi-threaded (SMP) search is out of scope.
    pub threads: usize,
    pub move_overhead: Duration,
}

impl Default for UciOptions {
    fn default() -> Self {
        UciOptions {
            hash_mb: DEFAULT_HASH_MB,
            threads: 1,
            move_overhead: Duration::from_millis(DEFAULT_MOVE_OVERHEAD_MS),
        }
    }
}

/// What changed as a result of a `setoption`, so the caller knows whether
/// to reallocate the transposition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionChange {
    None,
    HashResized,
}

impl UciOptions {
    /// Print the `option` lines this engine advertises, in response to
    /// the `uci` command.
    pub fn print_options(&self) {
        println!("option name Hash type spin default {DEFAULT_HASH_MB} min {MIN_HASH_MB} max {MAX_HASH_MB}");
        println!("option name Threads type spin default 1 min 1 max 1");
        println!(
            "option name Move Overhead type spin default {DEFAULT_MOVE_OVERHEAD_MS} min 0 max {MAX_MOVE_OVERHEAD_MS}"
        );
    }

    /// Apply a `setoption name <id> [value <v>]`. Unknown option names are
    /// silently ignored; malformed input is dropped and state is left
    /// unchanged.
    pub fn apply(&mut self, name: &str, value: Option<&str>) -> OptionChange {
        match name.trim().to_ascii_lowercase().as_str() {
            "hash" => {
                let Some(mb) = value.and_then(|v| v.parse::<usize>().ok()) else {
                    return OptionChange::None;
                };
                let mb = mb.clamp(MIN_HASH_MB, MAX_HASH_MB);
                if mb != self.hash_mb {
                    self.hash_mb = mb;
                    return OptionChange::HashResized;
                }
            }
            "threads" => {
                // Fixed at 1; the value is accepted (never rejected as a
                // protocol error) but has no effect.
                let _ = value.and_then(|v| v.parse::<usize>().ok());
            }
            "move overhead" => {
                if let Some(ms) = value.and_then(|v| v.parse::<u64>().ok()) {
                    self.move_overhead = Duration::from_millis(ms.min(MAX_MOVE_OVERHEAD_MS));
                }
            }
            _ => {}
        }
        OptionChange::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_resize_is_reported_and_clamped() {
        let mut opts = UciOptions::default();
        assert_eq!(opts.apply("Hash", Some("64")), OptionChange::HashResized);
        assert_eq!(opts.hash_mb, 64);
        assert_eq!(opts.apply("Hash", Some("999999999999")), OptionChange::HashResized);
        assert_eq!(opts.hash_mb, MAX_HASH_MB);
    }

    #[test]
    fn unknown_option_is_ignored() {
        let mut opts = UciOptions::default();
        let before = opts.hash_mb;
        assert_eq!(opts.apply("Ponder", Some("true")), OptionChange::None);
        assert_eq!(opts.hash_mb, before);
    }

    #[test]
    fn move_overhead_is_settable() {
        let mut opts = UciOptions::default();
        opts.apply("Move Overhead", Some("200"));
        assert_eq!(opts.move_overhead, Duration::from_millis(200));
    }
}
