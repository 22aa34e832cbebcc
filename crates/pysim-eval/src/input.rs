//! Simulated standard input.
//!
//! `input()` never blocks: it draws the next value from an injected
//! [`InputSource`]. The default source cycles a small fixed pool, so
//! the same snippet always reads the same sequence of answers.

/// Construction-time capability supplying answers to `input()` calls.
pub trait InputSource {
    /// The next simulated line of input.
    fn next_input(&mut self) -> String;

    /// Restart the sequence from the beginning.
    fn rewind(&mut self);
}

/// Sample answers matching the kinds of prompts the exercises use.
const DEFAULT_SAMPLES: &[&str] = &["usuario", "25", "Python", "Hola mundo", "42", "3.14"];

/// The default input source: a fixed pool, cycled deterministically.
#[derive(Debug, Clone)]
pub struct SamplePool {
    samples: Vec<String>,
    cursor: usize,
}

impl SamplePool {
    pub fn new() -> Self {
        Self::with_samples(DEFAULT_SAMPLES.iter().map(|s| s.to_string()).collect())
    }

    /// A pool over caller-chosen answers. Tests use this to script
    /// exact `input()` sequences.
    pub fn with_samples(samples: Vec<String>) -> Self {
        Self { samples, cursor: 0 }
    }
}

impl Default for SamplePool {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for SamplePool {
    fn next_input(&mut self) -> String {
        if self.samples.is_empty() {
            return String::new();
        }
        let value = self.samples[self.cursor % self.samples.len()].clone();
        self.cursor += 1;
        value
    }

    fn rewind(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_cycles_in_order() {
        let mut pool = SamplePool::with_samples(vec!["a".into(), "b".into()]);
        assert_eq!(pool.next_input(), "a");
        assert_eq!(pool.next_input(), "b");
        assert_eq!(pool.next_input(), "a");
    }

    #[test]
    fn test_rewind_restarts_sequence() {
        let mut pool = SamplePool::new();
        let first = pool.next_input();
        pool.next_input();
        pool.rewind();
        assert_eq!(pool.next_input(), first);
    }

    #[test]
    fn test_empty_pool_yields_empty_lines() {
        let mut pool = SamplePool::with_samples(vec![]);
        assert_eq!(pool.next_input(), "");
    }
}
