// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::time::Duration;

/// Configuration of an [`crate::solver::MtpSolver`].
///
/// The time limit applies to every target search separately: the clock
/// restarts whenever a new target bin count is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Wall-clock budget per target search, `None` for no limit.
    pub time_limit: Option<Duration>,
    /// The clock is read when `nodes & mask == 0`. The interrupt flag is
    /// polled at every node regardless of the mask.
    pub clock_check_mask: u64,
    /// Emit periodic `tracing` progress events from inside the search.
    pub log_progress: bool,
    /// Minimum time between two progress events.
    pub log_interval: Duration,
}

impl SolverConfig {
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(60);
    pub const DEFAULT_CLOCK_CHECK_MASK: u64 = 0x0FFF;
    pub const DEFAULT_LOG_INTERVAL: Duration = Duration::from_secs(1);

    /// Sets the per-target time limit from seconds.
    ///
    /// Negative and NaN values are treated as zero; positive infinity removes the limit.
    pub fn with_time_limit_secs(mut self, secs: f64) -> Self {
        self.time_limit = if secs.is_nan() || secs <= 0.0 {
            Some(Duration::ZERO)
        } else {
            Duration::try_from_secs_f64(secs).ok()
        };
        self
    }

    #[inline]
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit = None;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Some(Self::DEFAULT_TIME_LIMIT),
            clock_check_mask: Self::DEFAULT_CLOCK_CHECK_MASK,
            log_progress: false,
            log_interval: Self::DEFAULT_LOG_INTERVAL,
        }
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.time_limit {
            Some(limit) => write!(f, "SolverConfig(time_limit: {:.3}s per target", limit.as_secs_f64())?,
            None => write!(f, "SolverConfig(time_limit: none")?,
        }
        write!(
            f,
            ", clock_check_mask: {:#x}, log_progress: {})",
            self.clock_check_mask, self.log_progress
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.time_limit, Some(Duration::from_secs(60)));
        assert_eq!(config.clock_check_mask, 0x0FFF);
        assert!(!config.log_progress);
    }

    #[test]
    fn test_time_limit_from_seconds() {
        let config = SolverConfig::default().with_time_limit_secs(1.5);
        assert_eq!(config.time_limit, Some(Duration::from_millis(1500)));

        let zero = SolverConfig::default().with_time_limit_secs(0.0);
        assert_eq!(zero.time_limit, Some(Duration::ZERO));

        let negative = SolverConfig::default().with_time_limit_secs(-3.0);
        assert_eq!(negative.time_limit, Some(Duration::ZERO));

        let nan = SolverConfig::default().with_time_limit_secs(f64::NAN);
        assert_eq!(nan.time_limit, Some(Duration::ZERO));

        let unlimited = SolverConfig::default().with_time_limit_secs(f64::INFINITY);
        assert_eq!(unlimited.time_limit, None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SolverConfig::default().to_string(),
            "SolverConfig(time_limit: 60.000s per target, clock_check_mask: 0xfff, log_progress: false)"
        );
        assert_eq!(
            SolverConfig::default().without_time_limit().to_string(),
            "SolverConfig(time_limit: none, clock_check_mask: 0xfff, log_progress: false)"
        );
    }
}
