use crate::errors::*;

use std::thread;
use std::time::Duration;

/// Bounded retry with a fixed pause between attempts.
///
/// The policy itself never decides whether running out of attempts is fatal; login turns the
/// final error into an authentication failure while the per-date fetch turns it into a warning.
#[derive(Debug, Clone, Copy, PartialEq, new)]
pub struct RetryPolicy
{
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy
{
    /// Runs `step` until it succeeds or `attempts` runs out. `step` receives the 1-based attempt
    /// number. Returns the last error when every attempt failed.
    pub fn run<T, F>(&self, label: &str, step: F) -> Result<T>
        where F: FnMut(u32) -> Result<T>
    {
        self.run_unless(label, |_| false, step)
    }

    /// Same as `run` but stops early when `is_fatal` says the error cannot be fixed by trying
    /// again.
    pub fn run_unless<T, F, P>(&self, label: &str, is_fatal: P, mut step: F) -> Result<T>
        where F: FnMut(u32) -> Result<T>, P: Fn(&Error) -> bool
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;

        loop
        {
            match step(attempt)
            {
                Ok(value) =>
                {
                    if attempt > 1
                    {
                        debug!("{} succeeded on attempt {} of {}", label, attempt, attempts);
                    }
                    return Ok(value);
                },
                Err(error) =>
                {
                    if is_fatal(&error)
                    {
                        warn!("{} gave up on attempt {} of {}: {}", label, attempt, attempts, error);
                        return Err(error);
                    }

                    if attempt >= attempts
                    {
                        warn!("{} failed on final attempt {} of {}: {}", label, attempt, attempts, error);
                        return Err(error);
                    }

                    warn!("{} failed on attempt {} of {}: {}. Retrying in {:?}", label, attempt, attempts, error, self.delay);
                    if self.delay > Duration::from_secs(0)
                    {
                        thread::sleep(self.delay);
                    }
                    attempt = attempt + 1;
                },
            }
        }
    }
}
