use std::thread;
use std::time::Duration;

use tracing::warn;

use super::OracleError;

/// Delay schedule applied between retries of a transient failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
}

impl RetryPolicy {
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    /// Fails on the first error.
    pub fn none() -> Self {
        Self { delays: Vec::new() }
    }

    /// Retries `retries` times without sleeping.
    pub fn immediate(retries: usize) -> Self {
        Self {
            delays: vec![Duration::ZERO; retries],
        }
    }

    pub fn max_retries(&self) -> usize {
        self.delays.len()
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }
}

impl Default for RetryPolicy {
    /// Three retries after 1s, 2s and 4s.
    fn default() -> Self {
        Self::new(vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4),
        ])
    }
}

/// Retries an operation with the delays in `policy`.
///
/// Only transient errors (HTTP 5xx, network errors, timeouts) are retried.
/// Returns the last error once the schedule is exhausted.
pub fn retry_with_backoff<F, T>(policy: &RetryPolicy, mut f: F) -> Result<T, OracleError>
where
    F: FnMut() -> Result<T, OracleError>,
{
    let mut last_error = match f() {
        Ok(result) => return Ok(result),
        Err(e) if !e.is_retryable() => return Err(e),
        Err(e) => e,
    };

    for (attempt, delay) in policy.delays().iter().enumerate() {
        warn!(
            attempt = attempt + 1,
            max = policy.max_retries(),
            error = %last_error,
            "retrying oracle call"
        );
        thread::sleep(*delay);

        match f() {
            Ok(result) => return Ok(result),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => last_error = e,
        }
    }

    Err(last_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn retry_succeeds_after_transient_error() {
        let attempts = Cell::new(0);
        let result = retry_with_backoff(&RetryPolicy::immediate(3), || {
            attempts.set(attempts.get() + 1);
            if attempts.get() < 2 {
                Err(OracleError::Http { status: 502 })
            } else {
                Ok("success")
            }
        });

        assert_eq!(result.unwrap(), "success");
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn retry_stops_after_schedule_is_exhausted() {
        let attempts = Cell::new(0);
        let result: Result<(), _> = retry_with_backoff(&RetryPolicy::immediate(3), || {
            attempts.set(attempts.get() + 1);
            Err(OracleError::Http { status: 500 })
        });

        assert!(matches!(result, Err(OracleError::Http { status: 500 })));
        // initial attempt + 3 retries
        assert_eq!(attempts.get(), 4);
    }

    #[test]
    fn client_errors_are_not_retried() {
        let attempts = Cell::new(0);
        let result: Result<(), _> = retry_with_backoff(&RetryPolicy::immediate(3), || {
            attempts.set(attempts.get() + 1);
            Err(OracleError::Http { status: 404 })
        });

        assert!(result.is_err());
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn none_policy_fails_on_first_error() {
        let attempts = Cell::new(0);
        let result: Result<(), _> = retry_with_backoff(&RetryPolicy::none(), || {
            attempts.set(attempts.get() + 1);
            Err(OracleError::Http { status: 503 })
        });

        assert!(result.is_err());
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn default_schedule_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries(), 3);
        assert_eq!(
            policy.delays(),
            [
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4)
            ]
        );
    }
}
