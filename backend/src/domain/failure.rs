//! Failure taxonomy and the service result pipeline.
//!
//! Every domain operation returns a [`ServiceResult`]: `Ok(value)` when the
//! operation succeeded and `Err(Failure)` when it did not. The two variants are
//! exhaustive and mutually exclusive, so callers inspect the outcome with
//! `match`, `is_ok()`, or the `ok()` / `err()` projections. Projecting the
//! wrong side yields `None`; it never panics.
//!
//! Domain services build their results in a fixed order:
//!
//! 1. [`require_identifier`] rejects empty identifying input before any
//!    storage access.
//! 2. [`storage_boundary`] converts collaborator errors into
//!    [`Failure::Database`] after logging the original error locally.
//! 3. [`require_found`] turns an absent singleton lookup into
//!    [`Failure::NotFound`].
//!
//! ```
//! use backend::domain::{Failure, ServiceResult};
//!
//! let outcome: ServiceResult<Vec<u8>> = Ok(Vec::new());
//! assert!(outcome.is_ok());
//!
//! let failed: ServiceResult<Vec<u8>> = Err(Failure::not_found("User", "0xABC"));
//! assert_eq!(failed.clone().ok(), None);
//! assert_eq!(failed.err(), Some(Failure::not_found("User", "0xABC")));
//! ```

use tracing::error;

use super::macros::define_error_enum;

define_error_enum! {
    /// Typed reason a domain operation did not produce a payload.
    pub enum Failure {
        /// Caller input failed a precondition before storage was touched.
        Validation { subject: String, invalid_value: String } =>
            "invalid {subject} input: '{invalid_value}'",
        /// A lookup by key found no matching record.
        NotFound { subject: String, key: String } => "{subject} '{key}' not found",
        /// The persistence collaborator failed; `message` is safe to show.
        Database { message: String } => "{message}",
    }
}

/// Outcome of a domain operation.
pub type ServiceResult<T> = Result<T, Failure>;

/// Reject empty or whitespace-only identifying input.
///
/// The failure echoes the raw value back so callers can see what was sent.
///
/// ```
/// use backend::domain::{Failure, require_identifier};
///
/// assert_eq!(require_identifier("User", "0xABC"), Ok("0xABC"));
/// assert_eq!(
///     require_identifier("User", ""),
///     Err(Failure::validation("User", "")),
/// );
/// ```
pub fn require_identifier<'a>(subject: &str, value: &'a str) -> ServiceResult<&'a str> {
    if value.trim().is_empty() {
        return Err(Failure::validation(subject, value));
    }
    Ok(value)
}

/// Convert a storage outcome into a service outcome.
///
/// Errors raised by the collaborator are logged with their full detail under
/// `operation` and replaced by [`Failure::Database`] carrying only
/// `public_message`.
pub fn storage_boundary<T, E>(
    outcome: Result<T, E>,
    operation: &'static str,
    public_message: &'static str,
) -> ServiceResult<T>
where
    E: std::error::Error,
{
    outcome.map_err(|source| {
        error!(error = %source, operation, "storage operation failed");
        Failure::database(public_message)
    })
}

/// Turn an absent singleton lookup into [`Failure::NotFound`].
pub fn require_found<T>(record: Option<T>, subject: &str, key: &str) -> ServiceResult<T> {
    record.ok_or_else(|| Failure::not_found(subject, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            let buffer = self.0.lock().expect("log buffer lock");
            String::from_utf8_lossy(&buffer).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_identifiers_fail_validation(#[case] value: &str) {
        let outcome = require_identifier("User", value);
        assert_eq!(outcome, Err(Failure::validation("User", value)));
    }

    #[rstest]
    fn failures_render_their_context() {
        assert_eq!(
            Failure::validation("User", "").to_string(),
            "invalid User input: ''"
        );
        assert_eq!(
            Failure::not_found("User", "0xABC").to_string(),
            "User '0xABC' not found"
        );
        assert_eq!(
            Failure::database("Failed to update user.").to_string(),
            "Failed to update user."
        );
    }

    #[rstest]
    fn missing_records_become_not_found() {
        let outcome = require_found(None::<u8>, "User", "0xABC");
        assert_eq!(outcome, Err(Failure::not_found("User", "0xABC")));
        assert_eq!(require_found(Some(7_u8), "User", "0xABC"), Ok(7));
    }

    #[rstest]
    fn storage_errors_are_logged_but_not_exposed() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        let outcome = tracing::subscriber::with_default(subscriber, || {
            storage_boundary::<(), _>(
                Err(io::Error::other("relation \"users\" is locked")),
                "update_user",
                "Failed to update user.",
            )
        });

        let failure = outcome.expect_err("storage error must fail");
        assert_eq!(failure, Failure::database("Failed to update user."));
        assert!(!failure.to_string().contains("locked"));

        let captured = logs.contents();
        assert!(captured.contains("relation \"users\" is locked"));
        assert!(captured.contains("update_user"));
    }

    #[rstest]
    fn successful_storage_outcomes_pass_through() {
        let outcome = storage_boundary::<_, io::Error>(Ok(vec![1, 2]), "search", "Failed.");
        assert_eq!(outcome, Ok(vec![1, 2]));
    }
}
