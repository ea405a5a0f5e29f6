use thiserror::Error;

use super::types::TransportError;

/// Outcome of a failed [`capture_operation`](crate::StepReporter::capture_operation).
///
/// When the wrapped operation fails, its error is always the primary one: a
/// failing failure-report is attached to it in `Both`, never substituted for it.
#[derive(Debug, Error)]
pub enum CaptureError<E> {
    /// The operation failed and its failure was reported.
    #[error("{0}")]
    Operation(E),

    /// The operation succeeded but reporting the step failed.
    #[error("Step report failed: {0}")]
    Report(#[source] TransportError),

    /// The operation failed and so did the report of that failure.
    #[error("{operation} (step report also failed: {report})")]
    Both {
        operation: E,
        #[source]
        report: TransportError,
    },
}

impl<E> CaptureError<E> {
    pub(crate) fn from_failure(operation: E, report: Result<(), TransportError>) -> Self {
        match report {
            Ok(()) => CaptureError::Operation(operation),
            Err(report) => CaptureError::Both { operation, report },
        }
    }

    /// The wrapped operation's own error, if it failed.
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            CaptureError::Operation(e) | CaptureError::Both { operation: e, .. } => Some(e),
            CaptureError::Report(_) => None,
        }
    }

    /// The reporting failure, if the report could not be delivered.
    pub fn report_error(&self) -> Option<&TransportError> {
        match self {
            CaptureError::Report(e) | CaptureError::Both { report: e, .. } => Some(e),
            CaptureError::Operation(_) => None,
        }
    }

    /// Recovers the operation's original error, dropping any reporting failure.
    /// Returns the transport error when the operation itself succeeded.
    pub fn into_operation_error(self) -> Result<E, TransportError> {
        match self {
            CaptureError::Operation(e) | CaptureError::Both { operation: e, .. } => Ok(e),
            CaptureError::Report(e) => Err(e),
        }
    }

    /// True when the wrapped operation failed, regardless of the report.
    pub fn is_operation_failure(&self) -> bool {
        self.operation_error().is_some()
    }
}
