pub mod types;
pub mod capture;

pub use types::{ReporterError, TransportError};
pub use capture::CaptureError;
