pub mod client;
pub mod capture;

pub use client::{StepReporter, CAPTURE_PATH};
pub use capture::StepCapture;
