//! Client for the Prompt Debug collection service.
//!
//! A [`StepReporter`] sends one [`StepRecord`] per call to
//! `{base_url}/api/capture/step`. [`StepReporter::capture_operation`] wraps a
//! model call, times it, and reports the step whether the call succeeds or
//! fails.
//!
//! ```no_run
//! use prompt_debug::{OperationOutput, StepRecord, StepReporter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reporter = StepReporter::new("http://localhost:3001");
//!
//! let receipt = reporter
//!     .report(
//!         &StepRecord::new("MyAgent", "Summarize", "Summarize this document")
//!             .with_output("A short summary.")
//!             .with_tokens(120, 18),
//!     )
//!     .await?;
//! println!("run {:?}", receipt.run_id());
//!
//! let output = reporter
//!     .capture_operation("MyAgent", "Translate", "Translate to French", None, || async {
//!         Ok::<_, std::io::Error>(OperationOutput::new("Bonjour").with_tokens(7, 2))
//!     })
//!     .await?;
//! assert_eq!(output.content, "Bonjour");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod models;
pub mod reporter;

pub use config::{parse_config, ReporterConfig, DEFAULT_BASE_URL};
pub use errors::{CaptureError, ReporterError, TransportError};
pub use models::{CaptureReceipt, OperationOutput, StepOutput, StepRecord, StepStatus};
pub use reporter::{StepCapture, StepReporter, CAPTURE_PATH};
