pub mod step;
pub mod receipt;
pub mod output;

pub use step::{StepRecord, StepStatus};
pub use receipt::CaptureReceipt;
pub use output::{OperationOutput, StepOutput};
