use prompt_debug::{ReporterError, StepRecord, StepReporter};
use serde_json::{Map, Value};
use tracing::info;

use super::commands::CaptureArgs;

pub async fn handle_capture(reporter: &StepReporter, args: CaptureArgs) -> Result<(), ReporterError> {
    let record = build_record(args)?;
    let receipt = reporter.report(&record).await?;
    info!(
        agent = %record.agent_name,
        step = %record.step_name,
        status = %record.status,
        "Step captured"
    );
    println!("{}", serde_json::to_string_pretty(receipt.as_value())?);
    Ok(())
}

fn build_record(args: CaptureArgs) -> Result<StepRecord, ReporterError> {
    let mut record = StepRecord::new(args.agent, args.step, args.prompt)
        .with_tokens(args.prompt_tokens, args.completion_tokens)
        .with_latency_ms(args.latency_ms)
        .with_cost(args.cost);

    record.output = args.output;
    for (key, value) in args.inputs {
        record = record.with_input_var(key, value);
    }
    if let Some(raw) = args.metadata {
        record = record.with_metadata(parse_metadata(&raw)?);
    }
    if let Some(message) = args.error {
        record = record.failed(message);
    }
    Ok(record)
}

fn parse_metadata(raw: &str) -> Result<Map<String, Value>, ReporterError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(ReporterError::Config(format!(
            "--metadata must be a JSON object, got {}",
            other
        ))),
    }
}
