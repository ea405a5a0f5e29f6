use std::path::PathBuf;

use prompt_debug::{parse_config, ReporterError};

use super::commands::ValidateArgs;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), ReporterError> {
    let path = PathBuf::from(&args.config);
    let config = parse_config(&path).await?;
    println!("Configuration is valid: {} (base_url: {})", args.config, config.base_url);
    Ok(())
}
