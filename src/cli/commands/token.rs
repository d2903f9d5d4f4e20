use serde_json::json;

use crate::auth::SecretTokenVerifier;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(config: &AppConfig, sub: &str, hours: i64, output_format: OutputFormat) -> anyhow::Result<()> {
    let secret = config
        .oauth
        .dev_secret
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("OAUTH_DEV_SECRET must be set to mint development tokens"))?;

    let token = SecretTokenVerifier::new(secret)?.issue_token(sub, hours)?;

    match output_format {
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
        OutputFormat::Json => output_success(
            &output_format,
            "Issued development token",
            Some(json!({ "sub": sub, "expires_in_hours": hours, "token": token })),
        ),
    }
}
