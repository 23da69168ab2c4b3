use cascade_core::DeleteOutcome;
use cascade_gateway::Uploader;
use clap::Args;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Provider tag returned by a previous upload.
    pub tag: String,
}

pub async fn run(
    uploader: &Uploader,
    args: &DeleteArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let outcome = uploader.delete_by_provider_tag(&args.tag).await;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => match &outcome {
            DeleteOutcome::Success => println!("Deleted."),
            DeleteOutcome::Failure { message } => eprintln!("Delete failed: {message}"),
        },
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
