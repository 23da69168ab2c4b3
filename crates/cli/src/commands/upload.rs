use std::path::PathBuf;

use cascade_core::{UploadEvent, UploadOutcome, UploadRequest};
use cascade_gateway::Uploader;
use clap::Args;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Local file to upload.
    pub path: PathBuf,

    /// Remote file name; defaults to the file name of PATH. Decides between
    /// the image and the non-image provider chain.
    #[arg(long)]
    pub name: Option<String>,
}

impl UploadArgs {
    fn request(&self) -> UploadRequest {
        match &self.name {
            Some(name) => UploadRequest::new(&self.path, name),
            None => UploadRequest::from_path(&self.path),
        }
    }
}

pub async fn run(
    uploader: &Uploader,
    args: &UploadArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let mut task = uploader.spawn_upload(args.request());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interrupted = false;
    let mut last_percent = None;

    loop {
        tokio::select! {
            event = task.events.recv() => match event {
                Some(UploadEvent::Progress { percent }) => {
                    if last_percent != Some(percent) {
                        eprint!("\ruploading {}: {percent:>3}%", args.path.display());
                        last_percent = Some(percent);
                    }
                }
                Some(_) => {}
                None => break,
            },
            _ = &mut ctrl_c, if !interrupted => {
                interrupted = true;
                eprintln!();
                if uploader.cancel_upload(&args.path) {
                    eprintln!("cancelling upload...");
                }
            }
        }
    }
    if last_percent.is_some() {
        eprintln!();
    }

    let outcome = task.outcome().await;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => match &outcome {
            UploadOutcome::Success { url, tag } => {
                println!("url: {url}");
                println!("tag: {tag}");
            }
            UploadOutcome::Failure { message } => eprintln!("Upload failed: {message}"),
        },
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
