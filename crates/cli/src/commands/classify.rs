use cascade_core::{FileCategory, ProviderId};
use cascade_gateway::Uploader;
use clap::Args;
use serde_json::json;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// File name to classify.
    pub name: String,
}

/// Print the category of `args.name` and the providers it would be offered
/// to. With an `uploader`, only its configured providers are listed.
pub fn run(
    uploader: Option<&Uploader>,
    args: &ClassifyArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let category = FileCategory::from_file_name(&args.name);
    let chain = match uploader {
        Some(uploader) => uploader.chain(category),
        None => ProviderId::chain_for(category).to_vec(),
    };
    match format {
        OutputFormat::Json => {
            let value = json!({
                "name": args.name,
                "category": category,
                "chain": chain,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => println!("{}", describe(&args.name, category, &chain)),
    }
    Ok(())
}

fn describe(name: &str, category: FileCategory, chain: &[ProviderId]) -> String {
    let chain: Vec<&str> = chain.iter().map(|id| id.as_str()).collect();
    format!("{name}: {category} ({})", chain.join(" -> "))
}

#[cfg(test)]
mod tests {
    use cascade_cloudinary::CloudinaryConfig;
    use cascade_gateway::{SignedStorageConfig, UploaderConfig};

    use super::*;

    #[test]
    fn describe_image_chain() {
        let category = FileCategory::from_file_name("photo.JPG");
        assert_eq!(
            describe("photo.JPG", category, ProviderId::chain_for(category)),
            "photo.JPG: image (imgbb -> postimages -> imghippo)"
        );
    }

    #[test]
    fn describe_other_chain() {
        let category = FileCategory::from_file_name("report.docx");
        assert_eq!(
            describe("report.docx", category, ProviderId::chain_for(category)),
            "report.docx: other (cloudinary -> r2)"
        );
    }

    #[test]
    fn pdf_goes_to_image_hosts() {
        assert_eq!(FileCategory::from_file_name("report.pdf"), FileCategory::Image);
    }

    #[test]
    fn configured_chain_leaves_out_disabled_storage() {
        let config = UploaderConfig::default()
            .with_cloudinary(CloudinaryConfig::new("demo", "key", "secret"))
            .with_signed_storage(SignedStorageConfig::new(
                "https://acct.r2.cloudflarestorage.com",
                "media",
                "",
                "",
                "uploads/",
            ));
        let uploader = Uploader::new(config).unwrap();
        let category = FileCategory::from_file_name("clip.mp4");

        assert_eq!(
            describe("clip.mp4", category, &uploader.chain(category)),
            "clip.mp4: other (cloudinary)"
        );
    }
}
