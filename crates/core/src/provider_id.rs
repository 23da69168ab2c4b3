use serde::{Deserialize, Serialize};

use crate::FileCategory;

/// Identifier of a hosting provider.
///
/// The string form doubles as the discriminator prefix of a
/// [`ProviderTag`](crate::ProviderTag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// `ImgBB` image host.
    ImgBb,
    /// `Postimages` image host.
    PostImages,
    /// `ImgHippo` image host.
    ImgHippo,
    /// Cloudinary media host; primary provider for non-image files.
    Cloudinary,
    /// S3-compatible signed storage (Cloudflare R2).
    R2,
}

impl ProviderId {
    /// All providers, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::ImgBb,
        Self::PostImages,
        Self::ImgHippo,
        Self::Cloudinary,
        Self::R2,
    ];

    /// Returns the provider name used in tags, logs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ImgBb => "imgbb",
            Self::PostImages => "postimages",
            Self::ImgHippo => "imghippo",
            Self::Cloudinary => "cloudinary",
            Self::R2 => "r2",
        }
    }

    /// Looks up a provider by its tag discriminator.
    pub fn from_discriminator(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }

    /// Whether the provider's API can delete an upload.
    pub fn has_delete_api(self) -> bool {
        matches!(self, Self::Cloudinary | Self::R2)
    }

    /// The full provider order for a category, before configuration is taken
    /// into account.
    ///
    /// Signed storage only joins the `Other` chain when it is configured; the
    /// gateway filters it out otherwise.
    pub fn chain_for(category: FileCategory) -> &'static [Self] {
        match category {
            FileCategory::Image => &[Self::ImgBb, Self::PostImages, Self::ImgHippo],
            FileCategory::Other => &[Self::Cloudinary, Self::R2],
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
