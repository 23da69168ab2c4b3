use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::ProviderId;

/// Resource type recorded for objects in signed storage, and assumed for
/// hosted-service tags that do not carry one.
pub const RAW_RESOURCE_TYPE: &str = "raw";

const SEPARATOR: char = '|';

/// Errors that can occur while parsing a [`ProviderTag`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagParseError {
    /// The tag is empty or whitespace.
    #[error("provider tag is empty")]
    Empty,

    /// The tag names a provider but lacks the identifier needed to delete.
    #[error("provider tag for {0} has no identifier")]
    MissingIdentifier(ProviderId),
}

/// Record of where an upload ended up.
///
/// The string form is `<discriminator>|<payload>` and is the only state the
/// caller needs to keep in order to delete the upload later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderTag {
    /// `imgbb|<url>`
    ImgBb { url: String },
    /// `postimages|<url>`
    PostImages { url: String },
    /// `imghippo|<url>`
    ImgHippo { url: String },
    /// `cloudinary|<public_id>|<resource_type>`
    Cloudinary {
        public_id: String,
        resource_type: String,
    },
    /// `r2|<object_key>|raw`
    R2 { object_key: String },
}

impl ProviderTag {
    /// The provider that produced this tag.
    pub fn provider(&self) -> ProviderId {
        match self {
            Self::ImgBb { .. } => ProviderId::ImgBb,
            Self::PostImages { .. } => ProviderId::PostImages,
            Self::ImgHippo { .. } => ProviderId::ImgHippo,
            Self::Cloudinary { .. } => ProviderId::Cloudinary,
            Self::R2 { .. } => ProviderId::R2,
        }
    }

    /// Parse a hosted-service payload `<public_id>[|<resource_type>]`.
    fn cloudinary(payload: &str) -> Result<Self, TagParseError> {
        let (public_id, resource_type) = payload
            .split_once(SEPARATOR)
            .unwrap_or((payload, RAW_RESOURCE_TYPE));
        if public_id.is_empty() {
            return Err(TagParseError::MissingIdentifier(ProviderId::Cloudinary));
        }
        let resource_type = if resource_type.is_empty() {
            RAW_RESOURCE_TYPE
        } else {
            resource_type
        };
        Ok(Self::Cloudinary {
            public_id: public_id.to_owned(),
            resource_type: resource_type.to_owned(),
        })
    }
}

impl fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.provider();
        match self {
            Self::ImgBb { url } | Self::PostImages { url } | Self::ImgHippo { url } => {
                write!(f, "{prefix}{SEPARATOR}{url}")
            }
            Self::Cloudinary {
                public_id,
                resource_type,
            } => write!(f, "{prefix}{SEPARATOR}{public_id}{SEPARATOR}{resource_type}"),
            Self::R2 { object_key } => {
                write!(f, "{prefix}{SEPARATOR}{object_key}{SEPARATOR}{RAW_RESOURCE_TYPE}")
            }
        }
    }
}

impl FromStr for ProviderTag {
    type Err = TagParseError;

    /// Parse a tag produced by [`Display`](fmt::Display).
    ///
    /// Tags without a known discriminator are read as legacy hosted-service
    /// tags of the form `<public_id>|<resource_type>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TagParseError::Empty);
        }

        let Some((prefix, payload)) = s.split_once(SEPARATOR) else {
            return Self::cloudinary(s);
        };

        match ProviderId::from_discriminator(prefix) {
            Some(ProviderId::ImgBb) => Ok(Self::ImgBb {
                url: payload.to_owned(),
            }),
            Some(ProviderId::PostImages) => Ok(Self::PostImages {
                url: payload.to_owned(),
            }),
            Some(ProviderId::ImgHippo) => Ok(Self::ImgHippo {
                url: payload.to_owned(),
            }),
            Some(ProviderId::Cloudinary) => Self::cloudinary(payload),
            Some(ProviderId::R2) => {
                let object_key = payload
                    .split_once(SEPARATOR)
                    .map_or(payload, |(key, _)| key);
                if object_key.is_empty() {
                    return Err(TagParseError::MissingIdentifier(ProviderId::R2));
                }
                Ok(Self::R2 {
                    object_key: object_key.to_owned(),
                })
            }
            None => Self::cloudinary(s),
        }
    }
}

impl Serialize for ProviderTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProviderTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
