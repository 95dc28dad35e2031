//! Profile document model and naming rules (made by FontLab https://www.fontlab.com/)

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{ProfileConfig, ProfileOptions, PROFILE_EXTENSION};
use crate::discovery::FontFile;
use crate::ids::IdGenerator;

/// `PayloadType` of a font block.
pub const FONT_PAYLOAD_TYPE: &str = "com.apple.font";

/// `PayloadType` of the top-level document.
pub const CONFIGURATION_PAYLOAD_TYPE: &str = "Configuration";

/// `PayloadVersion` of every dict in the document.
pub const PAYLOAD_VERSION: u32 = 1;

/// One embedded font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub data: Vec<u8>,
    /// Font file name, shown as `Name`.
    pub name: String,
    pub identifier: String,
    pub uuid: Option<String>,
}

/// The complete `.mobileconfig` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDocument {
    pub content: Vec<ContentBlock>,
    pub description: String,
    pub display_name: String,
    pub identifier: String,
    pub organization: String,
    pub uuid: Option<String>,
}

impl ProfileDocument {
    /// Every generated `PayloadUUID`, document first.
    pub fn uuids(&self) -> impl Iterator<Item = &str> {
        self.uuid
            .iter()
            .chain(self.content.iter().filter_map(|b| b.uuid.as_ref()))
            .map(String::as_str)
    }

    pub fn summary(&self, output: impl Into<PathBuf>) -> ProfileSummary {
        ProfileSummary {
            output: output.into(),
            display_name: self.display_name.clone(),
            identifier: self.identifier.clone(),
            fonts: self
                .content
                .iter()
                .map(|b| FontSummary {
                    name: b.name.clone(),
                    identifier: b.identifier.clone(),
                    bytes: b.data.len(),
                })
                .collect(),
        }
    }
}

/// What got written, for machine-readable reporting.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub output: PathBuf,
    pub display_name: String,
    pub identifier: String,
    pub fonts: Vec<FontSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FontSummary {
    pub name: String,
    pub identifier: String,
    pub bytes: usize,
}

/// `Example` + `2.0` → `Example Fonts 2.0`.
pub fn display_name(product: &str, version: Option<&str>) -> String {
    match version {
        Some(v) => format!("{product} Fonts {v}"),
        None => format!("{product} Fonts"),
    }
}

pub fn description(product: &str) -> String {
    format!("Installs {product} fonts")
}

/// Lowercase, spaces turned into hyphens.
pub fn identifier_segment(product: &str) -> String {
    product.to_lowercase().replace(' ', "-")
}

pub fn profile_identifier(namespace: &str, product: &str, version: Option<&str>) -> String {
    let segment = identifier_segment(product);
    match version {
        Some(v) => format!("{namespace}.{segment}.{v}"),
        None => format!("{namespace}.{segment}"),
    }
}

pub fn block_identifier(namespace: &str, product: Option<&str>, stem: &str) -> String {
    match product {
        Some(p) => format!("{namespace}.{}.{stem}", identifier_segment(p)),
        None => format!("{namespace}.{stem}"),
    }
}

pub fn output_file_name(product: &str, version: Option<&str>, version_in_name: bool) -> String {
    match version {
        Some(v) if version_in_name => format!("{product}-{v}.{PROFILE_EXTENSION}"),
        _ => format!("{product}.{PROFILE_EXTENSION}"),
    }
}

/// Turn one font into a content block.
pub fn content_block(
    font: &FontFile,
    data: Vec<u8>,
    product: &str,
    options: &ProfileOptions,
    ids: &mut impl IdGenerator,
) -> ContentBlock {
    let product_segment = options.product_in_block_ids.then_some(product);

    ContentBlock {
        data,
        name: font.file_name.clone(),
        identifier: block_identifier(&options.block_namespace, product_segment, &font.stem),
        uuid: options.block_uuids.then(|| ids.next_id()),
    }
}

/// Wrap encoded blocks into the top-level document.
pub fn assemble(
    config: &ProfileConfig,
    content: Vec<ContentBlock>,
    ids: &mut impl IdGenerator,
) -> ProfileDocument {
    let product = config.product_name();
    let version = config.version();
    let options = config.options();

    ProfileDocument {
        content,
        description: description(product),
        display_name: display_name(product, version),
        identifier: profile_identifier(&options.profile_namespace, product, version),
        organization: options.organization.clone(),
        uuid: options.profile_uuid.then(|| ids.next_id()),
    }
}
