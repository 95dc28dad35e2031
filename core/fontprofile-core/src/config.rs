//! Input resolution for profile generation (made by FontLab https://www.fontlab.com/)
//!
//! Arguments and environment variables are read exactly once, here, and turned
//! into an immutable [`ProfileConfig`]. Nothing downstream looks at globals.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{ProfileError, Result};

/// File extension of generated profiles.
pub const PROFILE_EXTENSION: &str = "mobileconfig";

/// Directory scanned by the environment-driven variant when `FONTPROFILE_DIR` is unset.
pub const BUNDLED_FONT_DIR: &str = "fonts";

/// Product name used by the environment-driven variant when `FONTPROFILE_NAME` is unset.
pub const BUNDLED_PRODUCT_NAME: &str = "Garbee";

pub const ENV_DIR: &str = "FONTPROFILE_DIR";
pub const ENV_NAME: &str = "FONTPROFILE_NAME";
pub const ENV_VERSION: &str = "FONTPROFILE_VERSION";

/// Knobs that differ between the two historical flavours of the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOptions {
    /// Prefix of the document-level `PayloadIdentifier`.
    pub profile_namespace: String,
    /// Prefix of every font block's `PayloadIdentifier`.
    pub block_namespace: String,
    /// Insert the normalized product name between block namespace and stem.
    pub product_in_block_ids: bool,
    pub organization: String,
    /// Emit `PayloadUUID` on the document dict.
    pub profile_uuid: bool,
    /// Emit `PayloadUUID` on each font dict.
    pub block_uuids: bool,
    /// Name the output `<product>-<version>.mobileconfig` instead of `<product>.mobileconfig`.
    pub version_in_file_name: bool,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            profile_namespace: "me.garbee.fonts".to_string(),
            block_namespace: "me.garbee.font".to_string(),
            product_in_block_ids: false,
            organization: "Jonathan Garbee".to_string(),
            profile_uuid: true,
            block_uuids: true,
            version_in_file_name: false,
        }
    }
}

impl ProfileOptions {
    /// Options of the environment-driven variant.
    pub fn bundled() -> Self {
        Self {
            product_in_block_ids: true,
            block_uuids: false,
            version_in_file_name: true,
            ..Self::default()
        }
    }
}

/// Raw, unvalidated inputs as they arrive from the command line or environment.
#[derive(Debug, Clone)]
pub struct ProfileRequest {
    pub directory: Option<PathBuf>,
    pub product_name: Option<String>,
    pub version: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub follow_symlinks: bool,
    pub options: ProfileOptions,
}

impl Default for ProfileRequest {
    fn default() -> Self {
        Self {
            directory: None,
            product_name: None,
            version: None,
            out_dir: None,
            follow_symlinks: true,
            options: ProfileOptions::default(),
        }
    }
}

impl ProfileRequest {
    /// Parameterized form: every value supplied by the caller.
    pub fn new(
        directory: impl Into<PathBuf>,
        product_name: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            directory: Some(directory.into()),
            product_name: Some(product_name.into()),
            version,
            ..Self::default()
        }
    }

    /// Environment-driven form, reading the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Environment-driven form with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            directory: Some(
                non_empty(ENV_DIR)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(BUNDLED_FONT_DIR)),
            ),
            product_name: Some(
                non_empty(ENV_NAME).unwrap_or_else(|| BUNDLED_PRODUCT_NAME.to_string()),
            ),
            version: non_empty(ENV_VERSION),
            options: ProfileOptions::bundled(),
            ..Self::default()
        }
    }

    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn options(mut self, options: ProfileOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the request. Only metadata lookups happen here; no file is opened.
    pub fn resolve(self) -> Result<ProfileConfig> {
        let directory = self
            .directory
            .filter(|d| !d.as_os_str().is_empty())
            .ok_or_else(|| {
                ProfileError::config(
                    "No directory argument provided. Please specify a directory with --dir=<directory>.",
                )
            })?;

        let product_name = self
            .product_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                ProfileError::config(
                    "No fontname argument provided. Please specify a fontname with --fontname=<fontname>.",
                )
            })?;

        check_file_name_part("Font name", &product_name)?;

        if !directory.is_dir() {
            return Err(ProfileError::config(format!(
                "Font directory not found: {}",
                directory.display()
            )));
        }

        let version = self
            .version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        if let Some(v) = &version {
            check_file_name_part("Version", v)?;
        }

        Ok(ProfileConfig {
            directory,
            product_name,
            version,
            out_dir: self.out_dir.unwrap_or_else(|| PathBuf::from(".")),
            follow_symlinks: self.follow_symlinks,
            options: self.options,
        })
    }
}

/// Both name and version end up in the output file name.
fn check_file_name_part(label: &str, value: &str) -> Result<()> {
    if value.contains(['/', '\\']) || value == ".." {
        return Err(ProfileError::config(format!(
            "{label} must not contain path separators: {value}"
        )));
    }
    Ok(())
}

/// Validated, immutable inputs for one run.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    directory: PathBuf,
    product_name: String,
    version: Option<String>,
    out_dir: PathBuf,
    follow_symlinks: bool,
    options: ProfileOptions,
}

impl ProfileConfig {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// `None` when no version was supplied (or it was blank).
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    pub fn options(&self) -> &ProfileOptions {
        &self.options
    }

    /// Where the profile will be written.
    pub fn output_path(&self) -> PathBuf {
        let file_name = crate::profile::output_file_name(
            &self.product_name,
            self.version(),
            self.options.version_in_file_name,
        );
        self.out_dir.join(file_name)
    }
}
