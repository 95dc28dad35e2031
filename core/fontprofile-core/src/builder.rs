//! Profile generation pipeline (made by FontLab https://www.fontlab.com/)

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::ProfileConfig;
use crate::discovery::{FontDiscovery, FontFile, PathDiscovery};
use crate::error::{ProfileError, Result};
use crate::ids::{IdGenerator, RandomIds};
use crate::output::write_plist;
use crate::profile::{assemble, content_block, ProfileDocument};

/// Discovers, encodes, assembles and writes one profile.
#[derive(Debug)]
pub struct ProfileBuilder<G = RandomIds> {
    config: ProfileConfig,
    ids: G,
}

impl ProfileBuilder<RandomIds> {
    pub fn new(config: ProfileConfig) -> Self {
        Self {
            config,
            ids: RandomIds,
        }
    }
}

impl<G: IdGenerator> ProfileBuilder<G> {
    /// Swap the identifier source, e.g. for deterministic output.
    pub fn with_ids<H: IdGenerator>(self, ids: H) -> ProfileBuilder<H> {
        ProfileBuilder {
            config: self.config,
            ids,
        }
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Build the document from the configured directory.
    pub fn build(&mut self) -> Result<ProfileDocument> {
        let discovery = PathDiscovery::new(self.config.directory())
            .follow_symlinks(self.config.follow_symlinks());
        self.build_with(&discovery)
    }

    /// Build the document from whatever `discovery` yields.
    pub fn build_with(&mut self, discovery: &impl FontDiscovery) -> Result<ProfileDocument> {
        let fonts = discovery.discover()?;
        if fonts.is_empty() {
            return Err(ProfileError::NoFontsFound(
                self.config.directory().to_path_buf(),
            ));
        }

        let mut content = Vec::with_capacity(fonts.len());
        for font in &fonts {
            let data = read_font(font)?;
            debug!("encoding {} ({} bytes)", font.path.display(), data.len());
            content.push(content_block(
                font,
                data,
                self.config.product_name(),
                self.config.options(),
                &mut self.ids,
            ));
        }

        Ok(assemble(&self.config, content, &mut self.ids))
    }

    /// Build and atomically write the profile; returns the written path.
    pub fn write(&mut self) -> Result<(PathBuf, ProfileDocument)> {
        let doc = self.build()?;
        let target = self.config.output_path();
        persist(&doc, &target)?;
        info!(
            "wrote {} with {} font(s)",
            target.display(),
            doc.content.len()
        );
        Ok((target, doc))
    }
}

/// Resolve-to-disk convenience for callers that don't need the document.
pub fn generate(config: ProfileConfig) -> Result<PathBuf> {
    ProfileBuilder::new(config).write().map(|(path, _)| path)
}

fn read_font(font: &FontFile) -> Result<Vec<u8>> {
    fs::read(&font.path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            warn!("{} disappeared before it could be read", font.path.display());
        }
        ProfileError::io(&font.path, err)
    })
}

/// Mode of written profiles, matching an ordinary `0666 & !022` file.
#[cfg(unix)]
const PROFILE_MODE: u32 = 0o644;

/// Write into a sibling temp file and rename it over `target` once complete.
/// The temp file is removed on every failure path when it drops.
fn persist(doc: &ProfileDocument, target: &Path) -> Result<()> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let tmp = tempfile::Builder::new()
        .prefix(".fontprofile-")
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|err| ProfileError::io(&dir, err))?;

    let mut w = BufWriter::new(tmp.as_file());
    write_plist(doc, &mut w).map_err(|err| ProfileError::io(tmp.path(), err))?;
    w.into_inner()
        .map_err(|err| ProfileError::io(tmp.path(), err.into_error()))?
        .sync_all()
        .map_err(|err| ProfileError::io(tmp.path(), err))?;

    // tempfile creates 0600; profiles are handed to other accounts and hosts.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(PROFILE_MODE))
            .map_err(|err| ProfileError::io(tmp.path(), err))?;
    }

    tmp.persist(target)
        .map_err(|err| ProfileError::io(target, err.error))?;
    Ok(())
}
