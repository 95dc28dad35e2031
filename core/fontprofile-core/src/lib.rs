/// fontprofile-core: the careful packer of font suitcases
///
/// Some fonts need to travel. This library gathers every TrueType and
/// OpenType file hiding in a folder, tucks each one into its own labelled
/// envelope, and seals the lot into a single `.mobileconfig` profile that a
/// managed device can unpack and install.
///
/// ## Four Steps to a Packed Profile
///
/// **Discover**: walking every hallway of the folder
/// - Visits subdirectories at any depth without losing its way
/// - Recognises `.ttf` and `.otf` in any casing, politely ignores the rest
/// - Lines everything up by full path so every run tells the same story
///
/// **Encode**: dressing the bytes for the trip
/// - Base64, wrapped at 68 columns for anyone peeking inside
///
/// **Assemble**: writing the labels
/// - Display names, payload identifiers and fresh UUIDs for every envelope
/// - Every label escaped so the document stays well-formed
///
/// **Write**: sealing the suitcase
/// - Renders the plist and swaps it into place atomically, never half-packed
///
/// ## A Sample Trip
///
/// ```rust,no_run
/// use fontprofile_core::builder::ProfileBuilder;
/// use fontprofile_core::config::ProfileRequest;
///
/// let config = ProfileRequest::new("fonts", "Example", Some("2.0".into())).resolve()?;
/// let (path, doc) = ProfileBuilder::new(config).write()?;
///
/// println!("{} packed {} fonts", path.display(), doc.content.len());
/// #
/// # Ok::<(), fontprofile_core::error::ProfileError>(())
/// ```
///
/// ## The Cast of Characters
///
/// - [`config::ProfileConfig`]: the packing list, checked before anything moves
/// - [`discovery::FontFile`]: one font waiting at the door
/// - [`profile::ContentBlock`]: one sealed envelope
/// - [`profile::ProfileDocument`]: the whole suitcase
/// - [`error::ProfileError`]: what to say when the trip is called off
///
/// ---
///
/// Crafted with care at FontLab https://www.fontlab.com/

pub mod builder;
pub mod config;
pub mod discovery;
pub mod encoding;
pub mod error;
pub mod escape;
pub mod ids;
pub mod output;
pub mod profile;

pub use builder::{generate, ProfileBuilder};
pub use config::{ProfileConfig, ProfileOptions, ProfileRequest};
pub use error::{ProfileError, Result};
