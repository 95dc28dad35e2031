//! fontprofile CLI (made by FontLab https://www.fontlab.com/)

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use log::LevelFilter;

use fontprofile_core::output::{write_plist, write_summary_json};
use fontprofile_core::{
    ProfileBuilder, ProfileConfig, ProfileError, ProfileOptions, ProfileRequest,
};

/// CLI entrypoint for fontprofile.
#[derive(Debug, Parser)]
#[command(
    name = "fontprofile",
    about = "Bundle a folder of fonts into a .mobileconfig profile (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    /// Log discovery and encoding progress
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a profile from an explicit directory, font name and version
    Build(BuildArgs),
    /// Build a profile from FONTPROFILE_DIR / FONTPROFILE_NAME / FONTPROFILE_VERSION
    Bundle(BundleArgs),
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Directory containing font files (searched recursively)
    #[arg(long = "dir", value_hint = ValueHint::DirPath)]
    dir: Option<PathBuf>,

    /// Name used in the profile display name, identifiers and file name
    #[arg(long = "fontname")]
    fontname: Option<String>,

    /// Version string for the display name and identifiers
    #[arg(long = "version")]
    version: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Args)]
struct BundleArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Directory the profile is written to
    #[arg(short = 'o', long = "out-dir", value_hint = ValueHint::DirPath)]
    out_dir: Option<PathBuf>,

    /// Do not descend into symlinked directories or read symlinked fonts
    #[arg(long = "no-follow-symlinks", action = ArgAction::SetTrue)]
    no_follow_symlinks: bool,

    /// Override the document PayloadIdentifier namespace
    #[arg(long = "profile-namespace", value_hint = ValueHint::Other)]
    profile_namespace: Option<String>,

    /// Override the per-font PayloadIdentifier namespace
    #[arg(long = "font-namespace", value_hint = ValueHint::Other)]
    font_namespace: Option<String>,

    /// Override PayloadOrganization
    #[arg(long = "organization")]
    organization: Option<String>,

    /// Print the profile to stdout instead of writing a file
    #[arg(long = "stdout", action = ArgAction::SetTrue, conflicts_with = "json")]
    stdout: bool,

    /// Print a JSON summary of the written profile
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

impl CommonArgs {
    fn apply(&self, mut request: ProfileRequest) -> ProfileRequest {
        if let Some(dir) = &self.out_dir {
            request = request.out_dir(dir);
        }
        if self.no_follow_symlinks {
            request = request.follow_symlinks(false);
        }
        let options = apply_overrides(request.options.clone(), self);
        request.options(options)
    }
}

fn apply_overrides(mut options: ProfileOptions, args: &CommonArgs) -> ProfileOptions {
    if let Some(ns) = &args.profile_namespace {
        options.profile_namespace = ns.clone();
    }
    if let Some(ns) = &args.font_namespace {
        options.block_namespace = ns.clone();
    }
    if let Some(org) = &args.organization {
        options.organization = org.clone();
    }
    options
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::try_parse()?;
    init_logger(cli.verbose);

    match cli.command {
        Command::Build(args) => {
            let request = build_request(&args);
            let config = request.resolve()?;
            run_profile(config, &args.common)
        }
        Command::Bundle(args) => {
            let request = args.common.apply(ProfileRequest::from_env());
            let config = request.resolve()?;
            run_profile(config, &args.common)
        }
    }
}

/// Process exit code for a failed run: 1 bad input, 2 no fonts, 3 I/O.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<ProfileError>() {
        return err.exit_code();
    }
    if let Some(err) = err.downcast_ref::<clap::Error>() {
        return if err.use_stderr() { 1 } else { 0 };
    }
    3
}

/// Initialize logging; `RUST_LOG` still wins over the default level.
fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn build_request(args: &BuildArgs) -> ProfileRequest {
    let request = ProfileRequest {
        directory: args.dir.clone(),
        product_name: args.fontname.clone(),
        version: args.version.clone(),
        ..ProfileRequest::default()
    };
    args.common.apply(request)
}

fn run_profile(config: ProfileConfig, args: &CommonArgs) -> Result<()> {
    let mut builder = ProfileBuilder::new(config);
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.stdout {
        let doc = builder.build()?;
        write_plist(&doc, &mut handle)?;
        return Ok(());
    }

    let (path, doc) = builder.write()?;
    if args.json {
        write_summary_json(&doc.summary(path), &mut handle)?;
    } else {
        writeln!(handle, "{}", path.display())?;
    }

    Ok(())
}
