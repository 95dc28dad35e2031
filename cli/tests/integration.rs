use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn fontprofile(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fontprofile"))
        .current_dir(cwd)
        .env_remove("FONTPROFILE_DIR")
        .env_remove("FONTPROFILE_NAME")
        .env_remove("FONTPROFILE_VERSION")
        .args(args)
        .output()
        .expect("run fontprofile")
}

fn seed_fonts(root: &Path) {
    fs::create_dir_all(root.join("fonts/nested")).unwrap();
    fs::write(root.join("fonts/Regular.ttf"), b"\0\x01\0\0regular").unwrap();
    fs::write(root.join("fonts/nested/Bold.OTF"), b"OTTObold").unwrap();
    fs::write(root.join("fonts/README.md"), b"# not a font").unwrap();
}

#[test]
fn build_writes_profile_in_working_directory() {
    let tmp = tempdir().expect("tempdir");
    seed_fonts(tmp.path());

    let output = fontprofile(
        tmp.path(),
        &["build", "--dir=fonts", "--fontname=Example", "--version=2.0"],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let profile = fs::read_to_string(tmp.path().join("Example.mobileconfig")).expect("profile");
    assert_eq!(profile.matches("<key>Font</key>").count(), 2);
    assert!(profile.contains("<string>Example Fonts 2.0</string>"));
    assert!(profile.contains("<string>me.garbee.fonts.example.2.0</string>"));
}

#[test]
fn json_summary_lists_fonts_in_path_order() {
    let tmp = tempdir().expect("tempdir");
    seed_fonts(tmp.path());

    let output = fontprofile(
        tmp.path(),
        &["build", "--dir", "fonts", "--fontname", "Example", "--json"],
    );
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("json summary");
    let names: Vec<&str> = parsed["fonts"]
        .as_array()
        .expect("fonts array")
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Regular.ttf", "Bold.OTF"]);
    assert_eq!(parsed["display_name"], "Example Fonts");
}

#[test]
fn missing_arguments_exit_with_one() {
    let tmp = tempdir().expect("tempdir");

    let output = fontprofile(tmp.path(), &["build", "--fontname", "Example"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No directory argument provided"), "{stderr}");

    fs::write(tmp.path().join("file.ttf"), b"font").unwrap();
    let output = fontprofile(tmp.path(), &["build", "--dir", "file.ttf", "--fontname", "X"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!tmp.path().join("X.mobileconfig").exists());
}

#[test]
fn no_fonts_exit_with_two() {
    let tmp = tempdir().expect("tempdir");
    fs::create_dir_all(tmp.path().join("empty")).unwrap();
    fs::write(tmp.path().join("empty/notes.txt"), b"nothing here").unwrap();

    let output = fontprofile(tmp.path(), &["build", "--dir", "empty", "--fontname", "Example"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(!tmp.path().join("Example.mobileconfig").exists());
}

#[test]
fn bundle_reads_environment() {
    let tmp = tempdir().expect("tempdir");
    seed_fonts(tmp.path());

    let output = Command::new(env!("CARGO_BIN_EXE_fontprofile"))
        .current_dir(tmp.path())
        .env("FONTPROFILE_NAME", "Comic Code")
        .env("FONTPROFILE_VERSION", "1.1")
        .env_remove("FONTPROFILE_DIR")
        .arg("bundle")
        .output()
        .expect("run fontprofile");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let profile =
        fs::read_to_string(tmp.path().join("Comic Code-1.1.mobileconfig")).expect("profile");
    assert!(profile.contains("<string>me.garbee.font.comic-code.Regular</string>"));
    assert_eq!(profile.matches("<key>PayloadUUID</key>").count(), 1);
}

#[test]
fn stdout_mode_prints_profile_without_writing() {
    let tmp = tempdir().expect("tempdir");
    seed_fonts(tmp.path());

    let output = fontprofile(
        tmp.path(),
        &["build", "--dir", "fonts", "--fontname", "Example", "--stdout"],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(stdout.trim_end().ends_with("</plist>"));
    assert!(!tmp.path().join("Example.mobileconfig").exists());
}
