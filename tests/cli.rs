//! Binary-level checks: the fatal paths that run before any image work, and
//! one complete run with a stand-in `file` on `PATH`.
//!
//! Nothing here depends on `file` or `chown` being installed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const ENV_KEYS: &[&str] = &[
    "OUTPUT_BASE_DIR",
    "OWNER_USER",
    "WATERMARK_FILE",
    "DIMENSION_S",
    "DIMENSION_M",
    "DIMENSION_L",
    "DIMENSION_XL",
];

/// Binary with every config key cleared from the inherited environment.
fn thumbwright(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("thumbwright").unwrap();
    cmd.current_dir(dir).env("RUST_LOG", "info");
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn missing_input_is_usage_error() {
    let tmp = TempDir::new().unwrap();
    thumbwright(tmp.path())
        .arg("-a")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_env_file_is_fatal() {
    let tmp = TempDir::new().unwrap();
    thumbwright(tmp.path())
        .args(["-a", "photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load env file"));
}

#[test]
fn missing_output_dir_is_fatal() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".env"), "OWNER_USER=www\nDIMENSION_S=100\n").unwrap();

    thumbwright(tmp.path())
        .args(["-a", "photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Environment variable OUTPUT_BASE_DIR is not set",
        ));
}

#[test]
fn single_dash_env_flag_selects_file() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    std::fs::write(
        tmp.path().join("prod.env"),
        format!("OUTPUT_BASE_DIR={}\nOWNER_USER=\n", out.display()),
    )
    .unwrap();

    thumbwright(tmp.path())
        .args(["-env", "prod.env", "-xl", "photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Loaded environment variable: OUTPUT_BASE_DIR"))
        .stderr(predicate::str::contains(
            "Environment variable OWNER_USER is not set",
        ));
    assert!(!out.exists());
}

#[test]
fn process_environment_wins_over_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".env"), "OUTPUT_BASE_DIR=/from/file\n").unwrap();

    thumbwright(tmp.path())
        .env("OUTPUT_BASE_DIR", "/from/env")
        .args(["-s", "photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OUTPUT_BASE_DIR=/from/env"))
        .stderr(predicate::str::contains("OWNER_USER is not set"));
}

/// Directory holding a `file` script that reports every input as JPEG.
#[cfg(unix)]
fn stub_file_command(dir: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = dir.join("bin");
    std::fs::create_dir(&bin).unwrap();
    let script = bin.join("file");
    std::fs::write(&script, "#!/bin/sh\necho image/jpeg\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    bin
}

#[cfg(unix)]
#[test]
fn completed_run_exits_zero_when_ownership_fails() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    image::RgbImage::from_pixel(800, 600, image::Rgb([200, 120, 40]))
        .save(tmp.path().join("photo.jpg"))
        .unwrap();
    image::RgbaImage::from_pixel(40, 40, image::Rgba([0, 0, 0, 255]))
        .save(tmp.path().join("mark.png"))
        .unwrap();
    std::fs::write(
        tmp.path().join(".env"),
        format!(
            "OUTPUT_BASE_DIR={}\nOWNER_USER=thumbwright-no-such-user\nWATERMARK_FILE=mark.png\nDIMENSION_S=100\nDIMENSION_M=500\n",
            out.display()
        ),
    )
    .unwrap();

    let bin = stub_file_command(tmp.path());
    let path = match std::env::var_os("PATH") {
        Some(existing) => {
            let mut dirs = vec![bin];
            dirs.extend(std::env::split_paths(&existing));
            std::env::join_paths(dirs).unwrap()
        }
        None => bin.into_os_string(),
    };

    thumbwright(tmp.path())
        .env("PATH", path)
        .args(["-a", "-w", "photo.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 of 4 sizes"))
        .stdout(predicate::str::contains("l: skipped"))
        .stderr(predicate::str::contains("Failed to change ownership"));

    assert_eq!(
        image::image_dimensions(out.join("s/photo.jpg")).unwrap(),
        (100, 75)
    );
    assert_eq!(
        image::image_dimensions(out.join("m/photo.jpg")).unwrap(),
        (500, 375)
    );
    assert!(!out.join("l").exists());
    assert!(!out.join("xl").exists());
}

#[test]
fn extra_positional_arguments_are_accepted() {
    let tmp = TempDir::new().unwrap();
    thumbwright(tmp.path())
        .args(["-a", "photo.jpg", "extra.jpg"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to load env file"));
}
