//! End-to-end tests for the installer pipeline.
//!
//! The bootstrap installer, cygcheck, 7-Zip and makensis are mock shell
//! scripts, so these run on Unix hosts only.

#![cfg(unix)]

mod helpers;

use cygwin_builder::commands::cmd_build;
use cygwin_builder::error::BuildError;
use helpers::TestEnv;
use std::fs;

#[test]
fn test_build_success_copies_installer_to_output_dir() {
    let env = TestEnv::new();
    let installer = env.installer(None);
    let options = env.options(env.settings(&installer, &["vim"]), None);

    let built = cmd_build(&options).expect("build should succeed");

    assert_eq!(built, env.output_dir.join("cygwin-setup.exe"));
    // The mock makensis copies the compiled script into the installer.
    let content = fs::read_to_string(&built).unwrap();
    assert!(content.contains("Name \"Cygwin 3.4.6\""));
    assert!(content.contains("VIProductVersion \"3.4.6\""));
    assert!(!content.contains("TMPL_MyCygwinVersion"));
}

#[test]
fn test_installer_written_into_output_dir_is_not_truncated() {
    let env = TestEnv::new();
    let installer = env.installer(None);
    let mut settings = env.settings(&installer, &["vim"]);
    settings.makensis = env.makensis_into_output_dir().to_string_lossy().into_owned();
    let options = env.options(settings, None);

    let built = cmd_build(&options).expect("build should succeed");

    assert_eq!(built, env.output_dir.join("cygwin-setup.exe"));
    let content = fs::read_to_string(&built).unwrap();
    assert!(content.contains("Name \"Cygwin 3.4.6\""));
}

#[test]
fn test_build_with_version_suffix() {
    let env = TestEnv::new();
    let installer = env.installer(None);
    let options = env.options(env.settings(&installer, &["vim"]), Some("acme"));

    let built = cmd_build(&options).expect("build should succeed");

    let content = fs::read_to_string(built).unwrap();
    assert!(content.contains("Name \"Cygwin acme-3.4.6\""));
}

#[test]
fn test_build_with_empty_package_list_installs_mandatory_set() {
    let env = TestEnv::new();
    let installer = env.installer(None);
    let options = env.options(env.settings(&installer, &[]), None);

    cmd_build(&options).expect("build should succeed");
}

#[test]
fn test_missing_package_fails_build() {
    let env = TestEnv::new();
    let installer = env.installer(Some("vim"));
    let options = env.options(env.settings(&installer, &["vim"]), None);

    let err = cmd_build(&options).unwrap_err();

    match err.downcast_ref::<BuildError>() {
        Some(BuildError::MissingPackages(missing)) => assert_eq!(missing, &["vim".to_string()]),
        other => panic!("expected MissingPackages, got {:?}", other),
    }
    assert!(!env.output_dir.join("cygwin-setup.exe").exists());
}

#[test]
fn test_missing_mandatory_package_fails_build() {
    let env = TestEnv::new();
    let installer = env.installer(Some("openssh"));
    let options = env.options(env.settings(&installer, &["vim"]), None);

    let err = cmd_build(&options).unwrap_err();
    assert_eq!(err.to_string(), "missing packages: openssh");
}

#[test]
fn test_installer_failure_is_build_error() {
    let env = TestEnv::new();
    let installer = env.failing_installer();
    let options = env.options(env.settings(&installer, &["vim"]), None);

    let err = cmd_build(&options).unwrap_err();

    match err.downcast_ref::<BuildError>() {
        Some(BuildError::CommandFailed { code, stderr, .. }) => {
            assert_eq!(*code, 1);
            assert!(stderr.contains("mirror unreachable"));
        }
        other => panic!("expected CommandFailed, got {:?}", other),
    }
}

#[test]
fn test_missing_template_fails_preflight() {
    let env = TestEnv::new();
    let installer = env.installer(None);
    fs::remove_file(env.template_dir.join("Cygwin.nsi")).unwrap();
    let options = env.options(env.settings(&installer, &["vim"]), None);

    let err = cmd_build(&options).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::Preflight(_))
    ));
}

#[test]
fn test_pinned_checksum_mismatch() {
    let env = TestEnv::new();
    let installer = env.installer(None);
    let mut settings = env.settings(&installer, &["vim"]);
    settings.installer_sha256 = Some("00".repeat(32));
    let options = env.options(settings, None);

    let err = cmd_build(&options).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_missing_packages_key_is_unexpected_error() {
    let env = TestEnv::new();
    let installer = env.installer(None);
    let mut settings = env.settings(&installer, &[]);
    settings.packages = None;
    let options = env.options(settings, None);

    let err = cmd_build(&options).unwrap_err();
    assert!(err.downcast_ref::<BuildError>().is_none());
    assert!(err.to_string().contains("packages"));
}
