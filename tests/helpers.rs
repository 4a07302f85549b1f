//! Shared test utilities for cygwin-builder tests.
//!
//! Mock executables are shell scripts standing in for the Cygwin bootstrap
//! installer, `cygcheck`, 7-Zip and `makensis`.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use cygwin_builder::commands::BuildOptions;
use cygwin_builder::config::Settings;

/// NSIS template used by the mock build.
pub const TEMPLATE_NSI: &str = "\
Name \"Cygwin TMPL_MyCygwinVersion\"
OutFile \"cygwin-setup.exe\"
VIProductVersion \"TMPL_MyCygwinVersion\"
File cygwin.zip
";

/// Stands in for `cygwin/bin/cygcheck.exe`; reports what the mock installer
/// recorded in `installed.lst`.
const MOCK_CYGCHECK: &str = r#"#!/bin/sh
dir=$(dirname "$0")
case "$1" in
  --check-setup)
    echo "Cygwin Package Information"
    echo "Package              Version        Status"
    while read -r p; do
      [ -n "$p" ] && echo "$p                 1.0-1          OK"
    done < "$dir/../installed.lst"
    ;;
  --version)
    echo "cygcheck (cygwin) 3.4.6"
    echo "System Checker for Cygwin"
    ;;
esac
exit 0
"#;

/// Test environment with a template tree, mock tools and an output directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Template tree (`buildenv`)
    pub template_dir: PathBuf,
    /// Where the finished installer should land
    pub output_dir: PathBuf,
    /// Mock tools live here
    pub tools_dir: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with a complete template tree.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let template_dir = base.join("buildenv");
        let output_dir = base.join("out");
        let tools_dir = base.join("tools");

        fs::create_dir_all(&output_dir).expect("Failed to create output dir");
        fs::create_dir_all(&tools_dir).expect("Failed to create tools dir");
        fs::create_dir_all(template_dir.join("7z")).expect("Failed to create template dir");
        fs::write(template_dir.join("Cygwin.nsi"), TEMPLATE_NSI).expect("Failed to write template");
        create_mock_sevenzip(&template_dir.join("7z/7z.exe"));

        fs::write(tools_dir.join("cygcheck.exe"), MOCK_CYGCHECK).expect("Failed to write cygcheck");
        make_executable(&tools_dir.join("cygcheck.exe"));

        Self {
            _temp_dir: temp_dir,
            template_dir,
            output_dir,
            tools_dir,
        }
    }

    /// Mock bootstrap installer that installs every requested package except
    /// `omit`.
    pub fn installer(&self, omit: Option<&str>) -> PathBuf {
        let path = self.tools_dir.join("setup-x86_64.exe");
        let filter = match omit {
            Some(pkg) => format!("grep -v -x '{}'", pkg),
            None => "cat".to_string(),
        };
        let script = format!(
            r#"#!/bin/sh
root=""
packages=""
while [ $# -gt 0 ]; do
  case "$1" in
    --root) root="$2"; shift 2 ;;
    --packages) packages="$2"; shift 2 ;;
    *) shift ;;
  esac
done
mkdir -p "$root/bin"
echo "$packages" | tr ',' '\n' | {filter} > "$root/installed.lst"
cp "{cygcheck}" "$root/bin/cygcheck.exe"
chmod 755 "$root/bin/cygcheck.exe"
"#,
            filter = filter,
            cygcheck = self.tools_dir.join("cygcheck.exe").display(),
        );
        write_script(&path, &script);
        path
    }

    /// Mock installer that fails like a network error during setup.
    pub fn failing_installer(&self) -> PathBuf {
        let path = self.tools_dir.join("broken-setup.exe");
        write_script(&path, "#!/bin/sh\necho 'Downloading packages'\necho 'mirror unreachable' >&2\nexit 1\n");
        path
    }

    /// Mock `makensis` that copies the compiled script to the installer path
    /// and reports it.
    pub fn makensis(&self) -> PathBuf {
        let path = self.tools_dir.join("makensis");
        write_script(
            &path,
            r#"#!/bin/sh
[ -f cygwin.zip ] || { echo "cygwin.zip missing" >&2; exit 5; }
out="$(pwd)/cygwin-setup.exe"
cp "$1" "$out"
echo "MakeNSIS v3.08 - Copyright 1999-2021 Contributors"
echo "Processing script file: \"$1\" (ACP)"
echo "Output: \"$out\""
echo "Install: 2 pages (128 bytes), 1 section (1048 bytes)"
"#,
        );
        path
    }

    /// Mock `makensis` that writes the installer straight into `output_dir`,
    /// as a template with an absolute `OutFile` would.
    pub fn makensis_into_output_dir(&self) -> PathBuf {
        let path = self.tools_dir.join("makensis-outdir");
        let script = format!(
            r#"#!/bin/sh
out="{out}"
cp "$1" "$out"
echo "Output: \"$out\""
"#,
            out = self.output_dir.join("cygwin-setup.exe").display(),
        );
        write_script(&path, &script);
        path
    }

    /// Settings pointing at the mock tools.
    pub fn settings(&self, installer: &Path, packages: &[&str]) -> Settings {
        let json = serde_json::json!({
            "installer": installer,
            "makensis": self.makensis(),
            "packages": packages,
        });
        Settings::from_json(&json.to_string()).expect("settings should parse")
    }

    /// Build options for this environment.
    pub fn options(&self, settings: Settings, version_suffix: Option<&str>) -> BuildOptions {
        BuildOptions {
            settings,
            template_dir: self.template_dir.clone(),
            output_dir: self.output_dir.clone(),
            version_suffix: version_suffix.map(str::to_string),
        }
    }
}

/// Mock 7-Zip: checks it runs inside the provisioned root and writes the
/// archive named by its fifth argument.
pub fn create_mock_sevenzip(path: &Path) {
    write_script(
        path,
        "#!/bin/sh\n[ -f bin/cygcheck.exe ] || exit 3\necho zipped > \"$5\"\n",
    );
}

/// Write a script and mark it executable.
pub fn write_script(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir for script");
    }
    fs::write(path, content).expect("Failed to write script");
    make_executable(path);
}

fn make_executable(path: &Path) {
    let mut perms = fs::metadata(path).expect("Failed to get metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("Failed to set permissions");
}
