use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context as _, Result, bail};

pub const DEFAULT_MAKE: &str = "make";

/// Run `program` with `args` and return its standard output with the line breaks removed.
///
/// Fails if the program cannot be started, exits unsuccessfully or prints nothing.
pub fn read_stdout(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .with_context(|| format!("failed to run `{}`", program))?;

    if !output.status.success() {
        bail!(
            "`{} {}` exited with {}",
            program,
            args.join(" "),
            output.status
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: String = stdout.lines().collect();
    if value.is_empty() {
        bail!("`{} {}` printed nothing", program, args.join(" "));
    }
    Ok(value)
}

/// Ask the ports framework for the value of a make variable, evaluated in `dir`.
fn make_variable(make: &str, dir: &Path, variable: &str) -> Result<String> {
    let dir = dir
        .to_str()
        .with_context(|| format!("invalid unicode in path: {}", dir.display()))?;
    read_stdout(make, &["-C", dir, "-V", variable])
        .with_context(|| format!("failed to read {} from make", variable))
}

/// Locate the package repository of the local ports tree.
///
/// `PORTSDIR` is read from the system make configuration, then `PKGREPOSITORY` as seen
/// by the `ports-mgmt/pkg` port.
pub fn default_package_dir(make: &str) -> Result<PathBuf> {
    let ports_dir = PathBuf::from(make_variable(make, Path::new("/"), "PORTSDIR")?);
    tracing::debug!("PORTSDIR is {}", ports_dir.display());

    let pkg_port = ports_dir.join("ports-mgmt").join("pkg");
    let repository = PathBuf::from(make_variable(make, &pkg_port, "PKGREPOSITORY")?);
    tracing::info!("Using package repository {}", repository.display());
    Ok(repository)
}
