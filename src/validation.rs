//! Input validation for release arguments.
//!
//! Release tags are derived from user-supplied version strings, so the
//! version is validated once, up front, before anything touches the
//! repository.

use anyhow::{bail, Result};
use semver::Version;

/// Validates a strict `MAJOR.MINOR.PATCH` version string.
///
/// A version is valid if:
/// - It parses as SemVer (three numeric parts, no leading zeros)
/// - It carries no pre-release or build metadata
/// - It has no `v` prefix; the tag prefix is added separately
///
/// # Arguments
///
/// * `version` - The version string to validate
///
/// # Returns
///
/// * `Ok(Version)` with the parsed version if valid
/// * `Err` with a descriptive message if validation fails
///
/// # Examples
///
/// ```
/// use weft::validation::validate_version;
///
/// assert!(validate_version("1.2.3").is_ok());
/// assert!(validate_version("0.0.0").is_ok());
/// assert!(validate_version("1.2").is_err());
/// assert!(validate_version("v1.2.3").is_err());
/// assert!(validate_version("1.2.3-rc1").is_err());
/// ```
pub fn validate_version(version: &str) -> Result<Version> {
    let parsed = match Version::parse(version) {
        Ok(parsed) => parsed,
        Err(err) => bail!("Invalid version '{version}': {err}. Expected MAJOR.MINOR.PATCH, e.g. 1.2.3"),
    };

    if !parsed.pre.is_empty() || !parsed.build.is_empty() {
        bail!("Invalid version '{version}': pre-release and build metadata are not allowed. Expected bare MAJOR.MINOR.PATCH, e.g. 1.2.3");
    }

    Ok(parsed)
}

/// Clap value parser for validating `--version` arguments at parse time.
///
/// # Examples
///
/// ```ignore
/// #[arg(long, value_parser = clap_version_validator)]
/// version: String,
/// ```
pub fn clap_version_validator(s: &str) -> Result<String, String> {
    validate_version(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
