//! Handling of output files that already exist.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Answer to "this output already exists, what now?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverwriteDecision {
    Overwrite,
    Skip,
    /// Write to another path instead. The new path is checked again.
    Rename(PathBuf),
}

/// Non-interactive policy applied when no decision callback is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingFilePolicy {
    Overwrite,
    Skip,
    /// Stop with an error
    #[default]
    Fail,
}

impl std::str::FromStr for ExistingFilePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(ExistingFilePolicy::Overwrite),
            "skip" => Ok(ExistingFilePolicy::Skip),
            "fail" => Ok(ExistingFilePolicy::Fail),
            other => Err(format!("unknown existing-file policy '{}'", other)),
        }
    }
}

/// Result of converting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Written(PathBuf),
    Skipped(PathBuf),
}

/// Finds the path to write to, consulting `policy` while the candidate exists.
///
/// Returns `None` when the policy decides to skip.
pub(crate) fn resolve_target<F>(output: &Path, mut policy: F) -> Option<PathBuf>
where
    F: FnMut(&Path) -> OverwriteDecision,
{
    let mut target = output.to_path_buf();
    while target.exists() {
        match policy(&target) {
            OverwriteDecision::Overwrite => {
                debug!("Overwriting {}", target.display());
                break;
            }
            OverwriteDecision::Skip => {
                info!(output = %target.display(), "Skipping existing file");
                return None;
            }
            OverwriteDecision::Rename(next) if next == target => break,
            OverwriteDecision::Rename(next) => {
                debug!("Redirecting {} to {}", target.display(), next.display());
                target = next;
            }
        }
    }
    Some(target)
}

/// Applies a non-interactive policy to `output`.
pub(crate) fn resolve_with_policy(output: &Path, policy: ExistingFilePolicy) -> Result<Option<PathBuf>> {
    match policy {
        ExistingFilePolicy::Fail if output.exists() => Err(ConversionError::OutputWriteError(format!(
            "{}: file already exists",
            output.display()
        ))),
        ExistingFilePolicy::Skip => Ok(resolve_target(output, |_| OverwriteDecision::Skip)),
        _ => Ok(Some(output.to_path_buf())),
    }
}
