//! Zip extraction into the vendor directory.
//!
//! [`extract_archive`] is blocking; the handler runs it on a blocking thread.
//! Informational lines are appended to `notes` as the extraction progresses
//! so the caller sees them even when a later step fails.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::ExtractError;

/// What to extract, where to, and whether existing files may be replaced.
#[derive(Debug, Clone)]
pub struct ExtractPlan {
    pub archive_path: PathBuf,
    pub target_dir: PathBuf,
    pub overwrite: bool,
}

/// Counts from a successful extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files: usize,
    pub directories: usize,
    pub bytes: u64,
}

/// Extract `plan.archive_path` into `plan.target_dir`, then delete the archive.
///
/// Stops at the first failure. Files written before a mid-stream failure are
/// left in place and the archive is kept.
pub fn extract_archive(
    plan: &ExtractPlan,
    notes: &mut Vec<String>,
) -> Result<ExtractSummary, ExtractError> {
    if !plan.archive_path.exists() {
        return Err(ExtractError::ArchiveNotFound);
    }

    let file = File::open(&plan.archive_path).map_err(|e| ExtractError::ArchiveOpen(e.into()))?;
    let mut archive = ZipArchive::new(file).map_err(ExtractError::ArchiveOpen)?;

    if !plan.target_dir.exists() {
        notes.push(format!("Creating directory: {}", plan.target_dir.display()));
        create_dir_all(&plan.target_dir).map_err(ExtractError::CreateDir)?;
        notes.push("Directory created successfully.".to_string());
    }

    let summary = extract_entries(&mut archive, plan)?;
    drop(archive);

    fs::remove_file(&plan.archive_path).map_err(ExtractError::Cleanup)?;

    Ok(summary)
}

fn extract_entries(
    archive: &mut ZipArchive<File>,
    plan: &ExtractPlan,
) -> Result<ExtractSummary, ExtractError> {
    let mut summary = ExtractSummary {
        files: 0,
        directories: 0,
        bytes: 0,
    };

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| ExtractError::Extract(e.to_string()))?;

        // Rejects absolute names and anything climbing out with `..`.
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ExtractError::Extract(format!("unsafe entry path {}", entry.name())))?;
        let out_path = plan.target_dir.join(&relative);

        if entry.is_dir() {
            create_dir_all(&out_path).map_err(|e| write_error(&out_path, e))?;
            summary.directories += 1;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            create_dir_all(parent).map_err(|e| write_error(parent, e))?;
        }

        if !plan.overwrite && out_path.exists() {
            return Err(ExtractError::Extract(format!(
                "refusing to overwrite {}",
                out_path.display()
            )));
        }

        let mut out_file = File::create(&out_path).map_err(|e| write_error(&out_path, e))?;
        summary.bytes += io::copy(&mut entry, &mut out_file).map_err(|e| write_error(&out_path, e))?;
        summary.files += 1;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            // Owner write stays set so the next deploy can replace the file.
            let mode = (mode & 0o7777) | 0o200;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
                .map_err(|e| write_error(&out_path, e))?;
        }
    }

    Ok(summary)
}

/// Recursive `mkdir` with mode `0777` (before umask) on Unix.
fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(path)
}

fn write_error(path: &Path, err: io::Error) -> ExtractError {
    ExtractError::Extract(format!("{}: {err}", path.display()))
}
