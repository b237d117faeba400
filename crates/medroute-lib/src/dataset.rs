use std::env;
use std::fs;
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::info;

use crate::error::{Error, Result};

/// Default filename for the ingested network store.
const DATABASE_FILENAME: &str = "network.db";

/// Resolve the default store location using platform-specific project
/// directories.
pub fn default_database_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "medroute", "medroute").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATABASE_FILENAME))
}

/// Resolve the store path.
///
/// Resolution order:
/// 1. Explicit `target` argument when provided.
/// 2. `MEDROUTE_DATA_DIR` environment variable.
/// 3. Platform-specific project data directory.
///
/// A target without a file extension is treated as a directory and the
/// default filename is appended.
pub fn resolve_database_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(canonical_database_path(explicit));
    }

    if let Some(env_path) = env::var_os("MEDROUTE_DATA_DIR") {
        return Ok(canonical_database_path(Path::new(&env_path)));
    }

    default_database_path()
}

fn canonical_database_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        return path.to_path_buf();
    }

    path.join(DATABASE_FILENAME)
}

/// Download a ZIP archive of CSV extracts and unpack it into `dest_dir`.
///
/// Returns the paths of the extracted CSV files. Archive entries with
/// absolute or parent-traversing names are skipped, and an archive with no
/// CSV entries at all is an error rather than a silent no-op.
pub fn fetch_archive(url: &str, dest_dir: &Path) -> Result<Vec<PathBuf>> {
    info!(url, dest = %dest_dir.display(), "downloading dataset archive");

    let mut staging = tempfile::tempfile()?;
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let mut response = response;
    response.copy_to(&mut staging)?;
    staging.seek(SeekFrom::Start(0))?;

    fs::create_dir_all(dest_dir)?;

    let mut archive = zip::ZipArchive::new(staging)?;
    let mut extracted = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(name) = entry.enclosed_name() else {
            continue;
        };
        if name.extension().and_then(|ext| ext.to_str()) != Some("csv") {
            continue;
        }
        let Some(file_name) = name.file_name() else {
            continue;
        };

        let dest = dest_dir.join(file_name);
        let mut out = fs::File::create(&dest)?;
        std::io::copy(&mut entry, &mut out)?;
        extracted.push(dest);
    }

    if extracted.is_empty() {
        return Err(Error::ArchiveMissingExtracts {
            archive: PathBuf::from(url),
        });
    }

    info!(files = extracted.len(), "dataset archive unpacked");
    Ok(extracted)
}
