//! Filesystem persister: temp file + fsync + atomic rename.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::url_model;

use super::{PersistError, Persister, TEMP_SUFFIX};

/// Longest part of the final name reused in a temp name. Leaves room for the
/// dots, the random part and [`TEMP_SUFFIX`] under the 255-byte NAME_MAX.
const TEMP_STEM_MAX: usize = 200;

/// Persists bodies under `output_dir`.
#[derive(Debug, Clone)]
pub struct FsPersister {
    output_dir: PathBuf,
}

impl FsPersister {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Temp file in the output dir named `.<stem>.<random>.part`. Unique per
    /// call, so duplicate targets written concurrently never share a temp file.
    fn create_temp(&self, name: &str) -> Result<NamedTempFile, PersistError> {
        tempfile::Builder::new()
            .prefix(&format!(".{}.", temp_stem(name)))
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.output_dir)
            .map_err(|source| PersistError::CreateTemp {
                dir: self.output_dir.clone(),
                source,
            })
    }

    /// Final path a target is written to.
    pub fn path_for(&self, target: &str) -> PathBuf {
        self.output_dir.join(url_model::derive_filename(target))
    }
}

impl Persister for FsPersister {
    fn save(&self, target: &str, body: &[u8]) -> Result<PathBuf, PersistError> {
        let final_path = self.path_for(target);
        let name = url_model::derive_filename(target);

        let mut tmp = self.create_temp(&name)?;
        let tmp_path = tmp.path().to_path_buf();
        let write_err = |source| PersistError::Write {
            path: tmp_path.clone(),
            source,
        };
        tmp.write_all(body).map_err(write_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(write_err)?;
        }
        tmp.as_file().sync_all().map_err(write_err)?;

        tmp.persist(&final_path)
            .map_err(|e| PersistError::Finalize {
                path: final_path.clone(),
                source: e.error,
            })?;

        tracing::debug!(path = %final_path.display(), bytes = body.len(), "persisted");
        Ok(final_path)
    }
}

fn temp_stem(name: &str) -> &str {
    let mut end = name.len().min(TEMP_STEM_MAX);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}
