use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("export target {0:?} exists and is not a directory")]
    NotADirectory(PathBuf),
    #[error("cannot create export directory {dir:?}: {source}")]
    CreateDir { dir: PathBuf, source: io::Error },
    #[error("cannot write report {path:?}: {source}")]
    WriteReport { path: PathBuf, source: io::Error },
}

/// Creates the export directory if needed. A regular file in its place is
/// rejected rather than replaced.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::NotADirectory(dir.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
                dir: dir.to_path_buf(),
                source,
            })
        }
        Err(source) => Err(PersistError::CreateDir {
            dir: dir.to_path_buf(),
            source,
        }),
    }
}

/// Writes report files into one export directory. Each file goes through a
/// sibling temp file and a rename, so a reader sees the previous report or
/// the new one, never a mix.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let failed = |source| PersistError::WriteReport {
            path: target.clone(),
            source,
        };

        let mut staged = NamedTempFile::new_in(&self.dir).map_err(failed)?;
        staged
            .write_all(content.as_bytes())
            .and_then(|()| staged.as_file_mut().sync_all())
            .map_err(failed)?;
        staged.persist(&target).map_err(|err| failed(err.error))?;
        Ok(target)
    }
}
