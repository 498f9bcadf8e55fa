use crate::infrastructure::error::InfrastructureError;
use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write content to a file atomically using a temporary file.
///
/// This function:
/// 1. Creates a temporary file in the same directory as the target path.
/// 2. Writes the content to the temporary file.
/// 3. Persists (renames) the temporary file to the target path.
///
/// Each report artifact is therefore either fully replaced or left untouched.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    // Same directory, so the rename never crosses filesystems
    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Append lines to a file, creating it when needed. Prior content is never rewritten.
pub fn append_lines<I, S>(path: &Path, lines: I) -> Result<usize, InfrastructureError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    let mut count = 0;

    for line in lines {
        writer.write_all(line.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

pub fn ensure_dir(path: &Path) -> Result<(), InfrastructureError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Exclusive OS advisory lock on a marker file, held for the duration of a pipeline run.
///
/// The lock belongs to the open file handle: it is released on drop and by the OS when
/// the process dies, so a crashed run never leaves the next one locked out. The file
/// itself stays on disk and only records the PID of the last holder.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
    file: File,
}

impl RunLock {
    /// `Ok(None)` when another run currently holds the lock.
    pub fn try_acquire(path: &Path) -> Result<Option<Self>, InfrastructureError> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => return Ok(None),
            Err(TryLockError::Error(e)) => return Err(InfrastructureError::Io(e)),
        }

        // Only rewritten while holding the lock
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;

        Ok(Some(Self {
            path: path.to_path_buf(),
            file,
        }))
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!(path = ?self.path, error = %e, "Failed to release run lock");
        }
    }
}
