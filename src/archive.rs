use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use path_absolutize::*;
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;
use tar::Archive;
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Tar,
    TarGz,
    TarXz,
}

impl ArchiveFormat {
    pub fn detect(path: &Path) -> Option<ArchiveFormat> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".tar.xz") || name.ends_with(".txz") {
            Some(ArchiveFormat::TarXz)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveFormat::TarGz)
        } else if name.ends_with(".tar") {
            Some(ArchiveFormat::Tar)
        } else {
            None
        }
    }
}

/// Extracts every entry of `archive_path` into `dest`, creating `dest` first.
///
/// A missing archive yields [`Error::ArchiveNotFound`]; anything that goes wrong
/// while decoding or unpacking yields [`Error::CorruptArchive`]. Returns the
/// number of entries written.
pub fn extract(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = match File::open(archive_path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::ArchiveNotFound(archive_path.to_path_buf()))
        }
        Err(e) => return Err(corrupt(archive_path, e)),
    };

    std::fs::create_dir_all(dest)
        .map_err(|e| Error::io(format!("create {}", dest.display()), e))?;
    let dest = dest
        .absolutize()
        .map_err(|e| Error::io(format!("absolutize {}", dest.display()), e))?;

    let format = ArchiveFormat::detect(archive_path).ok_or_else(|| {
        corrupt(
            archive_path,
            io::Error::new(ErrorKind::InvalidInput, "unsupported archive format"),
        )
    })?;

    let count = match format {
        ArchiveFormat::Tar => unpack_all(Archive::new(file), archive_path, &dest)?,
        ArchiveFormat::TarGz => unpack_all(Archive::new(GzDecoder::new(file)), archive_path, &dest)?,
        ArchiveFormat::TarXz => unpack_all(Archive::new(XzDecoder::new(file)), archive_path, &dest)?,
    };

    println!("Extracted: {} -> {}", archive_path.display(), dest.display());
    Ok(count)
}

fn unpack_all<R: Read>(mut archive: Archive<R>, archive_path: &Path, dest: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in archive.entries().map_err(|e| corrupt(archive_path, e))? {
        let mut entry = entry.map_err(|e| corrupt(archive_path, e))?;
        let unpacked = entry
            .unpack_in(dest)
            .map_err(|e| corrupt(archive_path, e))?;
        if unpacked {
            count += 1;
        } else {
            log::warn!(
                "Skipped entry escaping {}: {}",
                dest.display(),
                entry.path().map(|p| p.display().to_string()).unwrap_or_default()
            );
        }
    }
    log::debug!("{} entries unpacked from {}", count, archive_path.display());
    Ok(count)
}

fn corrupt(path: &Path, source: io::Error) -> Error {
    Error::CorruptArchive {
        path: path.to_path_buf(),
        source,
    }
}

/// Packs directory `src` as `arcname` into a new `.tar.xz` at `out`.
pub fn pack_dir_xz(src: &Path, arcname: &str, out: &Path) -> io::Result<()> {
    let file = File::create(out)?;
    let mut builder = tar::Builder::new(XzEncoder::new(file, 6));
    builder.append_dir_all(arcname, src)?;
    builder.into_inner()?.finish()?;
    Ok(())
}
