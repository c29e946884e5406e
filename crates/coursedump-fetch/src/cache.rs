//! Fetch-through on-disk resource cache.
//!
//! Cache keys are derived deterministically from the request URL:
//!
//! ```text
//! {tmp}/<url path>.html          # fetched documents
//! {out}/video/<final segment>    # downloaded video media
//! {out}/image/<final segment>    # downloaded image media
//! ```
//!
//! An existing file short-circuits the fetch unconditionally. There is no
//! checksum, expiry, or partial-file detection; a truncated download left by
//! a killed process will be served as-is on the next run. Accepted risk.

use std::path::{Path, PathBuf};
use std::{fs, io};

use url::Url;

use crate::session::Session;
use crate::FetchError;

/// Subfolder for downloaded video files.
const VIDEO_SUBFOLDER: &str = "video";

/// Subfolder for downloaded image files.
const IMAGE_SUBFOLDER: &str = "image";

/// Kind of downloadable media, selecting the output subfolder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// Video file, stored under `video/`.
    Video,
    /// Image file, stored under `image/`.
    Image,
}

impl MediaKind {
    fn subfolder(self) -> &'static str {
        match self {
            Self::Video => VIDEO_SUBFOLDER,
            Self::Image => IMAGE_SUBFOLDER,
        }
    }
}

/// Memoizing fetcher over an authenticated [`Session`].
///
/// Both operations are at-most-once per derived path for the lifetime of the
/// cache directories. Neither directory is ever cleaned up by this type.
pub struct Fetcher {
    session: Session,
    tmp_dir: PathBuf,
    out_dir: PathBuf,
}

impl Fetcher {
    /// Create a fetcher caching documents under `tmp_dir` and media under
    /// `out_dir`.
    #[must_use]
    pub fn new(session: Session, tmp_dir: PathBuf, out_dir: PathBuf) -> Self {
        Self {
            session,
            tmp_dir,
            out_dir,
        }
    }

    /// Fetch a document as text, memoized on disk.
    ///
    /// Returns the cached file's contents if one exists at the derived path;
    /// otherwise performs an authenticated GET, writes the payload, and
    /// returns it.
    ///
    /// # Errors
    ///
    /// [`FetchError::InvalidUrl`] for an unparseable URL, otherwise the
    /// underlying network or I/O failure.
    pub fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!("fetching '{url}'");

        let parsed = Url::parse(url)?;
        let path = self.document_path(&parsed);

        if path.is_file() {
            tracing::debug!("cache hit at {}", path.display());
            return Ok(fs::read_to_string(&path)?);
        }

        let body = self.session.get(url)?;
        let text = String::from_utf8_lossy(&body).into_owned();

        write_durably(&path, text.as_bytes())?;
        Ok(text)
    }

    /// Download a media file, memoized on disk, returning its local path.
    ///
    /// The destination is named by the final path segment of the source URL.
    /// An existing destination is returned without any network request. The
    /// body is streamed straight to the destination file; media files never
    /// have to fit in memory.
    ///
    /// # Errors
    ///
    /// [`FetchError::NoFileName`] when the URL path has no final segment,
    /// otherwise the underlying network or I/O failure.
    pub fn download(&self, url: &str, kind: MediaKind) -> Result<PathBuf, FetchError> {
        tracing::debug!("downloading {} '{url}'", kind.subfolder());

        let parsed = Url::parse(url)?;
        let filename = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| FetchError::NoFileName(url.to_owned()))?;

        let path = self.out_dir.join(kind.subfolder()).join(filename);

        if path.is_file() {
            tracing::debug!("download already exists at {}", path.display());
            return Ok(path);
        }

        let mut reader = self.session.get_reader(url)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&path)?;
        if let Err(err) = io::copy(&mut reader, &mut file) {
            // An aborted transfer must not leave a partial file that the
            // next run would treat as a finished download.
            drop(file);
            let _ = fs::remove_file(&path);
            return Err(err.into());
        }
        Ok(path)
    }

    /// Cache path for a fetched document: `{tmp}/<url path>.html`.
    fn document_path(&self, url: &Url) -> PathBuf {
        let relative = url.path().trim_start_matches('/');
        self.tmp_dir.join(format!("{relative}.html"))
    }
}

/// Write a payload, creating parent directories first.
///
/// The write happens before the fetch result is returned to the caller, which
/// is what makes reruns resume from the last cached resource.
fn write_durably(path: &Path, data: &[u8]) -> Result<(), FetchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)?;
    Ok(())
}
