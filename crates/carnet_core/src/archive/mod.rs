//! Attachment archiving.
//!
//! # Responsibility
//! - Copy attachment files referenced by an inbound message into the
//!   per-user archive directory.
//!
//! # Invariants
//! - A per-file copy failure is logged and skipped; it never aborts the
//!   remaining files or the overall capture.
//! - A same-named prior attachment is overwritten silently (no versioning).

use log::{info, warn};
use std::path::{Path, PathBuf};

/// Copies attachments into `<archive_root>/<user>/<basename>`.
pub struct AttachmentArchiver {
    archive_root: PathBuf,
}

impl AttachmentArchiver {
    /// Creates an archiver rooted at `archive_root`. Per-user directories
    /// are created lazily on first use.
    pub fn new(archive_root: impl Into<PathBuf>) -> Self {
        Self {
            archive_root: archive_root.into(),
        }
    }

    /// Directory holding one user's archived attachments.
    pub fn user_dir(&self, user_id: &str) -> PathBuf {
        self.archive_root.join(user_id)
    }

    /// Archives each source file, returning the stored destination paths.
    ///
    /// Failed copies are skipped; the returned list may be empty.
    pub fn archive(&self, user_id: &str, sources: &[PathBuf]) -> Vec<String> {
        if sources.is_empty() {
            return Vec::new();
        }

        let user_dir = self.user_dir(user_id);
        if let Err(err) = std::fs::create_dir_all(&user_dir) {
            warn!(
                "event=attachment_archive module=archive status=error user={user_id} \
                 reason=dir_create error={err}"
            );
            return Vec::new();
        }

        let mut stored = Vec::new();
        for source in sources {
            match copy_one(source, &user_dir) {
                Ok(destination) => {
                    info!(
                        "event=attachment_archive module=archive status=ok user={user_id} \
                         stored={destination}"
                    );
                    stored.push(destination);
                }
                Err(reason) => {
                    warn!(
                        "event=attachment_archive module=archive status=skipped user={user_id} \
                         source={} reason={reason}",
                        source.display()
                    );
                }
            }
        }
        stored
    }
}

fn copy_one(source: &Path, user_dir: &Path) -> Result<String, String> {
    let base_name = source
        .file_name()
        .ok_or_else(|| "source path has no file name".to_string())?;
    let destination = user_dir.join(base_name);
    std::fs::copy(source, &destination).map_err(|err| err.to_string())?;
    Ok(destination.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::AttachmentArchiver;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn empty_source_list_archives_nothing() {
        let root = TempDir::new().expect("temp dir");
        let archiver = AttachmentArchiver::new(root.path());
        assert!(archiver.archive("alice", &[]).is_empty());
        assert!(!archiver.user_dir("alice").exists());
    }

    #[test]
    fn same_named_attachment_overwrites_prior_copy() {
        let root = TempDir::new().expect("temp dir");
        let inbox = TempDir::new().expect("temp dir");
        let source = inbox.path().join("photo.jpg");

        let archiver = AttachmentArchiver::new(root.path());

        std::fs::write(&source, b"first").expect("write source");
        archiver.archive("alice", std::slice::from_ref(&source));
        std::fs::write(&source, b"second").expect("rewrite source");
        let stored = archiver.archive("alice", std::slice::from_ref(&source));

        assert_eq!(stored.len(), 1);
        let kept = std::fs::read(PathBuf::from(&stored[0])).expect("read stored");
        assert_eq!(kept, b"second");
    }
}
