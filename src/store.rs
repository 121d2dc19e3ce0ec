// src/store.rs
//! JSON-file comment store. Serves as the blacklist provider and as the sink
//! for auto-blacklisted comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::data_model::{Comment, RemovedComment};
use crate::error::{PipelineError, Result};
use crate::utils::text::normalize;

/// One record in a [`CommentStore`] file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredComment {
    pub id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub like_count: i64,
    /// Removal reason label, for auto-blacklisted comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Report the comment came from.
    #[serde(default, rename = "_reportPath", skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_at: Option<DateTime<Utc>>,
}

impl StoredComment {
    pub fn from_comment(comment: &Comment) -> Self {
        StoredComment {
            id: comment.id.clone(),
            author: comment.author.clone(),
            text: comment.text.clone(),
            like_count: comment.like_count,
            reason: None,
            report_path: None,
            stored_at: Some(Utc::now()),
        }
    }

    pub fn from_removed(removed: &RemovedComment, report_path: Option<&str>) -> Self {
        StoredComment {
            reason: Some(removed.reason.label().to_string()),
            report_path: report_path.map(str::to_string),
            ..StoredComment::from_comment(&removed.comment)
        }
    }
}

/// A list of comments persisted as a JSON array, newest first.
///
/// Every operation re-reads the file, so several stores may point at the same
/// path. Writes go to a temporary file that is renamed over the original. A
/// missing or unreadable file behaves as an empty store.
#[derive(Debug)]
pub struct CommentStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CommentStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CommentStore {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // Guards the file, not in-memory state; poison carries no meaning here.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn store_error(&self, message: impl Into<String>) -> PipelineError {
        PipelineError::StoreError {
            path: self.path.display().to_string(),
            message: message.into(),
        }
    }

    fn load(&self) -> Result<Vec<StoredComment>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.store_error(format!("Failed to read store: {}", e))),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Vec<StoredComment>>(&content) {
            Ok(comments) => Ok(comments),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Comment store is not a valid comment list; treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, comments: &[StoredComment]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let json = serde_json::to_string_pretty(comments)?;
        let written = fs::write(&tmp_path, json).and_then(|_| fs::rename(&tmp_path, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.store_error(format!("Failed to write store: {}", e)));
        }
        debug!(path = %self.path.display(), count = comments.len(), "Saved comment store");
        Ok(())
    }

    pub fn all(&self) -> Result<Vec<StoredComment>> {
        let _guard = self.guard();
        self.load()
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.all()?.len())
    }

    pub fn get(&self, id: &str) -> Result<Option<StoredComment>> {
        Ok(self.all()?.into_iter().find(|c| c.id == id))
    }

    /// Inserts `comment` at the front. Returns false if its id is already stored.
    pub fn add(&self, comment: StoredComment) -> Result<bool> {
        let _guard = self.guard();
        let mut comments = self.load()?;
        if comments.iter().any(|c| c.id == comment.id) {
            return Ok(false);
        }
        comments.insert(0, comment);
        self.save(&comments)?;
        Ok(true)
    }

    /// Inserts every comment whose id is not stored yet, in one write, ahead
    /// of the existing entries. Returns how many were added.
    pub fn add_many<I>(&self, batch: I) -> Result<usize>
    where
        I: IntoIterator<Item = StoredComment>,
    {
        let _guard = self.guard();
        let existing = self.load()?;
        let mut seen: HashSet<String> = existing.iter().map(|c| c.id.clone()).collect();
        let fresh: Vec<StoredComment> = batch
            .into_iter()
            .filter(|c| seen.insert(c.id.clone()))
            .collect();
        if fresh.is_empty() {
            return Ok(0);
        }
        let added = fresh.len();
        let mut comments = fresh;
        comments.extend(existing);
        self.save(&comments)?;
        Ok(added)
    }

    pub fn remove(&self, id: &str) -> Result<bool> {
        Ok(self.take(id)?.is_some())
    }

    fn take(&self, id: &str) -> Result<Option<StoredComment>> {
        let _guard = self.guard();
        let mut comments = self.load()?;
        let Some(position) = comments.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        let taken = comments.remove(position);
        self.save(&comments)?;
        Ok(Some(taken))
    }

    pub fn clear(&self) -> Result<()> {
        let _guard = self.guard();
        self.save(&[])
    }

    /// Moves a comment into `destination`. Returns false if it was not here.
    pub fn move_to(&self, id: &str, destination: &CommentStore) -> Result<bool> {
        match self.take(id)? {
            Some(comment) => {
                destination.add(comment)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Lowercased, trimmed texts of every stored comment, for blacklist matching.
    pub fn normalized_texts(&self) -> Result<HashSet<String>> {
        Ok(self
            .all()?
            .iter()
            .map(|c| normalize(&c.text))
            .filter(|t| !t.is_empty())
            .collect())
    }
}
