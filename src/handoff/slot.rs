#[cfg(test)]
use std::{cell::RefCell, collections::HashMap};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{handoff::QuoteHandoffPayload, prelude::*};

/// Single-use, key-addressed transfer slot.
///
/// A payload is delivered at most once: [`HandoffSlot::take`] removes it.
pub trait HandoffSlot {
    /// Store the payload, replacing whatever is pending under the key.
    fn put(&self, key: &str, payload: &QuoteHandoffPayload) -> Result;

    /// Read and remove the pending payload.
    fn take(&self, key: &str) -> Result<Option<QuoteHandoffPayload>>;
}

/// Slot backed by `<key>.json` files in a directory.
pub struct DirectorySlot {
    root: PathBuf,
}

impl DirectorySlot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl HandoffSlot for DirectorySlot {
    #[instrument(skip_all, fields(key = key))]
    fn put(&self, key: &str, payload: &QuoteHandoffPayload) -> Result {
        let path = self.path(key);
        let contents = serde_json::to_string_pretty(payload)?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        info!(path = %path.display(), "stored the handoff");
        Ok(())
    }

    #[instrument(skip_all, fields(key = key))]
    fn take(&self, key: &str) -> Result<Option<QuoteHandoffPayload>> {
        let path = self.path(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!("nothing is pending");
                return Ok(None);
            }
            Err(error) => {
                return Err(error).with_context(|| format!("failed to read `{}`", path.display()));
            }
        };
        // Removed before parsing, so that a broken payload is not delivered over and over:
        fs::remove_file(&path)
            .with_context(|| format!("failed to remove `{}`", path.display()))?;
        let payload = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(path = %path.display(), "took the handoff");
        Ok(Some(payload))
    }
}

/// In-process slot, keeping the serialized payloads.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySlot(RefCell<HashMap<String, String>>);

#[cfg(test)]
impl HandoffSlot for MemorySlot {
    fn put(&self, key: &str, payload: &QuoteHandoffPayload) -> Result {
        self.0.borrow_mut().insert(key.to_owned(), serde_json::to_string(payload)?);
        Ok(())
    }

    fn take(&self, key: &str) -> Result<Option<QuoteHandoffPayload>> {
        self.0
            .borrow_mut()
            .remove(key)
            .map(|contents| serde_json::from_str(&contents))
            .transpose()
            .map_err(Error::from)
    }
}
