//! On-disk OpenClaw document (`openclaw.json`)

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::error::{BackendError, BackendResult};

/// JSON configuration document shared with the OpenClaw gateway.
///
/// All read-modify-write cycles go through [`ConfigStore::update`], which holds
/// an in-process mutex and an exclusive file lock for the whole cycle.
pub struct ConfigStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A missing file is an empty object.
    pub fn load(&self) -> BackendResult<Value> {
        read_document(&self.path)
    }

    /// Run `f` against the current document without writing it back
    pub fn read<T>(&self, f: impl FnOnce(&Value) -> T) -> BackendResult<T> {
        let doc = self.load()?;
        Ok(f(&doc))
    }

    /// Load, mutate and save the document as one step
    pub fn update<T>(&self, f: impl FnOnce(&mut Value) -> BackendResult<T>) -> BackendResult<T> {
        let _guard = self.guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _lock = self.lock_file()?;

        let mut doc = read_document(&self.path)?;
        let result = f(&mut doc)?;
        write_document(&self.path, &doc)?;
        Ok(result)
    }

    /// Write the full document to `dest`
    pub fn export_to(&self, dest: &Path) -> BackendResult<()> {
        let doc = self.load()?;
        write_document(dest, &doc)?;
        info!("[backend] Exported configuration to {}", dest.display());
        Ok(())
    }

    /// Replace the document with the contents of `src`
    pub fn import_from(&self, src: &Path) -> BackendResult<()> {
        if !src.exists() {
            return Err(BackendError::NotFound(src.display().to_string()));
        }
        let incoming = read_document(src)?;

        let _guard = self.guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _lock = self.lock_file()?;
        write_document(&self.path, &incoming)?;
        info!(
            "[backend] Imported configuration from {} into {}",
            src.display(),
            self.path.display()
        );
        Ok(())
    }

    fn lock_file(&self) -> BackendResult<std::fs::File> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BackendError::io(parent, e))?;
        }
        let lock_path = self.path.with_extension("json.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| BackendError::io(&lock_path, e))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| BackendError::io(&lock_path, e))?;
        Ok(lock_file)
    }
}

fn read_document(path: &Path) -> BackendResult<Value> {
    if !path.exists() {
        debug!("[backend] {} does not exist yet", path.display());
        return Ok(Value::Object(Map::new()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| BackendError::io(path, e))?;
    // Some Windows editors prepend a BOM
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(&content);
    if content.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let doc: Value = serde_json::from_str(content).map_err(|source| BackendError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if !doc.is_object() {
        return Err(BackendError::Invalid(format!(
            "{} does not contain a JSON object",
            path.display()
        )));
    }
    Ok(doc)
}

fn write_document(path: &Path, doc: &Value) -> BackendResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BackendError::io(parent, e))?;
    }

    let content = serde_json::to_string_pretty(doc)
        .map_err(|e| BackendError::Invalid(format!("Failed to serialize configuration: {}", e)))?;

    let temp_path = path.with_extension("json.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| BackendError::io(&temp_path, e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| BackendError::io(&temp_path, e))?;
    temp_file
        .sync_all()
        .map_err(|e| BackendError::io(&temp_path, e))?;

    std::fs::rename(&temp_path, path).map_err(|e| BackendError::io(path, e))
}

/// Coerce `value` into an object, replacing anything else
pub(super) fn as_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

/// Walk `path` from `root`, creating objects as needed
pub(super) fn object_at<'a>(root: &'a mut Value, path: &[&str]) -> &'a mut Map<String, Value> {
    let mut current = as_object(root);
    for key in path {
        let child = current
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = as_object(child);
    }
    current
}

/// Remove the object at `path` if it exists and has no keys left
pub(super) fn prune_empty(root: &mut Value, path: &[&str]) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut current = root;
    for key in parents {
        match current.get_mut(*key) {
            Some(next) => current = next,
            None => return,
        }
    }
    if let Some(parent) = current.as_object_mut() {
        let empty = parent
            .get(*last)
            .and_then(Value::as_object)
            .is_some_and(Map::is_empty);
        if empty {
            parent.remove(*last);
        }
    }
}

/// Set `key` to `value`, or remove it when `value` is `None`
pub(super) fn set_or_remove(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    match value {
        Some(v) => {
            map.insert(key.to_string(), v);
        }
        None => {
            map.remove(key);
        }
    }
}

/// Trimmed, non-empty string or `None`
pub(super) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
