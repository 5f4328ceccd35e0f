use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use requisite_types::{ConfigObject, ConfigValue};

use super::{ConfigError, ConfigFormat};

/// Nested key/value tree addressed by a path of string keys.
///
/// Paths name a chain of subconfigurations followed by a leaf key, e.g.
/// `["keybinds", "Movement", "sprint"]`.
pub trait ConfigStore {
    /// Look up the value at `path`. An empty path never resolves.
    fn get(&self, path: &[&str]) -> Option<&ConfigValue>;

    /// Store `value` at `path`, creating missing parent subconfigurations.
    fn add(&mut self, path: &[&str], value: ConfigValue) -> Result<(), ConfigError>;

    /// Ensure every segment of `path` exists as a subconfiguration.
    fn create_subconfiguration(&mut self, path: &[&str]) -> Result<(), ConfigError>;

    /// Remove the value at `path`, returning it.
    fn remove(&mut self, path: &[&str]) -> Option<ConfigValue>;

    fn has_key(&self, path: &[&str]) -> bool {
        self.get(path).is_some()
    }

    fn get_subconfiguration(&self, path: &[&str]) -> Option<&ConfigObject> {
        self.get(path).and_then(ConfigValue::as_object)
    }
}

/// Store object behind a [`SharedStore`].
pub type DynStore = dyn ConfigStore + Send + Sync + 'static;

/// Store handle shared by every registry of a session.
pub type SharedStore = Arc<RwLock<DynStore>>;

/// In-memory configuration tree with an optional backing file.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    root: ConfigObject,
    path: Option<PathBuf>,
    format: ConfigFormat,
}

impl Configuration {
    /// Create an empty configuration with no backing file
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a configuration file. A missing file yields an empty tree bound to
    /// `path`, so the first [`save`](Self::save) creates it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let format = ConfigFormat::from_path(&path);
        let root = read_tree(&path, format)?;
        tracing::debug!(path = %path.display(), keys = root.len(), "Opened configuration");
        Ok(Self {
            root,
            path: Some(path),
            format,
        })
    }

    pub fn from_object(root: ConfigObject) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn root(&self) -> &ConfigObject {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Write the tree to its backing file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.path.as_deref().ok_or(ConfigError::NoPath)?;
        write_tree(&self.root, path, self.format)
    }

    /// Write the tree to `path` and rebind the configuration to it.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let path = path.into();
        let format = ConfigFormat::from_path(&path);
        write_tree(&self.root, &path, format)?;
        self.path = Some(path);
        self.format = format;
        Ok(())
    }

    /// Replace the in-memory tree with the contents of the backing file.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let path = self.path.as_deref().ok_or(ConfigError::NoPath)?;
        self.root = read_tree(path, self.format)?;
        Ok(())
    }

    /// Render the tree in this configuration's format.
    pub fn render(&self) -> Result<String, ConfigError> {
        let path = self.path.as_deref().unwrap_or(Path::new("<memory>"));
        self.format.render(&self.root, path)
    }
}

impl ConfigStore for Configuration {
    fn get(&self, path: &[&str]) -> Option<&ConfigValue> {
        let (last, parents) = path.split_last()?;
        let mut current = &self.root;
        for key in parents {
            current = current.get(*key)?.as_object()?;
        }
        current.get(*last)
    }

    fn add(&mut self, path: &[&str], value: ConfigValue) -> Result<(), ConfigError> {
        let (last, parents) = path.split_last().ok_or(ConfigError::EmptyPath)?;
        let section = section_mut(&mut self.root, parents)?;
        section.insert((*last).to_string(), value);
        Ok(())
    }

    fn create_subconfiguration(&mut self, path: &[&str]) -> Result<(), ConfigError> {
        if path.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        section_mut(&mut self.root, path).map(|_| ())
    }

    fn remove(&mut self, path: &[&str]) -> Option<ConfigValue> {
        let (last, parents) = path.split_last()?;
        let mut current = &mut self.root;
        for key in parents {
            current = current.get_mut(*key)?.as_object_mut()?;
        }
        current.remove(*last)
    }
}

/// Walk `path`, creating empty subconfigurations for missing segments.
fn section_mut<'a>(
    root: &'a mut ConfigObject,
    path: &[&str],
) -> Result<&'a mut ConfigObject, ConfigError> {
    let mut current = root;
    for (depth, key) in path.iter().enumerate() {
        match current
            .entry((*key).to_string())
            .or_insert_with(ConfigValue::object)
        {
            ConfigValue::Object(map) => current = map,
            other => {
                return Err(ConfigError::PathConflict {
                    path: path[..=depth].join("."),
                    found: other.type_name(),
                });
            }
        }
    }
    Ok(current)
}

fn read_tree(path: &Path, format: ConfigFormat) -> Result<ConfigObject, ConfigError> {
    if !path.exists() {
        return Ok(ConfigObject::new());
    }
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    format.parse(&contents, path)
}

fn write_tree(root: &ConfigObject, path: &Path, format: ConfigFormat) -> Result<(), ConfigError> {
    let contents = format.render(root, path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "Saved configuration");
    Ok(())
}

/// Read-lock the shared store. A poisoned lock is recovered: the tree is plain
/// data and stays usable after a panicking writer.
pub(crate) fn read_store(store: &SharedStore) -> RwLockReadGuard<'_, DynStore> {
    store.read().unwrap_or_else(|poisoned| {
        tracing::warn!("Configuration lock poisoned, recovering");
        poisoned.into_inner()
    })
}

pub(crate) fn write_store(store: &SharedStore) -> RwLockWriteGuard<'_, DynStore> {
    store.write().unwrap_or_else(|poisoned| {
        tracing::warn!("Configuration lock poisoned, recovering");
        poisoned.into_inner()
    })
}
