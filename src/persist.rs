//! Saving and restoring chart state through a typed key/value store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::{ChartTheme, Labels, LiveChart, StaticChart};
use crate::color::Color;
use crate::error::PersistError;

pub const KEY_CAPTION: &str = "caption";
pub const KEY_HEADER: &str = "header";
pub const KEY_FOOTER: &str = "footer";
pub const KEY_BACKGROUND: &str = "backgroundColor";
pub const KEY_FOREGROUND: &str = "foregroundColor";
pub const KEY_TEXT: &str = "textColor";
pub const KEY_VALUES: &str = "values";

/// A value that can be written to and parsed back from a store field.
pub trait Persist: Sized {
    fn encode(&self) -> String;
    fn decode(raw: &str) -> Option<Self>;
}

impl Persist for String {
    fn encode(&self) -> String {
        let mut out = String::with_capacity(self.len());
        for ch in self.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                _ => out.push(ch),
            }
        }
        out
    }

    fn decode(raw: &str) -> Option<Self> {
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next()? {
                '\\' => out.push('\\'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                _ => return None,
            }
        }
        Some(out)
    }
}

impl Persist for f32 {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl Persist for Color {
    fn encode(&self) -> String {
        format!("{},{},{},{}", self.r, self.g, self.b, self.a)
    }

    fn decode(raw: &str) -> Option<Self> {
        let channels = Vec::<f32>::decode(raw)?;
        match channels.as_slice() {
            &[r, g, b, a] => Some(Color::new(r, g, b, a)),
            _ => None,
        }
    }
}

impl Persist for Vec<f32> {
    fn encode(&self) -> String {
        self.iter()
            .map(f32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    fn decode(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return Some(Vec::new());
        }
        raw.split(',').map(f32::decode).collect()
    }
}

/// Generic key/value backend. Typed access is layered on raw strings.
pub trait PropertyStore {
    fn insert_raw(&mut self, key: &str, raw: String);
    fn raw(&self, key: &str) -> Option<&str>;

    fn set<T: Persist>(&mut self, key: &str, value: &T) {
        self.insert_raw(key, value.encode());
    }

    fn get<T: Persist>(&self, key: &str) -> Result<T, PersistError> {
        let raw = self
            .raw(key)
            .ok_or_else(|| PersistError::MissingKey(key.to_string()))?;
        T::decode(raw).ok_or_else(|| PersistError::Malformed {
            key: key.to_string(),
            raw: raw.to_string(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

impl PropertyStore for MemoryStore {
    fn insert_raw(&mut self, key: &str, raw: String) {
        self.entries.insert(key.to_string(), raw);
    }

    fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

/// `key=value` lines on disk. Blank lines and `#` comments are skipped.
#[derive(Debug)]
pub struct SettingsFile {
    path: PathBuf,
    store: MemoryStore,
}

impl SettingsFile {
    /// Reads `path` if it exists; a missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let mut store = MemoryStore::new();
        match fs::read_to_string(&path) {
            Ok(raw) => {
                for line in raw.lines() {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    // values keep their whitespace; captions may be padded
                    if let Some((key, value)) = line.split_once('=') {
                        store.insert_raw(key.trim(), value.to_string());
                    }
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(PersistError::Io { path, source }),
        }
        Ok(Self { path, store })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn save(&self) -> Result<(), PersistError> {
        let mut buf = String::new();
        for (key, value) in &self.store.entries {
            buf.push_str(&format!("{key}={value}\n"));
        }
        let io_err = |source| PersistError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, buf).map_err(io_err)
    }
}

impl PropertyStore for SettingsFile {
    fn insert_raw(&mut self, key: &str, raw: String) {
        self.store.insert_raw(key, raw);
    }

    fn raw(&self, key: &str) -> Option<&str> {
        self.store.raw(key)
    }
}

/// Chart state that round-trips through a [`PropertyStore`].
///
/// `load` stops at the first missing or malformed key; fields read before
/// it keep their new values.
pub trait Persistent {
    fn save<S: PropertyStore>(&self, store: &mut S);
    fn load<S: PropertyStore>(&mut self, store: &S) -> Result<(), PersistError>;
}

fn save_chrome<S: PropertyStore>(store: &mut S, labels: &Labels, theme: &ChartTheme) {
    store.set(KEY_CAPTION, &labels.caption);
    store.set(KEY_HEADER, &labels.header);
    store.set(KEY_FOOTER, &labels.footer);
    store.set(KEY_BACKGROUND, &theme.background);
    store.set(KEY_FOREGROUND, &theme.foreground);
    store.set(KEY_TEXT, &theme.text);
}

fn load_chrome<S: PropertyStore>(
    store: &S,
    labels: &mut Labels,
    theme: &mut ChartTheme,
) -> Result<(), PersistError> {
    labels.caption = store.get(KEY_CAPTION)?;
    labels.header = store.get(KEY_HEADER)?;
    labels.footer = store.get(KEY_FOOTER)?;
    theme.background = store.get(KEY_BACKGROUND)?;
    theme.foreground = store.get(KEY_FOREGROUND)?;
    theme.text = store.get(KEY_TEXT)?;
    Ok(())
}

impl Persistent for LiveChart {
    fn save<S: PropertyStore>(&self, store: &mut S) {
        save_chrome(store, &self.labels, &self.theme());
        store.set(KEY_VALUES, &self.ring().snapshot().values);
    }

    fn load<S: PropertyStore>(&mut self, store: &S) -> Result<(), PersistError> {
        let mut theme = self.theme();
        let result = load_chrome(store, &mut self.labels, &mut theme)
            .and_then(|()| store.get::<Vec<f32>>(KEY_VALUES))
            .and_then(|values| self.ring().restore(&values));
        self.set_theme(theme);
        result
    }
}

impl Persistent for StaticChart {
    fn save<S: PropertyStore>(&self, store: &mut S) {
        save_chrome(store, &self.labels, &self.theme());
        store.set(KEY_VALUES, &self.values().to_vec());
    }

    fn load<S: PropertyStore>(&mut self, store: &S) -> Result<(), PersistError> {
        let mut theme = self.theme();
        let result = load_chrome(store, &mut self.labels, &mut theme)
            .and_then(|()| store.get::<Vec<f32>>(KEY_VALUES));
        self.set_theme(theme);
        self.set_values(result?);
        Ok(())
    }
}
