//! Recently searched handles, kept for autocomplete.
//!
//! The cache is an insertion-ordered set capped at
//! [`MAX_RECENT_SEARCHES`](crate::config::MAX_RECENT_SEARCHES) entries. It is
//! read once at startup and written back after every mutation through a
//! [`Storage`] backend, so it survives page reloads when the browser allows
//! `localStorage` and degrades to an in-memory list when it does not.
//!
//! # Persisted Format
//! A JSON array of handle strings under the `recentSearches` key, oldest
//! first.

use crate::config::{MAX_RECENT_SEARCHES, RECENT_SEARCHES_KEY};
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug)]
pub enum CacheError {
    /// Stored value was not a JSON array of strings.
    Parse(serde_json::Error),
    /// The in-memory list could not be encoded for storage.
    Serialize(serde_json::Error),
    /// The backend refused the write (quota exceeded, storage disabled).
    Storage(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Parse(e) => write!(f, "Malformed recent searches: {}", e),
            CacheError::Serialize(e) => write!(f, "Could not encode recent searches: {}", e),
            CacheError::Storage(msg) => write!(f, "Could not persist recent searches: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Parse(e) | CacheError::Serialize(e) => Some(e),
            CacheError::Storage(_) => None,
        }
    }
}

/// Key-value string store the cache persists into.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }
}

/// Browser `window.localStorage`.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Returns `None` when the page has no access to local storage.
    pub fn open() -> Option<Self> {
        match gloo_utils::window().local_storage() {
            Ok(Some(inner)) => Some(Self { inner }),
            Ok(None) => None,
            Err(e) => {
                warn!("localStorage access denied: {}", describe_js_error(&e));
                None
            }
        }
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.inner.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Reading '{}' failed: {}", key, describe_js_error(&e));
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| CacheError::Storage(describe_js_error(&e)))
    }
}

fn describe_js_error(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Process-lifetime storage, used when local storage is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Local storage if the browser grants it, otherwise an in-memory store.
pub fn open_storage() -> Box<dyn Storage> {
    match LocalStorage::open() {
        Some(storage) => Box::new(storage),
        None => {
            warn!("localStorage unavailable, recent searches will not survive a reload");
            Box::new(MemoryStorage::default())
        }
    }
}

pub struct RecentSearchCache<S: Storage> {
    storage: S,
    /// Oldest first.
    handles: VecDeque<String>,
}

impl<S: Storage> RecentSearchCache<S> {
    /// Read the persisted list. Missing or malformed data yields an empty cache.
    pub fn load(storage: S) -> Self {
        let handles = match storage.get(RECENT_SEARCHES_KEY) {
            None => VecDeque::new(),
            Some(raw) => parse_handles(&raw).unwrap_or_else(|e| {
                warn!("{}, starting with an empty list", e);
                VecDeque::new()
            }),
        };
        debug!("Loaded {} recent searches", handles.len());
        Self { storage, handles }
    }

    /// Record `handle` as the most recent search and persist the list.
    ///
    /// The in-memory list is updated even if persisting fails.
    pub fn save(&mut self, handle: &str) -> Result<(), CacheError> {
        push_recent(&mut self.handles, handle.to_string());
        self.persist()
    }

    fn persist(&self) -> Result<(), CacheError> {
        let raw = serde_json::to_string(&self.handles).map_err(CacheError::Serialize)?;
        self.storage.set(RECENT_SEARCHES_KEY, &raw)
    }

    /// Cached handles starting with `prefix`, ignoring case.
    pub fn matches(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.handles
            .iter()
            .filter(|h| h.to_lowercase().starts_with(&prefix))
            .take(MAX_RECENT_SEARCHES)
            .cloned()
            .collect()
    }

    pub fn handles(&self) -> impl Iterator<Item = &str> {
        self.handles.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

fn parse_handles(raw: &str) -> Result<VecDeque<String>, CacheError> {
    let stored: Option<Vec<String>> = serde_json::from_str(raw).map_err(CacheError::Parse)?;
    let mut handles = VecDeque::with_capacity(MAX_RECENT_SEARCHES + 1);
    for handle in stored.unwrap_or_default() {
        push_recent(&mut handles, handle);
    }
    Ok(handles)
}

fn push_recent(handles: &mut VecDeque<String>, handle: String) {
    if let Some(pos) = handles.iter().position(|h| *h == handle) {
        handles.remove(pos);
    }
    handles.push_back(handle);
    while handles.len() > MAX_RECENT_SEARCHES {
        handles.pop_front();
    }
}
