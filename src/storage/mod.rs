// ABOUTME: Local key-value storage abstraction with file and in-memory backends
// ABOUTME: Each key holds one whole document that is overwritten on every write

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Local storage
//!
//! The client keeps a handful of small documents locally (favorites, theme,
//! session, local ratings). There is no partial update: callers read a
//! document, modify it, and write the whole thing back.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::AppResult;

/// One JSON document per file in a data directory
pub mod file;

/// Process-local map, used by tests and ephemeral sessions
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Whole-document key-value storage
pub trait KeyValueStore: Send + Sync {
    /// Read the raw document stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be read
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the document stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete the document stored under `key`; missing keys are not an error
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Shared handle to a store
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Read and decode a JSON document
///
/// # Errors
///
/// Returns `StorageError` on read failure or `SerializationError` on bad JSON
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> AppResult<Option<T>> {
    store
        .get(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(Into::into)
}

/// Encode and write a JSON document
///
/// # Errors
///
/// Returns `SerializationError` on encode failure or `StorageError` on write failure
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> AppResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
