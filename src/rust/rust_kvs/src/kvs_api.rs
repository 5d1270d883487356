// *******************************************************************************
// Copyright (c) 2026 Contributors to the Eclipse Foundation
//
// See the NOTICE file(s) distributed with this work for additional
// information regarding copyright ownership.
//
// This program and the accompanying materials are made available under the
// terms of the Apache License Version 2.0 which is available at
// <https://www.apache.org/licenses/LICENSE-2.0>
//
// SPDX-License-Identifier: Apache-2.0
// *******************************************************************************
use crate::error_code::ErrorCode;
use crate::kvs_value::KvsValue;
use core::fmt;

/// Identifies one of the (at most [`KvsBuilder::max_instances`](crate::kvs_builder::KvsBuilder::max_instances))
/// concurrently open KVS instances sharing a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub usize);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<InstanceId> for usize {
    fn from(value: InstanceId) -> Self {
        value.0
    }
}

/// Identifies a generation within the rotating snapshot ring.
///
/// `SnapshotId(0)` is always the current KVS state. Higher IDs are progressively
/// older snapshots, up to the backend's `snapshot_max_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotId(pub usize);

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Controls how missing default values are treated when opening a KVS instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvsDefaults {
    /// Don't load defaults at all.
    Ignored,
    /// Load defaults if present; an absent defaults file is not an error.
    Optional,
    /// Defaults must be present; a missing or unreadable defaults file is an error.
    Required,
}

/// Controls how a missing current KVS snapshot is treated when opening an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvsLoad {
    /// Don't load any persisted state; start with an empty KVS.
    Ignored,
    /// Load the persisted state if present; an absent snapshot is not an error.
    Optional,
    /// The persisted state must be present; a missing or unreadable snapshot is an error.
    Required,
}

/// Public operations supported by a KVS instance.
pub trait KvsApi {
    /// Resets a key-value-storage to its initial state
    fn reset(&self) -> Result<(), ErrorCode>;

    /// Reset a key-value pair in the storage to its initial state
    fn reset_key(&self, key: &str) -> Result<(), ErrorCode>;

    /// Get list of all keys
    fn get_all_keys(&self) -> Result<Vec<String>, ErrorCode>;

    /// Check if a key exists
    fn key_exists(&self, key: &str) -> Result<bool, ErrorCode>;

    /// Get the assigned value for a given key
    fn get_value(&self, key: &str) -> Result<KvsValue, ErrorCode>;

    /// Get the assigned value for a given key, converted to `T`.
    fn get_value_as<T>(&self, key: &str) -> Result<T, ErrorCode>
    where
        for<'a> T: TryFrom<&'a KvsValue> + core::clone::Clone,
        for<'a> <T as TryFrom<&'a KvsValue>>::Error: core::fmt::Debug;

    /// Get default value for a given key
    fn get_default_value(&self, key: &str) -> Result<KvsValue, ErrorCode>;

    /// Return if the value wasn't set yet and uses its default value
    fn is_value_default(&self, key: &str) -> Result<bool, ErrorCode>;

    /// Assign a value to a given key
    fn set_value<S: Into<String>, V: Into<KvsValue>>(
        &self,
        key: S,
        value: V,
    ) -> Result<(), ErrorCode>;

    /// Remove a key
    fn remove_key(&self, key: &str) -> Result<(), ErrorCode>;

    /// Flush the in-memory key-value-storage to the persistent storage
    fn flush(&self) -> Result<(), ErrorCode>;

    /// Get the count of available snapshots
    fn snapshot_count(&self) -> usize;

    /// Return maximum number of snapshots to store.
    fn snapshot_max_count(&self) -> usize;

    /// Recover key-value-storage from snapshot
    fn snapshot_restore(&self, snapshot_id: SnapshotId) -> Result<(), ErrorCode>;
}
