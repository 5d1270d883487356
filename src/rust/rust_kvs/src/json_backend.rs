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
use crate::kvs_api::{InstanceId, SnapshotId};
use crate::kvs_backend::KvsBackend;
use crate::kvs_value::{KvsMap, KvsValue};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tinyjson::{JsonGenerateError, JsonParseError, JsonValue};

// On-disk representation: a top-level JSON object whose members are type-tagged values.
// {
//   "my_int": { "t": "i32", "v": 42 },
//   "my_float": { "t": "f64", "v": 3.1415 },
//   "my_bool": { "t": "bool", "v": true },
//   "my_string": { "t": "str", "v": "hello" },
//   "my_array": { "t": "arr", "v": [ ... ] },
//   "my_object": { "t": "obj", "v": { ... } },
//   "my_null": { "t": "null", "v": null }
// }
//
// Both the current/snapshot files and the defaults file use this shape; the defaults
// file additionally has no accompanying hash sidecar.

/// Backend-specific JsonValue -> KvsValue conversion.
///
/// Unlike a lenient decoder, an unknown tag, a missing `t`/`v` member, a type mismatch
/// between `t` and `v`, or a numeric value out of range for the tagged type is rejected
/// rather than silently degraded to `Null` - a corrupted value must not masquerade as one.
impl TryFrom<JsonValue> for KvsValue {
    type Error = ErrorCode;

    fn try_from(val: JsonValue) -> Result<KvsValue, ErrorCode> {
        let JsonValue::Object(mut obj) = val else {
            return Err(ErrorCode::JsonParserError);
        };

        let (Some(JsonValue::String(type_str)), Some(value)) = (obj.remove("t"), obj.remove("v"))
        else {
            return Err(ErrorCode::JsonParserError);
        };

        match (type_str.as_str(), value) {
            ("i32", JsonValue::Number(v)) => number_to_int(v, i32::MIN as f64, i32::MAX as f64)
                .map(|v| KvsValue::I32(v as i32)),
            ("u32", JsonValue::Number(v)) => number_to_int(v, u32::MIN as f64, u32::MAX as f64)
                .map(|v| KvsValue::U32(v as u32)),
            ("i64", JsonValue::Number(v)) => number_to_int(v, i64::MIN as f64, i64::MAX as f64)
                .map(|v| KvsValue::I64(v as i64)),
            ("u64", JsonValue::Number(v)) => number_to_int(v, u64::MIN as f64, u64::MAX as f64)
                .map(|v| KvsValue::U64(v as u64)),
            ("f64", JsonValue::Number(v)) => {
                if v.is_finite() {
                    Ok(KvsValue::F64(v))
                } else {
                    Err(ErrorCode::JsonParserError)
                }
            }
            ("bool", JsonValue::Boolean(v)) => Ok(KvsValue::Boolean(v)),
            ("str", JsonValue::String(v)) => Ok(KvsValue::String(v)),
            ("null", JsonValue::Null) => Ok(KvsValue::Null),
            ("arr", JsonValue::Array(v)) => v
                .into_iter()
                .map(KvsValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(KvsValue::Array),
            ("obj", JsonValue::Object(v)) => json_object_to_kvs_map(v).map(KvsValue::Object),
            _ => Err(ErrorCode::JsonParserError),
        }
    }
}

/// Check that `v` is a whole number within `[min, max]` before truncating to an integer.
fn number_to_int(v: f64, min: f64, max: f64) -> Result<f64, ErrorCode> {
    if v.is_finite() && v.fract() == 0.0 && v >= min && v <= max {
        Ok(v)
    } else {
        Err(ErrorCode::JsonParserError)
    }
}

/// Convert every member of a JSON object into a `KvsMap`, where each member's value is
/// itself a type-tagged entry (see module documentation).
fn json_object_to_kvs_map(obj: HashMap<String, JsonValue>) -> Result<KvsMap, ErrorCode> {
    obj.into_iter()
        .map(|(k, v)| KvsValue::try_from(v).map(|v| (k, v)))
        .collect()
}

/// Backend-specific KvsValue -> JsonValue conversion.
impl From<KvsValue> for JsonValue {
    fn from(val: KvsValue) -> JsonValue {
        let mut obj = HashMap::new();
        match val {
            KvsValue::I32(n) => {
                obj.insert("t".to_string(), JsonValue::String("i32".to_string()));
                obj.insert("v".to_string(), JsonValue::Number(n as f64));
            }
            KvsValue::U32(n) => {
                obj.insert("t".to_string(), JsonValue::String("u32".to_string()));
                obj.insert("v".to_string(), JsonValue::Number(n as f64));
            }
            KvsValue::I64(n) => {
                obj.insert("t".to_string(), JsonValue::String("i64".to_string()));
                obj.insert("v".to_string(), JsonValue::Number(n as f64));
            }
            KvsValue::U64(n) => {
                obj.insert("t".to_string(), JsonValue::String("u64".to_string()));
                obj.insert("v".to_string(), JsonValue::Number(n as f64));
            }
            KvsValue::F64(n) => {
                obj.insert("t".to_string(), JsonValue::String("f64".to_string()));
                obj.insert("v".to_string(), JsonValue::Number(n));
            }
            KvsValue::Boolean(b) => {
                obj.insert("t".to_string(), JsonValue::String("bool".to_string()));
                obj.insert("v".to_string(), JsonValue::Boolean(b));
            }
            KvsValue::String(s) => {
                obj.insert("t".to_string(), JsonValue::String("str".to_string()));
                obj.insert("v".to_string(), JsonValue::String(s));
            }
            KvsValue::Null => {
                obj.insert("t".to_string(), JsonValue::String("null".to_string()));
                obj.insert("v".to_string(), JsonValue::Null);
            }
            KvsValue::Array(arr) => {
                obj.insert("t".to_string(), JsonValue::String("arr".to_string()));
                obj.insert(
                    "v".to_string(),
                    JsonValue::Array(arr.into_iter().map(JsonValue::from).collect()),
                );
            }
            KvsValue::Object(map) => {
                obj.insert("t".to_string(), JsonValue::String("obj".to_string()));
                obj.insert(
                    "v".to_string(),
                    JsonValue::Object(
                        map.into_iter()
                            .map(|(k, v)| (k, JsonValue::from(v)))
                            .collect(),
                    ),
                );
            }
        }
        JsonValue::Object(obj)
    }
}

/// tinyjson::JsonParseError -> ErrorCode::JsonParseError
impl From<JsonParseError> for ErrorCode {
    fn from(cause: JsonParseError) -> Self {
        eprintln!(
            "error: JSON parser error: line = {}, column = {}",
            cause.line(),
            cause.column()
        );
        ErrorCode::JsonParserError
    }
}

/// tinyjson::JsonGenerateError -> ErrorCode::JsonGenerateError
impl From<JsonGenerateError> for ErrorCode {
    fn from(cause: JsonGenerateError) -> Self {
        eprintln!("error: JSON generator error: msg = {}", cause.message());
        ErrorCode::JsonGeneratorError
    }
}

/// Builder for `JsonBackend`.
pub struct JsonBackendBuilder {
    working_dir: PathBuf,
    snapshot_max_count: usize,
}

impl JsonBackendBuilder {
    /// Create `JsonBackendBuilder`.
    ///
    /// Defaults:
    /// - `working_dir` - empty `PathBuf`, CWD is used.
    /// - `snapshot_max_count` - 3 snapshots.
    pub fn new() -> Self {
        Self {
            working_dir: PathBuf::new(),
            snapshot_max_count: 3,
        }
    }

    /// Set the working directory used by the JSON backend.
    pub fn working_dir(mut self, working_dir: PathBuf) -> Self {
        self.working_dir = working_dir;
        self
    }

    /// Set max number of snapshots.
    pub fn snapshot_max_count(mut self, snapshot_max_count: usize) -> Self {
        self.snapshot_max_count = snapshot_max_count;
        self
    }

    /// Finalize the builder and create JSON backend.
    pub fn build(self) -> JsonBackend {
        JsonBackend {
            working_dir: self.working_dir,
            snapshot_max_count: self.snapshot_max_count,
        }
    }
}

impl Default for JsonBackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// KVS backend implementation based on TinyJSON.
#[derive(Clone, PartialEq)]
pub struct JsonBackend {
    working_dir: PathBuf,
    snapshot_max_count: usize,
}

impl JsonBackend {
    fn parse(s: &str) -> Result<JsonValue, ErrorCode> {
        s.parse().map_err(ErrorCode::from)
    }

    fn stringify(val: &JsonValue) -> Result<String, ErrorCode> {
        val.stringify().map_err(ErrorCode::from)
    }

    /// Write `contents` to `path` atomically via a sibling temp file and rename.
    fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ErrorCode> {
        let mut tmp_path = path.as_os_str().to_owned();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Rotate snapshots
    ///
    /// Evicts whatever sits at `snapshot_max_count` (the oldest generation that would
    /// overflow the ring), then shifts every remaining generation one slot older, from
    /// `snapshot_max_count - 1` down to `0`. The caller is expected to write the new
    /// current state to generation `0` afterwards.
    ///
    /// # Features
    ///   * `FEAT_REQ__KVS__snapshots`
    ///
    /// # Return Values
    ///   * Ok: Rotation successful, also if no rotation was needed
    ///   * `ErrorCode::IntegrityCorrupted`: A snapshot/hash pair is incomplete
    fn snapshot_rotate(&self, instance_id: InstanceId) -> Result<(), ErrorCode> {
        if self.snapshot_max_count() == 0 {
            return Ok(());
        }

        let overflow_id = SnapshotId(self.snapshot_max_count());
        let overflow_kvs = self.kvs_file_path(instance_id, overflow_id);
        let overflow_hash = self.hash_file_path(instance_id, overflow_id);
        if overflow_kvs.exists() {
            fs::remove_file(&overflow_kvs)?;
        }
        if overflow_hash.exists() {
            fs::remove_file(&overflow_hash)?;
        }

        for idx in (0..self.snapshot_max_count()).rev() {
            let old_snapshot_id = SnapshotId(idx);
            let new_snapshot_id = SnapshotId(idx + 1);

            let hash_path_old = self.hash_file_path(instance_id, old_snapshot_id);
            let snap_name_old = Self::kvs_file_name(instance_id, old_snapshot_id);
            let snap_path_old = self.kvs_file_path(instance_id, old_snapshot_id);

            let snap_old_exists = snap_path_old.exists();
            let hash_old_exists = hash_path_old.exists();

            // Both files must exist to rotate. If neither exist - nothing to do.
            if !snap_old_exists && !hash_old_exists {
                continue;
            }
            // Either snapshot or hash file got removed - erroneous scenario.
            else if !snap_old_exists || !hash_old_exists {
                return Err(ErrorCode::IntegrityCorrupted);
            }

            let hash_path_new = self.hash_file_path(instance_id, new_snapshot_id);
            let snap_name_new = Self::kvs_file_name(instance_id, new_snapshot_id);
            let snap_path_new = self.kvs_file_path(instance_id, new_snapshot_id);

            println!("rotating: {snap_name_old} -> {snap_name_new}");

            fs::rename(hash_path_old, hash_path_new)?;
            fs::rename(snap_path_old, snap_path_new)?;
        }

        Ok(())
    }

    /// Check path extensions are correct.
    fn check_extension(path: &Path, extension: &str, error: ErrorCode) -> Result<(), ErrorCode> {
        let ext = path.extension();
        if ext.is_some_and(|ep| ep.to_str().is_some_and(|es| es == extension)) {
            Ok(())
        } else {
            Err(error)
        }
    }

    fn check_path_extensions(kvs_path: &Path, hash_path: &Path) -> Result<(), ErrorCode> {
        Self::check_extension(kvs_path, "json", ErrorCode::KvsFileReadError)?;
        Self::check_extension(hash_path, "hash", ErrorCode::KvsHashFileReadError)?;
        Ok(())
    }

    /// Parse a type-tagged JSON object string into a `KvsMap`.
    fn parse_kvs_map(json_str: &str) -> Result<KvsMap, ErrorCode> {
        let json_value = Self::parse(json_str)?;
        match json_value {
            JsonValue::Object(obj) => json_object_to_kvs_map(obj),
            _ => Err(ErrorCode::JsonParserError),
        }
    }

    /// Load and hash-verify a KVS snapshot (current state or a prior generation).
    pub(super) fn load(kvs_path: &Path, hash_path: &Path) -> Result<KvsMap, ErrorCode> {
        Self::check_path_extensions(kvs_path, hash_path)?;

        let json_str = fs::read_to_string(kvs_path)?;
        let hash_bytes = fs::read(hash_path)?;

        if hash_bytes.len() != 4 {
            return Err(ErrorCode::ValidationFailed);
        }

        let file_hash =
            u32::from_be_bytes([hash_bytes[0], hash_bytes[1], hash_bytes[2], hash_bytes[3]]);
        let hash_kvs = adler32::RollingAdler32::from_buffer(json_str.as_bytes()).hash();

        if hash_kvs != file_hash {
            return Err(ErrorCode::ValidationFailed);
        }

        Self::parse_kvs_map(&json_str)
    }

    /// Load the defaults file. Unlike [`Self::load`], this file carries no hash sidecar -
    /// it is provided externally, not written by this backend.
    pub(super) fn load_defaults_file(defaults_path: &Path) -> Result<KvsMap, ErrorCode> {
        Self::check_extension(defaults_path, "json", ErrorCode::KvsFileReadError)?;
        let json_str = fs::read_to_string(defaults_path)?;
        Self::parse_kvs_map(&json_str)
    }

    pub(super) fn save(
        kvs_map: &KvsMap,
        kvs_path: &Path,
        hash_path: &Path,
    ) -> Result<(), ErrorCode> {
        Self::check_path_extensions(kvs_path, hash_path)?;

        let json_value = JsonValue::Object(
            kvs_map
                .iter()
                .map(|(k, v)| (k.clone(), JsonValue::from(v.clone())))
                .collect(),
        );

        let json_str = Self::stringify(&json_value)?;
        Self::write_atomic(kvs_path, json_str.as_bytes())?;

        let hash = adler32::RollingAdler32::from_buffer(json_str.as_bytes()).hash();
        Self::write_atomic(hash_path, &hash.to_be_bytes())?;

        Ok(())
    }

    /// Get KVS file name.
    pub fn kvs_file_name(instance_id: InstanceId, snapshot_id: SnapshotId) -> String {
        format!("kvs_{instance_id}_{snapshot_id}.json")
    }

    /// Get KVS file path in working directory.
    pub fn kvs_file_path(&self, instance_id: InstanceId, snapshot_id: SnapshotId) -> PathBuf {
        self.working_dir
            .join(Self::kvs_file_name(instance_id, snapshot_id))
    }

    /// Get hash file name.
    pub fn hash_file_name(instance_id: InstanceId, snapshot_id: SnapshotId) -> String {
        format!("kvs_{instance_id}_{snapshot_id}.hash")
    }

    /// Get hash file path in working directory.
    pub fn hash_file_path(&self, instance_id: InstanceId, snapshot_id: SnapshotId) -> PathBuf {
        self.working_dir
            .join(Self::hash_file_name(instance_id, snapshot_id))
    }

    /// Get defaults file name.
    pub fn defaults_file_name(instance_id: InstanceId) -> String {
        format!("kvs_{instance_id}_default.json")
    }

    /// Get defaults file path in working directory.
    pub fn defaults_file_path(&self, instance_id: InstanceId) -> PathBuf {
        self.working_dir.join(Self::defaults_file_name(instance_id))
    }
}

impl KvsBackend for JsonBackend {
    fn load_kvs(
        &self,
        instance_id: InstanceId,
        snapshot_id: SnapshotId,
    ) -> Result<KvsMap, ErrorCode> {
        let kvs_path = self.kvs_file_path(instance_id, snapshot_id);
        let hash_path = self.hash_file_path(instance_id, snapshot_id);
        Self::load(&kvs_path, &hash_path)
    }

    fn load_defaults(&self, instance_id: InstanceId) -> Result<KvsMap, ErrorCode> {
        let defaults_path = self.defaults_file_path(instance_id);
        Self::load_defaults_file(&defaults_path)
    }

    fn flush(&self, instance_id: InstanceId, kvs_map: &KvsMap) -> Result<(), ErrorCode> {
        self.snapshot_rotate(instance_id).map_err(|e| {
            eprintln!("error: snapshot_rotate failed: {e:?}");
            e
        })?;
        let snapshot_id = SnapshotId(0);
        let kvs_path = self.kvs_file_path(instance_id, snapshot_id);
        let hash_path = self.hash_file_path(instance_id, snapshot_id);
        Self::save(kvs_map, &kvs_path, &hash_path).map_err(|e| {
            eprintln!("error: save failed: {e:?}");
            e
        })?;
        Ok(())
    }

    /// Count snapshots present on disk, i.e. generations `1..=snapshot_max_count`.
    /// Generation `0` is the current state, not a snapshot.
    fn snapshot_count(&self, instance_id: InstanceId) -> usize {
        let mut count = 0;

        for idx in 1..=self.snapshot_max_count {
            let snapshot_id = SnapshotId(idx);
            let snapshot_path = self.kvs_file_path(instance_id, snapshot_id);
            if !snapshot_path.exists() {
                break;
            }

            count += 1;
        }

        count
    }

    fn snapshot_max_count(&self) -> usize {
        self.snapshot_max_count
    }

    fn snapshot_restore(
        &self,
        instance_id: InstanceId,
        snapshot_id: SnapshotId,
    ) -> Result<KvsMap, ErrorCode> {
        // fail if the snapshot ID is the current KVS
        if snapshot_id == SnapshotId(0) {
            eprintln!("error: tried to restore current KVS as snapshot");
            return Err(ErrorCode::InvalidSnapshotId);
        }

        if self.snapshot_count(instance_id) < snapshot_id.0 {
            eprintln!("error: tried to restore a non-existing snapshot");
            return Err(ErrorCode::InvalidSnapshotId);
        }

        self.load_kvs(instance_id, snapshot_id)
    }
}



#[cfg(test)]
mod error_code_tests {
    use crate::error_code::ErrorCode;
    use tinyjson::JsonValue;

    #[test]
    fn test_from_json_parse_error_to_json_parser_error() {
        let error = tinyjson::JsonParser::new("[1, 2, 3".chars())
            .parse()
            .unwrap_err();
        assert_eq!(ErrorCode::from(error), ErrorCode::JsonParserError);
    }

    #[test]
    fn test_from_json_generate_error_to_json_generate_error() {
        let data: JsonValue = JsonValue::Number(f64::INFINITY);
        let error = data.stringify().unwrap_err();
        assert_eq!(ErrorCode::from(error), ErrorCode::JsonGeneratorError);
    }
}

#[cfg(test)]
mod json_backend_builder_tests {
    use crate::{json_backend::JsonBackendBuilder, prelude::KvsBackend};
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_new_ok() {
        let builder = JsonBackendBuilder::new();

        // Assert builder params.
        assert_eq!(builder.working_dir, PathBuf::new());
        assert_eq!(builder.snapshot_max_count, 3);

        // Build and assert backend params.
        let backend = builder.build();
        assert_eq!(backend.working_dir, PathBuf::new());
        assert_eq!(backend.snapshot_max_count(), 3);
    }

    #[test]
    fn test_default_ok() {
        let builder = JsonBackendBuilder::default();

        // Assert builder params.
        assert_eq!(builder.working_dir, PathBuf::new());
        assert_eq!(builder.snapshot_max_count, 3);

        // Build and assert backend params.
        let backend = builder.build();
        assert_eq!(backend.working_dir, PathBuf::new());
        assert_eq!(backend.snapshot_max_count(), 3);
    }

    #[test]
    fn test_working_dir_ok() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let builder = JsonBackendBuilder::new().working_dir(dir_path.clone());

        // Assert builder params.
        assert_eq!(builder.working_dir, dir_path.clone());
        assert_eq!(builder.snapshot_max_count, 3);

        // Build and assert backend params.
        let backend = builder.build();
        assert_eq!(backend.working_dir, dir_path);
        assert_eq!(backend.snapshot_max_count(), 3);
    }

    #[test]
    fn test_snapshot_max_count_ok() {
        let builder = JsonBackendBuilder::new().snapshot_max_count(10);

        // Assert builder params.
        assert_eq!(builder.working_dir, PathBuf::new());
        assert_eq!(builder.snapshot_max_count, 10);

        // Build and assert backend params.
        let backend = builder.build();
        assert_eq!(backend.working_dir, PathBuf::new());
        assert_eq!(backend.snapshot_max_count(), 10);
    }

    #[test]
    fn test_chained_ok() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let builder = JsonBackendBuilder::new()
            .working_dir(dir_path.clone())
            .snapshot_max_count(10);

        // Assert builder params.
        assert_eq!(builder.working_dir, dir_path.clone());
        assert_eq!(builder.snapshot_max_count, 10);

        // Build and assert backend params.
        let backend = builder.build();
        assert_eq!(backend.working_dir, dir_path);
        assert_eq!(backend.snapshot_max_count(), 10);
    }
}

#[cfg(test)]
mod json_backend_tests {
    use crate::error_code::ErrorCode;
    use crate::json_backend::{JsonBackend, JsonBackendBuilder};
    use crate::kvs_api::{InstanceId, SnapshotId};
    use crate::kvs_value::{KvsMap, KvsValue};
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn create_kvs_files(working_dir: &Path) -> (PathBuf, PathBuf) {
        let kvs_map = KvsMap::from([
            ("k1".to_string(), KvsValue::from("v1")),
            ("k2".to_string(), KvsValue::from(true)),
            ("k3".to_string(), KvsValue::from(123.4)),
        ]);
        let kvs_path = working_dir.join("kvs.json");
        let hash_path = working_dir.join("kvs.hash");
        JsonBackend::save(&kvs_map, &kvs_path, &hash_path).unwrap();
        (kvs_path, hash_path)
    }

    #[test]
    fn test_load_ok() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let (kvs_path, hash_path) = create_kvs_files(&dir_path);

        let kvs_map = JsonBackend::load(&kvs_path, &hash_path).unwrap();
        assert_eq!(kvs_map.len(), 3);
    }

    #[test]
    fn test_load_kvs_not_found() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let (kvs_path, hash_path) = create_kvs_files(&dir_path);
        std::fs::remove_file(&kvs_path).unwrap();

        assert!(
            JsonBackend::load(&kvs_path, &hash_path).is_err_and(|e| e == ErrorCode::FileNotFound)
        );
    }

    #[test]
    fn test_load_kvs_invalid_extension() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let kvs_path = dir_path.join("kvs.invalid_ext");
        let hash_path = dir_path.join("kvs.hash");

        assert!(JsonBackend::load(&kvs_path, &hash_path)
            .is_err_and(|e| e == ErrorCode::KvsFileReadError));
    }

    #[test]
    fn test_load_hash_not_found() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let (kvs_path, hash_path) = create_kvs_files(&dir_path);
        std::fs::remove_file(&hash_path).unwrap();

        assert!(
            JsonBackend::load(&kvs_path, &hash_path).is_err_and(|e| e == ErrorCode::FileNotFound)
        );
    }

    #[test]
    fn test_load_hash_invalid_extension() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let kvs_path = dir_path.join("kvs.json");
        let hash_path = dir_path.join("kvs.invalid_ext");

        assert!(JsonBackend::load(&kvs_path, &hash_path)
            .is_err_and(|e| e == ErrorCode::KvsHashFileReadError));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let kvs_path = dir_path.join("kvs.json");
        let hash_path = dir_path.join("kvs.hash");

        let contents = "{\"malformed_json\"}";
        let hash = adler32::RollingAdler32::from_buffer(contents.as_bytes()).hash();
        std::fs::write(kvs_path.clone(), contents).unwrap();
        std::fs::write(hash_path.clone(), hash.to_be_bytes()).unwrap();

        assert!(JsonBackend::load(&kvs_path, &hash_path)
            .is_err_and(|e| e == ErrorCode::JsonParserError));
    }

    #[test]
    fn test_load_invalid_data() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let kvs_path = dir_path.join("kvs.json");
        let hash_path = dir_path.join("kvs.hash");

        let contents = "[123.4, 567.8]";
        let hash = adler32::RollingAdler32::from_buffer(contents.as_bytes()).hash();
        std::fs::write(kvs_path.clone(), contents).unwrap();
        std::fs::write(hash_path.clone(), hash.to_be_bytes()).unwrap();

        assert!(JsonBackend::load(&kvs_path, &hash_path)
            .is_err_and(|e| e == ErrorCode::JsonParserError));
    }

    #[test]
    fn test_load_invalid_hash_content() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let (kvs_path, hash_path) = create_kvs_files(&dir_path);
        std::fs::write(hash_path.clone(), vec![0x12, 0x34, 0x56, 0x78]).unwrap();

        assert!(JsonBackend::load(&kvs_path, &hash_path)
            .is_err_and(|e| e == ErrorCode::ValidationFailed));
    }

    #[test]
    fn test_load_invalid_hash_len() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let (kvs_path, hash_path) = create_kvs_files(&dir_path);
        std::fs::write(hash_path.clone(), vec![0x12, 0x34, 0x56]).unwrap();

        assert!(JsonBackend::load(&kvs_path, &hash_path)
            .is_err_and(|e| e == ErrorCode::ValidationFailed));
    }

    #[test]
    fn test_save_ok() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();

        let kvs_map = KvsMap::from([
            ("k1".to_string(), KvsValue::from("v1")),
            ("k2".to_string(), KvsValue::from(true)),
            ("k3".to_string(), KvsValue::from(123.4)),
        ]);
        let kvs_path = dir_path.join("kvs.json");
        let hash_path = dir_path.join("kvs.hash");
        JsonBackend::save(&kvs_map, &kvs_path, &hash_path).unwrap();

        assert!(kvs_path.exists());
        assert!(hash_path.exists());

        // No stray temp files left behind.
        assert!(!dir_path.join("kvs.json.tmp").exists());
        assert!(!dir_path.join("kvs.hash.tmp").exists());
    }

    #[test]
    fn test_save_kvs_invalid_extension() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();

        let kvs_map = KvsMap::new();
        let kvs_path = dir_path.join("kvs.invalid_ext");
        let hash_path = dir_path.join("kvs.hash");

        assert!(JsonBackend::save(&kvs_map, &kvs_path, &hash_path)
            .is_err_and(|e| e == ErrorCode::KvsFileReadError));
    }

    #[test]
    fn test_save_hash_invalid_extension() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();

        let kvs_map = KvsMap::new();
        let kvs_path = dir_path.join("kvs.json");
        let hash_path = dir_path.join("kvs.invalid_ext");

        assert!(JsonBackend::save(&kvs_map, &kvs_path, &hash_path)
            .is_err_and(|e| e == ErrorCode::KvsHashFileReadError));
    }

    #[test]
    fn test_save_impossible_str() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();

        let kvs_map = KvsMap::from([("inf".to_string(), KvsValue::from(f64::INFINITY))]);
        let kvs_path = dir_path.join("kvs.json");
        let hash_path = dir_path.join("kvs.hash");

        assert!(JsonBackend::save(&kvs_map, &kvs_path, &hash_path)
            .is_err_and(|e| e == ErrorCode::JsonGeneratorError));
    }

    #[test]
    fn test_kvs_file_name() {
        let instance_id = InstanceId(123);
        let snapshot_id = SnapshotId(2);
        let exp_name = format!("kvs_{instance_id}_{snapshot_id}.json");
        let act_name = JsonBackend::kvs_file_name(instance_id, snapshot_id);
        assert_eq!(exp_name, act_name);
    }

    #[test]
    fn test_kvs_file_path() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let backend = JsonBackendBuilder::new()
            .working_dir(dir_path.clone())
            .build();

        let instance_id = InstanceId(123);
        let snapshot_id = SnapshotId(2);
        let exp_name = dir_path.join(format!("kvs_{instance_id}_{snapshot_id}.json"));
        let act_name = backend.kvs_file_path(instance_id, snapshot_id);
        assert_eq!(exp_name, act_name);
    }
    #[test]
    fn test_hash_file_name() {
        let instance_id = InstanceId(123);
        let snapshot_id = SnapshotId(2);
        let exp_name = format!("kvs_{instance_id}_{snapshot_id}.hash");
        let act_name = JsonBackend::hash_file_name(instance_id, snapshot_id);
        assert_eq!(exp_name, act_name);
    }

    #[test]
    fn test_hash_file_path() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let backend = JsonBackendBuilder::new()
            .working_dir(dir_path.clone())
            .build();

        let instance_id = InstanceId(123);
        let snapshot_id = SnapshotId(2);
        let exp_name = dir_path.join(format!("kvs_{instance_id}_{snapshot_id}.hash"));
        let act_name = backend.hash_file_path(instance_id, snapshot_id);
        assert_eq!(exp_name, act_name);
    }

    #[test]
    fn test_defaults_file_name() {
        let instance_id = InstanceId(123);
        let exp_name = format!("kvs_{instance_id}_default.json");
        let act_name = JsonBackend::defaults_file_name(instance_id);
        assert_eq!(exp_name, act_name);
    }

    #[test]
    fn test_defaults_file_path() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let backend = JsonBackendBuilder::new()
            .working_dir(dir_path.clone())
            .build();

        let instance_id = InstanceId(123);
        let exp_name = dir_path.join(format!("kvs_{instance_id}_default.json"));
        let act_name = backend.defaults_file_path(instance_id);
        assert_eq!(exp_name, act_name);
    }
}
