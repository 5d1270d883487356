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

//! Persisted, typed key-value storage.
//!
//! A [`Kvs`](kvs::Kvs) instance holds a process-local live map of [`KvsValue`](kvs_value::KvsValue)
//! entries layered over a read-only defaults map, persisted through a pluggable
//! [`KvsBackend`](kvs_backend::KvsBackend). The bundled [`JsonBackend`](json_backend::JsonBackend)
//! stores each instance as a rotating ring of hash-protected JSON snapshots.

pub mod error_code;
pub mod json_backend;
pub mod kvs;
pub mod kvs_api;
pub mod kvs_backend;
pub mod kvs_builder;
pub mod kvs_serialize;
pub mod kvs_value;

pub(crate) mod log;

/// Re-exports of the types most consumers need.
pub mod prelude {
    pub use crate::error_code::ErrorCode;
    pub use crate::json_backend::{JsonBackend, JsonBackendBuilder};
    pub use crate::kvs::{Kvs, KvsParameters};
    pub use crate::kvs_api::{InstanceId, KvsApi, KvsDefaults, KvsLoad, SnapshotId};
    pub use crate::kvs_backend::KvsBackend;
    pub use crate::kvs_builder::KvsBuilder;
    pub use crate::kvs_serialize::{KvsDeserialize, KvsSerialize};
    pub use crate::kvs_value::{KvsMap, KvsValue, KvsValueGet};
}
