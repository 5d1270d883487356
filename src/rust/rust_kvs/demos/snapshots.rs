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
//! Example for snapshots handling.
//! - Snapshot count and max count.
//! - Snapshot restore.

use rust_kvs::prelude::*;
use tempfile::tempdir;

fn main() -> Result<(), ErrorCode> {
    // Temporary directory.
    let dir = tempdir()?;
    let dir_path = dir.path().to_path_buf();

    // Instance ID for KVS object instances.
    let instance_id = InstanceId(0);

    {
        println!("-> `snapshot_count` and `snapshot_max_count` usage");

        // Build KVS instance for given instance ID and temporary directory.
        let builder = KvsBuilder::new(instance_id).backend(Box::new(
            JsonBackendBuilder::new()
                .working_dir(dir_path.clone())
                .build(),
        ));
        let kvs = builder.build()?;

        let max_count = kvs.snapshot_max_count() as u32;
        println!("Max snapshot count: {max_count:?}");

        // Snapshots are created and rotated on flush.
        let counter_key = "counter";
        for index in 0..max_count {
            kvs.set_value(counter_key, index)?;
            kvs.flush()?;
            println!("Snapshot count: {:?}", kvs.snapshot_count());
        }

        println!();
    }

    {
        println!("-> `snapshot_restore` usage");

        // Build KVS instance for given instance ID and temporary directory.
        let builder = KvsBuilder::new(instance_id).backend(Box::new(
            JsonBackendBuilder::new().working_dir(dir_path).build(),
        ));
        let kvs = builder.build()?;

        let max_count = kvs.snapshot_max_count() as u32;
        let counter_key = "counter";
        for index in 0..max_count {
            kvs.set_value(counter_key, index)?;
            kvs.flush()?;
        }

        // Print current counter value, then restore oldest snapshot.
        println!("{counter_key} = {:?}", kvs.get_value(counter_key)?);
        kvs.snapshot_restore(SnapshotId(2))?;
        println!("{counter_key} = {:?}", kvs.get_value(counter_key)?);

        println!();
    }

    Ok(())
}
