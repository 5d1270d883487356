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

//! Scenario driver for the KVS engine.
//!
//! Takes a scenario name and a JSON parameter file (or `-` for stdin) on the
//! command line, runs the named scenario against [`rust_kvs`], and reports its
//! observations as structured `info` log records. Fatal open-time failures are
//! reported on stderr in a fixed wording the test harness matches on and cause
//! a non-zero exit.

use rust_kvs::prelude::*;
use std::collections::HashMap;
use std::io::Read as _;
use std::path::PathBuf;
use std::process::ExitCode;
use tinyjson::JsonValue;

const CONTEXT: &str = "KVST";

/// Exit status handed back to the harness, distinct from an in-scenario logged error.
#[repr(u8)]
enum ResultCode {
    Success = 0,
    Panic = 1,
}

fn main() -> ExitCode {
    #[cfg(feature = "stdout_logger")]
    stdout_logger::init();

    let code = run();
    ExitCode::from(code as u8)
}

fn run() -> ResultCode {
    let mut args = pico_args::Arguments::from_env();
    let scenario: String = match args.free_from_str() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: missing scenario argument: {e}");
            return ResultCode::Panic;
        }
    };
    let source: String = match args.free_from_str() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: missing config argument: {e}");
            return ResultCode::Panic;
        }
    };

    let config_text = match read_config(&source) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return ResultCode::Panic;
        }
    };

    let config: JsonValue = match config_text.parse() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: config could not be parsed: {e:?}");
            return ResultCode::Panic;
        }
    };

    match dispatch(&scenario, &config) {
        Ok(()) => ResultCode::Success,
        Err(e) => {
            mw_log::error!(context: CONTEXT, "scenario \"{scenario}\" failed: {e:?}");
            ResultCode::Panic
        }
    }
}

fn read_config(source: &str) -> Result<String, std::io::Error> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source)
    }
}

// --- scenario config parsing -------------------------------------------------

struct Params {
    instance_id: InstanceId,
    dir: PathBuf,
    defaults: KvsDefaults,
    kvs_load: KvsLoad,
    flush_on_exit: bool,
    snapshot_max_count: usize,
}

fn as_obj(v: &JsonValue) -> Result<&HashMap<String, JsonValue>, ErrorCode> {
    match v {
        JsonValue::Object(m) => Ok(m),
        _ => Err(ErrorCode::JsonParserError),
    }
}

fn field<'a>(obj: &'a JsonValue, key: &str) -> Result<&'a JsonValue, ErrorCode> {
    as_obj(obj)?.get(key).ok_or(ErrorCode::JsonParserError)
}

fn opt_field<'a>(obj: &'a JsonValue, key: &str) -> Option<&'a JsonValue> {
    as_obj(obj).ok().and_then(|m| m.get(key))
}

fn as_str(v: &JsonValue) -> Result<&str, ErrorCode> {
    match v {
        JsonValue::String(s) => Ok(s.as_str()),
        _ => Err(ErrorCode::JsonParserError),
    }
}

fn as_usize(v: &JsonValue) -> Result<usize, ErrorCode> {
    match v {
        JsonValue::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Ok(*n as usize),
        _ => Err(ErrorCode::JsonParserError),
    }
}

fn as_bool(v: &JsonValue) -> Result<bool, ErrorCode> {
    match v {
        JsonValue::Boolean(b) => Ok(*b),
        _ => Err(ErrorCode::JsonParserError),
    }
}

fn parse_tristate(v: Option<&JsonValue>, default: KvsDefaultsLike) -> KvsDefaultsLike {
    let Some(v) = v else { return default };
    let Ok(s) = as_str(v) else { return default };
    match s.to_ascii_lowercase().as_str() {
        "ignored" => KvsDefaultsLike::Ignored,
        "required" => KvsDefaultsLike::Required,
        _ => KvsDefaultsLike::Optional,
    }
}

/// Shared shape of `KvsDefaults`/`KvsLoad`, parsed once from a string and mapped
/// to whichever of the two enums the caller needs.
enum KvsDefaultsLike {
    Ignored,
    Optional,
    Required,
}

impl From<KvsDefaultsLike> for KvsDefaults {
    fn from(v: KvsDefaultsLike) -> Self {
        match v {
            KvsDefaultsLike::Ignored => KvsDefaults::Ignored,
            KvsDefaultsLike::Optional => KvsDefaults::Optional,
            KvsDefaultsLike::Required => KvsDefaults::Required,
        }
    }
}

impl From<KvsDefaultsLike> for KvsLoad {
    fn from(v: KvsDefaultsLike) -> Self {
        match v {
            KvsDefaultsLike::Ignored => KvsLoad::Ignored,
            KvsDefaultsLike::Optional => KvsLoad::Optional,
            KvsDefaultsLike::Required => KvsLoad::Required,
        }
    }
}

fn parse_params(config: &JsonValue) -> Result<Params, ErrorCode> {
    let params = field(config, "kvs_parameters")?;

    let instance_id = InstanceId(as_usize(field(params, "instance_id")?)?);
    let dir = PathBuf::from(as_str(field(params, "dir")?)?);
    let defaults = parse_tristate(opt_field(params, "defaults"), KvsDefaultsLike::Optional).into();
    let kvs_load = parse_tristate(opt_field(params, "kvs_load"), KvsDefaultsLike::Optional).into();
    let flush_on_exit = opt_field(params, "flush_on_exit")
        .map(as_bool)
        .transpose()?
        .unwrap_or(true);
    let snapshot_max_count = opt_field(params, "snapshot_max_count")
        .map(as_usize)
        .transpose()?
        .unwrap_or(3);

    Ok(Params {
        instance_id,
        dir,
        defaults,
        kvs_load,
        flush_on_exit,
        snapshot_max_count,
    })
}

fn backend_for(params: &Params) -> JsonBackend {
    JsonBackendBuilder::new()
        .working_dir(params.dir.clone())
        .snapshot_max_count(params.snapshot_max_count)
        .build()
}

fn open(params: &Params) -> Result<Kvs, ErrorCode> {
    KvsBuilder::new(params.instance_id)
        .defaults(params.defaults)
        .kvs_load(params.kvs_load)
        .backend(Box::new(backend_for(params)))
        .build()
}

fn close(kvs: &Kvs, params: &Params) -> Result<(), ErrorCode> {
    if params.flush_on_exit {
        kvs.flush()?;
    }
    Ok(())
}

// --- scenario dispatch --------------------------------------------------------

fn dispatch(scenario: &str, config: &JsonValue) -> Result<(), ErrorCode> {
    match scenario {
        "basic.basic" => scenario_basic(config),
        "cit.persistency.explicit_flush" => scenario_explicit_flush(config),
        "cit.default_values.default_values" => scenario_default_values(config),
        "cit.default_values.remove_key" => scenario_remove_key(config),
        "cit.default_values.reset_all_keys" => scenario_reset_all_keys(config),
        "cit.default_values.reset_single_key" => scenario_reset_single_key(config),
        "cit.default_values.checksum" => scenario_default_values_checksum(config),
        "cit.snapshots.count" => scenario_snapshot_count(config),
        "cit.snapshots.max_count" => scenario_snapshot_max_count(config),
        "cit.snapshots.restore" => scenario_snapshot_restore(config),
        "cit.snapshots.paths" => scenario_snapshot_paths(config),
        "cit.multiple_kvs.multiple_instance_ids" => scenario_multiple_instance_ids(config),
        "cit.multiple_kvs.same_instance_id_same_value" => {
            scenario_same_instance_id_same_value(config)
        }
        "cit.multiple_kvs.same_instance_id_diff_value" => {
            scenario_same_instance_id_diff_value(config)
        }
        "cit.supported_datatypes.keys" => scenario_supported_keys(config),
        s if s.starts_with("cit.supported_datatypes.values.") => {
            scenario_supported_value(config, &s["cit.supported_datatypes.values.".len()..])
        }
        _ => {
            eprintln!("error: unknown scenario \"{scenario}\"");
            Err(ErrorCode::UnmappedError)
        }
    }
}

fn scenario_basic(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let kvs = open(&params)?;

    kvs.set_value("example_key", "example_value")?;
    let value = kvs.get_value_as::<String>("example_key")?;
    mw_log::info!(context: CONTEXT, example_key = value);

    close(&kvs, &params)
}

fn scenario_explicit_flush(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;

    {
        let kvs = open(&params)?;
        kvs.set_value("counter", 42i32)?;
        kvs.flush()?;
    }

    let kvs = open(&params)?;
    let value = kvs.get_value_as::<i32>("counter")?;
    mw_log::info!(context: CONTEXT, value);

    close(&kvs, &params)
}

/// Opens `params`, rendering the canonical stderr line the harness matches on
/// when a `Required` (or malformed) defaults file keeps the instance from
/// opening at all.
fn open_with_defaults_diagnostics(params: &Params) -> Result<Kvs, ErrorCode> {
    match open(params) {
        Ok(kvs) => Ok(kvs),
        Err(e @ (ErrorCode::FileNotFound | ErrorCode::JsonParserError)) => {
            let backend = backend_for(params);
            let defaults_path = backend.defaults_file_path(params.instance_id);
            let reason = match e {
                ErrorCode::FileNotFound => "KvsFileReadError",
                _ => "JsonParserError",
            };
            eprintln!(
                "error: file \"{}\" could not be read: {reason}",
                defaults_path.display()
            );
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Logs the current/default value and default-ness of `key`, each rendered as
/// the `Result`'s debug text so a legitimate `KeyNotFound` shows up in the log
/// instead of aborting the scenario.
fn log_default_value_state(kvs: &Kvs, key: &str, note: &str) {
    let current_value = kvs.get_value(key);
    let value_is_default = kvs.is_value_default(key);
    let default_value = kvs.get_default_value(key);
    mw_log::info!(
        context: CONTEXT,
        key,
        current_value = format!("{current_value:?}"),
        value_is_default = format!("{value_is_default:?}"),
        default_value = format!("{default_value:?}"),
        "{note}"
    );
}

fn scenario_default_values(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let kvs = open_with_defaults_diagnostics(&params)?;
    let key = as_str(field(config, "key")?)?;

    log_default_value_state(&kvs, key, "before set");
    kvs.set_value(key, KvsValue::F64(432.1))?;
    log_default_value_state(&kvs, key, "after set");

    close(&kvs, &params)
}

fn scenario_remove_key(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let kvs = open(&params)?;
    let key = as_str(field(config, "key")?)?;

    log_default_value_state(&kvs, key, "before set");
    kvs.set_value(key, KvsValue::F64(432.1))?;
    log_default_value_state(&kvs, key, "after set");
    kvs.remove_key(key)?;
    log_default_value_state(&kvs, key, "after remove");

    close(&kvs, &params)
}

/// Logs the raw current value and default-ness of `key`. Unlike
/// [`log_default_value_state`], values aren't `Result`-wrapped: every key this
/// is called for is known to come from the defaults map, so lookups cannot
/// fail.
fn log_reset_state(kvs: &Kvs, key: &str, note: &str) -> Result<(), ErrorCode> {
    let current_value = kvs.get_value_as::<f64>(key)?;
    let value_is_default = kvs.is_value_default(key)?;
    mw_log::info!(context: CONTEXT, key, current_value, value_is_default, "{note}");
    Ok(())
}

/// Recovers the `N` from a `"..._N"` key name - the key set for these
/// scenarios is always `test_number_0`..`test_number_{NUM_VALUES - 1}`.
fn key_index(key: &str) -> Result<usize, ErrorCode> {
    key.rsplit('_')
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or(ErrorCode::JsonParserError)
}

fn scenario_reset_all_keys(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let kvs = open(&params)?;

    let backend = backend_for(&params);
    let mut keys: Vec<String> = backend
        .load_defaults(params.instance_id)?
        .into_keys()
        .collect();
    keys.sort();

    for key in &keys {
        log_reset_state(&kvs, key, "before set")?;
        kvs.set_value(key.as_str(), 123.4 * key_index(key)? as f64)?;
        log_reset_state(&kvs, key, "after set")?;
    }

    kvs.reset()?;

    for key in &keys {
        log_reset_state(&kvs, key, "after reset")?;
    }

    close(&kvs, &params)
}

fn scenario_reset_single_key(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let kvs = open(&params)?;
    const RESET_INDEX: usize = 2;

    let backend = backend_for(&params);
    let mut keys: Vec<String> = backend
        .load_defaults(params.instance_id)?
        .into_keys()
        .collect();
    keys.sort();

    for key in &keys {
        log_reset_state(&kvs, key, "before set")?;
        kvs.set_value(key.as_str(), 123.4 * key_index(key)? as f64)?;
        log_reset_state(&kvs, key, "after set")?;
    }

    kvs.reset_key(&keys[RESET_INDEX])?;

    for key in &keys {
        log_reset_state(&kvs, key, "after reset")?;
    }

    close(&kvs, &params)
}

/// Opens with defaults, flushes, and logs the current-state snapshot's
/// `kvs_path`/`hash_path` so the harness can assert both files exist - the
/// defaults file itself has no hash sidecar, only a flushed snapshot does.
fn scenario_default_values_checksum(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let kvs = open(&params)?;
    kvs.flush()?;

    let backend = backend_for(&params);
    let kvs_path = backend.kvs_file_path(params.instance_id, SnapshotId(0));
    let hash_path = backend.hash_file_path(params.instance_id, SnapshotId(0));
    mw_log::info!(
        context: CONTEXT,
        kvs_path = format!("{}", kvs_path.display()),
        hash_path = format!("{}", hash_path.display())
    );

    close(&kvs, &params)
}

fn scenario_snapshot_count(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let count = as_usize(field(config, "count")?)?;

    for i in 0..count {
        let kvs = open(&params)?;
        kvs.set_value("counter", i as i32)?;
        kvs.flush()?;
        mw_log::info!(context: CONTEXT, snapshot_count = kvs.snapshot_count());
    }

    let kvs = open(&params)?;
    mw_log::info!(context: CONTEXT, snapshot_count = kvs.snapshot_count());

    close(&kvs, &params)
}

fn scenario_snapshot_max_count(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let kvs = open(&params)?;
    mw_log::info!(context: CONTEXT, max_count = kvs.snapshot_max_count());
    close(&kvs, &params)
}

fn scenario_snapshot_restore(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let count = as_usize(field(config, "count")?)?;
    let snapshot_id = SnapshotId(as_usize(field(config, "snapshot_id")?)?);

    for i in 0..count {
        let kvs = open(&params)?;
        kvs.set_value("counter", i as i32)?;
        kvs.flush()?;
    }

    let kvs = open(&params)?;
    let result = kvs.snapshot_restore(snapshot_id);
    mw_log::info!(context: CONTEXT, result = format!("{result:?}"));
    if result.is_ok() {
        let value = kvs.get_value_as::<i32>("counter")?;
        mw_log::info!(context: CONTEXT, value);
    }

    close(&kvs, &params)
}

fn scenario_snapshot_paths(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let count = as_usize(field(config, "count")?)?;
    let snapshot_id = SnapshotId(as_usize(field(config, "snapshot_id")?)?);

    for i in 0..count {
        let kvs = open(&params)?;
        kvs.set_value("counter", i as i32)?;
        kvs.flush()?;
    }

    let backend = backend_for(&params);
    let kvs_path = backend.kvs_file_path(params.instance_id, snapshot_id);
    let hash_path = backend.hash_file_path(params.instance_id, snapshot_id);
    mw_log::info!(
        context: CONTEXT,
        kvs_path = format!("{}", kvs_path.display()),
        hash_path = format!("{}", hash_path.display())
    );

    Ok(())
}

fn scenario_multiple_instance_ids(config: &JsonValue) -> Result<(), ErrorCode> {
    let mut params = parse_params(config)?;

    params.instance_id = InstanceId(1);
    let kvs1 = open(&params)?;
    kvs1.set_value("number", 111.1)?;
    mw_log::info!(context: CONTEXT, instance = 1, number = kvs1.get_value_as::<f64>("number")?);

    params.instance_id = InstanceId(2);
    let kvs2 = open(&params)?;
    kvs2.set_value("number", 222.2)?;
    mw_log::info!(context: CONTEXT, instance = 2, number = kvs2.get_value_as::<f64>("number")?);

    close(&kvs1, &params)?;
    close(&kvs2, &params)
}

fn scenario_same_instance_id_same_value(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;

    let kvs_a = open(&params)?;
    kvs_a.set_value("shared", "hello")?;

    let kvs_b = open(&params)?;
    let value = kvs_b.get_value_as::<String>("shared")?;
    mw_log::info!(context: CONTEXT, value);

    close(&kvs_a, &params)
}

fn scenario_same_instance_id_diff_value(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;

    let kvs_a = open(&params)?;
    let kvs_b = open(&params)?;

    kvs_a.set_value("shared", "from_a")?;
    let seen_by_b = kvs_b.get_value_as::<String>("shared")?;
    mw_log::info!(context: CONTEXT, seen_by_b);

    kvs_b.set_value("shared", "from_b")?;
    let seen_by_a = kvs_a.get_value_as::<String>("shared")?;
    mw_log::info!(context: CONTEXT, seen_by_a);

    close(&kvs_a, &params)
}

fn scenario_supported_keys(config: &JsonValue) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let kvs = open(&params)?;

    for key in ["example", "\u{1F600}", "\u{03B1}\u{03B2}\u{03B3}"] {
        kvs.set_value(key, "value")?;
        mw_log::info!(context: CONTEXT, key);
    }

    close(&kvs, &params)
}

fn scenario_supported_value(config: &JsonValue, tag: &str) -> Result<(), ErrorCode> {
    let params = parse_params(config)?;
    let kvs = open(&params)?;

    let value = match tag {
        "i32" => KvsValue::I32(-123),
        "u32" => KvsValue::U32(123),
        "i64" => KvsValue::I64(-123_456_789_012),
        "u64" => KvsValue::U64(123_456_789_012),
        "f64" => KvsValue::F64(432.1),
        "bool" => KvsValue::Boolean(true),
        "str" => KvsValue::String("example".to_string()),
        "arr" => KvsValue::Array(vec![KvsValue::I32(1), KvsValue::I32(2), KvsValue::I32(3)]),
        "obj" => KvsValue::Object(KvsMap::from([
            ("nested_key".to_string(), KvsValue::Boolean(true)),
        ])),
        _ => return Err(ErrorCode::UnmappedError),
    };

    kvs.set_value("value", value)?;
    let stored = kvs.get_value("value")?;
    mw_log::info!(context: CONTEXT, value = format!("{stored:?}"));

    close(&kvs, &params)
}
