/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Canonical structured event names used across `up-response-broadcaster`.

// Request path events.
pub const PROCESS_SOLVE_FAILED: &str = "process_solve_failed";
pub const PROCESS_PUBLISH_OK: &str = "process_publish_ok";
pub const PROCESS_PUBLISH_FAILED: &str = "process_publish_failed";
pub const PROCESS_SLOT_UPDATED: &str = "process_slot_updated";

// Keep-alive timer events.
pub const TICK_IDLE: &str = "tick_idle";
pub const TICK_PUBLISH_OK: &str = "tick_publish_ok";
pub const TICK_PUBLISH_FAILED: &str = "tick_publish_failed";
pub const TICK_SKIPPED_STOPPED: &str = "tick_skipped_stopped";
pub const TIMER_STARTED: &str = "timer_started";
pub const TIMER_STOPPED: &str = "timer_stopped";

// Transport adapter events.
pub const TRANSPORT_BIND_CHANNEL: &str = "transport_bind_channel";
pub const TRANSPORT_ENCODE_FAILED: &str = "transport_encode_failed";
pub const TRANSPORT_SEND_ATTEMPT: &str = "transport_send_attempt";
pub const TRANSPORT_SEND_FAILED: &str = "transport_send_failed";

// Service lifecycle and runtime events.
pub const SERVICE_START: &str = "service_start";
pub const SERVICE_START_FAILED: &str = "service_start_failed";
pub const SERVICE_STOP_REQUESTED: &str = "service_stop_requested";
pub const SERVICE_STOPPED: &str = "service_stopped";
pub const RUNTIME_THREAD_NAME_FALLBACK: &str = "runtime_thread_name_fallback";
pub const RUNTIME_SPAWN_START: &str = "runtime_spawn_start";
pub const RUNTIME_SPAWN_OK: &str = "runtime_spawn_ok";
pub const RUNTIME_SPAWN_FAILED: &str = "runtime_spawn_failed";
pub const RUNTIME_BUILD_FAILED: &str = "runtime_build_failed";
