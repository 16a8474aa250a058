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

//! Canonical field values and value-format helpers.

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::Duration;
use up_rust::{UMessage, UUri};

pub const NONE: &str = "none";
pub const REASON_STOP_SIGNALLED: &str = "stop_signalled";
pub const REASON_INVALID_THREAD_NAME: &str = "invalid_thread_name";
pub const DEFAULT_TIMER_THREAD: &str = "unknown-thread";

/// Identity of a keep-alive timer attached to every tick event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimerContext {
    pub service: String,
    pub timer_thread: String,
}

impl TimerContext {
    pub fn with_current_thread(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            timer_thread: current_thread_name_or_default(),
        }
    }
}

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_TIMER_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

pub fn format_uri(uri: &UUri) -> String {
    uri.to_uri(false).trim_start_matches("//").to_string()
}

pub fn format_message_topic(message: &UMessage) -> String {
    message
        .attributes
        .as_ref()
        .and_then(|attributes| attributes.source.as_ref())
        .map(format_uri)
        .unwrap_or_else(|| NONE.to_string())
}

/// Milliseconds as a log field value, saturating at `u64::MAX`.
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
