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

//! File-based configuration for a response service and its publish channels.

use crate::publish::{ChannelBinding, QosProfile};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use up_rust::{UCode, UStatus, UUri};

const DEFAULT_KEEPALIVE_INTERVAL_MS: u64 = 1000;
const MIN_PUBLISH_RESOURCE_ID: u16 = 0x8000;
const MAX_PUBLISH_RESOURCE_ID: u16 = 0xFFFE;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BroadcasterConfig {
    pub service_name: String,
    #[serde(default = "default_keepalive_interval_ms")]
    pub keepalive_interval_ms: u64,
    pub primary: ChannelConfig,
    pub keep_alive: ChannelConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    pub topic: TopicConfig,
    #[serde(default)]
    pub qos: QosProfile,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TopicConfig {
    pub authority: String,
    pub ue_id: u32,
    pub ue_version_major: u8,
    pub resource_id: u16,
}

fn default_keepalive_interval_ms() -> u64 {
    DEFAULT_KEEPALIVE_INTERVAL_MS
}

fn invalid_argument(message: impl Into<String>) -> UStatus {
    UStatus::fail_with_code(UCode::INVALID_ARGUMENT, message.into())
}

impl BroadcasterConfig {
    /// Parses and validates a JSON5 document.
    pub fn from_json5_str(contents: &str) -> Result<Self, UStatus> {
        let config: Self = json5::from_str(contents).map_err(|e| {
            invalid_argument(format!("Unable to parse config file: {e:?}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON5 config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, UStatus> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            UStatus::fail_with_code(
                UCode::NOT_FOUND,
                format!("Unable to read config file {}: {e:?}", path.display()),
            )
        })?;
        Self::from_json5_str(&contents)
    }

    pub fn validate(&self) -> Result<(), UStatus> {
        if self.service_name.trim().is_empty() {
            return Err(invalid_argument("service_name must not be empty"));
        }
        if self.keepalive_interval_ms == 0 {
            return Err(invalid_argument(
                "keepalive_interval_ms must be greater than zero",
            ));
        }
        self.primary.validate("primary")?;
        self.keep_alive.validate("keep_alive")?;
        if self.primary.topic == self.keep_alive.topic {
            return Err(invalid_argument(
                "primary and keep_alive must use different topics",
            ));
        }
        Ok(())
    }

    pub fn keepalive_interval(&self) -> Duration {
        Duration::from_millis(self.keepalive_interval_ms)
    }
}

impl ChannelConfig {
    fn validate(&self, channel: &str) -> Result<(), UStatus> {
        if self.qos.history_depth == 0 {
            return Err(invalid_argument(format!(
                "{channel}.qos.history_depth must be at least 1"
            )));
        }
        let resource_id = self.topic.resource_id;
        if !(MIN_PUBLISH_RESOURCE_ID..=MAX_PUBLISH_RESOURCE_ID).contains(&resource_id) {
            return Err(invalid_argument(format!(
                "{channel}.topic.resource_id {resource_id:#X} is not a publish topic (expected {MIN_PUBLISH_RESOURCE_ID:#X}..={MAX_PUBLISH_RESOURCE_ID:#X})"
            )));
        }
        Ok(())
    }

    pub fn to_binding(&self) -> Result<ChannelBinding, UStatus> {
        Ok(ChannelBinding::new(self.topic.to_uuri()?, self.qos))
    }
}

impl TopicConfig {
    pub fn to_uuri(&self) -> Result<UUri, UStatus> {
        UUri::try_from_parts(
            &self.authority,
            self.ue_id,
            self.ue_version_major,
            self.resource_id,
        )
        .map_err(|error| {
            invalid_argument(format!(
                "unable to build UUri from authority='{}', ue_id={:#X}, ue_version_major={:#X}, resource_id={:#X}: {error}",
                self.authority, self.ue_id, self.ue_version_major, self.resource_id
            ))
        })
    }
}
