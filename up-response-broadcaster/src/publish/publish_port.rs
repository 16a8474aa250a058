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

//! Outbound channel identities and the port both publish paths write through.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use up_rust::UStatus;

/// The two logical outbound channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Receives each freshly computed response exactly once.
    Primary,
    /// Receives the periodic republish of the latest response.
    KeepAlive,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Primary => "primary",
            Channel::KeepAlive => "keep_alive",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery guarantee requested from the transport for a channel.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    #[default]
    Reliable,
    BestEffort,
}

/// Whether late-joining consumers receive the last published message.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Durability {
    #[default]
    TransientLocal,
    Volatile,
}

/// QoS descriptor carried with a channel binding.
///
/// The defaults (keep the last message, reliable, transient-local) are what a
/// keep-alive consumer relies on. Enforcement belongs to the transport.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QosProfile {
    #[serde(default = "default_history_depth")]
    pub history_depth: u32,
    #[serde(default)]
    pub reliability: Reliability,
    #[serde(default)]
    pub durability: Durability,
}

fn default_history_depth() -> u32 {
    1
}

impl Default for QosProfile {
    fn default() -> Self {
        Self {
            history_depth: default_history_depth(),
            reliability: Reliability::default(),
            durability: Durability::default(),
        }
    }
}

/// Sink for fully formed outgoing messages.
///
/// Implementations must tolerate concurrent calls from the request path and the
/// keep-alive timer without external locking. The returned future resolves only
/// once the outcome of the publish is known.
#[async_trait]
pub trait PublishPort<T: Send + Sync>: Send + Sync {
    async fn publish(&self, channel: Channel, message: &T) -> Result<(), UStatus>;
}
