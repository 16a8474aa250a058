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

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use up_response_broadcaster::observability::fields;
use up_rust::{UCode, UListener, UMessage, UStatus, UTransport, UUri};

/// Publish-only transport that writes every outgoing message to the log.
///
/// Stands in for a real bus binding so the broadcaster can be run locally.
pub(crate) struct LoggingTransport;

#[async_trait]
impl UTransport for LoggingTransport {
    async fn send(&self, message: UMessage) -> Result<(), UStatus> {
        let topic = fields::format_message_topic(&message);
        let payload = message
            .payload
            .as_ref()
            .map(|payload| String::from_utf8_lossy(payload).into_owned())
            .unwrap_or_default();

        info!(topic = topic.as_str(), payload = payload.as_str(), "send");
        Ok(())
    }

    async fn receive(
        &self,
        _source_filter: &UUri,
        _sink_filter: Option<&UUri>,
    ) -> Result<UMessage, UStatus> {
        Err(UStatus::fail_with_code(
            UCode::UNIMPLEMENTED,
            "LoggingTransport only publishes",
        ))
    }

    async fn register_listener(
        &self,
        _source_filter: &UUri,
        _sink_filter: Option<&UUri>,
        _listener: Arc<dyn UListener>,
    ) -> Result<(), UStatus> {
        Err(UStatus::fail_with_code(
            UCode::UNIMPLEMENTED,
            "LoggingTransport only publishes",
        ))
    }

    async fn unregister_listener(
        &self,
        _source_filter: &UUri,
        _sink_filter: Option<&UUri>,
        _listener: Arc<dyn UListener>,
    ) -> Result<(), UStatus> {
        Err(UStatus::fail_with_code(
            UCode::UNIMPLEMENTED,
            "LoggingTransport only publishes",
        ))
    }
}
