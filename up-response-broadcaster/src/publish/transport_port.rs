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

//! uProtocol adapter that publishes responses through a [`UTransport`].

use crate::observability::{events, fields};
use crate::publish::publish_port::{Channel, PublishPort, QosProfile};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn, Level};
use up_rust::{UCode, UMessage, UMessageBuilder, UPayloadFormat, UStatus, UTransport, UUri};

const COMPONENT: &str = "transport_publish_port";

/// A publish topic together with the QoS requested for it.
#[derive(Clone, Debug)]
pub struct ChannelBinding {
    topic: UUri,
    qos: QosProfile,
}

impl ChannelBinding {
    pub fn new(topic: UUri, qos: QosProfile) -> Self {
        Self { topic, qos }
    }

    pub fn topic(&self) -> &UUri {
        &self.topic
    }

    pub fn qos(&self) -> &QosProfile {
        &self.qos
    }
}

///
/// [`TransportPublishPort`] binds the primary and keep-alive channels to two
/// distinct publish topics on one shared [`UTransport`].
///
/// Messages are serialized to JSON and sent as uProtocol publish messages whose
/// source is the channel's topic.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use up_response_broadcaster::{ChannelBinding, QosProfile, TransportPublishPort};
/// use up_rust::{UTransport, UUri};
///
/// # pub mod loopback {
/// #     use std::sync::Arc;
/// #     use async_trait::async_trait;
/// #     use up_rust::{UListener, UMessage, UStatus, UTransport, UUri};
/// #
/// #     pub struct Loopback;
/// #
/// #     #[async_trait]
/// #     impl UTransport for Loopback {
/// #         async fn send(&self, _message: UMessage) -> Result<(), UStatus> { Ok(()) }
/// #         async fn receive(
/// #             &self,
/// #             _source_filter: &UUri,
/// #             _sink_filter: Option<&UUri>,
/// #         ) -> Result<UMessage, UStatus> {
/// #             unimplemented!("not needed for this doctest")
/// #         }
/// #         async fn register_listener(
/// #             &self,
/// #             _source_filter: &UUri,
/// #             _sink_filter: Option<&UUri>,
/// #             _listener: Arc<dyn UListener>,
/// #         ) -> Result<(), UStatus> {
/// #             Ok(())
/// #         }
/// #         async fn unregister_listener(
/// #             &self,
/// #             _source_filter: &UUri,
/// #             _sink_filter: Option<&UUri>,
/// #             _listener: Arc<dyn UListener>,
/// #         ) -> Result<(), UStatus> {
/// #             Ok(())
/// #         }
/// #     }
/// # }
///
/// let transport: Arc<dyn UTransport> = Arc::new(loopback::Loopback);
/// let primary = UUri::try_from_parts("routing", 0x5BA0, 0x1, 0x8001).unwrap();
/// let keep_alive = UUri::try_from_parts("routing", 0x5BA0, 0x1, 0x8002).unwrap();
///
/// let port = TransportPublishPort::new(
///     transport,
///     ChannelBinding::new(primary, QosProfile::default()),
///     ChannelBinding::new(keep_alive, QosProfile::default()),
/// )
/// .unwrap();
/// ```
pub struct TransportPublishPort {
    transport: Arc<dyn UTransport>,
    primary: ChannelBinding,
    keep_alive: ChannelBinding,
}

impl TransportPublishPort {
    /// Fails with `INVALID_ARGUMENT` when both channels point at the same topic,
    /// since consumers could no longer tell fresh responses from republished ones.
    pub fn new(
        transport: Arc<dyn UTransport>,
        primary: ChannelBinding,
        keep_alive: ChannelBinding,
    ) -> Result<Self, UStatus> {
        if primary.topic == keep_alive.topic {
            return Err(UStatus::fail_with_code(
                UCode::INVALID_ARGUMENT,
                format!(
                    "primary and keep-alive channels share topic {}",
                    fields::format_uri(&primary.topic)
                ),
            ));
        }

        for (channel, binding) in [
            (Channel::Primary, &primary),
            (Channel::KeepAlive, &keep_alive),
        ] {
            info!(
                event = events::TRANSPORT_BIND_CHANNEL,
                component = COMPONENT,
                channel = channel.as_str(),
                topic = fields::format_uri(&binding.topic).as_str(),
                history_depth = binding.qos.history_depth,
                reliability = ?binding.qos.reliability,
                durability = ?binding.qos.durability,
                "bound publish channel"
            );
        }

        Ok(Self {
            transport,
            primary,
            keep_alive,
        })
    }

    pub fn binding(&self, channel: Channel) -> &ChannelBinding {
        match channel {
            Channel::Primary => &self.primary,
            Channel::KeepAlive => &self.keep_alive,
        }
    }

    fn encode<T: Serialize>(&self, channel: Channel, message: &T) -> Result<UMessage, UStatus> {
        let payload = serde_json::to_vec(message).map_err(|err| {
            UStatus::fail_with_code(
                UCode::INVALID_ARGUMENT,
                format!("unable to serialize {channel} message: {err}"),
            )
        })?;

        UMessageBuilder::publish(self.binding(channel).topic.clone())
            .build_with_payload(Bytes::from(payload), UPayloadFormat::UPAYLOAD_FORMAT_JSON)
            .map_err(|err| {
                UStatus::fail_with_code(
                    UCode::INTERNAL,
                    format!("unable to build {channel} publish message: {err}"),
                )
            })
    }
}

#[async_trait]
impl<T> PublishPort<T> for TransportPublishPort
where
    T: Serialize + Send + Sync,
{
    async fn publish(&self, channel: Channel, message: &T) -> Result<(), UStatus> {
        let umessage = self.encode(channel, message).inspect_err(|err| {
            warn!(
                event = events::TRANSPORT_ENCODE_FAILED,
                component = COMPONENT,
                channel = channel.as_str(),
                err = ?err,
                "unable to encode outgoing message"
            );
        })?;

        let topic = tracing::enabled!(Level::DEBUG)
            .then(|| fields::format_message_topic(&umessage))
            .unwrap_or_default();
        debug!(
            event = events::TRANSPORT_SEND_ATTEMPT,
            component = COMPONENT,
            channel = channel.as_str(),
            topic = topic.as_str(),
            "sending publish message"
        );

        self.transport.send(umessage).await.inspect_err(|err| {
            warn!(
                event = events::TRANSPORT_SEND_FAILED,
                component = COMPONENT,
                channel = channel.as_str(),
                err = ?err,
                "transport send failed"
            );
        })
    }
}
