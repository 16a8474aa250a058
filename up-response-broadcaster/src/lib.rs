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

//! # up-response-broadcaster
//!
//! `up-response-broadcaster` publishes computed responses on a primary channel and
//! keeps the latest one alive by republishing it on a second channel at a fixed
//! period.
//!
//! Typical usage is API-first and centered on [`ResponseService`]: give it a
//! [`Solver`], a [`PublishPort`] and a keep-alive interval, then feed it requests.
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use up_response_broadcaster::{
//!     BroadcasterConfig, Header, ResponseService, Solver, Stamped, TransportPublishPort,
//! };
//! use up_rust::{UStatus, UTransport};
//!
//! # pub mod mock_transport {
//! #     use std::sync::Arc;
//! #     use async_trait::async_trait;
//! #     use up_rust::{UListener, UMessage, UStatus, UTransport, UUri};
//! #
//! #     pub struct MockTransport;
//! #
//! #     #[async_trait]
//! #     impl UTransport for MockTransport {
//! #         async fn send(&self, _message: UMessage) -> Result<(), UStatus> { Ok(()) }
//! #         async fn receive(
//! #             &self,
//! #             _source_filter: &UUri,
//! #             _sink_filter: Option<&UUri>,
//! #         ) -> Result<UMessage, UStatus> {
//! #             unimplemented!("not needed for this doctest")
//! #         }
//! #         async fn register_listener(
//! #             &self,
//! #             _source_filter: &UUri,
//! #             _sink_filter: Option<&UUri>,
//! #             _listener: Arc<dyn UListener>,
//! #         ) -> Result<(), UStatus> {
//! #             Ok(())
//! #         }
//! #         async fn unregister_listener(
//! #             &self,
//! #             _source_filter: &UUri,
//! #             _sink_filter: Option<&UUri>,
//! #             _listener: Arc<dyn UListener>,
//! #         ) -> Result<(), UStatus> {
//! #             Ok(())
//! #         }
//! #     }
//! # }
//! #[derive(Clone, Default, serde::Serialize)]
//! struct RouteResponse {
//!     header: Header,
//!     waypoints: Vec<String>,
//! }
//!
//! impl Stamped for RouteResponse {
//!     fn header(&self) -> &Header {
//!         &self.header
//!     }
//!     fn header_mut(&mut self) -> &mut Header {
//!         &mut self.header
//!     }
//! }
//!
//! struct StraightLine;
//!
//! impl Solver for StraightLine {
//!     type Request = (String, String);
//!     type Response = RouteResponse;
//!
//!     fn solve(&self, (from, to): &(String, String)) -> Result<RouteResponse, UStatus> {
//!         Ok(RouteResponse {
//!             waypoints: vec![from.clone(), to.clone()],
//!             ..Default::default()
//!         })
//!     }
//! }
//!
//! let config = BroadcasterConfig::from_json5_str(r#"{
//!     service_name: "routing",
//!     keepalive_interval_ms: 250,
//!     primary: { topic: { authority: "vehicle", ue_id: 23456, ue_version_major: 1, resource_id: 32769 } },
//!     keep_alive: { topic: { authority: "vehicle", ue_id: 23456, ue_version_major: 1, resource_id: 32770 } },
//! }"#)
//! .unwrap();
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let transport: Arc<dyn UTransport> = Arc::new(mock_transport::MockTransport);
//! let port = TransportPublishPort::new(
//!     transport,
//!     config.primary.to_binding().unwrap(),
//!     config.keep_alive.to_binding().unwrap(),
//! )
//! .unwrap();
//!
//! let service = ResponseService::start(
//!     &config.service_name,
//!     config.keepalive_interval(),
//!     StraightLine,
//!     Arc::new(port),
//! )
//! .unwrap();
//!
//! let response = service
//!     .process(&("depot".to_string(), "gate-4".to_string()))
//!     .await
//!     .unwrap();
//! assert_eq!(response.waypoints, ["depot", "gate-4"]);
//!
//! service.shutdown().unwrap();
//! # });
//! ```
//!
//! ## Publish contract
//!
//! - A successful request is published exactly once on the primary channel and
//!   then cached. A failed solve or a failed primary publish leaves the cache as
//!   it was.
//! - Every keep-alive tick republishes a re-stamped copy of the cached response,
//!   or does nothing while the cache is empty. Failed ticks are logged and retried
//!   on the next tick.
//! - The cached response keeps the timestamp of its primary publish; only the
//!   outgoing keep-alive copies are re-stamped.
//!
//! ## Internal architecture map
//!
//! - API facade: [`ResponseService`]
//! - Cache: the single response slot shared by both publish paths
//! - Data plane: request processor and periodic broadcaster
//! - Publish: channel identities, QoS descriptors and the uProtocol adapter
//! - Runtime: keep-alive timer thread and stop signalling
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events. Library code emits events and does not
//! initialize a global subscriber; binaries and tests are responsible for that.

mod cache;
pub use cache::response_slot::ResponseSlot;

mod config;
pub use config::{BroadcasterConfig, ChannelConfig, TopicConfig};

mod data_plane;
pub use data_plane::{PeriodicBroadcaster, RequestProcessor, TickOutcome};

mod error;
pub use error::{ProcessError, ServiceError};

mod header;
pub use header::{Header, Stamped};

#[doc(hidden)]
pub mod observability;

mod publish;
pub use publish::{
    Channel, ChannelBinding, Durability, PublishPort, QosProfile, Reliability,
    TransportPublishPort,
};

mod runtime;

mod service;
pub use service::ResponseService;

mod solver;
pub use solver::Solver;

#[cfg(test)]
mod test_support;
