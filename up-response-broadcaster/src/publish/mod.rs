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

//! Publish layer.
//!
//! Defines the two outbound channel identities, their QoS descriptors, and the
//! [`PublishPort`] seam both publish paths go through. [`TransportPublishPort`] is
//! the uProtocol-backed implementation.

pub(crate) mod publish_port;
pub(crate) mod transport_port;

pub use publish_port::{Channel, Durability, PublishPort, QosProfile, Reliability};
pub use transport_port::{ChannelBinding, TransportPublishPort};
