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

//! Data-plane layer.
//!
//! The two producers of publish events: [`RequestProcessor`] on the request path and
//! [`PeriodicBroadcaster`] on the keep-alive timer. They share only the response slot
//! and the publish port.

pub(crate) mod periodic_broadcaster;
pub(crate) mod request_processor;

pub use periodic_broadcaster::{PeriodicBroadcaster, TickOutcome};
pub use request_processor::RequestProcessor;
