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

//! Keep-alive path: republish the latest cached response at a fixed period.

use crate::cache::response_slot::ResponseSlot;
use crate::error::ServiceError;
use crate::header::{restamp, Stamped};
use crate::observability::{
    events,
    fields::{self, TimerContext},
};
use crate::publish::{Channel, PublishPort};
use crate::runtime::stop_signal::StopSignal;
use crate::runtime::timer_runtime::{spawn_keepalive_loop, KeepAliveLoopHandle};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};
use up_rust::UStatus;

const COMPONENT: &str = "periodic_broadcaster";

/// Result of a single keep-alive tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing has been cached yet; nothing was sent.
    Idle,
    /// The latest response was republished on the keep-alive channel.
    Published,
    /// The republish failed. The slot is untouched and the next tick tries again.
    PublishFailed,
}

/// Republishes the latest cached response on every tick.
///
/// The broadcaster never changes the slot. Each tick clones the cached value and
/// re-stamps only that outgoing copy, so the cached response keeps the timestamp
/// of its primary publish.
pub struct PeriodicBroadcaster<T: Stamped> {
    service_name: String,
    slot: Arc<ResponseSlot<T>>,
    port: Arc<dyn PublishPort<T>>,
    interval: Duration,
}

impl<T: Stamped> PeriodicBroadcaster<T> {
    pub fn new(
        service_name: &str,
        slot: Arc<ResponseSlot<T>>,
        port: Arc<dyn PublishPort<T>>,
        interval: Duration,
    ) -> Result<Self, ServiceError> {
        if interval.is_zero() {
            return Err(ServiceError::InvalidInterval);
        }

        Ok(Self {
            service_name: service_name.to_string(),
            slot,
            port,
            interval,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one tick on the calling task.
    pub async fn tick(&self) -> TickOutcome {
        let context = TimerContext::with_current_thread(self.service_name.as_str());
        self.tick_in(&context).await
    }

    async fn tick_in(&self, context: &TimerContext) -> TickOutcome {
        let Some(latest) = self.slot.get() else {
            trace!(
                event = events::TICK_IDLE,
                component = COMPONENT,
                service = context.service.as_str(),
                timer_thread = context.timer_thread.as_str(),
                "no response cached yet"
            );
            return TickOutcome::Idle;
        };

        let mut outgoing = T::clone(&latest);
        drop(latest);
        restamp(&mut outgoing);

        let sequence_num = outgoing.header().sequence_num;
        match self.port.publish(Channel::KeepAlive, &outgoing).await {
            Ok(()) => {
                debug!(
                    event = events::TICK_PUBLISH_OK,
                    component = COMPONENT,
                    service = context.service.as_str(),
                    timer_thread = context.timer_thread.as_str(),
                    sequence_num,
                    timestamp = fields::format_timestamp(&outgoing.header().timestamp).as_str(),
                    "republished latest response"
                );
                TickOutcome::Published
            }
            Err(err) => {
                warn!(
                    event = events::TICK_PUBLISH_FAILED,
                    component = COMPONENT,
                    service = context.service.as_str(),
                    timer_thread = context.timer_thread.as_str(),
                    sequence_num,
                    err = ?err,
                    "keep-alive publish failed; retrying on next tick"
                );
                TickOutcome::PublishFailed
            }
        }
    }

    /// Ticks every `interval` until `stop` fires. The first tick happens one full
    /// interval after the loop starts.
    pub(crate) async fn run(self, mut stop: StopSignal) {
        let context = TimerContext::with_current_thread(self.service_name.as_str());
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            event = events::TIMER_STARTED,
            component = COMPONENT,
            service = context.service.as_str(),
            timer_thread = context.timer_thread.as_str(),
            interval_ms = fields::duration_ms(self.interval),
            "keep-alive timer started"
        );

        loop {
            tokio::select! {
                biased;
                _ = stop.stopped() => break,
                _ = ticker.tick() => {
                    if stop.is_stopped() {
                        debug!(
                            event = events::TICK_SKIPPED_STOPPED,
                            component = COMPONENT,
                            service = context.service.as_str(),
                            "tick fired after stop request"
                        );
                        break;
                    }
                    self.tick_in(&context).await;
                }
            }
        }

        info!(
            event = events::TIMER_STOPPED,
            component = COMPONENT,
            service = context.service.as_str(),
            timer_thread = context.timer_thread.as_str(),
            reason = fields::REASON_STOP_SIGNALLED,
            "keep-alive timer stopped"
        );
    }

    /// Moves the broadcaster onto its own timer thread.
    pub(crate) fn spawn(
        self,
        thread_name: String,
        stop: StopSignal,
    ) -> Result<KeepAliveLoopHandle, UStatus> {
        spawn_keepalive_loop(thread_name, move || self.run(stop))
    }
}
