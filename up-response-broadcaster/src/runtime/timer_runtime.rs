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

//! Runtime helper for spawning the keep-alive timer loop.

use crate::observability::{events, fields};
use std::future::Future;
use std::io;
use std::sync::mpsc;
use std::thread;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, error, info, warn};
use up_rust::{UCode, UStatus};

pub(crate) const DEFAULT_KEEPALIVE_RUNTIME_THREAD_NAME: &str = "up-keepalive";
const KEEPALIVE_RUNTIME_THREAD_NAME_PREFIX: &str = "up-ka-";
const KEEPALIVE_RUNTIME_THREAD_NAME_MAX_LEN: usize = 15;
const COMPONENT: &str = "timer_runtime";

/// Owns the timer thread so the service can join it on shutdown.
#[derive(Debug)]
pub(crate) struct KeepAliveLoopHandle {
    timer_thread: String,
    join_handle: thread::JoinHandle<()>,
}

impl KeepAliveLoopHandle {
    pub(crate) fn timer_thread(&self) -> &str {
        &self.timer_thread
    }

    /// Blocks until the timer loop returns. An in-flight tick runs to completion.
    pub(crate) fn join(self) -> thread::Result<()> {
        self.join_handle.join()
    }
}

/// Derives a Linux-safe (at most 15 bytes) thread name from a service name.
pub(crate) fn build_runtime_thread_name(service_name: &str) -> String {
    let suffix_len =
        KEEPALIVE_RUNTIME_THREAD_NAME_MAX_LEN - KEEPALIVE_RUNTIME_THREAD_NAME_PREFIX.len();
    let suffix: String = service_name
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-')
        .take(suffix_len)
        .collect();

    if suffix.is_empty() {
        debug!(
            event = events::RUNTIME_THREAD_NAME_FALLBACK,
            component = COMPONENT,
            reason = fields::REASON_INVALID_THREAD_NAME,
            service = service_name,
            "using default keep-alive thread name"
        );
        DEFAULT_KEEPALIVE_RUNTIME_THREAD_NAME.to_string()
    } else {
        format!("{KEEPALIVE_RUNTIME_THREAD_NAME_PREFIX}{suffix}")
    }
}

/// Runs `run_loop` on a dedicated thread with its own current-thread Tokio runtime.
///
/// The loop therefore keeps ticking regardless of how busy the caller's runtime is
/// with request processing. Returns only once the runtime is built, so a runtime
/// that cannot be built fails the spawn instead of leaving a dead timer behind.
pub(crate) fn spawn_keepalive_loop<F, Fut>(
    thread_name: String,
    run_loop: F,
) -> Result<KeepAliveLoopHandle, UStatus>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    spawn_keepalive_loop_on(
        thread_name,
        || Builder::new_current_thread().enable_all().build(),
        run_loop,
    )
}

fn spawn_keepalive_loop_on<B, F, Fut>(
    thread_name: String,
    build_runtime: B,
    run_loop: F,
) -> Result<KeepAliveLoopHandle, UStatus>
where
    B: FnOnce() -> io::Result<Runtime> + Send + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    debug!(
        event = events::RUNTIME_SPAWN_START,
        component = COMPONENT,
        timer_thread = thread_name.as_str(),
        "spawning keep-alive runtime thread"
    );

    let (ready_tx, ready_rx) = mpsc::sync_channel::<io::Result<()>>(1);
    let join_handle = thread::Builder::new()
        .name(thread_name.clone())
        .spawn(move || {
            let runtime = match build_runtime() {
                Ok(runtime) => runtime,
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));
            drop(ready_tx);

            runtime.block_on(run_loop());
        })
        .map_err(|err| {
            warn!(
                event = events::RUNTIME_SPAWN_FAILED,
                component = COMPONENT,
                timer_thread = thread_name.as_str(),
                err = %err,
                "unable to spawn keep-alive runtime thread"
            );
            UStatus::fail_with_code(
                UCode::INTERNAL,
                format!("unable to spawn keep-alive thread {thread_name}: {err}"),
            )
        })?;

    let build_error = match ready_rx.recv() {
        Ok(Ok(())) => None,
        Ok(Err(err)) => Some(err.to_string()),
        Err(_) => Some("runtime thread exited before reporting readiness".to_string()),
    };
    if let Some(err) = build_error {
        error!(
            event = events::RUNTIME_BUILD_FAILED,
            component = COMPONENT,
            timer_thread = thread_name.as_str(),
            err = err.as_str(),
            "unable to build keep-alive runtime"
        );
        let _ = join_handle.join();
        return Err(UStatus::fail_with_code(
            UCode::INTERNAL,
            format!("unable to build keep-alive runtime on {thread_name}: {err}"),
        ));
    }

    info!(
        event = events::RUNTIME_SPAWN_OK,
        component = COMPONENT,
        timer_thread = thread_name.as_str(),
        "keep-alive runtime thread spawned"
    );

    Ok(KeepAliveLoopHandle {
        timer_thread: thread_name,
        join_handle,
    })
}
