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

mod echo_solver;
mod logging_transport;

use crate::echo_solver::EchoSolver;
use crate::logging_transport::LoggingTransport;
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use up_response_broadcaster::{BroadcasterConfig, ResponseService, TransportPublishPort};
use up_rust::{UCode, UStatus, UTransport};

#[derive(Parser)]
#[command()]
struct BroadcasterArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), UStatus> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    info!("Started up-linux-response-broadcaster");

    let args = BroadcasterArgs::parse();
    let config = BroadcasterConfig::from_file(&args.config)?;

    let transport: Arc<dyn UTransport> = Arc::new(LoggingTransport);
    let port = TransportPublishPort::new(
        transport,
        config.primary.to_binding()?,
        config.keep_alive.to_binding()?,
    )?;

    let service = ResponseService::start(
        &config.service_name,
        config.keepalive_interval(),
        EchoSolver,
        Arc::new(port),
    )?;

    // One request per stdin line until EOF or ctrl-c.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = line.map_err(|e| {
                    UStatus::fail_with_code(UCode::INTERNAL, format!("Unable to read stdin: {e:?}"))
                })?;
                let Some(line) = line else {
                    break;
                };
                match service.process(&line).await {
                    Ok(route) => info!(
                        sequence_num = route.header.sequence_num,
                        waypoints = route.waypoints.len(),
                        "route published"
                    ),
                    Err(err) => warn!(err = %err, "request failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    tokio::task::spawn_blocking(move || service.shutdown())
        .await
        .map_err(|e| {
            UStatus::fail_with_code(UCode::INTERNAL, format!("Shutdown task failed: {e:?}"))
        })??;

    info!("Stopped up-linux-response-broadcaster");
    Ok(())
}
