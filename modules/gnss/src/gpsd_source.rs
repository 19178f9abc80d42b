// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::position::GnssPosition;
use futures::StreamExt;
use gpsd_proto::{self, Mode, Tpv};
use module_core::{EventKind, Module, ModuleCtx};
use std::{
    io::{self, Error, ErrorKind},
    net::SocketAddr,
    str::FromStr,
    sync::Arc,
};
use tokio::sync::Notify;
use tokio::{io::AsyncWriteExt, net::TcpStream};
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, error, info, warn};

/// Converts a gpsd TPV report into a [`GnssPosition`].
///
/// Reports without a fix, position or valid time are skipped. A missing
/// speed counts as standing still and a missing track leaves the heading open.
pub fn tpv_to_position(tpv: &Tpv) -> Option<GnssPosition> {
    if matches!(tpv.mode, Mode::NoFix) {
        return None;
    }
    let lat = tpv.lat?;
    let lon = tpv.lon?;
    let time = tpv.time.as_ref()?;
    let datetime = chrono::DateTime::<chrono::Utc>::from_str(time).ok()?;
    let speed = tpv.speed.map_or(0.0, f64::from);
    let heading = tpv.track.map(f64::from);
    Some(GnssPosition::new(lat, lon, speed, heading, &datetime))
}

/// GPSD daemon based GNSS source
struct GpsdPositionRuntime {
    /// The start signal for the GPSD task to start execution
    notify: Arc<Notify>,
    /// The sender of the event_bus to emit the events
    sender: tokio::sync::broadcast::Sender<module_core::Event>,
}

impl GpsdPositionRuntime {
    fn new(sender: tokio::sync::broadcast::Sender<module_core::Event>) -> Self {
        GpsdPositionRuntime {
            notify: Arc::new(Notify::new()),
            sender,
        }
    }

    fn process_tpv_msg(&self, tpv: &Tpv) {
        let Some(position) = tpv_to_position(tpv) else {
            debug!("Skip TPV report without usable fix");
            return;
        };
        let _ = self.sender.send(module_core::Event {
            kind: EventKind::GnssPositionEvent(Arc::new(position)),
        });
    }
}

async fn gpsd_reader(mut stream: TcpStream, runtime: GpsdPositionRuntime) {
    runtime.notify.notified().await;
    if let Err(e) = stream
        .write_all(gpsd_proto::ENABLE_WATCH_CMD.as_bytes())
        .await
    {
        error!("Failed to enable GPSD watch mode. Error: {e}");
        return;
    }
    let mut framed = Framed::new(stream, LinesCodec::new());
    while let Some(result) = framed.next().await {
        match result {
            Ok(ref line) => {
                if let Ok(tpv) = serde_json::from_str::<Tpv>(line) {
                    runtime.process_tpv_msg(&tpv);
                }
            }
            Err(e) => {
                warn!("GPSD receive error {e:?}");
            }
        }
    }
    info!("GPSD connection closed");
}

/// Publishes live positions read from a gpsd daemon.
///
/// The connection is opened in [`new`](Self::new), reading starts with
/// [`run`](Module::run) and ends with the `QuitEvent`.
pub struct GpsdModule {
    ctx: ModuleCtx,
    gpsd_handle: tokio::task::JoinHandle<()>,
    task_notify: Arc<Notify>,
}

impl GpsdModule {
    /// Connects to the gpsd daemon at `address`.
    ///
    /// # Returns
    ///
    /// * `Ok(GpsdModule)` – The connection is established.
    /// * `Err(io::Error)` – The address is invalid or the connection failed.
    pub async fn new(ctx: ModuleCtx, address: &str) -> Result<Self, Error> {
        let address: SocketAddr = match address.parse() {
            Ok(addr) => addr,
            Err(e) => return Err(io::Error::new(ErrorKind::InvalidInput, e)),
        };
        let socket = TcpStream::connect(address).await?;
        info!("Connected to GPSD at {}", address);
        let rt = GpsdPositionRuntime::new(ctx.sender.clone());
        let notify = rt.notify.clone();
        let gpsd_reader_task_handle = tokio::spawn(async move { gpsd_reader(socket, rt).await });
        Ok(GpsdModule {
            ctx,
            gpsd_handle: gpsd_reader_task_handle,
            task_notify: notify,
        })
    }
}

#[async_trait::async_trait]
impl Module for GpsdModule {
    async fn run(&mut self) -> Result<(), ()> {
        self.task_notify.notify_one();
        let mut run = true;
        while run {
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            if let EventKind::QuitEvent = event.kind {
                                self.gpsd_handle.abort();
                                run = false;
                            }
                        }
                        Err(e) => error!("Failed to receive event. Error: {}", e),
                    }
                }
            }
        }
        Ok(())
    }
}
