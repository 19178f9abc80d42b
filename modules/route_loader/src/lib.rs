// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Route loading module
//!
//! Reads routes from the file system and hands them complete to the navigation module.
//! Files with the `.csv` extension are plain `longitude,latitude` geometries, every other
//! file is treated as a routing provider GeoJSON response.

use common::error::NavigationError;
use common::route::RouteDescription;
use module_core::{EventKind, ModuleCtx};
use std::{io, path::Path, sync::Arc};
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info};

/// File based source of [`RouteDescription`]s.
pub struct RouteLoader {
    module_ctx: ModuleCtx,
}

impl RouteLoader {
    pub fn new(ctx: ModuleCtx) -> Self {
        RouteLoader { module_ctx: ctx }
    }

    async fn load_file(&self, file_path: &Path) -> io::Result<String> {
        let mut file = tokio::fs::File::open(file_path).await?;
        let mut content = String::default();
        file.read_to_string(&mut content).await?;
        Ok(content)
    }

    /// Reads and parses the route stored at `file_path`.
    ///
    /// I/O errors are reported as [`NavigationError::UpstreamFailure`], parse
    /// errors keep the classification of the parser.
    pub async fn load_route(&self, file_path: &Path) -> Result<RouteDescription, NavigationError> {
        let content = self.load_file(file_path).await.map_err(|e| {
            NavigationError::UpstreamFailure(format!(
                "Failed to read route {}: {}",
                file_path.to_string_lossy(),
                e
            ))
        })?;
        if is_csv(file_path) {
            RouteDescription::from_csv_reader(content.as_bytes())
        } else {
            RouteDescription::from_geojson(&content)
        }
    }

    async fn handle_load_request(&self, file_path: &Path) {
        let kind = match self.load_route(file_path).await {
            Ok(description) => {
                info!(
                    "Loaded route \"{}\" with {} points",
                    file_path.to_string_lossy(),
                    description.geometry.len()
                );
                EventKind::RouteLoadedEvent(Arc::new(description))
            }
            Err(e) => {
                error!(
                    "Failed to load route \"{}\". Error: {}",
                    file_path.to_string_lossy(),
                    e
                );
                EventKind::NavigationErrorEvent(Arc::new(e))
            }
        };
        if self.module_ctx.publish_event(kind).is_err() {
            debug!("No receiver for the route of {}", file_path.to_string_lossy());
        }
    }
}

fn is_csv(file_path: &Path) -> bool {
    file_path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"))
}

#[async_trait::async_trait]
impl module_core::Module for RouteLoader {
    async fn run(&mut self) -> Result<(), ()> {
        let mut run = true;
        while run {
            tokio::select! {
                event = self.module_ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            match event.kind {
                                EventKind::QuitEvent => run = false,
                                EventKind::LoadRouteRequestEvent(file_path) => {
                                    self.handle_load_request(&file_path).await;
                                }
                                _ => ()
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

#[cfg(test)]
mod tests {
    use super::is_csv;
    use std::path::Path;

    #[test]
    fn csv_extension_is_case_insensitive() {
        assert!(is_csv(Path::new("/tmp/route.csv")));
        assert!(is_csv(Path::new("route.CSV")));
        assert!(!is_csv(Path::new("route.json")));
        assert!(!is_csv(Path::new("route")));
    }
}
