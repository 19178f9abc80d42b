// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use algorithm::guidance::GuidanceConfig;
use algorithm::playback::PlaybackConfig;
use serde::Deserialize;
use std::path::Path;

/// Tunables read from a JSON configuration file.
///
/// Missing sections and fields keep their defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub guidance: GuidanceConfig,
    pub playback: PlaybackConfig,
}

impl NavigationConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub async fn from_file(path: &Path) -> std::io::Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Ok(Self::from_json(&json)?)
    }
}
