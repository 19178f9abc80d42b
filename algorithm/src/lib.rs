// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Algorithm Modul for the navigation engine
//!
//! Pure route tracking, guidance and playback logic. Nothing in here does I/O
//! or waits, the asynchronous modules drive these types.

pub mod geo;
pub mod guidance;
pub mod playback;
pub mod route_model;

#[cfg(test)]
mod tests;
