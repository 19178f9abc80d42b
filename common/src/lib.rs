// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Common Modul for the navigation engine
//!
//! Provides the common data types that are used across every modul.

pub mod error;
pub mod frame_clock;
pub mod navigation;
pub mod position;
pub mod route;
pub mod test_helper;
