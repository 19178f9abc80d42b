// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Live position sources for the navigation engine.

pub mod gpsd_source;

pub use gpsd_source::GpsdModule;
