// SPDX-License-Identifier: GPL-3.0-only

//! Catalog fixtures and store fakes shared by the resolution tests

pub mod fixtures;
pub mod recording;

pub use recording::{Lookup, RecordingStore};
