// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for video files and saved frames.

pub mod media;
pub mod serialization;
