// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Small pure helpers shared by the controller and the player.

pub mod paths;
pub mod timing;
