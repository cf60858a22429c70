// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session panel.
//!
//! Shows where frames of the open video are written and which frame has
//! been captured for each angle so far.

use crate::models::session::Session;
use crate::util::paths::destination_dir;
use std::path::Path;

/// Display the session details and the angle/frame table.
pub fn show(ui: &mut egui::Ui, session: Option<&Session>, output_root: &Path) {
    ui.heading("Session");
    ui.separator();

    let Some(session) = session else {
        ui.label(egui::RichText::new("No video loaded").weak());
        return;
    };

    egui::Grid::new("session_info")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Video:");
            ui.label(&session.basename);
            ui.end_row();

            ui.label("Output:");
            ui.label(destination_dir(output_root, &session.directory).display().to_string());
            ui.end_row();

            ui.label("Next angle:");
            match session.frames.get(session.angle) {
                Some(previous) => ui.label(format!("{} (replaces frame {})", session.angle, previous)),
                None => ui.label(session.angle.to_string()),
            };
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.label(egui::RichText::new(format!("Saved frames ({})", session.frames.len())).strong());
    ui.separator();

    if session.frames.is_empty() {
        ui.label(egui::RichText::new("Nothing saved yet").weak());
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("frame_table")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Angle").weak());
                ui.label(egui::RichText::new("Frame").weak());
                ui.end_row();
                for (angle, frame_index) in session.frames.iter() {
                    ui.label(format!("{}°", angle));
                    ui.label(frame_index.to_string());
                    ui.end_row();
                }
            });
    });
}
