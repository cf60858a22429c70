// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video timeline scrubber and transport controls.
//!
//! This module provides the position slider and the prev / play / next /
//! save row together with the angle field used to tag the next save.

use crate::controller::SeekDirection;

/// Result of timeline interaction.
pub enum TimelineAction {
    None,
    TogglePlay,
    Seek(SeekDirection),
    SeekTo(u64),
    Save,
}

/// What the timeline needs to draw itself.
pub struct TimelineView {
    pub enabled: bool,
    pub playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub seek_step_ms: u64,
}

/// Display the slider and transport row.
pub fn show(ui: &mut egui::Ui, view: &TimelineView, angle_input: &mut String) -> TimelineAction {
    let mut action = TimelineAction::None;

    ui.add_enabled_ui(view.enabled, |ui| {
        ui.horizontal(|ui| {
            let mut position = view.position_ms as f64;
            ui.spacing_mut().slider_width = (ui.available_width() - 180.0).max(100.0);
            let slider = egui::Slider::new(&mut position, 0.0..=view.duration_ms.max(1) as f64)
                .show_value(false);
            if ui.add(slider).changed() {
                action = TimelineAction::SeekTo(position.max(0.0) as u64);
            }
            ui.label(
                egui::RichText::new(format!(
                    "{} / {}",
                    format_ms(view.position_ms),
                    format_ms(view.duration_ms)
                ))
                .monospace(),
            );
        });

        ui.horizontal(|ui| {
            let step = view.seek_step_ms;
            if ui
                .button("⏮")
                .on_hover_text(format!("Back {} ms (←)", step))
                .clicked()
            {
                action = TimelineAction::Seek(SeekDirection::Backward);
            }

            let play_label = if view.playing { "⏸" } else { "▶" };
            if ui.button(play_label).on_hover_text("Play / pause (Space)").clicked() {
                action = TimelineAction::TogglePlay;
            }

            if ui
                .button("⏭")
                .on_hover_text(format!("Forward {} ms (→)", step))
                .clicked()
            {
                action = TimelineAction::Seek(SeekDirection::Forward);
            }

            ui.separator();

            if ui.button("💾 Save frame").on_hover_text("Ctrl+S").clicked() {
                action = TimelineAction::Save;
            }

            ui.label("Angle:");
            ui.add(egui::TextEdit::singleline(angle_input).desired_width(50.0));
        });
    });

    action
}

/// `m:ss.mmm` for display next to the slider.
pub fn format_ms(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    let millis = ms % 1000;
    format!("{}:{:02}.{:03}", minutes, seconds, millis)
}
