// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Path bar above the preview.
//!
//! Lets the user type or paste a video path and open it, or browse for one
//! with the native file dialog.

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    /// Open the path currently in the text field
    Open,
    Browse,
}

/// Display the path field with its open and browse buttons.
pub fn show(ui: &mut egui::Ui, path_input: &mut String) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Video:");

        let field_width = (ui.available_width() - 150.0).max(120.0);
        let response = ui.add(
            egui::TextEdit::singleline(path_input)
                .hint_text("/path/to/video.mp4")
                .desired_width(field_width),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            action = ToolbarAction::Open;
        }

        if ui.button("▶ Open").clicked() {
            action = ToolbarAction::Open;
        }
        if ui.button("📂 Browse...").clicked() {
            action = ToolbarAction::Browse;
        }
    });

    action
}
