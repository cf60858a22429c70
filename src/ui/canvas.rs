// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview area for the video under the playhead.
//!
//! This module draws the current preview frame scaled to fit the
//! available space, or a short hint when no video is open.

/// Display the preview frame, letterboxed into the available space.
pub fn show(
    ui: &mut egui::Ui,
    preview_texture: &Option<egui::TextureHandle>,
    preview_size: Option<(u32, u32)>,
    has_video: bool,
) {
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(20);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        match (preview_texture, preview_size) {
            (Some(texture), Some((width, height))) if width > 0 && height > 0 => {
                let image_rect = fit_rect(ui.min_rect().min, ui.available_size(), width, height);
                ui.painter().image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            _ if has_video => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            }
            _ => {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.heading(
                            egui::RichText::new("Video Snipper")
                                .size(28.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new("File → Open Video... or type a path above")
                                .weak()
                                .color(egui::Color32::from_gray(150)),
                        );
                    });
                });
            }
        }
    });
}

/// Largest rect with the frame's aspect ratio that fits, centered.
fn fit_rect(origin: egui::Pos2, available: egui::Vec2, width: u32, height: u32) -> egui::Rect {
    let img_aspect = width as f32 / height as f32;
    let available_aspect = available.x / available.y;

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Wider than the space - fit to width
        (available.x, available.x / img_aspect)
    } else {
        (available.y * img_aspect, available.y)
    };

    let x_offset = (available.x - display_width) / 2.0;
    let y_offset = (available.y - display_height) / 2.0;

    egui::Rect::from_min_size(
        origin + egui::vec2(x_offset, y_offset),
        egui::vec2(display_width, display_height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_frame_letterboxes_vertically() {
        let rect = fit_rect(egui::pos2(0.0, 0.0), egui::vec2(400.0, 400.0), 1920, 1080);
        assert_eq!(rect.width(), 400.0);
        assert!((rect.height() - 225.0).abs() < 0.01);
        assert!((rect.min.y - 87.5).abs() < 0.01);
    }

    #[test]
    fn test_fit_tall_frame_pillarboxes() {
        let rect = fit_rect(egui::pos2(10.0, 10.0), egui::vec2(640.0, 360.0), 480, 640);
        assert_eq!(rect.height(), 360.0);
        assert!((rect.width() - 270.0).abs() < 0.01);
        assert!((rect.center().x - 330.0).abs() < 0.01);
    }
}
