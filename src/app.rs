// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main window and egui App implementation.
//!
//! This module lays out the window, translates widget and keyboard events
//! into controller calls, and keeps the preview texture in sync with the
//! playhead.

use crate::config::AppConfig;
use crate::controller::{Controller, SeekDirection, StatusKind};
use crate::io::media::MediaBackend;
use crate::ui::{canvas, properties, timeline, toolbar};
use std::path::PathBuf;
use std::time::Instant;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "avi", "mkv", "webm", "mpg", "mpeg", "wmv"];

/// Main application state.
pub struct SnipperApp {
    controller: Controller,

    /// Preview texture for display
    preview_texture: Option<egui::TextureHandle>,

    /// Preview dimensions (width, height)
    preview_size: Option<(u32, u32)>,
}

impl SnipperApp {
    /// Create the window state, optionally opening a video right away.
    pub fn new(config: AppConfig, backend: Box<dyn MediaBackend>, initial: Option<PathBuf>) -> Self {
        let mut app = Self {
            controller: Controller::new(config, backend),
            preview_texture: None,
            preview_size: None,
        };
        if let Some(path) = initial {
            app.open(&path.to_string_lossy());
        }
        app
    }

    fn open(&mut self, path: &str) {
        self.preview_texture = None;
        self.preview_size = None;
        self.controller.open(path);
    }

    /// Ask for a video with the native file picker.
    fn browse(&mut self) {
        let start_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Open Movie")
            .set_directory(start_dir)
            .add_filter("Videos", VIDEO_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.open(&path.to_string_lossy());
        }
    }

    /// Upload a new preview frame if the playhead moved onto one.
    fn update_preview(&mut self, ctx: &egui::Context) {
        let Some(frame) = self.controller.refresh_preview() else {
            return;
        };
        let (width, height) = frame.dimensions();
        let color_image =
            egui::ColorImage::from_rgb([width as usize, height as usize], frame.as_raw());

        match self.preview_texture {
            Some(ref mut texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.preview_texture =
                    Some(ctx.load_texture("preview_frame", color_image, egui::TextureOptions::LINEAR));
            }
        }
        self.preview_size = Some((width, height));
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let text_has_focus = ctx.wants_keyboard_input();
        for shortcut in ctx.input(|i| pressed_shortcuts(i, text_has_focus)) {
            match shortcut {
                Shortcut::Browse => self.browse(),
                Shortcut::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                Shortcut::Save => {
                    self.controller.save_current_frame();
                }
                Shortcut::TogglePlay => self.controller.toggle_play(),
                Shortcut::Seek(direction) => self.controller.seek_relative(direction),
            }
        }
    }
}

/// Keyboard actions of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shortcut {
    Browse,
    Quit,
    Save,
    TogglePlay,
    Seek(SeekDirection),
}

/// Shortcuts pressed this frame.
///
/// Command shortcuts work everywhere, so a typed angle can be saved with
/// Ctrl+S straight away. Plain keys are left to a focused text field.
fn pressed_shortcuts(input: &egui::InputState, text_has_focus: bool) -> Vec<Shortcut> {
    let mut shortcuts = Vec::new();

    if input.modifiers.command {
        if input.key_pressed(egui::Key::O) {
            shortcuts.push(Shortcut::Browse);
        }
        if input.key_pressed(egui::Key::Q) {
            shortcuts.push(Shortcut::Quit);
        }
        if input.key_pressed(egui::Key::S) {
            shortcuts.push(Shortcut::Save);
        }
    }

    if text_has_focus {
        return shortcuts;
    }
    if input.key_pressed(egui::Key::Space) {
        shortcuts.push(Shortcut::TogglePlay);
    }
    if input.key_pressed(egui::Key::ArrowLeft) {
        shortcuts.push(Shortcut::Seek(SeekDirection::Backward));
    }
    if input.key_pressed(egui::Key::ArrowRight) {
        shortcuts.push(Shortcut::Seek(SeekDirection::Forward));
    }
    shortcuts
}

impl eframe::App for SnipperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let playing = self.controller.tick(Instant::now());
        self.handle_shortcuts(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Video... (Ctrl+O)").clicked() {
                        ui.close_menu();
                        self.browse();
                    }
                    ui.separator();
                    if ui.button("Quit (Ctrl+Q)").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Path bar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &mut self.controller.path_input))
            .inner;
        match toolbar_action {
            toolbar::ToolbarAction::Open => {
                let path = self.controller.path_input.clone();
                self.open(&path);
            }
            toolbar::ToolbarAction::Browse => self.browse(),
            toolbar::ToolbarAction::None => {}
        }

        // Status line
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            match self.controller.status() {
                Some(status) => {
                    let color = match status.kind {
                        StatusKind::Info => ui.visuals().text_color(),
                        StatusKind::Error => ui.visuals().error_fg_color,
                    };
                    ui.label(egui::RichText::new(&status.text).color(color));
                }
                None => {
                    ui.label(egui::RichText::new("Ready").weak());
                }
            }
        });

        // Transport controls
        let view = timeline::TimelineView {
            enabled: self.controller.controls_enabled(),
            playing: self.controller.is_playing(),
            position_ms: self.controller.position_ms(),
            duration_ms: self.controller.duration_ms(),
            seek_step_ms: self.controller.config().seek_step_ms,
        };
        let timeline_action = egui::TopBottomPanel::bottom("timeline")
            .show(ctx, |ui| timeline::show(ui, &view, &mut self.controller.angle_input))
            .inner;
        match timeline_action {
            timeline::TimelineAction::TogglePlay => self.controller.toggle_play(),
            timeline::TimelineAction::Seek(direction) => self.controller.seek_relative(direction),
            timeline::TimelineAction::SeekTo(position) => self.controller.seek_to(position),
            timeline::TimelineAction::Save => {
                self.controller.save_current_frame();
            }
            timeline::TimelineAction::None => {}
        }

        // Session panel (right side)
        egui::SidePanel::right("session")
            .default_width(220.0)
            .show(ctx, |ui| {
                properties::show(ui, self.controller.session(), &self.controller.config().output_root)
            });

        self.update_preview(ctx);

        // Preview (center)
        let has_video = self.controller.session().is_some();
        egui::CentralPanel::default().show(ctx, |ui| {
            canvas::show(ui, &self.preview_texture, self.preview_size, has_video);
        });

        if playing {
            ctx.request_repaint();
        }
    }
}
