// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session controller.
//!
//! Every UI event ends up as a method call on [`Controller`]. It owns the
//! session, the frame decoder used for saving and the preview player, and
//! turns every failure into a status message instead of a panic.

use crate::config::AppConfig;
use crate::error::SnipError;
use crate::io::media::{FrameDecoder, MediaBackend};
use crate::io::serialization::{ensure_dir, export_json, export_png};
use crate::models::{angle::Angle, session::Session};
use crate::playback::Player;
use crate::util::{paths::destination_dir, timing::{frame_index_at, validate_fps}};
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Lifecycle of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    NoFile,
    Loaded,
    /// A playback error occurred; waits for a new file
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Message shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Info, text: text.into() }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDirection {
    Backward,
    Forward,
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFrame {
    pub angle: Angle,
    pub frame_index: u64,
    pub image_path: PathBuf,
    pub sidecar_path: PathBuf,
}

pub struct Controller {
    config: AppConfig,
    backend: Box<dyn MediaBackend>,
    stage: Stage,
    session: Option<Session>,
    /// Handle used for exact frame extraction
    decoder: Option<Box<dyn FrameDecoder>>,
    /// Independent handle used for the preview
    player: Option<Player>,
    status: Option<Status>,

    /// Text of the path field
    pub path_input: String,

    /// Text of the angle field
    pub angle_input: String,
}

impl Controller {
    pub fn new(config: AppConfig, backend: Box<dyn MediaBackend>) -> Self {
        Self {
            config,
            backend,
            stage: Stage::NoFile,
            session: None,
            decoder: None,
            player: None,
            status: None,
            path_input: String::new(),
            angle_input: Angle::default().to_string(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Whether play/seek/save and the angle field accept input.
    pub fn controls_enabled(&self) -> bool {
        self.stage == Stage::Loaded
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.player.as_ref().is_some_and(Player::is_playing)
    }

    pub fn position_ms(&self) -> u64 {
        self.player.as_ref().map_or(0, Player::position_ms)
    }

    pub fn duration_ms(&self) -> u64 {
        self.player.as_ref().map_or(0, Player::duration_ms)
    }

    /// Open a video for both preview and extraction.
    ///
    /// An empty path is ignored. Any previous session is discarded, even if
    /// the new file cannot be opened.
    pub fn open(&mut self, path: &str) {
        let path = path.trim();
        if path.is_empty() {
            return;
        }
        self.path_input = path.to_string();

        match self.try_open(Path::new(path)) {
            Ok(()) => log::info!("Opened {}", path),
            Err(e) => {
                log::error!("Failed to open {}: {}", path, e);
                self.session = None;
                self.decoder = None;
                self.player = None;
                self.handle_playback_error(&e.to_string());
            }
        }
    }

    fn try_open(&mut self, path: &Path) -> Result<(), SnipError> {
        let decoder = self.backend.open(path)?;
        validate_fps(decoder.fps())?;
        let player = Player::new(self.backend.open(path)?)?;

        self.decoder = Some(decoder);
        self.player = Some(player);
        self.session = Some(Session::new(path));
        self.stage = Stage::Loaded;
        self.angle_input = Angle::default().to_string();
        self.status = None;
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        if !self.controls_enabled() {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.toggle();
        }
    }

    /// Move the playhead by the configured step.
    pub fn seek_relative(&mut self, direction: SeekDirection) {
        if !self.controls_enabled() {
            return;
        }
        let step = self.config.seek_step_ms.min(i64::MAX as u64) as i64;
        if let Some(player) = self.player.as_mut() {
            match direction {
                SeekDirection::Backward => player.seek_by(-step),
                SeekDirection::Forward => player.seek_by(step),
            }
        }
    }

    /// Jump to an absolute position (slider drag).
    pub fn seek_to(&mut self, position_ms: u64) {
        if !self.controls_enabled() {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.set_position(position_ms);
        }
    }

    /// Save the frame under the playhead and report the outcome.
    pub fn save_current_frame(&mut self) -> Option<SavedFrame> {
        match self.try_save() {
            Ok(saved) => {
                log::info!(
                    "Saved frame {} at angle {} to {} ({} updated)",
                    saved.frame_index,
                    saved.angle,
                    saved.image_path.display(),
                    saved.sidecar_path.display()
                );
                self.status = Some(Status::info(format!(
                    "Saved frame {} as {}",
                    saved.frame_index,
                    saved.image_path.display()
                )));
                Some(saved)
            }
            Err(e) => {
                log::error!("Save failed: {}", e);
                self.status = Some(Status::error(format!("Save failed: {}", e)));
                None
            }
        }
    }

    /// Every step either succeeds or leaves the table and angle untouched.
    fn try_save(&mut self) -> Result<SavedFrame, SnipError> {
        if !self.controls_enabled() {
            return Err(SnipError::NoVideo);
        }
        let (Some(session), Some(decoder), Some(player)) =
            (self.session.as_mut(), self.decoder.as_mut(), self.player.as_ref())
        else {
            return Err(SnipError::NoVideo);
        };

        let angle = match Angle::parse(&self.angle_input) {
            Ok(angle) => angle,
            Err(e) => {
                self.angle_input = session.angle.to_string();
                return Err(e);
            }
        };

        let frame_index = frame_index_at(decoder.fps(), player.position_ms())?;
        let frame_count = decoder.frame_count();
        if frame_count > 0 && frame_index >= frame_count {
            return Err(SnipError::PastLastFrame {
                index: frame_index,
                frame_count,
            });
        }
        log::debug!("Extracting frame {} at {} ms", frame_index, player.position_ms());
        let frame = decoder.frame_at(frame_index)?;

        let dest = destination_dir(&self.config.output_root, &session.directory);
        ensure_dir(&dest)?;

        let image_path = dest.join(session.image_name(angle));
        export_png(&frame, &image_path)?;

        let mut frames = session.frames.clone();
        frames.insert(angle, frame_index);
        let sidecar_path = dest.join(session.sidecar_name());
        export_json(&frames, &sidecar_path)?;

        session.frames = frames;
        session.angle = angle.next();
        self.angle_input = session.angle.to_string();

        Ok(SavedFrame {
            angle,
            frame_index,
            image_path,
            sidecar_path,
        })
    }

    /// Disable all actions and show `message` until a new file is opened.
    pub fn handle_playback_error(&mut self, message: &str) {
        self.stage = Stage::Errored;
        if let Some(player) = self.player.as_mut() {
            player.pause();
        }
        self.status = Some(Status::error(format!("Error: {}", message)));
    }

    /// Advance playback. Returns true while the video is playing.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        match self.player.as_mut() {
            Some(player) => {
                player.tick(now);
                player.is_playing()
            }
            None => false,
        }
    }

    /// New preview frame, if the playhead moved onto a different frame.
    pub fn refresh_preview(&mut self) -> Option<RgbImage> {
        if !self.controls_enabled() {
            return None;
        }
        let result = self.player.as_mut()?.preview();
        match result {
            Ok(frame) => frame,
            Err(e) => {
                log::error!("Preview failed: {}", e);
                self.handle_playback_error(&e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::testing::FakeBackend;
    use tempfile::TempDir;

    const VIDEO: &str = "/videos/shoot/clip.mp4";

    fn setup(fps: f64, frames: u64) -> (Controller, FakeBackend, TempDir) {
        let out = tempfile::tempdir().unwrap();
        let config = AppConfig {
            output_root: out.path().to_path_buf(),
            seek_step_ms: 100,
        };
        let backend = FakeBackend::new(fps, frames);
        let controller = Controller::new(config, Box::new(backend.clone()));
        (controller, backend, out)
    }

    fn read_sidecar(out: &TempDir) -> serde_json::Value {
        let path = out.path().join("videos/shoot/clip_frame_angle.json");
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_path_is_ignored() {
        let (mut c, backend, _out) = setup(30.0, 300);
        c.open("   ");
        assert!(!c.controls_enabled());
        assert!(c.session().is_none());
        assert!(backend.opened.borrow().is_empty());
    }

    #[test]
    fn test_open_uses_two_handles_and_enables_controls() {
        let (mut c, backend, _out) = setup(30.0, 300);
        c.open(VIDEO);
        assert!(c.controls_enabled());
        assert!(c.controls_enabled());
        assert_eq!(backend.opened.borrow().len(), 2);
        assert_eq!(c.angle_input, "0");
        assert_eq!(c.path_input, VIDEO);
        assert_eq!(c.duration_ms(), 10_000);
    }

    #[test]
    fn test_save_at_one_second_of_30fps() {
        let (mut c, _backend, out) = setup(30.0, 300);
        c.open(VIDEO);
        c.seek_to(1000);

        let saved = c.save_current_frame().unwrap();

        assert_eq!(saved.frame_index, 30);
        assert_eq!(saved.image_path, out.path().join("videos/shoot/clip_0.png"));
        assert!(saved.image_path.exists());
        let image = image::open(&saved.image_path).unwrap().to_rgb8();
        assert_eq!(image.get_pixel(0, 0)[0], 30);
        assert_eq!(read_sidecar(&out), serde_json::json!({"0": 30}));
        assert_eq!(c.angle_input, "45");
        assert_eq!(c.status().unwrap().kind, StatusKind::Info);
    }

    #[test]
    fn test_two_saves_at_same_position() {
        let (mut c, _backend, out) = setup(30.0, 300);
        c.open(VIDEO);
        c.seek_to(2000);

        c.save_current_frame().unwrap();
        c.save_current_frame().unwrap();

        assert_eq!(read_sidecar(&out), serde_json::json!({"0": 60, "45": 60}));
        assert!(out.path().join("videos/shoot/clip_45.png").exists());
        assert_eq!(c.angle_input, "90");
    }

    #[test]
    fn test_wraparound_overwrites_earlier_entry() {
        let (mut c, _backend, out) = setup(30.0, 300);
        c.open(VIDEO);
        for i in 0..9u64 {
            c.seek_to(i * 100);
            c.save_current_frame().unwrap();
        }

        let session = c.session().unwrap();
        assert_eq!(session.frames.len(), 8);
        // The ninth save reused angle 0 at 800 ms
        assert_eq!(session.frames.get(Angle::new(0)), Some(24));
        assert_eq!(read_sidecar(&out).as_object().unwrap().len(), 8);
        assert_eq!(c.angle_input, "45");
    }

    #[test]
    fn test_failed_read_changes_nothing() {
        let (mut c, backend, out) = setup(30.0, 300);
        *backend.fail_reads.borrow_mut() = true;
        c.open(VIDEO);
        c.seek_to(1000);

        assert!(c.save_current_frame().is_none());

        assert!(!out.path().join("videos").exists());
        assert!(c.session().unwrap().frames.is_empty());
        assert_eq!(c.angle_input, "0");
        let status = c.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("index 30"));
        // Save errors do not disable the session
        assert!(c.controls_enabled());
    }

    #[test]
    fn test_invalid_angle_restores_previous() {
        let (mut c, _backend, out) = setup(30.0, 300);
        c.open(VIDEO);
        c.save_current_frame().unwrap();
        c.angle_input = "forty-five".to_string();

        assert!(c.save_current_frame().is_none());

        assert_eq!(c.angle_input, "45");
        assert_eq!(c.session().unwrap().frames.len(), 1);
        assert_eq!(read_sidecar(&out), serde_json::json!({"0": 0}));
        assert_eq!(c.status().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn test_typed_angle_is_used_and_advanced() {
        let (mut c, _backend, out) = setup(30.0, 300);
        c.open(VIDEO);
        c.angle_input = "180".to_string();
        c.seek_to(500);

        let saved = c.save_current_frame().unwrap();

        assert_eq!(saved.angle, Angle::new(180));
        assert_eq!(read_sidecar(&out), serde_json::json!({"180": 15}));
        assert_eq!(c.angle_input, "225");
    }

    #[test]
    fn test_reopen_resets_table_without_merging_sidecar() {
        let (mut c, _backend, out) = setup(30.0, 300);
        c.open(VIDEO);
        c.seek_to(1000);
        c.save_current_frame().unwrap();
        c.save_current_frame().unwrap();

        c.open(VIDEO);
        assert!(c.session().unwrap().frames.is_empty());
        assert_eq!(c.angle_input, "0");

        c.seek_to(3000);
        c.save_current_frame().unwrap();
        assert_eq!(read_sidecar(&out), serde_json::json!({"0": 90}));
    }

    #[test]
    fn test_unwritable_output_root_is_reported() {
        let (mut c, _backend, out) = setup(30.0, 300);
        let blocker = out.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        c.config.output_root = blocker;
        c.open(VIDEO);

        assert!(c.save_current_frame().is_none());

        assert!(c.session().unwrap().frames.is_empty());
        assert_eq!(c.angle_input, "0");
        assert!(c.status().unwrap().text.contains("output directory"));
    }

    #[test]
    fn test_failed_sidecar_write_keeps_table_and_angle() {
        let (mut c, _backend, out) = setup(30.0, 300);
        let dest = out.path().join("videos/shoot");
        std::fs::create_dir_all(dest.join("clip_frame_angle.json")).unwrap();
        c.open(VIDEO);
        c.seek_to(1000);

        assert!(c.save_current_frame().is_none());

        assert_eq!(c.angle_input, "0");
        assert!(c.session().unwrap().frames.is_empty());
        let status = c.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("frame-angle table"));
        assert!(c.controls_enabled());
    }

    #[test]
    fn test_failed_image_write_keeps_table_and_angle() {
        let (mut c, _backend, out) = setup(30.0, 300);
        let dest = out.path().join("videos/shoot");
        std::fs::create_dir_all(dest.join("clip_0.png")).unwrap();
        c.open(VIDEO);
        c.seek_to(1000);

        assert!(c.save_current_frame().is_none());

        assert_eq!(c.angle_input, "0");
        assert!(c.session().unwrap().frames.is_empty());
        assert!(!dest.join("clip_frame_angle.json").exists());
        let status = c.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("could not write image"));
    }

    #[test]
    fn test_save_at_end_reports_playhead_past_last_frame() {
        let (mut c, _backend, out) = setup(30.0, 300);
        c.open(VIDEO);
        c.seek_to(u64::MAX);
        assert_eq!(c.position_ms(), 10_000);

        // The preview still shows the last frame
        let shown = c.refresh_preview().unwrap();
        assert_eq!(shown.get_pixel(0, 0)[0], 43); // 299 mod 256

        assert!(c.save_current_frame().is_none());

        assert!(!out.path().join("videos").exists());
        assert_eq!(c.angle_input, "0");
        let status = c.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("past the last frame"));

        c.seek_relative(SeekDirection::Backward);
        let saved = c.save_current_frame().unwrap();
        assert_eq!(saved.frame_index, 297);
    }

    #[test]
    fn test_open_failure_disables_controls() {
        let (mut c, _backend, _out) = setup(30.0, 300);
        c.open(VIDEO);
        c.open("/videos/notes.txt");

        assert!(!c.controls_enabled());
        assert!(!c.controls_enabled());
        assert!(c.session().is_none());
        assert!(c.status().unwrap().text.starts_with("Error: "));
        assert!(c.save_current_frame().is_none());

        c.open(VIDEO);
        assert!(c.controls_enabled());
        assert!(c.status().is_none());
    }

    #[test]
    fn test_playback_error_blocks_actions() {
        let (mut c, _backend, _out) = setup(30.0, 300);
        c.open(VIDEO);
        c.toggle_play();
        assert!(c.is_playing());

        c.handle_playback_error("codec not supported");

        assert!(!c.is_playing());
        assert_eq!(c.status().unwrap().text, "Error: codec not supported");
        c.seek_relative(SeekDirection::Forward);
        assert_eq!(c.position_ms(), 0);
        c.toggle_play();
        assert!(!c.is_playing());
    }

    #[test]
    fn test_preview_failure_becomes_playback_error() {
        let (mut c, backend, _out) = setup(30.0, 300);
        *backend.fail_reads.borrow_mut() = true;
        c.open(VIDEO);

        assert!(c.refresh_preview().is_none());
        assert!(!c.controls_enabled());
    }

    #[test]
    fn test_seek_relative_uses_configured_step() {
        let (mut c, _backend, _out) = setup(30.0, 300);
        c.config.seek_step_ms = 250;
        c.open(VIDEO);

        c.seek_relative(SeekDirection::Forward);
        c.seek_relative(SeekDirection::Forward);
        assert_eq!(c.position_ms(), 500);
        c.seek_relative(SeekDirection::Backward);
        assert_eq!(c.position_ms(), 250);
        c.seek_relative(SeekDirection::Backward);
        c.seek_relative(SeekDirection::Backward);
        assert_eq!(c.position_ms(), 0);
    }

    #[test]
    fn test_angle_does_not_depend_on_position() {
        let (mut c, _backend, _out) = setup(30.0, 300);
        c.open(VIDEO);
        let mut angles = Vec::new();
        for position in [9000, 10, 4500, 4500, 0, 7777, 3, 1200, 50] {
            c.seek_to(position);
            angles.push(c.save_current_frame().unwrap().angle.degrees());
        }
        assert_eq!(angles, vec![0, 45, 90, 135, 180, 225, 270, 315, 0]);
    }
}
