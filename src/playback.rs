// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview player used for visual navigation.
//!
//! The player keeps a millisecond clock and renders preview frames from its
//! own decoder handle. It never decides which frame gets saved; the
//! controller reads its position and asks a separate decoder for that.

use crate::error::MediaError;
use crate::io::media::FrameDecoder;
use crate::util::timing::{duration_ms, frame_index_at};
use image::RgbImage;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Playing,
}

pub struct Player {
    decoder: Box<dyn FrameDecoder>,
    state: PlaybackState,
    position_ms: u64,
    duration_ms: u64,
    /// Clock reference while playing
    last_tick: Option<Instant>,
    /// Frame index of the last preview handed out
    shown_frame: Option<u64>,
}

impl Player {
    /// Wrap a freshly opened decoder. The player starts paused at 0.
    pub fn new(decoder: Box<dyn FrameDecoder>) -> Result<Self, MediaError> {
        let duration_ms = duration_ms(decoder.fps(), decoder.frame_count())?;
        Ok(Self {
            decoder,
            state: PlaybackState::Paused,
            position_ms: 0,
            duration_ms,
            last_tick: None,
            shown_frame: None,
        })
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn play(&mut self) {
        if self.position_ms >= self.duration_ms {
            // Restart from the top like most players do
            self.position_ms = 0;
        }
        self.state = PlaybackState::Playing;
        self.last_tick = None;
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
        self.last_tick = None;
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(),
        }
    }

    /// Jump to `position_ms`, clamped into `[0, duration]`.
    pub fn set_position(&mut self, position_ms: u64) {
        self.position_ms = position_ms.min(self.duration_ms);
        log::debug!("Seek to {} ms", self.position_ms);
    }

    /// Move by a signed offset, clamped at both ends.
    pub fn seek_by(&mut self, delta_ms: i64) {
        let target = if delta_ms.is_negative() {
            self.position_ms.saturating_sub(delta_ms.unsigned_abs())
        } else {
            self.position_ms.saturating_add(delta_ms as u64)
        };
        self.set_position(target);
    }

    /// Advance the clock while playing. Returns true if the position moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        let Some(last) = self.last_tick.replace(now) else {
            return false;
        };

        let elapsed = now.saturating_duration_since(last).as_millis() as u64;
        let before = self.position_ms;
        self.set_position(before.saturating_add(elapsed));
        if self.position_ms >= self.duration_ms {
            self.pause();
        }
        self.position_ms != before
    }

    /// Decode the frame under the playhead if it changed since the last call.
    pub fn preview(&mut self) -> Result<Option<RgbImage>, MediaError> {
        let last_frame = self.decoder.frame_count().saturating_sub(1);
        let index = frame_index_at(self.decoder.fps(), self.position_ms)?.min(last_frame);
        if self.shown_frame == Some(index) {
            return Ok(None);
        }

        let frame = self.decoder.frame_at(index)?;
        self.shown_frame = Some(index);
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::testing::FakeDecoder;
    use std::time::Duration;

    fn player(fps: f64, frames: u64) -> Player {
        Player::new(Box::new(FakeDecoder::new(fps, frames))).unwrap()
    }

    #[test]
    fn test_starts_paused_at_zero() {
        let p = player(30.0, 300);
        assert!(!p.is_playing());
        assert_eq!(p.position_ms(), 0);
        assert_eq!(p.duration_ms(), 10_000);
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut p = player(30.0, 300);
        p.seek_by(-100);
        assert_eq!(p.position_ms(), 0);
        p.seek_by(250);
        assert_eq!(p.position_ms(), 250);
        p.set_position(50_000);
        assert_eq!(p.position_ms(), 10_000);
    }

    #[test]
    fn test_tick_advances_only_while_playing() {
        let mut p = player(30.0, 300);
        let start = Instant::now();
        assert!(!p.tick(start));

        p.toggle();
        assert!(p.is_playing());
        assert!(!p.tick(start));
        assert!(p.tick(start + Duration::from_millis(40)));
        assert_eq!(p.position_ms(), 40);

        p.toggle();
        assert!(!p.tick(start + Duration::from_millis(500)));
        assert_eq!(p.position_ms(), 40);
    }

    #[test]
    fn test_pauses_at_end() {
        let mut p = player(10.0, 10);
        let start = Instant::now();
        p.play();
        p.tick(start);
        p.tick(start + Duration::from_secs(5));
        assert_eq!(p.position_ms(), 1000);
        assert!(!p.is_playing());

        p.play();
        assert_eq!(p.position_ms(), 0);
    }

    #[test]
    fn test_preview_only_decodes_on_frame_change() {
        let mut p = player(30.0, 300);
        let first = p.preview().unwrap().unwrap();
        assert_eq!(first.get_pixel(0, 0)[0], 0);
        assert!(p.preview().unwrap().is_none());

        p.set_position(10);
        assert!(p.preview().unwrap().is_none());

        p.set_position(1000);
        let frame = p.preview().unwrap().unwrap();
        assert_eq!(frame.get_pixel(0, 0)[0], 30);
    }

    #[test]
    fn test_preview_at_end_shows_last_frame() {
        let mut p = player(30.0, 90);
        p.set_position(p.duration_ms());
        let frame = p.preview().unwrap().unwrap();
        assert_eq!(frame.get_pixel(0, 0)[0], 89);
    }

    #[test]
    fn test_invalid_fps_is_rejected() {
        let result = Player::new(Box::new(FakeDecoder::new(0.0, 10)));
        assert!(matches!(result, Err(MediaError::InvalidFps(_))));
    }
}
