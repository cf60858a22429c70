// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video file access.
//!
//! This module defines the frame-accurate decoder interface used both for
//! saving frames and for the preview player, and the backend that opens
//! video files. The OpenCV backend is only available with the
//! `video-opencv` feature.

use crate::error::MediaError;
use image::RgbImage;
use std::path::Path;

/// Random access to the frames of one open video.
pub trait FrameDecoder {
    /// Frames per second as reported by the container.
    fn fps(&self) -> f64;

    /// Total number of frames (may be an estimate for some containers).
    fn frame_count(&self) -> u64;

    /// Position the decoder so the next read returns frame `index`.
    fn seek(&mut self, index: u64) -> Result<(), MediaError>;

    /// Decode the frame at the current position and advance by one.
    fn read_frame(&mut self) -> Result<RgbImage, MediaError>;

    /// Seek and read in one step.
    fn frame_at(&mut self, index: u64) -> Result<RgbImage, MediaError> {
        self.seek(index)?;
        self.read_frame()
    }
}

/// Opens video files. Each call yields an independent decoder handle.
pub trait MediaBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn FrameDecoder>, MediaError>;
}

/// Backend selected at compile time.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBackend;

impl MediaBackend for DefaultBackend {
    #[cfg(feature = "video-opencv")]
    fn open(&self, path: &Path) -> Result<Box<dyn FrameDecoder>, MediaError> {
        Ok(Box::new(opencv_backend::OpenCvDecoder::open(path)?))
    }

    #[cfg(not(feature = "video-opencv"))]
    fn open(&self, path: &Path) -> Result<Box<dyn FrameDecoder>, MediaError> {
        log::error!("Cannot open {}: no video backend compiled in", path.display());
        Err(MediaError::Unsupported)
    }
}

#[cfg(feature = "video-opencv")]
mod opencv_backend {
    use super::FrameDecoder;
    use crate::error::MediaError;
    use crate::util::timing::validate_fps;
    use image::RgbImage;
    use opencv::{core, imgproc, prelude::*, videoio};
    use std::path::Path;

    /// Decoder backed by `cv::VideoCapture`.
    pub struct OpenCvDecoder {
        capture: videoio::VideoCapture,
        fps: f64,
        frame_count: u64,
        position: u64,
    }

    impl OpenCvDecoder {
        pub fn open(path: &Path) -> Result<Self, MediaError> {
            let open_err = |reason: String| MediaError::Open {
                path: path.to_path_buf(),
                reason,
            };

            let capture = videoio::VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY)
                .map_err(|e| open_err(e.to_string()))?;
            if !capture.is_opened().map_err(|e| open_err(e.to_string()))? {
                return Err(open_err("not a readable video".to_string()));
            }

            let fps = capture
                .get(videoio::CAP_PROP_FPS)
                .map_err(|e| open_err(e.to_string()))?;
            let fps = validate_fps(fps)?;
            let frame_count = capture
                .get(videoio::CAP_PROP_FRAME_COUNT)
                .map_err(|e| open_err(e.to_string()))?
                .max(0.0) as u64;

            log::info!(
                "Opened {} with OpenCV ({:.3} fps, {} frames)",
                path.display(),
                fps,
                frame_count
            );

            Ok(Self {
                capture,
                fps,
                frame_count,
                position: 0,
            })
        }
    }

    impl FrameDecoder for OpenCvDecoder {
        fn fps(&self) -> f64 {
            self.fps
        }

        fn frame_count(&self) -> u64 {
            self.frame_count
        }

        fn seek(&mut self, index: u64) -> Result<(), MediaError> {
            let seek_err = |reason: String| MediaError::Seek { index, reason };
            let accepted = self
                .capture
                .set(videoio::CAP_PROP_POS_FRAMES, index as f64)
                .map_err(|e| seek_err(e.to_string()))?;
            if !accepted {
                return Err(seek_err("backend refused the position".to_string()));
            }
            self.position = index;
            Ok(())
        }

        fn read_frame(&mut self) -> Result<RgbImage, MediaError> {
            let index = self.position;
            let read_err = |reason: String| MediaError::Read { index, reason };

            let mut frame = core::Mat::default();
            let got = self
                .capture
                .read(&mut frame)
                .map_err(|e| read_err(e.to_string()))?;
            if !got || frame.empty() {
                return Err(MediaError::EndOfStream { index });
            }
            self.position += 1;

            let mut rgb = core::Mat::default();
            imgproc::cvt_color(&frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0)
                .map_err(|e| read_err(e.to_string()))?;
            if !rgb.is_continuous() {
                return Err(read_err("frame data is not continuous".to_string()));
            }

            let width = rgb.cols() as u32;
            let height = rgb.rows() as u32;
            let bytes = rgb.data_bytes().map_err(|e| read_err(e.to_string()))?;
            RgbImage::from_raw(width, height, bytes.to_vec())
                .ok_or_else(|| read_err(format!("unexpected buffer size for {}x{}", width, height)))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeBackend, FakeDecoder};
    use super::*;

    #[test]
    fn test_frame_at_seeks_then_reads() {
        let mut decoder = FakeDecoder::new(30.0, 100);
        let frame = decoder.frame_at(42).unwrap();
        assert_eq!(frame.get_pixel(0, 0)[0], 42);
        // Reading advances by one
        let next = decoder.read_frame().unwrap();
        assert_eq!(next.get_pixel(0, 0)[0], 43);
    }

    #[test]
    fn test_read_past_end_is_an_error() {
        let mut decoder = FakeDecoder::new(30.0, 10);
        assert!(matches!(
            decoder.frame_at(10),
            Err(MediaError::EndOfStream { index: 10 })
        ));
    }

    #[test]
    fn test_backend_hands_out_independent_handles() {
        let backend = FakeBackend::new(25.0, 50);
        let mut a = backend.open(Path::new("/v/a.mp4")).unwrap();
        let mut b = backend.open(Path::new("/v/a.mp4")).unwrap();
        a.seek(5).unwrap();
        b.seek(20).unwrap();
        assert_eq!(a.read_frame().unwrap().get_pixel(0, 0)[0], 5);
        assert_eq!(b.read_frame().unwrap().get_pixel(0, 0)[0], 20);
        assert_eq!(backend.opened.borrow().len(), 2);
    }

    #[cfg(not(feature = "video-opencv"))]
    #[test]
    fn test_default_backend_without_video_support() {
        let result = DefaultBackend.open(Path::new("/v/a.mp4"));
        assert!(matches!(result, Err(MediaError::Unsupported)));
    }
}
