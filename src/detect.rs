// MIT License

//! The cat detection contract.
//!
//! Detection itself is an external capability (a vision model, a cloud
//! call); the coordinator only needs the boolean answer. This module holds
//! the trait, the frame type handed to it, and a deterministic reference
//! detector for demos and tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::Result;

/// Detection threshold passed to every [`CatDetector`] call, on a 0-100
/// scale. Higher values demand more confidence before reporting a cat.
pub const CAT_SENSITIVITY: f32 = 50.0;

/// An owned camera frame.
///
/// The coordinator never interprets pixel data; it only rejects frames
/// that carry none. Layout of `pixels` is whatever the detector expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl CameraImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// True if the frame has a zero dimension or no pixel data. Empty
    /// frames are rejected before detection runs.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// Image-analysis capability consumed by the coordinator.
pub trait CatDetector: Send + Sync {
    /// Whether the image contains a cat, at the given sensitivity
    /// threshold (0-100).
    fn contains_cat(&self, image: &CameraImage, sensitivity: f32) -> Result<bool>;
}

/// Deterministic [`CatDetector`] for demos and tests.
///
/// Answers either a fixed boolean or a scripted sequence consumed one call
/// at a time; once the script is down to its last answer, that answer
/// repeats forever. An empty script answers `false`.
#[derive(Debug)]
pub struct FixedCatDetector {
    answers: Mutex<VecDeque<bool>>,
}

impl FixedCatDetector {
    /// A detector that always gives the same answer.
    pub fn always(answer: bool) -> Self {
        Self::scripted([answer])
    }

    /// A detector that plays back `answers` in order.
    pub fn scripted(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
        }
    }
}

impl CatDetector for FixedCatDetector {
    fn contains_cat(&self, _image: &CameraImage, _sensitivity: f32) -> Result<bool> {
        let mut answers = self.answers.lock().unwrap_or_else(|e| e.into_inner());
        let answer = if answers.len() > 1 {
            answers.pop_front().unwrap_or(false)
        } else {
            answers.front().copied().unwrap_or(false)
        };
        Ok(answer)
    }
}
