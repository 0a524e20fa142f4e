use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{Surface, SurfaceError};
use crate::application::AppEvent;
use crate::render::{Color, Framebuffer};

/// What a headless surface has been asked to do so far
#[derive(Debug, Default)]
struct Recording {
    titles: Vec<String>,
    frames_presented: u64,
    last_frame: Option<Framebuffer>,
}

/// Shared view of a [`HeadlessSurface`]'s recording
///
/// Obtained before handing the surface to the engine, read after the run.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRecord(Rc<RefCell<Recording>>);

impl HeadlessRecord {
    /// Every title set, in order
    pub fn titles(&self) -> Vec<String> {
        self.0.borrow().titles.clone()
    }

    /// Most recent title
    pub fn last_title(&self) -> Option<String> {
        self.0.borrow().titles.last().cloned()
    }

    /// Number of frames presented
    pub fn frames_presented(&self) -> u64 {
        self.0.borrow().frames_presented
    }

    /// Colour of a pixel in the last presented frame
    pub fn last_pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.0.borrow().last_frame.as_ref()?.pixel(x, y)
    }
}

/// In-memory surface replaying scripted events
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    script: HashMap<u64, Vec<AppEvent>>,
    polls: u64,
    record: HeadlessRecord,
}

impl HeadlessSurface {
    /// Create a surface of `width` x `height` pixels with no scripted input
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            script: HashMap::new(),
            polls: 0,
            record: HeadlessRecord::default(),
        }
    }

    /// Deliver `events` on the given frame (0-based)
    #[must_use]
    pub fn with_events(mut self, frame: u64, events: Vec<AppEvent>) -> Self {
        self.script.entry(frame).or_default().extend(events);
        self
    }

    /// Handle for inspecting what was presented
    pub fn record(&self) -> HeadlessRecord {
        self.record.clone()
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_title(&mut self, title: &str) -> Result<(), SurfaceError> {
        self.record.0.borrow_mut().titles.push(title.to_string());
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<AppEvent>, SurfaceError> {
        let events = self.script.remove(&self.polls).unwrap_or_default();
        self.polls += 1;
        for event in &events {
            if let AppEvent::WindowResized { width, height } = event {
                self.width = *width;
                self.height = *height;
            }
        }
        Ok(events)
    }

    fn present(&mut self, framebuffer: &Framebuffer) -> Result<(), SurfaceError> {
        let mut recording = self.record.0.borrow_mut();
        recording.frames_presented += 1;
        recording.last_frame = Some(framebuffer.clone());
        Ok(())
    }
}
