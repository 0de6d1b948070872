use std::collections::HashMap;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect as ImageRect;
use log::debug;

use crate::error::PresentError;
use crate::models::Rect;

/// Outline `rect` from `(x, y)` to `(x + width, y + height)` inclusive,
/// growing outward by one pixel per unit of thickness
pub fn draw_rectangle(frame: &mut RgbImage, rect: &Rect, color: Rgb<u8>, thickness: u32) {
    for i in 0..thickness.max(1) {
        let outline = ImageRect::at(rect.x as i32 - i as i32, rect.y as i32 - i as i32)
            .of_size(rect.width + 1 + 2 * i, rect.height + 1 + 2 * i);
        draw_hollow_rect_mut(frame, outline, color);
    }
}

/// Where annotated frames go and where cancellation comes from
pub trait Presenter {
    fn draw_rectangle(&mut self, frame: &mut RgbImage, rect: &Rect, color: Rgb<u8>, thickness: u32) {
        draw_rectangle(frame, rect, color, thickness);
    }

    fn show(&mut self, window: &str, frame: &DynamicImage) -> Result<(), PresentError>;

    /// Wait at most `timeout` for a key press
    fn poll_key(&mut self, timeout: Duration) -> Option<char>;
}

/// Keys typed on stdin, one per line, delivered through a channel
pub struct KeyListener {
    receiver: Receiver<char>,
}

impl KeyListener {
    /// Spawn a reader thread on stdin. The thread ends with stdin.
    pub fn spawn_stdin() -> Self {
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if let Some(key) = line.trim().chars().next() {
                    if sender.send(key).is_err() {
                        break;
                    }
                }
            }
        });
        Self { receiver }
    }

    pub fn from_receiver(receiver: Receiver<char>) -> Self {
        Self { receiver }
    }

    pub fn poll(&self, timeout: Duration) -> Option<char> {
        match self.receiver.recv_timeout(timeout) {
            Ok(key) => Some(key),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

/// Headless presenter that writes each shown frame to `<out>/<window>/<index>.png`
pub struct FrameSink {
    output_dir: Option<PathBuf>,
    counters: HashMap<String, usize>,
    keys: Option<KeyListener>,
}

impl FrameSink {
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self {
            output_dir,
            counters: HashMap::new(),
            keys: None,
        }
    }

    pub fn with_keys(mut self, keys: KeyListener) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Frames shown so far in `window`
    pub fn shown(&self, window: &str) -> usize {
        self.counters.get(window).copied().unwrap_or(0)
    }

    fn window_dir_name(window: &str) -> String {
        window.to_lowercase().replace(' ', "_")
    }
}

impl Presenter for FrameSink {
    fn show(&mut self, window: &str, frame: &DynamicImage) -> Result<(), PresentError> {
        let count = self.counters.entry(window.to_string()).or_insert(0);
        *count += 1;

        let Some(output_dir) = &self.output_dir else {
            return Ok(());
        };

        let window_dir = output_dir.join(Self::window_dir_name(window));
        std::fs::create_dir_all(&window_dir).map_err(|source| PresentError::OutputDir {
            path: window_dir.clone(),
            source,
        })?;

        let path = window_dir.join(format!("{:05}.png", *count));
        frame.save(&path).map_err(|source| PresentError::WriteFrame {
            path: path.clone(),
            source,
        })?;
        debug!("Saved {}", path.display());
        Ok(())
    }

    fn poll_key(&mut self, timeout: Duration) -> Option<char> {
        match &self.keys {
            Some(keys) => keys.poll(timeout),
            None => None,
        }
    }
}
