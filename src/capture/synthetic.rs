//! Synthetic depth source
//!
//! Renders a far background with a near object sweeping left to right,
//! one grid column at a time. Handy for trying the pipeline without a
//! depth camera.

use super::{DepthFrame, FrameSource};
use crate::depth::DepthBuffer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Layout of the synthetic scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticScene {
    pub width: usize,
    pub height: usize,
    /// Number of horizontal positions the object steps through
    pub steps: usize,
    /// Intensity of empty space
    pub background: u8,
    /// Intensity of the object
    pub object: u8,
}

impl SyntheticScene {
    /// Render the frame for one step of the sweep
    pub fn render(&self, step: usize) -> Vec<u8> {
        let steps = self.steps.max(1);
        let band = (self.width / steps).max(1);
        let start = (step % steps) * band;
        let end = (start + band).min(self.width);

        let mut data = vec![self.background; self.width * self.height * 4];
        for y in 0..self.height {
            for x in start..end {
                let offset = (y * self.width + x) * 4;
                data[offset..offset + 4].fill(self.object);
            }
        }
        data
    }
}

/// Source emitting a sweeping object at a fixed rate
pub struct SyntheticSource {
    name: String,
    scene: SyntheticScene,
    interval: Duration,
    running: Arc<AtomicBool>,
    sender: broadcast::Sender<DepthFrame>,
    task: Option<JoinHandle<()>>,
}

impl SyntheticSource {
    /// Create a new synthetic source
    pub fn new(name: impl Into<String>, scene: SyntheticScene, interval: Duration) -> Self {
        let (sender, _) = broadcast::channel(4);
        Self {
            name: name.into(),
            scene,
            interval,
            running: Arc::new(AtomicBool::new(false)),
            sender,
            task: None,
        }
    }
}

impl FrameSource for SyntheticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self) -> anyhow::Result<()> {
        if self.is_running() {
            return Ok(());
        }

        // Fail here rather than inside the task
        DepthBuffer::packed(self.scene.width, self.scene.height, 4, self.scene.render(0))?;

        self.running.store(true, Ordering::SeqCst);
        info!(source = %self.name, "starting synthetic depth source");

        let name = self.name.clone();
        let scene = self.scene;
        let interval = self.interval;
        let running = Arc::clone(&self.running);
        let sender = self.sender.clone();

        let task = tokio::spawn(async move {
            let mut sequence = 0u64;
            let mut ticker = tokio::time::interval(interval);

            while running.load(Ordering::SeqCst) {
                ticker.tick().await;

                let data = scene.render(sequence as usize);
                match DepthBuffer::packed(scene.width, scene.height, 4, data) {
                    Ok(depth) => {
                        // Send (ignore errors if no receivers)
                        let _ = sender.send(DepthFrame::new(sequence, depth));
                    }
                    Err(error) => debug!(source = %name, %error, "frame not rendered"),
                }
                sequence += 1;
            }
        });

        self.task = Some(task);
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> broadcast::Receiver<DepthFrame> {
        self.sender.subscribe()
    }
}

impl Drop for SyntheticSource {
    fn drop(&mut self) {
        self.stop();
    }
}
