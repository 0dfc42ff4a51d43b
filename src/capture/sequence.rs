//! Image sequence source
//!
//! Replays a directory of recorded 8-bit depth maps (PNG or PGM), in file
//! name order, at a fixed rate.

use super::{DepthFrame, FrameSource};
use crate::depth::DepthBuffer;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const EXTENSIONS: [&str; 3] = ["png", "pgm", "pnm"];

/// Sequence source configuration
#[derive(Debug, Clone)]
pub struct SequenceConfig {
    pub directory: PathBuf,
    pub interval: Duration,
    /// Start over after the last frame instead of stopping
    pub repeat: bool,
}

/// Source replaying depth images from disk
pub struct ImageSequenceSource {
    name: String,
    config: SequenceConfig,
    frames: Arc<Vec<DepthBuffer>>,
    running: Arc<AtomicBool>,
    sender: broadcast::Sender<DepthFrame>,
    task: Option<JoinHandle<()>>,
}

impl ImageSequenceSource {
    /// Create a new sequence source; images are loaded on start
    pub fn new(name: impl Into<String>, config: SequenceConfig) -> Self {
        let (sender, _) = broadcast::channel(4);
        Self {
            name: name.into(),
            config,
            frames: Arc::new(Vec::new()),
            running: Arc::new(AtomicBool::new(false)),
            sender,
            task: None,
        }
    }

    /// Number of frames loaded
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Depth image files in `directory`, sorted by name
pub fn list_frames(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("reading frame directory {}", directory.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if supported && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load one depth image as a single-channel buffer
pub fn load_frame(path: &Path) -> Result<DepthBuffer> {
    let image = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_luma8();
    Ok(DepthBuffer::from_luma(&image)?)
}

impl FrameSource for ImageSequenceSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }

        let paths = list_frames(&self.config.directory)?;
        if paths.is_empty() {
            bail!("no depth images found in {}", self.config.directory.display());
        }
        let frames = paths
            .iter()
            .map(|path| load_frame(path))
            .collect::<Result<Vec<_>>>()?;
        info!(source = %self.name, frames = frames.len(), "loaded depth sequence");
        self.frames = Arc::new(frames);

        self.running.store(true, Ordering::SeqCst);

        let name = self.name.clone();
        let frames = Arc::clone(&self.frames);
        let interval = self.config.interval;
        let repeat = self.config.repeat;
        let running = Arc::clone(&self.running);
        let sender = self.sender.clone();

        let task = tokio::spawn(async move {
            let mut sequence = 0u64;
            let mut ticker = tokio::time::interval(interval);

            while running.load(Ordering::SeqCst) {
                let index = sequence as usize;
                if index >= frames.len() && !repeat {
                    debug!(source = %name, "end of sequence");
                    break;
                }

                ticker.tick().await;
                let depth = frames[index % frames.len()].clone();
                let _ = sender.send(DepthFrame::new(sequence, depth));
                sequence += 1;
            }

            running.store(false, Ordering::SeqCst);
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

impl Drop for ImageSequenceSource {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;
    use tempfile::TempDir;

    fn write_frames(dir: &Path, values: &[u8]) {
        for (i, value) in values.iter().enumerate() {
            let image = GrayImage::from_pixel(10, 6, image::Luma([*value]));
            image.save(dir.join(format!("frame_{:03}.png", i))).unwrap();
        }
    }

    #[test]
    fn test_list_frames_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        write_frames(dir.path(), &[160, 185, 210]);
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let paths = list_frames(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["frame_000.png", "frame_001.png", "frame_002.png"]);
    }

    #[test]
    fn test_load_frame() {
        let dir = TempDir::new().unwrap();
        write_frames(dir.path(), &[185]);

        let buffer = load_frame(&dir.path().join("frame_000.png")).unwrap();
        assert_eq!(buffer.width(), 10);
        assert_eq!(buffer.height(), 6);
        assert_eq!(buffer.intensity(3, 3, 0), Some(185));
    }

    #[tokio::test]
    async fn test_empty_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut source = ImageSequenceSource::new(
            "empty",
            SequenceConfig {
                directory: dir.path().to_path_buf(),
                interval: Duration::from_millis(10),
                repeat: false,
            },
        );

        assert!(source.start().is_err());
        assert!(!source.is_running());
    }

    #[tokio::test]
    async fn test_sequence_plays_once() {
        let dir = TempDir::new().unwrap();
        write_frames(dir.path(), &[160, 210]);

        let mut source = ImageSequenceSource::new(
            "recorded",
            SequenceConfig {
                directory: dir.path().to_path_buf(),
                interval: Duration::from_millis(10),
                repeat: false,
            },
        );
        let mut receiver = source.subscribe();
        source.start().unwrap();
        assert_eq!(source.len(), 2);

        let mut intensities = Vec::new();
        for _ in 0..2 {
            let frame = tokio::time::timeout(Duration::from_secs(2), receiver.recv())
                .await
                .expect("timeout")
                .expect("receive error");
            intensities.push(frame.depth.intensity(0, 0, 0));
        }
        assert_eq!(intensities, vec![Some(160), Some(210)]);

        tokio::time::timeout(Duration::from_secs(2), async {
            while source.is_running() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("sequence did not finish");
    }
}
