//! Capture adapter: hands depth frames to the frame processor
//!
//! The processor runs on one dedicated task fed through a queue of one.
//! A frame that arrives while the worker is busy and another frame is
//! already waiting is dropped, so two frames are never evaluated against
//! the sound grid at the same time and the worker never falls behind.
//!
//! Reports travel on a bounded queue that never drops: every update the
//! sound grid records as emitted reaches the renderer. A slow renderer
//! stalls the worker, which in turn makes the intake drop frames.

use super::DepthFrame;
use crate::engine::{FrameOutput, FrameProcessor};
use anyhow::{anyhow, Result};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Reports buffered before the worker waits on the renderer
const REPORT_QUEUE: usize = 16;

/// Output of one processed frame
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub sequence: u64,
    pub output: FrameOutput,
}

/// Serializes frame processing onto one worker task
pub struct CaptureAdapter {
    intake: Option<mpsc::Sender<DepthFrame>>,
    worker: Option<JoinHandle<FrameProcessor>>,
    last_sequence: Option<u64>,
    accepted: u64,
    dropped: u64,
}

impl CaptureAdapter {
    /// Start the worker task; must be called inside a tokio runtime
    ///
    /// Returns the adapter and the receiving end of its reports. The
    /// receiver closes once the worker has stopped.
    pub fn spawn(mut processor: FrameProcessor) -> (Self, mpsc::Receiver<FrameReport>) {
        let (intake, mut frames) = mpsc::channel::<DepthFrame>(1);
        let (reports, receiver) = mpsc::channel(REPORT_QUEUE);

        let worker = tokio::spawn(async move {
            info!(sampler = processor.sampler_name(), "frame worker started");

            while let Some(frame) = frames.recv().await {
                let output = processor.process_frame(&frame.depth);
                debug!(
                    sequence = frame.sequence,
                    updates = output.updates.len(),
                    skipped = output.skipped,
                    "frame processed"
                );

                let report = FrameReport {
                    sequence: frame.sequence,
                    output,
                };
                if reports.send(report).await.is_err() {
                    debug!(sequence = frame.sequence, "no report receiver");
                }
            }

            info!("frame worker stopped");
            processor
        });

        let adapter = Self {
            intake: Some(intake),
            worker: Some(worker),
            last_sequence: None,
            accepted: 0,
            dropped: 0,
        };
        (adapter, receiver)
    }

    /// Offer a frame for processing without waiting
    ///
    /// Returns false if the frame was dropped: out of order, worker busy
    /// with a frame already queued, or the adapter shut down.
    pub fn submit(&mut self, frame: DepthFrame) -> bool {
        if self.last_sequence.is_some_and(|last| frame.sequence <= last) {
            debug!(sequence = frame.sequence, "stale frame dropped");
            self.dropped += 1;
            return false;
        }

        let Some(intake) = &self.intake else {
            self.dropped += 1;
            return false;
        };

        let sequence = frame.sequence;
        match intake.try_send(frame) {
            Ok(()) => {
                self.last_sequence = Some(sequence);
                self.accepted += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                debug!(sequence, "worker busy, frame dropped");
                self.dropped += 1;
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!(sequence, "frame worker has stopped, frame dropped");
                self.dropped += 1;
                false
            }
        }
    }

    /// Frames handed to the worker so far
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Frames dropped so far
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Stop accepting frames, finish the queued one, and hand back the
    /// processor
    ///
    /// The report receiver must keep being drained while this runs.
    pub async fn shutdown(mut self) -> Result<FrameProcessor> {
        self.intake.take();
        let worker = self
            .worker
            .take()
            .ok_or_else(|| anyhow!("frame worker already shut down"))?;
        let processor = worker.await?;

        info!(
            accepted = self.accepted(),
            dropped = self.dropped(),
            "capture adapter shut down"
        );
        Ok(processor)
    }
}
