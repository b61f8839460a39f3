use crate::clock::time::ClockState;
use crate::foundation::error::{HorologeError, HorologeResult};
use crate::layer::animator::LayerFrame;

/// Contract for the rendering collaborator.
///
/// Ordering contract: per tick, `begin_frame` once, then `present` for every visible layer in
/// ascending layer order, then `end_frame` once.
pub trait LayerSink {
    /// A tick starts with this master clock state.
    fn begin_frame(&mut self, clock: &ClockState) -> HorologeResult<()>;
    /// One layer's output.
    fn present(&mut self, frame: &LayerFrame) -> HorologeResult<()>;
    /// The tick is complete.
    fn end_frame(&mut self) -> HorologeResult<()>;
}

/// One recorded tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RecordedFrame {
    /// Master clock state.
    pub clock: ClockState,
    /// Layers in presentation order.
    pub layers: Vec<LayerFrame>,
}

/// In-memory sink for tests and the CLI.
#[derive(Debug, Default)]
pub struct InMemorySink {
    open: Option<RecordedFrame>,
    /// Completed ticks in order.
    pub frames: Vec<RecordedFrame>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayerSink for InMemorySink {
    fn begin_frame(&mut self, clock: &ClockState) -> HorologeResult<()> {
        if self.open.is_some() {
            return Err(HorologeError::orchestrator(
                "begin_frame called before the previous frame ended",
            ));
        }
        self.open = Some(RecordedFrame {
            clock: *clock,
            layers: Vec::new(),
        });
        Ok(())
    }

    fn present(&mut self, frame: &LayerFrame) -> HorologeResult<()> {
        let open = self
            .open
            .as_mut()
            .ok_or_else(|| HorologeError::orchestrator("present called outside a frame"))?;
        open.layers.push(frame.clone());
        Ok(())
    }

    fn end_frame(&mut self) -> HorologeResult<()> {
        let done = self
            .open
            .take()
            .ok_or_else(|| HorologeError::orchestrator("end_frame called outside a frame"))?;
        self.frames.push(done);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/sink.rs"]
mod tests;
