use crate::foundation::error::{HorologeError, HorologeResult};

pub use kurbo::{Affine, Point, Vec2};

/// Highest layer index; the layer stack is at most this deep.
pub const MAX_LAYERS: usize = 20;

/// Layer index in the stack, `1..=20`. Doubles as z-order and arena slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct LayerId(u8);

impl LayerId {
    /// Build a layer id, rejecting values outside `1..=20`.
    pub fn new(n: u8) -> HorologeResult<Self> {
        if n == 0 || usize::from(n) > MAX_LAYERS {
            return Err(HorologeError::validation(format!(
                "layer id {n} is outside 1..={MAX_LAYERS}"
            )));
        }
        Ok(Self(n))
    }

    /// Numeric layer index.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based arena slot.
    pub(crate) fn slot(self) -> usize {
        usize::from(self.0) - 1
    }

    pub(crate) fn from_slot(slot: usize) -> Option<Self> {
        u8::try_from(slot + 1).ok().and_then(|n| Self::new(n).ok())
    }

    /// All valid ids in z-order.
    pub fn all() -> impl Iterator<Item = LayerId> {
        (1..=MAX_LAYERS as u8).map(LayerId)
    }
}

impl TryFrom<u8> for LayerId {
    type Error = HorologeError;

    fn try_from(n: u8) -> HorologeResult<Self> {
        Self::new(n)
    }
}

impl From<LayerId> for u8 {
    fn from(id: LayerId) -> u8 {
        id.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer{}", self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
