//! Cell state values.
//!
//! Every rule set stores one small enumerated value per cell. The [`CellValue`]
//! trait is what the grid, the view extractor and the `.npy` codec need from
//! such a type: a raw `u8` encoding, the number of states, and a cycle order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AutomatonError, AutomatonResult};

/// A state value that can be stored in a [`Grid`](crate::Grid).
///
/// Raw values are dense: `0..STATE_COUNT`, with `0` being the empty state
/// returned by `Default`.
pub trait CellValue: Copy + Default + Eq + fmt::Debug + Send + Sync + 'static {
    /// Number of defined states.
    const STATE_COUNT: u8;

    /// Raw encoding of this state.
    fn to_raw(self) -> u8;

    /// Decode a raw value, `None` if it names no state.
    fn from_raw(raw: u8) -> Option<Self>;

    /// Next state in the cycle order used for single-cell cycling.
    ///
    /// The raw value decrements modulo [`Self::STATE_COUNT`].
    fn cycled(self) -> Self {
        let count = Self::STATE_COUNT;
        let raw = (self.to_raw() % count + count - 1) % count;
        Self::from_raw(raw).unwrap_or_default()
    }
}

/// WireWorld cell state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CellState {
    #[default]
    Empty = 0,
    ElectronHead = 1,
    ElectronTail = 2,
    Conductor = 3,
}

impl CellState {
    /// All states, indexed by raw value.
    pub const ALL: [CellState; 4] = [
        CellState::Empty,
        CellState::ElectronHead,
        CellState::ElectronTail,
        CellState::Conductor,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            CellState::Empty => "Empty",
            CellState::ElectronHead => "Electron Head",
            CellState::ElectronTail => "Electron Tail",
            CellState::Conductor => "Conductor",
        }
    }
}

impl CellValue for CellState {
    const STATE_COUNT: u8 = 4;

    fn to_raw(self) -> u8 {
        self as u8
    }

    fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }
}

impl TryFrom<u8> for CellState {
    type Error = AutomatonError;

    fn try_from(value: u8) -> AutomatonResult<Self> {
        Self::from_raw(value).ok_or(AutomatonError::InvalidState { value })
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> Self {
        state.to_raw()
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CellState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "0" | "empty" => Ok(CellState::Empty),
            "1" | "head" | "electron-head" => Ok(CellState::ElectronHead),
            "2" | "tail" | "electron-tail" => Ok(CellState::ElectronTail),
            "3" | "conductor" | "wire" => Ok(CellState::Conductor),
            _ => Err(format!(
                "unknown cell state '{}' (expected empty, head, tail, conductor or 0-3)",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_encoding() {
        for (raw, state) in CellState::ALL.iter().enumerate() {
            assert_eq!(state.to_raw() as usize, raw);
            assert_eq!(CellState::from_raw(raw as u8), Some(*state));
        }
        assert_eq!(CellState::from_raw(4), None);
    }

    #[test]
    fn test_try_from_rejects_unknown_value() {
        let err = CellState::try_from(9).unwrap_err();
        assert!(matches!(err, AutomatonError::InvalidState { value: 9 }));
    }

    #[test]
    fn test_cycle_order() {
        let mut state = CellState::Empty;
        let mut seen = Vec::new();
        for _ in 0..4 {
            state = state.cycled();
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                CellState::Conductor,
                CellState::ElectronTail,
                CellState::ElectronHead,
                CellState::Empty,
            ]
        );
    }

    #[test]
    fn test_parse_names_and_numbers() {
        assert_eq!("head".parse::<CellState>(), Ok(CellState::ElectronHead));
        assert_eq!("Electron Tail".parse::<CellState>(), Ok(CellState::ElectronTail));
        assert_eq!("WIRE".parse::<CellState>(), Ok(CellState::Conductor));
        assert_eq!("0".parse::<CellState>(), Ok(CellState::Empty));
        assert!("7".parse::<CellState>().is_err());
    }
}
