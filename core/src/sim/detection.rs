use crate::prelude::CodecError;
use crate::trajectory::state::{FlightState, STATE_RECORD_LEN};

/// Number of bytes in one encoded detection record.
pub const DETECTION_RECORD_LEN: usize = 8 + STATE_RECORD_LEN;

/// One pulse that cleared both the field-of-view gate and the SNR
/// threshold. Immutable once created; the triggering state is captured by
/// value, not by reference into the live trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Pulse time in seconds since the simulation epoch.
    pub t: f64,
    /// Linear signal-to-noise ratio at the receiver.
    pub snr: f64,
    pub state: FlightState,
}

impl Detection {
    pub fn new(t: f64, snr: f64, state: FlightState) -> Self {
        Self { t, snr, state }
    }

    /// Encodes the fixed 48-byte big-endian record: pulse time, SNR, then
    /// the state record.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(DETECTION_RECORD_LEN);
        out.extend_from_slice(&(self.t as f32).to_be_bytes());
        out.extend_from_slice(&(self.snr as f32).to_be_bytes());
        self.state.encode(&mut out);
        out
    }

    /// Decodes one record from the front of `data`.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        if data.len() < DETECTION_RECORD_LEN {
            return Err(CodecError::Truncated {
                expected: DETECTION_RECORD_LEN,
                actual: data.len(),
            });
        }
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&data[0..4]);
        let t = f32::from_be_bytes(raw) as f64;
        raw.copy_from_slice(&data[4..8]);
        let snr = f32::from_be_bytes(raw) as f64;
        let state = FlightState::decode(&data[8..])?;
        Ok(Self { t, snr, state })
    }
}
