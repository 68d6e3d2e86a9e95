//! JSON interchange envelope for pyxes.
//!
//! The envelope is a transport convenience, not a consensus format: byte
//! fields travel as Base64 strings, iterations as a decimal integer, and
//! integer values in their minimum-length big-endian encoding. The
//! canonical 585-byte layout remains the only input to the pyx id.

use serde::{Deserialize, Serialize};
use serde_with::base64::Base64;

use crate::codec;
use crate::config::{ENVELOPE_VALUE_MAX, FIELD_LEN};
use crate::pyx::Pyx;
use crate::pyx::error::DecodeError;

/// Wire-level mirror of a [`Pyx`].
///
/// `pyx_id` is optional on input; when present it must match the id
/// recomputed from the canonical bytes, since a stale or tampered id is
/// indistinguishable from corruption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyxEnvelope {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::As::<Option<Base64>>"
    )]
    pub pyx_id: Option<Vec<u8>>,
    #[serde(with = "::serde_with::As::<Base64>")]
    pub minter_id: Vec<u8>,
    #[serde(with = "::serde_with::As::<Base64>")]
    pub challenge: Vec<u8>,
    pub iterations: u64,
    #[serde(with = "::serde_with::As::<Base64>")]
    pub y: Vec<u8>,
    #[serde(with = "::serde_with::As::<Base64>")]
    pub proof: Vec<u8>,
}

impl PyxEnvelope {
    /// Wraps a pyx for transport, including its id.
    pub fn from_pyx(pyx: &Pyx) -> Self {
        Self {
            pyx_id: Some(pyx.pyx_id().to_vec()),
            minter_id: pyx.minter_id().to_vec(),
            challenge: pyx.challenge().to_vec(),
            iterations: pyx.iterations(),
            y: codec::int_bytes(pyx.y()),
            proof: codec::int_bytes(pyx.proof()),
        }
    }

    /// Validates the envelope and converts it into a pyx.
    pub fn into_pyx(self) -> Result<Pyx, DecodeError> {
        let minter_id = fixed_field("minterId", &self.minter_id)?;
        let challenge = fixed_field("challenge", &self.challenge)?;
        bounded_field("y", &self.y)?;
        bounded_field("proof", &self.proof)?;

        let pyx = Pyx::from_parts(
            minter_id,
            challenge,
            self.iterations,
            codec::bytes_to_int(&self.y),
            codec::bytes_to_int(&self.proof),
        )?;

        if let Some(claimed) = &self.pyx_id {
            if claimed.as_slice() != pyx.pyx_id().as_slice() {
                return Err(DecodeError::PyxIdMismatch);
            }
        }
        Ok(pyx)
    }
}

fn fixed_field(field: &'static str, bytes: &[u8]) -> Result<[u8; FIELD_LEN], DecodeError> {
    <[u8; FIELD_LEN]>::try_from(bytes).map_err(|_| DecodeError::FieldLength {
        field,
        expected: FIELD_LEN,
        actual: bytes.len(),
    })
}

fn bounded_field(field: &'static str, bytes: &[u8]) -> Result<(), DecodeError> {
    if bytes.len() > ENVELOPE_VALUE_MAX {
        return Err(DecodeError::Oversized {
            field,
            limit: ENVELOPE_VALUE_MAX,
            actual: bytes.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minted() -> Pyx {
        Pyx::mint([0x21; 32], [0x42; 32], 1500).expect("mint succeeds")
    }

    #[test]
    fn json_round_trip_preserves_the_pyx() {
        let pyx = minted();
        let json = serde_json::to_string(&PyxEnvelope::from_pyx(&pyx)).expect("serializes");
        let parsed: PyxEnvelope = serde_json::from_str(&json).expect("parses");
        assert_eq!(parsed.into_pyx().expect("validates"), pyx);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = serde_json::to_string(&PyxEnvelope::from_pyx(&minted())).expect("serializes");
        assert!(json.contains("\"pyxId\""));
        assert!(json.contains("\"minterId\""));
        assert!(json.contains("\"challenge\""));
        assert!(json.contains("\"iterations\":1500"));
        assert!(json.contains("\"proof\""));
    }

    #[test]
    fn missing_pyx_id_is_accepted() {
        let pyx = minted();
        let mut envelope = PyxEnvelope::from_pyx(&pyx);
        envelope.pyx_id = None;
        assert_eq!(envelope.into_pyx().expect("validates"), pyx);
    }

    #[test]
    fn tampered_pyx_id_is_rejected() {
        let mut envelope = PyxEnvelope::from_pyx(&minted());
        if let Some(id) = envelope.pyx_id.as_mut() {
            id[0] ^= 0xFF;
        }
        assert_eq!(envelope.into_pyx(), Err(DecodeError::PyxIdMismatch));
    }

    #[test]
    fn wrong_minter_id_length_is_rejected() {
        let mut envelope = PyxEnvelope::from_pyx(&minted());
        envelope.minter_id.pop();
        assert_eq!(
            envelope.into_pyx(),
            Err(DecodeError::FieldLength {
                field: "minterId",
                expected: FIELD_LEN,
                actual: FIELD_LEN - 1,
            })
        );
    }

    #[test]
    fn oversized_value_is_rejected() {
        let mut envelope = PyxEnvelope::from_pyx(&minted());
        envelope.y = vec![0xFF; ENVELOPE_VALUE_MAX + 1];
        assert_eq!(
            envelope.into_pyx(),
            Err(DecodeError::Oversized {
                field: "y",
                limit: ENVELOPE_VALUE_MAX,
                actual: ENVELOPE_VALUE_MAX + 1,
            })
        );
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let mut envelope = PyxEnvelope::from_pyx(&minted());
        envelope.iterations = 0;
        envelope.pyx_id = None;
        assert_eq!(envelope.into_pyx(), Err(DecodeError::ZeroIterations));
    }

    #[test]
    fn missing_required_field_fails_to_parse() {
        let result: Result<PyxEnvelope, _> =
            serde_json::from_str(r#"{"minterId":"AAAA","iterations":1}"#);
        assert!(result.is_err());
    }
}
