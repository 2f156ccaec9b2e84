//! Public key codec: raw platform bytes <-> [`KeyMaterial`].
//!
//! Wire formats:
//! - EC:  `0x04 || X(32, big-endian) || Y(32, big-endian)` (SEC1 uncompressed, 65 bytes)
//! - RSA: DER `SEQUENCE { INTEGER modulus, INTEGER exponent }` (PKCS#1 RSAPublicKey)
//!
//! A failed decode or encode is always an error. Nothing here ever falls
//! back to a zero or truncated key.

use crate::algorithms::KeyKind;
use crate::der::{self, DerReader, TAG_SEQUENCE};
use crate::errors::KeyError;
use crate::keys::{EcPublicKey, KeyMaterial, RsaPublicKey, P256_COORDINATE_LEN};

/// SEC1 marker for an uncompressed point.
pub const EC_UNCOMPRESSED_PREFIX: u8 = 0x04;

/// Length of an uncompressed P-256 point.
pub const EC_POINT_LEN: usize = 1 + 2 * P256_COORDINATE_LEN;

/// Decode raw public key bytes of the expected kind.
pub fn decode(raw: &[u8], kind: KeyKind) -> Result<KeyMaterial, KeyError> {
    let decoded = match kind {
        KeyKind::Ec => decode_ec(raw).map(KeyMaterial::Ec),
        KeyKind::Rsa => decode_rsa(raw).map(KeyMaterial::Rsa),
    };
    if let Err(err) = &decoded {
        tracing::debug!(%kind, len = raw.len(), %err, "rejected raw public key");
    }
    decoded
}

/// Encode structured key material into its raw platform form.
pub fn encode(key: &KeyMaterial) -> Result<Vec<u8>, KeyError> {
    let encoded = match key {
        KeyMaterial::Ec(key) => encode_ec(key),
        KeyMaterial::Rsa(key) => encode_rsa(key),
    };
    if let Err(err) = &encoded {
        tracing::debug!(kind = %key.kind(), %err, "failed to encode public key");
    }
    encoded
}

/// Decode a SEC1 uncompressed P-256 point: exactly `0x04 || X(32) || Y(32)`.
pub fn decode_ec(raw: &[u8]) -> Result<EcPublicKey, KeyError> {
    if raw.len() < EC_POINT_LEN {
        return Err(KeyError::MalformedKey(format!(
            "key data is too short: {} bytes",
            raw.len()
        )));
    }
    if raw[0] != EC_UNCOMPRESSED_PREFIX {
        return Err(KeyError::MalformedKey(format!(
            "prefix: expected 0x04, found 0x{:02x}",
            raw[0]
        )));
    }

    if raw.len() != EC_POINT_LEN {
        return Err(KeyError::MalformedKey(format!(
            "point: expected {EC_POINT_LEN} bytes, got {}",
            raw.len()
        )));
    }

    let (x, y) = raw[1..].split_at(P256_COORDINATE_LEN);
    Ok(EcPublicKey::from_coordinates(x, y))
}

/// Encode a P-256 point as `0x04 || X || Y`.
pub fn encode_ec(key: &EcPublicKey) -> Result<Vec<u8>, KeyError> {
    let (x, y) = key.coordinates()?;

    let mut out = Vec::with_capacity(EC_POINT_LEN);
    out.push(EC_UNCOMPRESSED_PREFIX);
    out.extend_from_slice(&x);
    out.extend_from_slice(&y);
    Ok(out)
}

/// Decode a PKCS#1 `RSAPublicKey` SEQUENCE.
pub fn decode_rsa(raw: &[u8]) -> Result<RsaPublicKey, KeyError> {
    let mut outer = DerReader::new(raw);
    let body = outer.read_tlv(TAG_SEQUENCE, "sequence")?;
    if !outer.is_empty() {
        return Err(KeyError::MalformedKey(format!(
            "sequence: {} trailing bytes",
            outer.remaining()
        )));
    }

    let mut reader = DerReader::new(body);
    let modulus = reader.read_unsigned_integer("modulus")?;
    let exponent = reader.read_unsigned_integer("exponent")?;
    if !reader.is_empty() {
        return Err(KeyError::MalformedKey(format!(
            "sequence: {} bytes after exponent",
            reader.remaining()
        )));
    }

    if modulus.is_empty() {
        return Err(KeyError::MalformedKey("modulus: zero".into()));
    }
    if exponent.is_empty() {
        return Err(KeyError::MalformedKey("exponent: zero".into()));
    }

    Ok(RsaPublicKey::from_components(modulus, exponent))
}

/// Encode modulus and exponent as a DER SEQUENCE of two INTEGERs.
pub fn encode_rsa(key: &RsaPublicKey) -> Result<Vec<u8>, KeyError> {
    let (modulus, exponent) = key.components()?;

    let mut body = Vec::with_capacity(modulus.len() + exponent.len() + 10);
    der::write_unsigned_integer(&mut body, &modulus)?;
    der::write_unsigned_integer(&mut body, &exponent)?;

    let mut out = Vec::with_capacity(body.len() + 4);
    der::write_tlv(&mut out, TAG_SEQUENCE, &body)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_X: &str =
        "55066263022277343669578718895168534326250603453777594175500187360389116729240";
    const SCENARIO_Y: &str =
        "32670510020758816978083085130507043184471273380659243275938904335757337482424";

    /// 2048-bit modulus (high bit set) followed by 65537, as iOS exports it.
    fn rsa_2048_der() -> Vec<u8> {
        let mut modulus = vec![0u8; 256];
        modulus[0] = 0xC3;
        for (i, b) in modulus.iter_mut().enumerate().skip(1) {
            *b = (i * 7 + 1) as u8;
        }

        let mut raw = vec![0x30, 0x82, 0x01, 0x0A];
        raw.extend_from_slice(&[0x02, 0x82, 0x01, 0x01, 0x00]);
        raw.extend_from_slice(&modulus);
        raw.extend_from_slice(&[0x02, 0x03, 0x01, 0x00, 0x01]);
        raw
    }

    #[test]
    fn ec_scenario_roundtrip() {
        let key = KeyMaterial::Ec(EcPublicKey::new(SCENARIO_X, SCENARIO_Y));
        let raw = encode(&key).unwrap();
        assert_eq!(raw.len(), 65);
        assert_eq!(raw[0], 0x04);
        assert_eq!(
            hex::encode(&raw[1..33]),
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );

        let decoded = decode(&raw, KeyKind::Ec).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn ec_small_coordinates_pad_to_field_width() {
        let raw = encode_ec(&EcPublicKey::new("0", "1")).unwrap();
        assert_eq!(raw.len(), EC_POINT_LEN);
        assert!(raw[1..64].iter().all(|&b| b == 0));
        assert_eq!(raw[64], 1);
        assert_eq!(decode_ec(&raw).unwrap(), EcPublicKey::new("0", "1"));
    }

    #[test]
    fn ec_wrong_prefix_rejected() {
        let mut raw = vec![0x11u8; 65];
        raw[0] = 0x05;
        assert!(matches!(decode(&raw, KeyKind::Ec), Err(KeyError::MalformedKey(_))));

        raw[0] = 0x02;
        assert!(matches!(decode(&raw, KeyKind::Ec), Err(KeyError::MalformedKey(_))));
    }

    #[test]
    fn ec_short_input_rejected_regardless_of_prefix() {
        for len in [0usize, 1, 33, 64] {
            let mut raw = vec![0u8; len];
            if let Some(first) = raw.first_mut() {
                *first = 0x04;
            }
            assert!(
                matches!(decode_ec(&raw), Err(KeyError::MalformedKey(_))),
                "accepted {len} bytes"
            );
        }
    }

    #[test]
    fn ec_oversized_point_rejected() {
        for len in [66usize, 97, 129] {
            let mut raw = vec![0x01u8; len];
            raw[0] = 0x04;
            assert!(
                matches!(decode_ec(&raw), Err(KeyError::MalformedKey(_))),
                "accepted {len} bytes"
            );
        }
    }

    #[test]
    fn ec_encode_rejects_bad_coordinates() {
        let err = encode_ec(&EcPublicKey::new("12ab", "1")).unwrap_err();
        assert!(matches!(err, KeyError::InvalidCoordinates(_)));

        let err = encode_ec(&EcPublicKey::new("1", "-5")).unwrap_err();
        assert!(matches!(err, KeyError::InvalidCoordinates(_)));
    }

    #[test]
    fn rsa_2048_scenario() {
        let raw = rsa_2048_der();
        assert_eq!(raw.len(), 270);

        let key = decode(&raw, KeyKind::Rsa).unwrap();
        let KeyMaterial::Rsa(rsa_key) = &key else {
            panic!("expected RSA key");
        };
        assert_eq!(rsa_key.e, "65537");

        assert_eq!(encode(&key).unwrap(), raw);
    }

    #[test]
    fn rsa_small_key_short_form_lengths() {
        let key = RsaPublicKey::new("3233", "17");
        let raw = encode_rsa(&key).unwrap();
        assert_eq!(raw, vec![0x30, 0x07, 0x02, 0x02, 0x0C, 0xA1, 0x02, 0x01, 0x11]);
        assert_eq!(decode_rsa(&raw).unwrap(), key);
    }

    #[test]
    fn rsa_accepts_unpadded_and_padded_integers() {
        let padded = [0x30, 0x08, 0x02, 0x03, 0x00, 0x0C, 0xA1, 0x02, 0x01, 0x11];
        assert_eq!(decode_rsa(&padded).unwrap(), RsaPublicKey::new("3233", "17"));
    }

    #[test]
    fn rsa_wrong_prefix_rejected() {
        let mut raw = encode_rsa(&RsaPublicKey::new("3233", "17")).unwrap();
        raw[0] = 0x31;
        let err = decode_rsa(&raw).unwrap_err();
        assert!(matches!(err, KeyError::MalformedKey(ref reason) if reason.starts_with("sequence")));

        assert!(matches!(decode_rsa(&[]), Err(KeyError::MalformedKey(_))));
    }

    #[test]
    fn rsa_single_integer_rejected() {
        let raw = [0x30, 0x04, 0x02, 0x02, 0x0C, 0xA1];
        let err = decode_rsa(&raw).unwrap_err();
        assert_eq!(
            err,
            KeyError::MalformedKey("exponent: unexpected end of data".into())
        );
    }

    #[test]
    fn rsa_wrong_integer_tag_rejected() {
        let raw = [0x30, 0x07, 0x04, 0x02, 0x0C, 0xA1, 0x02, 0x01, 0x11];
        let err = decode_rsa(&raw).unwrap_err();
        assert!(matches!(err, KeyError::MalformedKey(ref reason) if reason.starts_with("modulus")));
    }

    #[test]
    fn rsa_truncated_input_rejected() {
        let raw = rsa_2048_der();
        for cut in [1usize, 4, 9, 200, 265, 269] {
            assert!(
                matches!(decode_rsa(&raw[..cut]), Err(KeyError::MalformedKey(_))),
                "accepted {cut}-byte prefix"
            );
        }
    }

    #[test]
    fn rsa_trailing_data_rejected() {
        let mut raw = encode_rsa(&RsaPublicKey::new("3233", "17")).unwrap();
        raw.push(0x00);
        assert!(matches!(decode_rsa(&raw), Err(KeyError::MalformedKey(_))));

        let inner_extra = [
            0x30, 0x0A, 0x02, 0x02, 0x0C, 0xA1, 0x02, 0x01, 0x11, 0x02, 0x01, 0x01,
        ];
        assert!(matches!(decode_rsa(&inner_extra), Err(KeyError::MalformedKey(_))));
    }

    #[test]
    fn rsa_zero_components_rejected() {
        let zero_modulus = [0x30, 0x06, 0x02, 0x01, 0x00, 0x02, 0x01, 0x11];
        assert_eq!(
            decode_rsa(&zero_modulus).unwrap_err(),
            KeyError::MalformedKey("modulus: zero".into())
        );

        let err = encode_rsa(&RsaPublicKey::new("3233", "0")).unwrap_err();
        assert!(matches!(err, KeyError::InvalidCoordinates(_)));
    }

    #[test]
    fn rsa_unsupported_long_form_rejected() {
        let raw = [0x30, 0x83, 0x00, 0x00, 0x07, 0x02, 0x02, 0x0C, 0xA1, 0x02, 0x01, 0x11];
        assert!(matches!(decode_rsa(&raw), Err(KeyError::MalformedKey(_))));
    }

    #[test]
    fn decode_uses_expected_kind() {
        let ec_raw = encode_ec(&EcPublicKey::new(SCENARIO_X, SCENARIO_Y)).unwrap();
        assert!(matches!(decode(&ec_raw, KeyKind::Rsa), Err(KeyError::MalformedKey(_))));
    }
}
