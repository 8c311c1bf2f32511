//! HMAC-SHA256 session-token codec.
//!
//! Token format: `base64url(json claims) . base64url(hmac_sha256(payload))`.
//! Opaque to the client, cheap to verify, nothing stored server-side.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use domains::ports::SessionCodec;
use domains::session::SessionClaims;

type HmacSha256 = Hmac<Sha256>;

pub struct HmacSessionCodec {
    secret: Vec<u8>,
}

impl HmacSessionCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: secret.to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length.
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take a key of any size")
    }
}

impl SessionCodec for HmacSessionCodec {
    fn encode(&self, claims: &SessionClaims) -> String {
        // Better to fail loudly than to sign an empty payload.
        let payload =
            serde_json::to_vec(claims).expect("session claims are a plain struct of scalars");
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

        let mut mac = self.mac();
        mac.update(payload_b64.as_bytes());
        let tag = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{payload_b64}.{tag}")
    }

    fn decode(&self, token: &str) -> Option<SessionClaims> {
        let (payload_b64, tag_b64) = token.split_once('.')?;
        let tag = URL_SAFE_NO_PAD.decode(tag_b64).ok()?;

        let mut mac = self.mac();
        mac.update(payload_b64.as_bytes());
        // Constant-time comparison via the Mac trait.
        mac.verify_slice(&tag).ok()?;

        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        serde_json::from_slice(&payload).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn codec() -> HmacSessionCodec {
        HmacSessionCodec::new(b"test-secret-key")
    }

    fn claims() -> SessionClaims {
        SessionClaims {
            session_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            expires_at: Utc::now() + Duration::weeks(2),
        }
    }

    #[test]
    fn encode_decode_round_trips() {
        let c = claims();
        let token = codec().encode(&c);
        assert_eq!(codec().decode(&token), Some(c));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = codec().encode(&claims());
        let (payload, tag) = token.split_once('.').unwrap();
        let forged_claims = claims();
        let forged_payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        assert!(codec().decode(&format!("{forged_payload}.{tag}")).is_none());
        // And a tampered tag over the honest payload:
        assert!(codec().decode(&format!("{payload}.AAAA")).is_none());
    }

    #[test]
    fn token_from_a_different_secret_is_rejected() {
        let token = HmacSessionCodec::new(b"other-secret").encode(&claims());
        assert!(codec().decode(&token).is_none());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        for junk in ["", "no-dot", "a.b.c", "!.!", "ab.cd"] {
            assert!(codec().decode(junk).is_none(), "{junk:?} should not decode");
        }
    }
}
