//! One-shot flash messages carried across a redirect in a signed cookie.
//!
//! Cookie value: `hex(message) "." hex(hmac_sha256(message))`.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const COOKIE_NAME: &str = "flash";

/// A one-shot confirmation shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Signs and verifies flash cookies with a server-side secret.
#[derive(Clone)]
pub struct FlashSigner {
    mac: HmacSha256,
}

impl FlashSigner {
    pub fn new(secret: &[u8]) -> anyhow::Result<Self> {
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| anyhow::anyhow!("flash secret: {e}"))?;
        Ok(Self { mac })
    }

    fn signature(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }

    pub fn encode(&self, flash: &Flash) -> String {
        let payload = flash.message.as_bytes();
        format!(
            "{}.{}",
            hex::encode(payload),
            hex::encode(self.signature(payload))
        )
    }

    /// `None` for malformed or tampered values.
    pub fn decode(&self, value: &str) -> Option<Flash> {
        let (payload_hex, sig_hex) = value.split_once('.')?;
        let payload = hex::decode(payload_hex).ok()?;
        let sig = hex::decode(sig_hex).ok()?;

        let mut mac = self.mac.clone();
        mac.update(&payload);
        mac.verify_slice(&sig).ok()?;

        Some(Flash {
            message: String::from_utf8(payload).ok()?,
        })
    }

    /// `Set-Cookie` value carrying `flash` to the next request.
    pub fn set_cookie(&self, flash: &Flash) -> String {
        format!(
            "{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax",
            self.encode(flash)
        )
    }

    /// The flash sent by the client, if any and if the signature holds.
    pub fn from_headers(&self, headers: &HeaderMap) -> Option<Flash> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().strip_prefix("flash="))
            .find_map(|value| self.decode(value))
    }
}

/// `Set-Cookie` value that removes the flash once shown.
pub fn clear_cookie() -> String {
    format!("{COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
