//! Application fingerprint stored in the SQLite `user_version` register
//!
//! A fingerprint packs two fields into the single 32-bit word SQLite keeps in
//! the database header:
//!
//! ```text
//!  31        24 23                                  0
//! +------------+-------------------------------------+
//! |  schema    |  app id: SHA-256(app_name)[0..3], LE |
//! +------------+-------------------------------------+
//! ```
//!
//! [`Fingerprint::pack`] and [`Fingerprint::unpack`] are the only places that
//! know this layout.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

const APP_ID_MASK: u32 = 0x00ff_ffff;
const SCHEMA_VERSION_SHIFT: u32 = 24;

/// 24-bit application identifier derived from the application name.
///
/// Only three bytes of the digest are kept, so two unrelated applications
/// collide with probability 2^-24. A colliding database is indistinguishable
/// from one created by the expected application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(u32);

impl AppId {
    /// Derive the identifier from the UTF-8 bytes of `app_name`
    pub fn from_app_name(app_name: &str) -> Self {
        let digest = Sha256::digest(app_name.as_bytes());
        Self(u32::from_le_bytes([digest[0], digest[1], digest[2], 0]))
    }

    /// Build an identifier from a raw value, dropping anything above bit 23
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw & APP_ID_MASK)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#08x}", self.0)
    }
}

/// Identity and schema version of an application database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    pub app_id: AppId,
    pub schema_version: u8,
}

impl Fingerprint {
    pub const fn new(app_id: AppId, schema_version: u8) -> Self {
        Self {
            app_id,
            schema_version,
        }
    }

    /// Fingerprint expected for `app_name` at `schema_version`
    pub fn compute(app_name: &str, schema_version: u8) -> Self {
        Self::new(AppId::from_app_name(app_name), schema_version)
    }

    /// Pack into the 32-bit register layout: app id in bits 0-23, schema
    /// version in bits 24-31.
    pub const fn pack(self) -> u32 {
        self.app_id.0 | ((self.schema_version as u32) << SCHEMA_VERSION_SHIFT)
    }

    /// Inverse of [`Fingerprint::pack`]
    pub const fn unpack(word: u32) -> Self {
        Self {
            app_id: AppId::from_raw(word),
            schema_version: (word >> SCHEMA_VERSION_SHIFT) as u8,
        }
    }

    /// Value as SQLite stores it. `user_version` is a signed 32-bit integer and
    /// `PRAGMA user_version = N` silently ignores literals above `i32::MAX`, so
    /// the packed word is written with its bits reinterpreted as `i32`.
    pub const fn to_register(self) -> i32 {
        self.pack() as i32
    }

    /// Decode a value read back from `PRAGMA user_version`
    pub const fn from_register(register: i32) -> Self {
        Self::unpack(register as u32)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#010x} (app id {}, schema version {})",
            self.pack(),
            self.app_id,
            self.schema_version
        )
    }
}

/// Compute the packed 32-bit fingerprint for `(app_name, schema_version)`
pub fn compute_fingerprint(app_name: &str, schema_version: u8) -> u32 {
    Fingerprint::compute(app_name, schema_version).pack()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest_prefix() {
        // SHA-256("abc") = ba7816bf...
        assert_eq!(AppId::from_app_name("abc").value(), 0x0016_78ba);
        assert_eq!(compute_fingerprint("abc", 0), 0x0016_78ba);
        assert_eq!(compute_fingerprint("abc", 3), 0x0316_78ba);

        // SHA-256("") = e3b0c442...
        assert_eq!(compute_fingerprint("", 0xff), 0xffc4_b0e3);
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let first = compute_fingerprint("my-app", 7);
        let second = compute_fingerprint("my-app", 7);
        assert_eq!(first, second);

        assert_ne!(compute_fingerprint("my-app", 7), compute_fingerprint("my-app", 8));
        assert_ne!(compute_fingerprint("my-app", 7), compute_fingerprint("my-app2", 7));
    }

    #[test]
    fn test_schema_version_lives_in_high_byte() {
        let fingerprint = Fingerprint::compute("my-app", 0xa5);
        assert_eq!(fingerprint.pack() >> 24, 0xa5);
        assert_eq!(fingerprint.pack() & APP_ID_MASK, fingerprint.app_id.value());
    }

    #[test]
    fn test_pack_unpack() {
        let fingerprint = Fingerprint::new(AppId::from_raw(0x0012_3456), 0x78);
        assert_eq!(fingerprint.pack(), 0x7812_3456);
        assert_eq!(Fingerprint::unpack(0x7812_3456), fingerprint);
    }

    #[test]
    fn test_register_keeps_high_schema_versions() {
        let fingerprint = Fingerprint::new(AppId::from_raw(0x00ab_cdef), 200);
        let register = fingerprint.to_register();
        assert!(register < 0);
        assert_eq!(Fingerprint::from_register(register), fingerprint);
    }

    #[test]
    fn test_app_id_masks_high_byte() {
        assert_eq!(AppId::from_raw(0xffff_ffff).value(), 0x00ff_ffff);
        assert_eq!(AppId::from_raw(0x0000_0001).to_string(), "0x000001");
    }

    #[test]
    fn test_fingerprint_display() {
        let fingerprint = Fingerprint::new(AppId::from_raw(0x0012_3456), 2);
        assert_eq!(
            fingerprint.to_string(),
            "0x02123456 (app id 0x123456, schema version 2)"
        );
    }
}
