//! The two fixed generators of the DLEQ statement.
use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::EdwardsPoint;
use std::sync::OnceLock;

/// Monero's second generator `H` (the Pedersen commitment blinding base). Nobody knows its discrete log with respect
/// to `G`.
pub const Y_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x8b, 0x65, 0x59, 0x70, 0x15, 0x37, 0x99, 0xaf, 0x2a, 0xea, 0xdc, 0x9f, 0xf1, 0xad, 0xd0, 0xea, 0x6c, 0x72, 0x51, 0xd5,
    0x41, 0x54, 0xcf, 0xa9, 0x2c, 0x17, 0x3a, 0x0d, 0xd3, 0x9c, 0x1f, 0x94,
]);

pub fn g() -> &'static EdwardsPoint {
    &ED25519_BASEPOINT_POINT
}

pub fn g_compressed() -> CompressedEdwardsY {
    ED25519_BASEPOINT_POINT.compress()
}

pub fn y() -> &'static EdwardsPoint {
    static Y: OnceLock<EdwardsPoint> = OnceLock::new();
    Y.get_or_init(|| Y_COMPRESSED.decompress().expect("Y_COMPRESSED is a valid curve point"))
}
