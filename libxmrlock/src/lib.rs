pub mod amount;
pub mod crypto;
pub mod error;
pub mod helpers;
pub mod lock;
pub mod storage;
pub mod swap;

#[cfg(test)]
mod tests;

pub use curve25519_dalek::{EdwardsPoint as XmrPoint, Scalar as XmrScalar};
