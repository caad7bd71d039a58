pub mod challenge;
pub mod dleq;
pub mod generators;
pub mod hashlock;
pub mod key_split;
pub mod keys;
pub mod point;
pub mod scalar;
pub mod scalar_mul;

pub use dleq::{prove, verify, AdaptorProof, ProofError};
pub use hashlock::Hashlock;
pub use key_split::{recover, split, SplitKey};
pub use keys::{SecretScalar, ValidatedPoint};
