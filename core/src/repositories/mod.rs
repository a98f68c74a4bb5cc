pub mod verification;

pub use verification::{VerificationRecordRepository, WriteOutcome};

#[cfg(test)]
pub use verification::{Interference, MockVerificationRecordRepository};
