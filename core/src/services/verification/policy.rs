//! Identity policy applied before a code is issued

use std::collections::HashSet;

use rfs_shared::email::{has_allowed_suffix, is_valid_email, normalize_email};

use super::types::RejectReason;

/// Decides which email addresses may receive a verification code
///
/// An address must be well formed and either end in one of the allowed
/// suffixes or appear on the bypass list. Both checks are case-insensitive.
#[derive(Debug, Clone)]
pub struct DomainPolicy {
    suffixes: Vec<String>,
    bypass: HashSet<String>,
}

impl DomainPolicy {
    pub fn new<S: AsRef<str>>(suffixes: &[S], bypass: &[S]) -> Self {
        Self {
            suffixes: suffixes
                .iter()
                .map(|s| s.as_ref().trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            bypass: bypass.iter().map(|s| normalize_email(s.as_ref())).collect(),
        }
    }

    /// Checks an already-normalized identity
    pub fn check(&self, identity: &str) -> Result<(), RejectReason> {
        if !is_valid_email(identity) {
            return Err(RejectReason::InvalidFormat);
        }
        if self.bypass.contains(identity) || has_allowed_suffix(identity, &self.suffixes) {
            return Ok(());
        }
        Err(RejectReason::DomainNotAllowed)
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}
