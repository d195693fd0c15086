/*!
Algorithm type definitions.

This module defines the signature algorithm families and the parameter
sets supported within them.
*/

use std::fmt;

/// Signature algorithm families.
///
/// Every credential pair holds exactly one key of each family, and a proof
/// carries exactly one signature of each family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum SignatureAlgorithm {
    /// RSA PKCS#1 v1.5 over SHA-256
    Classical,
    /// CRYSTALS-Dilithium
    PostQuantum,
}

impl SignatureAlgorithm {
    /// Get the name of the algorithm family as a string
    pub fn name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Classical => "RSA-PKCS1v15-SHA256",
            SignatureAlgorithm::PostQuantum => "CRYSTALS-Dilithium",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Supported Dilithium parameter sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum DilithiumLevel {
    /// CRYSTALS-Dilithium (dilithium2) - for resource-constrained environments
    Dilithium2,
    /// CRYSTALS-Dilithium (dilithium3)
    #[default]
    Dilithium3,
    /// CRYSTALS-Dilithium (dilithium5) - highest security level
    Dilithium5,
}

impl DilithiumLevel {
    /// Get the name of the parameter set as a string
    pub fn name(&self) -> &'static str {
        match self {
            DilithiumLevel::Dilithium2 => "CRYSTALS-Dilithium-2",
            DilithiumLevel::Dilithium3 => "CRYSTALS-Dilithium-3",
            DilithiumLevel::Dilithium5 => "CRYSTALS-Dilithium-5",
        }
    }
}

impl fmt::Display for DilithiumLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
