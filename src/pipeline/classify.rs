//! Risk classification: three independent keyword verdicts per document.
//!
//! A pure function over (catalog entry, extracted text). The haystack is the
//! lower-cased concatenation of the extracted text with the catalog fields
//! that describe cryptographic scope, tested against three fixed keyword
//! sets by plain substring containment.
//!
//! Matching is deliberately loose and recall-biased: "dsa" inside an
//! unrelated word will match the signature set, and that false positive is
//! accepted. A library card that over-claims a risk invites a look at the
//! document; one that under-claims hides it. Do not tighten this to
//! word-boundary matching without revisiting that trade-off.

use crate::catalog::CatalogEntry;

/// One verdict of the three-part risk profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskVerdict {
    HighRisk,
    NotAddressed,
}

impl RiskVerdict {
    pub fn is_high(self) -> bool {
        matches!(self, RiskVerdict::HighRisk)
    }
}

/// The three independent verdicts derived for every document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    /// Harvest-now-decrypt-later exposure (key establishment).
    pub hndl: RiskVerdict,
    /// Identity and authentication exposure (PKI, certificates).
    pub identity: RiskVerdict,
    /// Digital-signature exposure.
    pub signatures: RiskVerdict,
}

// Key-establishment vocabulary: anything about agreeing or encapsulating
// keys is HNDL surface, because recorded traffic is decryptable later.
const KEY_EXCHANGE_TERMS: &[&str] = &[
    "key encapsulation",
    "key exchange",
    "key agreement",
    "key establishment",
    "kem",
    "ml-kem",
    "kyber",
    "diffie-hellman",
    "ecdh",
    "tls",
    "harvest",
];

// Identity vocabulary: certificates, PKI, and authentication machinery.
const IDENTITY_TERMS: &[&str] = &[
    "certificate",
    "pki",
    "x.509",
    "identity",
    "authentication",
    "trust anchor",
    "ca",
];

// Signature vocabulary: signing schemes and their PQC replacements.
const SIGNATURE_TERMS: &[&str] = &[
    "signature",
    "signing",
    "ml-dsa",
    "slh-dsa",
    "dilithium",
    "falcon",
    "sphincs",
    "lms",
    "xmss",
    "ecdsa",
    "dsa",
];

/// Derive the three-part risk profile for one document.
pub fn assess(entry: &CatalogEntry, extracted_text: &str) -> RiskAssessment {
    let haystack = format!(
        "{} {} {} {} {}",
        extracted_text,
        entry.protocol_or_tool_impact,
        entry.algorithm_family,
        entry.document_type,
        entry.short_description,
    )
    .to_lowercase();

    RiskAssessment {
        hndl: verdict(&haystack, KEY_EXCHANGE_TERMS),
        identity: verdict(&haystack, IDENTITY_TERMS),
        signatures: verdict(&haystack, SIGNATURE_TERMS),
    }
}

fn verdict(haystack: &str, terms: &[&str]) -> RiskVerdict {
    if terms.iter().any(|t| haystack.contains(t)) {
        RiskVerdict::HighRisk
    } else {
        RiskVerdict::NotAddressed
    }
}

/// Fixed narrative for the HNDL verdict line.
pub fn hndl_narrative(v: RiskVerdict) -> &'static str {
    match v {
        RiskVerdict::HighRisk => {
            "**Harvest-now / decrypt-later:** High risk — this document covers key \
             establishment, the primary HNDL attack surface. Traffic recorded today \
             can be decrypted once a cryptographically relevant quantum computer exists."
        }
        RiskVerdict::NotAddressed => {
            "**Harvest-now / decrypt-later:** Not addressed by this document."
        }
    }
}

/// Fixed narrative for the identity/authentication verdict line.
pub fn identity_narrative(v: RiskVerdict) -> &'static str {
    match v {
        RiskVerdict::HighRisk => {
            "**Identity & authentication:** High risk — certificates, PKI, or \
             authentication mechanisms discussed here rely on quantum-vulnerable \
             public-key cryptography until migrated."
        }
        RiskVerdict::NotAddressed => {
            "**Identity & authentication:** Not addressed by this document."
        }
    }
}

/// Fixed narrative for the signature verdict line.
pub fn signature_narrative(v: RiskVerdict) -> &'static str {
    match v {
        RiskVerdict::HighRisk => {
            "**Digital signatures:** High risk — signature schemes in scope here are \
             forgeable by a quantum adversary; long-lived signatures need migration \
             to ML-DSA, SLH-DSA, or stateful hash-based schemes."
        }
        RiskVerdict::NotAddressed => "**Digital signatures:** Not addressed by this document.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> CatalogEntry {
        CatalogEntry::default()
    }

    #[test]
    fn key_encapsulation_text_is_hndl_high_risk() {
        let mut e = entry();
        e.document_type = "Standard".into();
        e.algorithm_family = "ML-KEM".into();
        let risk = assess(&e, "specifies a key encapsulation mechanism");
        assert!(risk.hndl.is_high());
    }

    #[test]
    fn catalog_fields_alone_can_trigger_a_verdict() {
        let mut e = entry();
        e.protocol_or_tool_impact = "X.509 certificate chains".into();
        let risk = assess(&e, "");
        assert!(risk.identity.is_high());
        assert_eq!(risk.signatures, RiskVerdict::NotAddressed);
    }

    #[test]
    fn empty_input_is_all_not_addressed() {
        let risk = assess(&entry(), "");
        assert_eq!(risk.hndl, RiskVerdict::NotAddressed);
        assert_eq!(risk.identity, RiskVerdict::NotAddressed);
        assert_eq!(risk.signatures, RiskVerdict::NotAddressed);
    }

    #[test]
    fn verdicts_are_independent() {
        let risk = assess(&entry(), "dilithium signature verification");
        assert!(risk.signatures.is_high());
        assert_eq!(risk.hndl, RiskVerdict::NotAddressed);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let risk = assess(&entry(), "KYBER and TLS 1.3");
        assert!(risk.hndl.is_high());
    }

    #[test]
    fn substring_false_positives_are_accepted() {
        // "dsa" inside "landsat" is a known, accepted false positive of the
        // loose containment matching.
        let risk = assess(&entry(), "landsat imagery archive");
        assert!(risk.signatures.is_high());
    }

    #[test]
    fn classification_is_deterministic() {
        let mut e = entry();
        e.short_description = "PKI migration guidance".into();
        let text = "hybrid key exchange with ML-KEM and ECDSA signatures";
        let first = assess(&e, text);
        for _ in 0..10 {
            assert_eq!(assess(&e, text), first);
        }
    }

    #[test]
    fn narratives_differ_by_verdict() {
        assert_ne!(
            hndl_narrative(RiskVerdict::HighRisk),
            hndl_narrative(RiskVerdict::NotAddressed)
        );
        assert!(identity_narrative(RiskVerdict::HighRisk).contains("High risk"));
        assert!(signature_narrative(RiskVerdict::NotAddressed).contains("Not addressed"));
    }
}
