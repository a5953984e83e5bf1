//! Boolean presence probing across title variants.
//!
//! This is the alternative matching mode: each variant is probed for "any
//! result at all" and the outcomes are folded into a single tag. It is never
//! combined with the metadata scorer.

use std::fmt;

use crate::modules::tracker::{QueryVariant, SearchBackend, VariantLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantPresence {
    Absent,
    Found(VariantLabel),
    Both,
}

impl VariantPresence {
    pub fn is_present(&self) -> bool {
        !matches!(self, VariantPresence::Absent)
    }
}

impl fmt::Display for VariantPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantPresence::Absent => write!(f, "Absent"),
            VariantPresence::Found(label) => write!(f, "{}", label),
            VariantPresence::Both => write!(f, "Both"),
        }
    }
}

/// Probe every variant in order and fold the hits into one tag.
pub async fn probe_variants(
    backend: &dyn SearchBackend,
    variants: &[QueryVariant],
) -> VariantPresence {
    let mut found = Vec::new();
    for variant in variants {
        if !backend.search(&variant.query).await.is_empty() {
            found.push(variant.label);
        }
    }
    match found.as_slice() {
        [] => VariantPresence::Absent,
        [label] => VariantPresence::Found(*label),
        _ => VariantPresence::Both,
    }
}
