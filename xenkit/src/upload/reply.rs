//! Tolerant parsing of the import endpoint's reply.
//!
//! The endpoint is inconsistent about reply framing across hypervisor
//! versions: some return the bare instance reference, others an
//! XML-RPC-style value wrapped in markup. Both forms must parse without
//! erroring.

use std::sync::LazyLock;

use regex::Regex;
use xenkit_shared::VmRef;

static TAG_MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("static regex"));

/// Raw reply from the import endpoint, classified by framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadReply {
    /// The reply is the bare instance reference.
    Bare(String),
    /// The reply wraps the reference in markup.
    Wrapped(String),
}

impl UploadReply {
    /// Classify a raw reply. Any angle-bracket tag means wrapped framing.
    pub fn classify(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if TAG_MARKUP.is_match(&raw) {
            UploadReply::Wrapped(raw)
        } else {
            UploadReply::Bare(raw)
        }
    }

    /// Recover the bare identifier. Wrapped replies have every tag
    /// stripped; bare replies pass through unmodified.
    pub fn into_identifier(self) -> String {
        match self {
            UploadReply::Bare(raw) => raw,
            UploadReply::Wrapped(raw) => TAG_MARKUP.replace_all(&raw, "").into_owned(),
        }
    }

    /// Classify a raw reply and produce the instance reference in one go.
    pub fn instance_ref(raw: impl Into<String>) -> VmRef {
        VmRef::new(Self::classify(raw).into_identifier())
    }
}
