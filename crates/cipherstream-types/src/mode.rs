/// Block cipher mode identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeId {
    Ecb,
    Cbc,
    Cfb,
    Ofb,
    Ctr,
    Gcm,
}

impl ModeId {
    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            ModeId::Ecb => "ECB",
            ModeId::Cbc => "CBC",
            ModeId::Cfb => "CFB",
            ModeId::Ofb => "OFB",
            ModeId::Ctr => "CTR",
            ModeId::Gcm => "GCM",
        }
    }

    /// Whether the mode authenticates its data.
    pub fn is_authenticated(self) -> bool {
        matches!(self, ModeId::Gcm)
    }

    /// Whether the mode consumes only block-aligned input and therefore
    /// needs PKCS#7 padding on the final block.
    pub fn requires_padding(self) -> bool {
        matches!(self, ModeId::Ecb | ModeId::Cbc)
    }
}

/// Result of a streaming `encrypt`/`decrypt` call.
///
/// A mode drains every whole block currently buffered before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeStatus {
    /// The final call processed everything, including a trailing partial
    /// block where the mode allows one.
    Complete,
    /// Fewer than one block of unconsumed input remains and the caller has
    /// not signalled the end of the stream; supply more bytes.
    AwaitingInput,
}
