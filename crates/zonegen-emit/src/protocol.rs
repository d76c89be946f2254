//! Wire protocol version and encoding, consulted by the emitter when
//! generating the dual v1/v2 marshalling branches and v2's four-way
//! encoding switch.

/// Protocol version a proxy/stub method body is generated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolVersion {
    V1,
    V2,
}

impl ProtocolVersion {
    /// The compile-time guard macro wrapping this branch in emitted code.
    pub fn macro_name(self) -> &'static str {
        match self {
            ProtocolVersion::V1 => "RPC_V1",
            ProtocolVersion::V2 => "RPC_V2",
        }
    }
}

/// One of the four wire encodings selectable under protocol v2. Protocol v1
/// is binary-only and does not use this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Binary,
    CompressedBinary,
    Text,
    Json,
}

impl Encoding {
    pub const ALL: [Encoding; 4] = [
        Encoding::Binary,
        Encoding::CompressedBinary,
        Encoding::Text,
        Encoding::Json,
    ];

    /// The `yas_*` tag the wire runtime switches on for this encoding.
    pub fn yas_tag(self) -> &'static str {
        match self {
            Encoding::Binary => "yas_binary",
            Encoding::CompressedBinary => "yas_compressed_binary",
            Encoding::Text => "yas_text",
            Encoding::Json => "yas_json",
        }
    }

    /// The `rpc::encoding::...` case label the stub's encoding switch
    /// matches against, built from [`Encoding::yas_tag`] so the two never
    /// drift apart.
    pub fn case_label(self) -> String {
        format!("rpc::encoding::{}", self.yas_tag())
    }

    /// The archive flag expression passed as the explicit template argument
    /// to `rpc::to_yas_buffer`/`rpc::from_yas_buffer` for this encoding.
    pub fn yas_flags(self) -> &'static str {
        match self {
            Encoding::Binary => "yas::mem | yas::binary | yas::no_header",
            Encoding::CompressedBinary => "yas::mem | yas::binary | yas::compacted | yas::no_header",
            Encoding::Text => "yas::mem | yas::text | yas::no_header",
            Encoding::Json => "yas::mem | yas::json | yas::no_header",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_four_encodings_are_distinct_tags() {
        let tags: std::collections::HashSet<_> = Encoding::ALL.iter().map(|e| e.yas_tag()).collect();
        assert_eq!(tags.len(), 4);
    }
}
