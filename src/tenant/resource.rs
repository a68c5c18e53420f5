//! In-memory resource blobs handed back to the hosting layer

/// Full contents of a resource, read in one go
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteResource {
    bytes: Vec<u8>,
}

impl ByteResource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes held
    pub fn content_length(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for ByteResource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for ByteResource {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_length_counts_utf8_bytes() {
        let resource = ByteResource::from("héllo".as_bytes().to_vec());
        assert_eq!(resource.content_length(), 6);
        assert_eq!(resource.into_bytes(), "héllo".as_bytes());
    }
}
