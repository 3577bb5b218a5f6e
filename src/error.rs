use ark_serialize::SerializationError;

#[derive(Debug)]
pub enum NoteEncryptionError {
    /// Byte outside the printable range and its position in the note
    InvalidCharacter(u8, usize),
    /// Number of chunks the note needs and the maximum the blob format supports
    MessageTooLarge(usize, usize),
    InvalidPublicKey,
    MalformedBlob,
    /// Recomputed authentication key does not match the one embedded in the
    /// blob. Wrong secret key or corrupted header.
    AuthenticationFailed,
    /// Chunk value cannot be split into characters of the printable range
    MalformedEncoding,
    Serialization(SerializationError),
}

impl From<SerializationError> for NoteEncryptionError {
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e)
    }
}
