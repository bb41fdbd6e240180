use crate::artifacts::index::CHECKSUM_SIZE;
use crate::errors::IndexResult;
use sha1::{Digest, Sha1};
use std::io::Write;

/// Writer that keeps a running SHA-1 of everything written through it
#[derive(Debug)]
pub struct Checksum<W: Write> {
    writer: W,
    digest: Sha1,
}

impl<W: Write> Checksum<W> {
    pub(crate) fn new(writer: W) -> Self {
        Checksum {
            writer,
            digest: Sha1::new(),
        }
    }

    pub(crate) fn write(&mut self, data: &[u8]) -> IndexResult<()> {
        self.writer.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    /// Append the digest of everything written so far and hand back the writer
    pub(crate) fn write_checksum(mut self) -> IndexResult<(W, [u8; CHECKSUM_SIZE])> {
        let mut checksum = [0u8; CHECKSUM_SIZE];
        checksum.copy_from_slice(&self.digest.finalize());
        self.writer.write_all(&checksum)?;

        Ok((self.writer, checksum))
    }
}

/// SHA-1 of a complete buffer
pub(crate) fn compute(data: &[u8]) -> [u8; CHECKSUM_SIZE] {
    let mut checksum = [0u8; CHECKSUM_SIZE];
    checksum.copy_from_slice(&Sha1::digest(data));
    checksum
}
