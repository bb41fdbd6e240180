//! Per-entry flags
//!
//! ```text
//!   bit 15     assume-valid
//!   bit 14     extended (two more flag bytes follow)
//!   bits 13-12 merge stage
//!   bits 11-0  name length, 0xFFF when the name is 4095 bytes or longer
//! ```

use crate::errors::{IndexError, IndexResult};
use bitflags::bitflags;
use byteorder::{ByteOrder, NetworkEndian};
use derive_new::new;

/// Size of the flags field in bytes
pub const FLAGS_SIZE: usize = 2;

/// Name length value meaning "scan for the NUL terminator instead"
pub const NAME_LENGTH_OVERFLOW: u16 = 0x0FFF;

const STAGE_MASK: u16 = 0x3000;
const STAGE_SHIFT: u16 = 12;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct FlagBits: u16 {
        const ASSUME_VALID = 0x8000;
        const EXTENDED = 0x4000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, new)]
pub struct EntryFlags {
    pub assume_valid: bool,
    pub extended: bool,
    /// Merge stage, 0 for a normal entry and 1-3 for conflict sides
    pub stage: u8,
    pub name_length: u16,
}

impl EntryFlags {
    /// Flags for a fresh stage-0 entry with the given name
    pub fn for_name(name: &str) -> Self {
        let name_length = u16::try_from(name.len())
            .unwrap_or(NAME_LENGTH_OVERFLOW)
            .min(NAME_LENGTH_OVERFLOW);

        EntryFlags {
            name_length,
            ..Default::default()
        }
    }

    /// Whether the name has to be read up to its NUL terminator
    pub fn has_long_name(&self) -> bool {
        self.name_length >= NAME_LENGTH_OVERFLOW
    }

    pub fn decode(bytes: &[u8]) -> IndexResult<Self> {
        if bytes.len() < FLAGS_SIZE {
            return Err(IndexError::malformed(format!(
                "expected {FLAGS_SIZE} flag bytes, found {}",
                bytes.len()
            )));
        }

        let raw = NetworkEndian::read_u16(&bytes[..FLAGS_SIZE]);
        let bits = FlagBits::from_bits_truncate(raw);

        Ok(EntryFlags {
            assume_valid: bits.contains(FlagBits::ASSUME_VALID),
            extended: bits.contains(FlagBits::EXTENDED),
            stage: ((raw & STAGE_MASK) >> STAGE_SHIFT) as u8,
            name_length: raw & NAME_LENGTH_OVERFLOW,
        })
    }

    pub fn encode(&self) -> [u8; FLAGS_SIZE] {
        let mut bits = FlagBits::empty();
        bits.set(FlagBits::ASSUME_VALID, self.assume_valid);
        bits.set(FlagBits::EXTENDED, self.extended);

        let raw = bits.bits()
            | ((u16::from(self.stage) << STAGE_SHIFT) & STAGE_MASK)
            | (self.name_length & NAME_LENGTH_OVERFLOW);

        let mut bytes = [0u8; FLAGS_SIZE];
        NetworkEndian::write_u16(&mut bytes, raw);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_every_flag_value_round_trips() {
        for raw in 0..=u16::MAX {
            let bytes = raw.to_be_bytes();
            let flags = EntryFlags::decode(&bytes).unwrap();
            assert_eq!(flags.encode(), bytes, "flags {raw:#06x} did not round-trip");
        }
    }

    #[rstest]
    #[case(&[])]
    #[case(&[0x80])]
    fn test_decode_short_input_is_malformed(#[case] bytes: &[u8]) {
        assert!(matches!(
            EntryFlags::decode(bytes),
            Err(IndexError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_decode_splits_bit_fields() {
        let flags = EntryFlags::decode(&[0xE0, 0x0A]).unwrap();

        assert_eq!(flags, EntryFlags::new(true, true, 2, 10));
    }

    #[test]
    fn test_decode_overflow_marker() {
        let flags = EntryFlags::decode(&[0x0F, 0xFF]).unwrap();

        assert_eq!(flags.name_length, NAME_LENGTH_OVERFLOW);
        assert!(flags.has_long_name());
    }

    #[rstest]
    #[case("a.txt", 5)]
    #[case("dir/nested/file.rs", 18)]
    fn test_for_name_uses_name_length(#[case] name: &str, #[case] expected: u16) {
        let flags = EntryFlags::for_name(name);

        assert_eq!(flags.name_length, expected);
        assert_eq!(flags.stage, 0);
        assert!(!flags.extended && !flags.assume_valid);
    }

    #[test]
    fn test_for_name_caps_long_names() {
        let name = "x".repeat(5000);
        assert_eq!(EntryFlags::for_name(&name).name_length, NAME_LENGTH_OVERFLOW);
    }

    proptest! {
        #[test]
        fn test_fields_survive_encoding(
            assume_valid in any::<bool>(),
            extended in any::<bool>(),
            stage in 0u8..4,
            name_length in 0u16..=0x0FFF
        ) {
            let flags = EntryFlags::new(assume_valid, extended, stage, name_length);
            prop_assert_eq!(EntryFlags::decode(&flags.encode()).unwrap(), flags);
        }
    }
}
