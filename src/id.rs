use std::{fmt, str};

use fstr::FStr;

/// Represents a Universally Unique IDentifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID byte array from UUIDv1 field values.
    ///
    /// # Panics
    ///
    /// Panics if `timestamp` is not a 60-bit unsigned integer or `clock_seq` is not a 14-bit
    /// unsigned integer.
    pub const fn from_fields_v1(timestamp: u64, clock_seq: u16, node: [u8; 6]) -> Self {
        if timestamp >= 1 << 60 || clock_seq >= 1 << 14 {
            panic!("invalid field value");
        }

        Self([
            (timestamp >> 24) as u8,
            (timestamp >> 16) as u8,
            (timestamp >> 8) as u8,
            timestamp as u8,
            (timestamp >> 40) as u8,
            (timestamp >> 32) as u8,
            0x10 | (timestamp >> 56) as u8,
            (timestamp >> 48) as u8,
            0x80 | (clock_seq >> 8) as u8,
            clock_seq as u8,
            node[0],
            node[1],
            node[2],
            node[3],
            node[4],
            node[5],
        ])
    }

    /// Reports the variant field value of the UUID or, if appropriate, "NIL" or "MAX".
    ///
    /// For convenience, this method reports [`Variant::VarNil`] or [`Variant::VarMax`] if `self`
    /// represents the Nil or Max UUID, although the Nil and Max UUIDs are technically subsumed
    /// under the variants `0b0` and `0b111`, respectively.
    pub fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 if self.0 == Self::NIL.0 => Variant::VarNil,
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ if self.0 == Self::MAX.0 => Variant::VarMax,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID or `None` if `self` does not have the variant
    /// field value of `0b10`.
    pub fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the 60-bit `timestamp` field, reassembled from `time_low`, `time_mid`, and
    /// `time_hi`.
    ///
    /// The result is meaningful only for a version 1 UUID.
    pub const fn timestamp_v1(&self) -> u64 {
        let b = &self.0;
        ((b[6] as u64 & 0x0f) << 56)
            | (b[7] as u64) << 48
            | (b[4] as u64) << 40
            | (b[5] as u64) << 32
            | (b[0] as u64) << 24
            | (b[1] as u64) << 16
            | (b[2] as u64) << 8
            | b[3] as u64
    }

    /// Returns the 14-bit `clock_seq` field with the variant bits stripped.
    pub const fn clock_seq(&self) -> u16 {
        (self.0[8] as u16 & 0x3f) << 8 | self.0[9] as u16
    }

    /// Returns the 48-bit `node` field.
    pub const fn node(&self) -> [u8; 6] {
        let b = &self.0;
        [b[10], b[11], b[12], b[13], b[14], b[15]]
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string-like type that can be handled like [`String`] through common traits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::Uuid;
    ///
    /// let x = "d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(y, "d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e");
    /// assert_eq!(format!("{}", y), "d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e");
    /// # Ok::<(), uuid1::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        let mut buffer = [0u8; 36];
        let mut i = 0;
        for (j, e) in self.0.iter().enumerate() {
            buffer[i] = DIGITS[(e >> 4) as usize];
            buffer[i + 1] = DIGITS[(e & 15) as usize];
            i += 2;
            if j == 3 || j == 5 || j == 7 || j == 9 {
                buffer[i] = b'-';
                i += 1;
            }
        }
        debug_assert!(buffer.is_ascii());
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Returns the 32-digit hexadecimal string representation without hyphens.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::Uuid;
    ///
    /// let x = "d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e".parse::<Uuid>()?;
    /// assert_eq!(x.encode_hex(), "d2b45678a3c111eeaa5b001a2b3c4d5e");
    /// # Ok::<(), uuid1::ParseError>(())
    /// ```
    pub fn encode_hex(&self) -> FStr<32> {
        let mut buffer = [0u8; 32];
        for (i, e) in self.0.iter().enumerate() {
            buffer[i * 2] = DIGITS[(e >> 4) as usize];
            buffer[i * 2 + 1] = DIGITS[(e & 15) as usize];
        }
        debug_assert!(buffer.is_ascii());
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }
}

const DIGITS: &[u8; 16] = b"0123456789abcdef";

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.encode(), f)
    }
}

impl fmt::LowerHex for Uuid {
    /// Returns the 32-digit hexadecimal string representation without hyphens.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.encode_hex(), f)
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// An enum of the variant field values of a UUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// The Nil UUID.
    VarNil,

    /// The variant field value of `0b0`, excluding the Nil UUID.
    Var0,

    /// The variant field value of `0b10`.
    Var10,

    /// The variant field value of `0b110`.
    Var110,

    /// The reserved variant field value of `0b111`, excluding the Max UUID.
    VarReserved,

    /// The Max UUID.
    VarMax,
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid string representation")]
pub struct ParseError {}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{Uuid, Variant};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u64, u16, [u8; 6]), &'static str)] {
        const MAX_UINT60: u64 = (1 << 60) - 1;
        const MAX_UINT14: u16 = (1 << 14) - 1;

        &[
            ((0, 0, [0; 6]), "00000000-0000-1000-8000-000000000000"),
            ((MAX_UINT60, 0, [0; 6]), "ffffffff-ffff-1fff-8000-000000000000"),
            ((0, MAX_UINT14, [0; 6]), "00000000-0000-1000-bfff-000000000000"),
            ((0, 0, [0xff; 6]), "00000000-0000-1000-8000-ffffffffffff"),
            (
                (MAX_UINT60, MAX_UINT14, [0xff; 6]),
                "ffffffff-ffff-1fff-bfff-ffffffffffff",
            ),
            (
                (0x01ee_a3c1_d2b4_5678, 0x2a5b, [0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]),
                "d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e",
            ),
            // RFC 9562 Appendix A.1 test vector
            (
                (0x01ec_9414_c232_ab00, 0x33c8, [0x9f, 0x6b, 0xde, 0xce, 0xd8, 0x46]),
                "c232ab00-9414-11ec-b3c8-9f6bdeced846",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (fs, text) in prepare_cases() {
            let from_fields = Uuid::from_fields_v1(fs.0, fs.1, fs.2);
            assert_eq!(Ok(from_fields), text.parse());
            assert_eq!(Ok(from_fields), text.to_uppercase().parse());
            assert_eq!(from_fields.encode(), *text);
            assert_eq!(&from_fields.to_string(), text);
            assert_eq!(from_fields.encode_hex(), text.replace('-', "").as_str());
            assert_eq!(format!("{:x}", from_fields), text.replace('-', ""));
            #[cfg(feature = "uuid")]
            assert_eq!(&uuid::Uuid::from(from_fields).to_string(), text);
        }
    }

    /// Extracts field values that were packed in
    #[test]
    fn extracts_field_values_that_were_packed_in() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_fields_v1(fs.0, fs.1, fs.2);
            assert_eq!(e.timestamp_v1(), fs.0);
            assert_eq!(e.clock_seq(), fs.1);
            assert_eq!(e.node(), fs.2);
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(1));
        }
    }

    /// Rejects out-of-range field values
    #[test]
    #[should_panic(expected = "invalid field value")]
    fn rejects_out_of_range_timestamp() {
        Uuid::from_fields_v1(1 << 60, 0, [0; 6]);
    }

    /// Rejects out-of-range clock sequence
    #[test]
    #[should_panic(expected = "invalid field value")]
    fn rejects_out_of_range_clock_seq() {
        Uuid::from_fields_v1(0, 1 << 14, [0; 6]);
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e",
            "d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e ",
            " d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e ",
            "+d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e",
            "-d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e",
            "+2b45678-a3c1-11ee-aa5b-001a2b3c4d5e",
            "d2b45678a3c111eeaa5b001a2b3c4d5e",
            "d2b45678-a3c111ee-aa5b-001a2b3c4d5e",
            "{d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e}",
            "d2b45678-a3c1-11 e-aa5b-001a2b3c4d5e",
            "d2b4567g-a3c1-11ee-aa5b-001a2b3c4d5e",
            "d2b45678-a3c1-11ee-aa5b_001a2b3c4d5e",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err());
        }
    }

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(Uuid::NIL.encode(), "00000000-0000-0000-0000-000000000000");
        assert_eq!(Uuid::NIL.encode_hex(), "00000000000000000000000000000000");
        assert_eq!(Uuid::NIL.encode_hex().len(), 32);
        assert_eq!(Uuid::NIL.variant(), Variant::VarNil);
        assert_eq!(Uuid::NIL.version(), None);

        assert_eq!(Uuid::MAX.encode(), "ffffffff-ffff-ffff-ffff-ffffffffffff");
        assert_eq!(Uuid::MAX.encode_hex(), "ffffffffffffffffffffffffffffffff");
        assert_eq!(Uuid::MAX.variant(), Variant::VarMax);
        assert_eq!(Uuid::MAX.version(), None);
    }

    /// Reports variants of non-RFC layouts
    #[test]
    fn reports_variants_of_non_rfc_layouts() {
        let mut bytes = [0u8; 16];
        bytes[15] = 1;
        assert_eq!(Uuid::from(bytes).variant(), Variant::Var0);
        bytes[8] = 0xc0;
        assert_eq!(Uuid::from(bytes).variant(), Variant::Var110);
        bytes[8] = 0xe0;
        assert_eq!(Uuid::from(bytes).variant(), Variant::VarReserved);
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_fields_v1(fs.0, fs.1, fs.2);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(e.encode().parse(), Ok(e));
            assert_eq!(e.encode().to_uppercase().parse(), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string().to_uppercase()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);
            #[cfg(feature = "uuid")]
            assert_eq!(uuid::Uuid::from(e).get_version_num(), 1);
        }
    }
}
