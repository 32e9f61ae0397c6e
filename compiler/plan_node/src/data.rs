//! Scheme data kinds and inline scalar values.
//!
//! A `Data` type is keyed by a [`DataSlot`]; the slot's numeric scheme id is
//! what the surrounding engine exchanges on the wire. Decimals are a `Data`
//! slot too, but carry (precision, scale) on the type and are built through
//! [`Environment::decimal_type`](crate::Environment::decimal_type).

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Static properties of a data slot.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct DataFeatures: u16 {
        /// Integer or floating-point number.
        const NUMERIC = 1 << 0;
        /// Signed integer.
        const SIGNED = 1 << 1;
        /// Floating point.
        const FLOATING = 1 << 2;
        /// Variable-length text or binary payload.
        const STRING = 1 << 3;
        /// Calendar date or point in time.
        const DATE = 1 << 4;
        /// Date or point in time with a timezone id.
        const TZ_DATE = 1 << 5;
        /// Signed time interval.
        const TIME_INTERVAL = 1 << 6;
        /// Fixed-width value that fits inline.
        const FIXED_SIZE = 1 << 7;
        /// Fixed-point decimal.
        const DECIMAL = 1 << 8;
    }
}

/// Scheme data kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DataSlot {
    Bool,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float,
    Double,
    Date,
    Datetime,
    Timestamp,
    Interval,
    TzDate,
    TzDatetime,
    TzTimestamp,
    Decimal,
    String,
    Utf8,
    Yson,
    Json,
    Uuid,
    JsonDocument,
    DyNumber,
}

impl DataSlot {
    /// All slots.
    pub const ALL: [DataSlot; 26] = [
        DataSlot::Bool,
        DataSlot::Int8,
        DataSlot::Uint8,
        DataSlot::Int16,
        DataSlot::Uint16,
        DataSlot::Int32,
        DataSlot::Uint32,
        DataSlot::Int64,
        DataSlot::Uint64,
        DataSlot::Float,
        DataSlot::Double,
        DataSlot::Date,
        DataSlot::Datetime,
        DataSlot::Timestamp,
        DataSlot::Interval,
        DataSlot::TzDate,
        DataSlot::TzDatetime,
        DataSlot::TzTimestamp,
        DataSlot::Decimal,
        DataSlot::String,
        DataSlot::Utf8,
        DataSlot::Yson,
        DataSlot::Json,
        DataSlot::Uuid,
        DataSlot::JsonDocument,
        DataSlot::DyNumber,
    ];

    /// Numeric scheme type id.
    pub const fn scheme_id(self) -> u16 {
        match self {
            Self::Int32 => 0x0001,
            Self::Uint32 => 0x0002,
            Self::Int64 => 0x0003,
            Self::Uint64 => 0x0004,
            Self::Uint8 => 0x0005,
            Self::Bool => 0x0006,
            Self::Int8 => 0x0007,
            Self::Int16 => 0x0008,
            Self::Uint16 => 0x0009,
            Self::Double => 0x0020,
            Self::Float => 0x0021,
            Self::Date => 0x0030,
            Self::Datetime => 0x0031,
            Self::Timestamp => 0x0032,
            Self::Interval => 0x0033,
            Self::TzDate => 0x0034,
            Self::TzDatetime => 0x0035,
            Self::TzTimestamp => 0x0036,
            Self::String => 0x1001,
            Self::Utf8 => 0x1200,
            Self::Yson => 0x1201,
            Self::Json => 0x1202,
            Self::Uuid => 0x1203,
            Self::JsonDocument => 0x1204,
            Self::Decimal => 0x1301,
            Self::DyNumber => 0x1302,
        }
    }

    /// Look up a slot by scheme id. Zero (the null scheme) and unknown ids
    /// have no slot.
    pub fn from_scheme_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.scheme_id() == id)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int8 => "Int8",
            Self::Uint8 => "Uint8",
            Self::Int16 => "Int16",
            Self::Uint16 => "Uint16",
            Self::Int32 => "Int32",
            Self::Uint32 => "Uint32",
            Self::Int64 => "Int64",
            Self::Uint64 => "Uint64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Date => "Date",
            Self::Datetime => "Datetime",
            Self::Timestamp => "Timestamp",
            Self::Interval => "Interval",
            Self::TzDate => "TzDate",
            Self::TzDatetime => "TzDatetime",
            Self::TzTimestamp => "TzTimestamp",
            Self::Decimal => "Decimal",
            Self::String => "String",
            Self::Utf8 => "Utf8",
            Self::Yson => "Yson",
            Self::Json => "Json",
            Self::Uuid => "Uuid",
            Self::JsonDocument => "JsonDocument",
            Self::DyNumber => "DyNumber",
        }
    }

    pub const fn features(self) -> DataFeatures {
        const INT: DataFeatures = DataFeatures::NUMERIC.union(DataFeatures::FIXED_SIZE);
        const SIGNED_INT: DataFeatures = INT.union(DataFeatures::SIGNED);
        const FLOAT: DataFeatures = SIGNED_INT.union(DataFeatures::FLOATING);
        const DATE: DataFeatures = DataFeatures::DATE.union(DataFeatures::FIXED_SIZE);
        const TZ: DataFeatures = DataFeatures::TZ_DATE;
        match self {
            Self::Bool => DataFeatures::FIXED_SIZE,
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64 => INT,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 => SIGNED_INT,
            Self::Float | Self::Double => FLOAT,
            Self::Date | Self::Datetime | Self::Timestamp => DATE,
            Self::Interval => DATE.union(DataFeatures::TIME_INTERVAL),
            Self::TzDate | Self::TzDatetime | Self::TzTimestamp => TZ,
            Self::Decimal => DataFeatures::DECIMAL,
            Self::String | Self::Utf8 | Self::Yson | Self::Json | Self::JsonDocument => {
                DataFeatures::STRING
            }
            Self::Uuid | Self::DyNumber => DataFeatures::empty(),
        }
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.features().contains(DataFeatures::NUMERIC)
    }

    #[inline]
    pub const fn is_common_string(self) -> bool {
        self.features().contains(DataFeatures::STRING)
    }

    /// Date-like, excluding intervals.
    #[inline]
    pub const fn is_date(self) -> bool {
        let f = self.features();
        f.contains(DataFeatures::DATE) && !f.contains(DataFeatures::TIME_INTERVAL)
    }

    #[inline]
    pub const fn is_tz_date(self) -> bool {
        self.features().contains(DataFeatures::TZ_DATE)
    }

    #[inline]
    pub const fn is_interval(self) -> bool {
        self.features().contains(DataFeatures::TIME_INTERVAL)
    }

    /// Fixed-width scalar with a known inline layout.
    ///
    /// Decimal and timezone-aware kinds are stored inline too but are not
    /// in this set; see [`DataSlot::is_inline`].
    #[inline]
    pub const fn is_fixed_size(self) -> bool {
        self.features().contains(DataFeatures::FIXED_SIZE)
    }

    /// Values of this slot are stored inline. Every other slot holds a byte
    /// buffer ([`DataValue::Bytes`]).
    #[inline]
    pub const fn is_inline(self) -> bool {
        const INLINE: DataFeatures = DataFeatures::FIXED_SIZE
            .union(DataFeatures::TZ_DATE)
            .union(DataFeatures::DECIMAL);
        self.features().intersects(INLINE)
    }
}

impl fmt::Display for DataSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inline scalar value of a data literal.
///
/// The variant determines the slot. Variable-length kinds share [`DataValue::Bytes`]
/// and name their slot explicitly. `PartialEq` follows the slot's semantics:
/// integers by value, floats by IEEE `==`, timezone kinds by (value, timezone),
/// decimals as 128-bit integers, strings bytewise.
#[derive(Clone, PartialEq, Debug)]
pub enum DataValue {
    Bool(bool),
    Int8(i8),
    Uint8(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Float(f32),
    Double(f64),
    Date(u16),
    Datetime(u32),
    Timestamp(u64),
    Interval(i64),
    TzDate { value: u16, tz: u16 },
    TzDatetime { value: u32, tz: u16 },
    TzTimestamp { value: u64, tz: u16 },
    /// Unscaled decimal value; the scale lives on the type.
    Decimal(i128),
    /// Payload of a variable-length slot. Literal factories reject inline
    /// slots here.
    Bytes { slot: DataSlot, bytes: Box<[u8]> },
}

impl DataValue {
    /// A binary `String` value.
    pub fn string(bytes: impl Into<Box<[u8]>>) -> Self {
        Self::Bytes {
            slot: DataSlot::String,
            bytes: bytes.into(),
        }
    }

    /// A `Utf8` text value.
    pub fn utf8(text: &str) -> Self {
        Self::Bytes {
            slot: DataSlot::Utf8,
            bytes: text.as_bytes().into(),
        }
    }

    /// The slot this value belongs to.
    pub fn slot(&self) -> DataSlot {
        match self {
            Self::Bool(_) => DataSlot::Bool,
            Self::Int8(_) => DataSlot::Int8,
            Self::Uint8(_) => DataSlot::Uint8,
            Self::Int16(_) => DataSlot::Int16,
            Self::Uint16(_) => DataSlot::Uint16,
            Self::Int32(_) => DataSlot::Int32,
            Self::Uint32(_) => DataSlot::Uint32,
            Self::Int64(_) => DataSlot::Int64,
            Self::Uint64(_) => DataSlot::Uint64,
            Self::Float(_) => DataSlot::Float,
            Self::Double(_) => DataSlot::Double,
            Self::Date(_) => DataSlot::Date,
            Self::Datetime(_) => DataSlot::Datetime,
            Self::Timestamp(_) => DataSlot::Timestamp,
            Self::Interval(_) => DataSlot::Interval,
            Self::TzDate { .. } => DataSlot::TzDate,
            Self::TzDatetime { .. } => DataSlot::TzDatetime,
            Self::TzTimestamp { .. } => DataSlot::TzTimestamp,
            Self::Decimal(_) => DataSlot::Decimal,
            Self::Bytes { slot, .. } => *slot,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int8(v) => write!(f, "{v}"),
            Self::Uint8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Uint16(v) | Self::Date(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Uint32(v) | Self::Datetime(v) => write!(f, "{v}"),
            Self::Int64(v) | Self::Interval(v) => write!(f, "{v}"),
            Self::Uint64(v) | Self::Timestamp(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::TzDate { value, tz } => write!(f, "{value},tz{tz}"),
            Self::TzDatetime { value, tz } => write!(f, "{value},tz{tz}"),
            Self::TzTimestamp { value, tz } => write!(f, "{value},tz{tz}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Bytes { bytes, .. } => write!(f, "{:?}", String::from_utf8_lossy(bytes)),
        }
    }
}
