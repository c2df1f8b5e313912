use std::{fmt, ops};

use sval_derive::Value;

/**
A single bit that can be set on a data point.

Individual flags are combined into [`DataPointFlags`]. A combined set can't be compared with a single flag; use [`DataPointFlags::has_flag`] to test membership.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DataPointFlag(u32);

impl DataPointFlag {
    /**
    The data point doesn't represent a recorded value, such as when a previously reported series is known to have stopped.
    */
    pub const NO_RECORDED_VALUE: DataPointFlag = DataPointFlag(1);

    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DataPointFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&DataPointFlags(self.0), f)
    }
}

/**
The set of flags on a data point.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Value)]
pub struct DataPointFlags(u32);

impl DataPointFlags {
    /**
    No flags are set.
    */
    pub const NONE: DataPointFlags = DataPointFlags(0);

    /**
    Combine a set of individual flags.
    */
    pub fn new(flags: impl IntoIterator<Item = DataPointFlag>) -> Self {
        flags.into_iter().collect()
    }

    pub const fn from_bits(bits: u32) -> Self {
        DataPointFlags(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn has_flag(self, flag: DataPointFlag) -> bool {
        self.0 & flag.0 == flag.0
    }

    pub const fn with_flag(self, flag: DataPointFlag) -> Self {
        DataPointFlags(self.0 | flag.0)
    }

    pub const fn without_flag(self, flag: DataPointFlag) -> Self {
        DataPointFlags(self.0 & !flag.0)
    }
}

impl fmt::Display for DataPointFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("FLAG_NONE"),
            1 => f.write_str("FLAG_NO_RECORDED_VALUE"),
            // Combinations without a name render as their raw value
            bits => fmt::Display::fmt(&bits, f),
        }
    }
}

impl From<DataPointFlag> for DataPointFlags {
    fn from(flag: DataPointFlag) -> Self {
        DataPointFlags(flag.0)
    }
}

impl FromIterator<DataPointFlag> for DataPointFlags {
    fn from_iter<I: IntoIterator<Item = DataPointFlag>>(iter: I) -> Self {
        iter.into_iter()
            .fold(DataPointFlags::NONE, |flags, flag| flags.with_flag(flag))
    }
}

impl ops::BitOr for DataPointFlag {
    type Output = DataPointFlags;

    fn bitor(self, rhs: DataPointFlag) -> DataPointFlags {
        DataPointFlags(self.0 | rhs.0)
    }
}

impl ops::BitOr<DataPointFlag> for DataPointFlags {
    type Output = DataPointFlags;

    fn bitor(self, rhs: DataPointFlag) -> DataPointFlags {
        self.with_flag(rhs)
    }
}

impl ops::BitOrAssign<DataPointFlag> for DataPointFlags {
    fn bitor_assign(&mut self, rhs: DataPointFlag) {
        *self = self.with_flag(rhs);
    }
}

/**
How the values of a cumulative or delta series relate to each other over time.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Value)]
#[repr(i32)]
#[sval(unlabeled_variants)]
pub enum AggregationTemporality {
    /**
    The temporality hasn't been set.

    Producers should never emit this value. Consumers should treat it as invalid.
    */
    #[default]
    Unspecified = 0,
    /**
    Each value covers only the time since the previous report.
    */
    Delta = 1,
    /**
    Each value covers all time since a fixed start.
    */
    Cumulative = 2,
}

impl AggregationTemporality {
    /**
    Map a raw wire value onto a temporality.

    Values outside the known range map to [`AggregationTemporality::Unspecified`].
    */
    pub const fn from_i32(v: i32) -> Self {
        match v {
            1 => AggregationTemporality::Delta,
            2 => AggregationTemporality::Cumulative,
            _ => AggregationTemporality::Unspecified,
        }
    }

    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /**
    Whether the temporality has been set to a meaningful value.
    */
    pub const fn is_specified(self) -> bool {
        !matches!(self, AggregationTemporality::Unspecified)
    }
}

impl fmt::Display for AggregationTemporality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AggregationTemporality::Unspecified => "AGGREGATION_TEMPORALITY_UNSPECIFIED",
            AggregationTemporality::Delta => "AGGREGATION_TEMPORALITY_DELTA",
            AggregationTemporality::Cumulative => "AGGREGATION_TEMPORALITY_CUMULATIVE",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_none() {
        let flags = DataPointFlags::NONE;

        assert!(!flags.has_flag(DataPointFlag::NO_RECORDED_VALUE));
        assert_eq!("FLAG_NONE", flags.to_string());
        assert_eq!(DataPointFlags::default(), flags);
    }

    #[test]
    fn flags_no_recorded_value() {
        let flags = DataPointFlags::new([DataPointFlag::NO_RECORDED_VALUE]);

        assert!(flags.has_flag(DataPointFlag::NO_RECORDED_VALUE));
        assert_eq!("FLAG_NO_RECORDED_VALUE", flags.to_string());
        assert_eq!("FLAG_NO_RECORDED_VALUE", DataPointFlag::NO_RECORDED_VALUE.to_string());
    }

    #[test]
    fn flags_combine() {
        let mut flags = DataPointFlags::NONE;
        flags |= DataPointFlag::NO_RECORDED_VALUE;

        assert_eq!(DataPointFlags::from(DataPointFlag::NO_RECORDED_VALUE), flags);
        assert_eq!(
            flags,
            DataPointFlag::NO_RECORDED_VALUE | DataPointFlag::NO_RECORDED_VALUE
        );

        assert_eq!(
            DataPointFlags::NONE,
            flags.without_flag(DataPointFlag::NO_RECORDED_VALUE)
        );
    }

    #[test]
    fn flags_unnamed_bits() {
        assert_eq!("6", DataPointFlags::from_bits(6).to_string());
    }

    #[test]
    fn temporality_to_string() {
        for (case, expected) in [
            (AggregationTemporality::Unspecified, "AGGREGATION_TEMPORALITY_UNSPECIFIED"),
            (AggregationTemporality::Delta, "AGGREGATION_TEMPORALITY_DELTA"),
            (AggregationTemporality::Cumulative, "AGGREGATION_TEMPORALITY_CUMULATIVE"),
        ] {
            assert_eq!(expected, case.to_string());
            assert_eq!(case, AggregationTemporality::from_i32(case.as_i32()));
        }
    }

    #[test]
    fn temporality_unknown_is_unspecified() {
        assert_eq!(AggregationTemporality::Unspecified, AggregationTemporality::from_i32(7));
        assert!(!AggregationTemporality::default().is_specified());
        assert!(AggregationTemporality::Delta.is_specified());
    }
}
