//! Numeric and date comparisons used by qualifiers like `stars:>100`

use std::ops::{RangeFrom, RangeInclusive, RangeToInclusive};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::models::common::ByteSize;

/// A value that can appear on the right-hand side of a qualifier
pub trait QualifierValue {
    fn render(&self) -> String;
}

impl QualifierValue for u64 {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl QualifierValue for u32 {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl QualifierValue for NaiveDate {
    fn render(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl QualifierValue for DateTime<Utc> {
    fn render(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// `=`, `>`, `>=`, `<`, `<=` or an inclusive `a..b` range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison<T> {
    Equal(T),
    Greater(T),
    GreaterOrEqual(T),
    Less(T),
    LessOrEqual(T),
    Between(T, T),
}

impl<T> Comparison<T> {
    pub fn eq(value: T) -> Self {
        Comparison::Equal(value)
    }

    pub fn gt(value: T) -> Self {
        Comparison::Greater(value)
    }

    pub fn ge(value: T) -> Self {
        Comparison::GreaterOrEqual(value)
    }

    pub fn lt(value: T) -> Self {
        Comparison::Less(value)
    }

    pub fn le(value: T) -> Self {
        Comparison::LessOrEqual(value)
    }

    pub fn between(low: T, high: T) -> Self {
        Comparison::Between(low, high)
    }

    /// Convert the bound(s), keeping the operator
    pub fn map<U>(self, f: impl Fn(T) -> U) -> Comparison<U> {
        match self {
            Comparison::Equal(v) => Comparison::Equal(f(v)),
            Comparison::Greater(v) => Comparison::Greater(f(v)),
            Comparison::GreaterOrEqual(v) => Comparison::GreaterOrEqual(f(v)),
            Comparison::Less(v) => Comparison::Less(f(v)),
            Comparison::LessOrEqual(v) => Comparison::LessOrEqual(f(v)),
            Comparison::Between(a, b) => Comparison::Between(f(a), f(b)),
        }
    }
}

impl<T: QualifierValue> Comparison<T> {
    /// The part after `key:`
    pub fn render(&self) -> String {
        match self {
            Comparison::Equal(v) => v.render(),
            Comparison::Greater(v) => format!(">{}", v.render()),
            Comparison::GreaterOrEqual(v) => format!(">={}", v.render()),
            Comparison::Less(v) => format!("<{}", v.render()),
            Comparison::LessOrEqual(v) => format!("<={}", v.render()),
            Comparison::Between(a, b) => format!("{}..{}", a.render(), b.render()),
        }
    }
}

macro_rules! comparable {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Comparison<$t> {
                fn from(value: $t) -> Self {
                    Comparison::Equal(value)
                }
            }

            impl From<RangeInclusive<$t>> for Comparison<$t> {
                fn from(range: RangeInclusive<$t>) -> Self {
                    let (low, high) = range.into_inner();
                    Comparison::Between(low, high)
                }
            }

            impl From<RangeFrom<$t>> for Comparison<$t> {
                fn from(range: RangeFrom<$t>) -> Self {
                    Comparison::GreaterOrEqual(range.start)
                }
            }

            impl From<RangeToInclusive<$t>> for Comparison<$t> {
                fn from(range: RangeToInclusive<$t>) -> Self {
                    Comparison::LessOrEqual(range.end)
                }
            }
        )*
    };
}

comparable!(u64, u32, NaiveDate, DateTime<Utc>, ByteSize);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_operators() {
        assert_eq!(Comparison::eq(5u64).render(), "5");
        assert_eq!(Comparison::gt(100u64).render(), ">100");
        assert_eq!(Comparison::ge(100u64).render(), ">=100");
        assert_eq!(Comparison::lt(3u64).render(), "<3");
        assert_eq!(Comparison::le(3u64).render(), "<=3");
        assert_eq!(Comparison::between(10u64, 50u64).render(), "10..50");
    }

    #[test]
    fn test_from_ranges() {
        assert_eq!(Comparison::from(10u64..=20), Comparison::Between(10, 20));
        assert_eq!(Comparison::from(10u64..), Comparison::GreaterOrEqual(10));
        assert_eq!(Comparison::from(..=20u64), Comparison::LessOrEqual(20));
        assert_eq!(Comparison::from(7u64), Comparison::Equal(7));
    }

    #[test]
    fn test_dates() {
        let day = NaiveDate::from_ymd_opt(2019, 3, 1).unwrap();
        assert_eq!(Comparison::ge(day).render(), ">=2019-03-01");

        let moment = Utc.with_ymd_and_hms(2019, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(Comparison::lt(moment).render(), "<2019-03-01T12:30:00Z");
    }

    #[test]
    fn test_map_keeps_operator() {
        let size = Comparison::between(ByteSize::kilobytes(1), ByteSize::kilobytes(4));
        assert_eq!(size.map(|s| s.as_bytes()).render(), "1024..4096");
    }
}
