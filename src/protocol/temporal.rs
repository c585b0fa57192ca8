//! Binary DATE / DATETIME / TIMESTAMP / TIME values and their canonical text forms.
//!
//! The wire form is self-describing: a length byte (0, 4, 7, 11 for dates and datetimes;
//! 0, 8, 12 for times) followed by that many bytes of fixed fields.

use std::fmt;
use std::str::FromStr;

use zerocopy::byteorder::little_endian::{U16 as U16LE, U32 as U32LE};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::{Error, Result};

// ============================================================================
// Wire layouts
// ============================================================================

/// DATE/DATETIME/TIMESTAMP - 4 bytes (ymd)
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, IntoBytes, Unaligned)]
pub struct Timestamp4 {
    pub year: U16LE,
    pub month: u8,
    pub day: u8,
}

/// DATETIME/TIMESTAMP - 7 bytes (ymd + hms)
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, IntoBytes, Unaligned)]
pub struct Timestamp7 {
    pub year: U16LE,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// DATETIME/TIMESTAMP - 11 bytes (ymd + hms + microseconds)
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, IntoBytes, Unaligned)]
pub struct Timestamp11 {
    pub year: U16LE,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: U32LE,
}

/// TIME - 8 bytes
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, IntoBytes, Unaligned)]
pub struct Time8 {
    pub is_negative: u8,
    pub days: U32LE,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// TIME - 12 bytes: is_negative (1), days (4 LE), hour (1), minute (1), second (1), microsecond (4 LE)
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, IntoBytes, Unaligned)]
pub struct Time12 {
    pub is_negative: u8,
    pub days: U32LE,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: U32LE,
}

// ============================================================================
// Structured values
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: Option<u32>,
}

/// DATETIME/TIMESTAMP value; `clock` is `None` for the 4-byte (date only) wire form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub date: Date,
    pub clock: Option<Clock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    pub is_negative: bool,
    pub days: u32,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: u32,
}

impl From<&Timestamp4> for Date {
    fn from(ts: &Timestamp4) -> Self {
        Self {
            year: ts.year.get(),
            month: ts.month,
            day: ts.day,
        }
    }
}

impl From<&Timestamp7> for DateTime {
    fn from(ts: &Timestamp7) -> Self {
        Self {
            date: Date {
                year: ts.year.get(),
                month: ts.month,
                day: ts.day,
            },
            clock: Some(Clock {
                hour: ts.hour,
                minute: ts.minute,
                second: ts.second,
                microsecond: None,
            }),
        }
    }
}

impl From<&Timestamp11> for DateTime {
    fn from(ts: &Timestamp11) -> Self {
        Self {
            date: Date {
                year: ts.year.get(),
                month: ts.month,
                day: ts.day,
            },
            clock: Some(Clock {
                hour: ts.hour,
                minute: ts.minute,
                second: ts.second,
                microsecond: Some(ts.microsecond.get()),
            }),
        }
    }
}

impl From<&Time8> for Time {
    fn from(time: &Time8) -> Self {
        Self {
            is_negative: time.is_negative == 1,
            days: time.days.get(),
            hour: time.hour,
            minute: time.minute,
            second: time.second,
            microsecond: 0,
        }
    }
}

impl From<&Time12> for Time {
    fn from(time: &Time12) -> Self {
        Self {
            is_negative: time.is_negative == 1,
            days: time.days.get(),
            hour: time.hour,
            minute: time.minute,
            second: time.second,
            microsecond: time.microsecond.get(),
        }
    }
}

// ============================================================================
// Wire reading
// ============================================================================

/// Read a length-prefixed DATE. `None` is the zero date (length 0).
pub fn read_date(data: &[u8]) -> Result<(Option<Date>, &[u8])> {
    let (len, rest) = split_length(data)?;
    match len {
        0 => Ok((None, rest)),
        4 => {
            let (ts, rest) = Timestamp4::ref_from_prefix(rest)?;
            Ok((Some(Date::from(ts)), rest))
        }
        _ => Err(Error::UnexpectedEof),
    }
}

/// Read a length-prefixed DATETIME/TIMESTAMP. `None` is the zero datetime (length 0).
pub fn read_datetime(data: &[u8]) -> Result<(Option<DateTime>, &[u8])> {
    let (len, rest) = split_length(data)?;
    match len {
        0 => Ok((None, rest)),
        4 => {
            let (ts, rest) = Timestamp4::ref_from_prefix(rest)?;
            Ok((
                Some(DateTime {
                    date: Date::from(ts),
                    clock: None,
                }),
                rest,
            ))
        }
        7 => {
            let (ts, rest) = Timestamp7::ref_from_prefix(rest)?;
            Ok((Some(DateTime::from(ts)), rest))
        }
        11 => {
            let (ts, rest) = Timestamp11::ref_from_prefix(rest)?;
            check_microsecond(ts.microsecond.get())?;
            Ok((Some(DateTime::from(ts)), rest))
        }
        _ => Err(Error::UnexpectedEof),
    }
}

/// Read a length-prefixed TIME. `None` is the zero time (length 0).
pub fn read_time(data: &[u8]) -> Result<(Option<Time>, &[u8])> {
    let (len, rest) = split_length(data)?;
    match len {
        0 => Ok((None, rest)),
        8 => {
            let (time, rest) = Time8::ref_from_prefix(rest)?;
            check_sign(time.is_negative)?;
            Ok((Some(Time::from(time)), rest))
        }
        12 => {
            let (time, rest) = Time12::ref_from_prefix(rest)?;
            check_sign(time.is_negative)?;
            check_microsecond(time.microsecond.get())?;
            Ok((Some(Time::from(time)), rest))
        }
        _ => Err(Error::UnexpectedEof),
    }
}

/// Microseconds must fit the six-digit fraction of the text form
fn check_microsecond(microsecond: u32) -> Result<()> {
    if microsecond > 999_999 {
        return Err(Error::MalformedValue("microsecond"));
    }
    Ok(())
}

/// TIME sign byte is 0 (positive) or 1 (negative)
fn check_sign(is_negative: u8) -> Result<()> {
    if is_negative > 1 {
        return Err(Error::MalformedValue("sign"));
    }
    Ok(())
}

fn split_length(data: &[u8]) -> Result<(u8, &[u8])> {
    match data.split_first() {
        Some((&len, rest)) => Ok((len, rest)),
        None => Err(Error::UnexpectedEof),
    }
}

// ============================================================================
// Wire writing
// ============================================================================

/// Write the zero DATE/DATETIME/TIME (length byte 0)
pub fn write_zero(out: &mut Vec<u8>) {
    out.push(0);
}

pub fn write_date(out: &mut Vec<u8>, date: &Date) {
    out.push(size_of::<Timestamp4>() as u8);
    out.extend_from_slice(date.to_wire().as_bytes());
}

/// Write a DATETIME/TIMESTAMP
///
/// With `keep_fraction == false` the microseconds are dropped and the 7-byte form is used.
pub fn write_datetime(out: &mut Vec<u8>, datetime: &DateTime, keep_fraction: bool) {
    let Some(clock) = datetime.clock else {
        write_date(out, &datetime.date);
        return;
    };
    let year = U16LE::new(datetime.date.year);
    match clock.microsecond {
        Some(microsecond) if keep_fraction => {
            let ts = Timestamp11 {
                year,
                month: datetime.date.month,
                day: datetime.date.day,
                hour: clock.hour,
                minute: clock.minute,
                second: clock.second,
                microsecond: U32LE::new(microsecond),
            };
            out.push(size_of::<Timestamp11>() as u8);
            out.extend_from_slice(ts.as_bytes());
        }
        _ => {
            let ts = Timestamp7 {
                year,
                month: datetime.date.month,
                day: datetime.date.day,
                hour: clock.hour,
                minute: clock.minute,
                second: clock.second,
            };
            out.push(size_of::<Timestamp7>() as u8);
            out.extend_from_slice(ts.as_bytes());
        }
    }
}

/// Write a TIME
///
/// The 12-byte form is only used when `keep_fraction` is set and the microseconds are non-zero.
pub fn write_time(out: &mut Vec<u8>, time: &Time, keep_fraction: bool) {
    let is_negative = u8::from(time.is_negative);
    let days = U32LE::new(time.days);
    if keep_fraction && time.microsecond != 0 {
        let wire = Time12 {
            is_negative,
            days,
            hour: time.hour,
            minute: time.minute,
            second: time.second,
            microsecond: U32LE::new(time.microsecond),
        };
        out.push(size_of::<Time12>() as u8);
        out.extend_from_slice(wire.as_bytes());
    } else {
        let wire = Time8 {
            is_negative,
            days,
            hour: time.hour,
            minute: time.minute,
            second: time.second,
        };
        out.push(size_of::<Time8>() as u8);
        out.extend_from_slice(wire.as_bytes());
    }
}

impl Date {
    fn to_wire(self) -> Timestamp4 {
        Timestamp4 {
            year: U16LE::new(self.year),
            month: self.month,
            day: self.day,
        }
    }
}

// ============================================================================
// Canonical text
// ============================================================================

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        if let Some(clock) = &self.clock {
            write!(
                f,
                " {:02}:{:02}:{:02}",
                clock.hour, clock.minute, clock.second
            )?;
            if let Some(microsecond) = clock.microsecond {
                write!(f, ".{:06}", microsecond)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative {
            f.write_str("-")?;
        }
        write!(
            f,
            "{} {:02}:{:02}:{:02}.{:06}",
            self.days, self.hour, self.minute, self.second, self.microsecond
        )
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut scanner = Scanner::new(text);
        let date = scanner.date();
        match date {
            Some(date) if scanner.is_done() => Ok(date),
            _ => Err(invalid("date", text)),
        }
    }
}

impl FromStr for DateTime {
    type Err = Error;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD HH:MM:SS.FFFFFF`
    fn from_str(text: &str) -> Result<Self> {
        let mut scanner = Scanner::new(text);
        let datetime = scanner.date().and_then(|date| {
            if scanner.is_done() {
                return Some(DateTime { date, clock: None });
            }
            scanner.literal(b' ')?;
            let (hour, minute, second) = scanner.hms()?;
            let microsecond = scanner.fraction()?;
            Some(DateTime {
                date,
                clock: Some(Clock {
                    hour,
                    minute,
                    second,
                    microsecond,
                }),
            })
        });
        match datetime {
            Some(datetime) if scanner.is_done() => Ok(datetime),
            _ => Err(invalid("datetime", text)),
        }
    }
}

impl FromStr for Time {
    type Err = Error;

    /// Accepts `[-]D HH:MM:SS` with an optional `.FFFFFF` fraction
    fn from_str(text: &str) -> Result<Self> {
        let mut scanner = Scanner::new(text);
        let is_negative = scanner.literal(b'-').is_some();
        let time = (|| {
            let days = scanner.number(10)?;
            scanner.literal(b' ')?;
            let (hour, minute, second) = scanner.hms()?;
            let microsecond = scanner.fraction()?.unwrap_or(0);
            Some(Time {
                is_negative,
                days,
                hour,
                minute,
                second,
                microsecond,
            })
        })();
        match time {
            Some(time) if scanner.is_done() => Ok(time),
            _ => Err(invalid("time", text)),
        }
    }
}

fn invalid(kind: &'static str, text: &str) -> Error {
    Error::InvalidTemporal {
        kind,
        text: text.to_string(),
    }
}

/// Cursor over ASCII temporal text
struct Scanner<'a> {
    rest: &'a [u8],
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            rest: text.as_bytes(),
        }
    }

    fn is_done(&self) -> bool {
        self.rest.is_empty()
    }

    fn literal(&mut self, expected: u8) -> Option<()> {
        match self.rest.split_first() {
            Some((&byte, rest)) if byte == expected => {
                self.rest = rest;
                Some(())
            }
            _ => None,
        }
    }

    fn digits(&mut self, max_digits: usize) -> Option<&'a [u8]> {
        let len = self
            .rest
            .iter()
            .take(max_digits)
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        if len == 0 {
            return None;
        }
        let (digits, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(digits)
    }

    /// 1 to `max_digits` decimal digits that fit in `T`
    fn number<T: TryFrom<u64>>(&mut self, max_digits: usize) -> Option<T> {
        let value = self.digits(max_digits)?.iter().try_fold(0u64, |acc, digit| {
            acc.checked_mul(10)?.checked_add(u64::from(digit - b'0'))
        })?;
        T::try_from(value).ok()
    }

    fn date(&mut self) -> Option<Date> {
        let year = self.number(5)?;
        self.literal(b'-')?;
        let month = self.number(3)?;
        self.literal(b'-')?;
        let day = self.number(3)?;
        Some(Date { year, month, day })
    }

    fn hms(&mut self) -> Option<(u8, u8, u8)> {
        let hour = self.number(3)?;
        self.literal(b':')?;
        let minute = self.number(3)?;
        self.literal(b':')?;
        let second = self.number(3)?;
        Some((hour, minute, second))
    }

    /// Optional `.F` to `.FFFFFF` suffix, as microseconds
    ///
    /// Fewer than six digits are right-padded (".5" is 500000 microseconds).
    /// Returns `None` if a '.' is present but malformed.
    fn fraction(&mut self) -> Option<Option<u32>> {
        if self.literal(b'.').is_none() {
            return Some(None);
        }
        let digits = self.digits(6)?;
        let mut value = digits.iter().try_fold(0u64, |acc, digit| {
            acc.checked_mul(10)?.checked_add(u64::from(digit - b'0'))
        })?;
        for _ in digits.len()..6 {
            value *= 10;
        }
        u32::try_from(value).ok().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wire_sizes() {
        assert_eq!(size_of::<Timestamp4>(), 4);
        assert_eq!(size_of::<Timestamp7>(), 7);
        assert_eq!(size_of::<Timestamp11>(), 11);
        assert_eq!(size_of::<Time8>(), 8);
        assert_eq!(size_of::<Time12>(), 12);
    }

    #[test]
    fn test_date_text() {
        let date: Date = "2024-12-25".parse().unwrap();
        assert_eq!(
            date,
            Date {
                year: 2024,
                month: 12,
                day: 25
            }
        );
        assert_eq!(date.to_string(), "2024-12-25");
        assert_eq!(
            Date {
                year: 7,
                month: 1,
                day: 2
            }
            .to_string(),
            "0007-01-02"
        );
    }

    #[test]
    fn test_date_text_rejects_garbage() {
        for text in ["", "2024-12", "2024/12/25", "2024-12-25 10:00:00", "abcd-ef-gh"] {
            assert!(
                matches!(
                    text.parse::<Date>(),
                    Err(Error::InvalidTemporal { kind: "date", .. })
                ),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_datetime_text_forms() {
        let dt: DateTime = "2023-06-15 10:30:00".parse().unwrap();
        assert_eq!(dt.to_string(), "2023-06-15 10:30:00");
        assert_eq!(dt.clock.unwrap().microsecond, None);

        let dt: DateTime = "2023-06-15 10:30:00.000042".parse().unwrap();
        assert_eq!(dt.clock.unwrap().microsecond, Some(42));
        assert_eq!(dt.to_string(), "2023-06-15 10:30:00.000042");

        let dt: DateTime = "2023-06-15".parse().unwrap();
        assert_eq!(dt.clock, None);
        assert_eq!(dt.to_string(), "2023-06-15");
    }

    #[test]
    fn test_fraction_is_right_padded() {
        let dt: DateTime = "2023-06-15 10:30:00.5".parse().unwrap();
        assert_eq!(dt.clock.unwrap().microsecond, Some(500_000));
    }

    #[test]
    fn test_time_text() {
        let time: Time = "-3 02:15:30.000000".parse().unwrap();
        assert_eq!(
            time,
            Time {
                is_negative: true,
                days: 3,
                hour: 2,
                minute: 15,
                second: 30,
                microsecond: 0,
            }
        );
        assert_eq!(time.to_string(), "-3 02:15:30.000000");

        let time: Time = "0 23:59:59".parse().unwrap();
        assert!(!time.is_negative);
        assert_eq!(time.to_string(), "0 23:59:59.000000");

        assert!("23:59:59".parse::<Time>().is_err());
        assert!("-".parse::<Time>().is_err());
    }

    #[test]
    fn test_read_datetime_short_body() {
        // Length byte says 7 but only 3 bytes follow
        assert!(matches!(
            read_datetime(&[7, 0xE7, 0x07, 0x06]),
            Err(Error::UnexpectedEof)
        ));
    }

    #[test]
    fn test_read_microsecond_out_of_range() {
        let mut data = vec![11, 0xE7, 0x07, 6, 15, 10, 30, 0];
        data.extend_from_slice(&1_000_000u32.to_le_bytes());
        assert!(matches!(
            read_datetime(&data),
            Err(Error::MalformedValue("microsecond"))
        ));

        let mut data = vec![12, 0, 1, 0, 0, 0, 1, 2, 3];
        data.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            read_time(&data),
            Err(Error::MalformedValue("microsecond"))
        ));

        let mut data = vec![11, 0xE7, 0x07, 6, 15, 10, 30, 0];
        data.extend_from_slice(&999_999u32.to_le_bytes());
        let (datetime, _) = read_datetime(&data).unwrap();
        assert_eq!(
            datetime.unwrap().to_string(),
            "2023-06-15 10:30:00.999999"
        );
    }

    #[test]
    fn test_read_time_sign_byte() {
        assert!(matches!(
            read_time(&[8, 2, 1, 0, 0, 0, 1, 2, 3]),
            Err(Error::MalformedValue("sign"))
        ));
        let (time, _) = read_time(&[8, 1, 1, 0, 0, 0, 1, 2, 3]).unwrap();
        assert!(time.unwrap().is_negative);
    }

    #[test]
    fn test_read_date_invalid_length() {
        assert!(read_date(&[5, 0, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn test_write_datetime_drops_fraction() {
        let dt: DateTime = "2023-06-15 10:30:00.123456".parse().unwrap();
        let mut out = Vec::new();
        write_datetime(&mut out, &dt, false);
        assert_eq!(out, vec![7, 0xE7, 0x07, 6, 15, 10, 30, 0]);

        out.clear();
        write_datetime(&mut out, &dt, true);
        assert_eq!(out[0], 11);
        assert_eq!(&out[8..], &123_456u32.to_le_bytes());
    }

    #[test]
    fn test_write_time_forms() {
        let time: Time = "1 00:00:01.000002".parse().unwrap();
        let mut out = Vec::new();
        write_time(&mut out, &time, true);
        assert_eq!(out, vec![12, 0, 1, 0, 0, 0, 0, 0, 1, 2, 0, 0, 0]);

        out.clear();
        write_time(&mut out, &time, false);
        assert_eq!(out, vec![8, 0, 1, 0, 0, 0, 0, 0, 1]);
    }
}
