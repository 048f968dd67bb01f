use chrono::prelude::*;
use std::cmp::Ordering;
use std::fmt;

use crate::SeisError;

/// Days from 0001-01-01 (day 1 of the common era) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;
const SECONDS_PER_DAY: i64 = 86_400;

/// A UTC time held as epochal seconds (since 1970-01-01T00:00:00) together
/// with its calendar fields.
///
/// The time can be built either from an epoch, after which every calendar
/// getter is valid, or field by field. When built field by field the day is
/// taken from whichever of the Julian day or the month and day of month was
/// set last, and the epoch is recomputed on request.
///
/// ```
/// use seisio::Time;
/// # fn main() -> seisio::Result<()> {
/// let time = Time::from_epoch(1408117832.844)?;
/// assert_eq!(time.year(), 2014);
/// assert_eq!(time.month(), 8);
/// assert_eq!(time.day_of_month(), 15);
/// assert_eq!(time.micro_second(), 844000);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Time {
    epoch: f64,
    have_epoch: bool,
    year: i32,
    jday: u32,
    month: u32,
    dom: u32,
    hour: u32,
    minute: u32,
    second: u32,
    micro_second: u32,
    uses_julian_day: bool,
}

/// Calendar fields produced from an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Calendar {
    year: i32,
    jday: u32,
    month: u32,
    dom: u32,
    hour: u32,
    minute: u32,
    second: u32,
    micro_second: u32,
}

impl Time {
    /// 1970-01-01T00:00:00.000000
    pub fn new() -> Time {
        Time {
            epoch: 0.0,
            have_epoch: true,
            year: 1970,
            jday: 1,
            month: 1,
            dom: 1,
            hour: 0,
            minute: 0,
            second: 0,
            micro_second: 0,
            uses_julian_day: true,
        }
    }

    pub fn from_epoch(epoch: f64) -> Result<Time, SeisError> {
        let mut time = Time::new();
        time.set_epoch(epoch)?;
        Ok(time)
    }

    /// Resets to 1970-01-01T00:00:00.
    pub fn clear(&mut self) {
        *self = Time::new();
    }

    /// Exchanges the full state of two times.
    pub fn swap(&mut self, other: &mut Time) {
        std::mem::swap(self, other);
    }

    /// Sets the epochal time in UTC seconds since 1970. All calendar fields
    /// are recomputed. A non-finite or unrepresentable epoch leaves the time
    /// unchanged.
    pub fn set_epoch(&mut self, epoch: f64) -> Result<(), SeisError> {
        let calendar = split_epoch(epoch).ok_or_else(|| {
            SeisError::InvalidArgument(format!("epoch = {} is not a representable time", epoch))
        })?;
        self.epoch = epoch;
        self.have_epoch = true;
        self.year = calendar.year;
        self.jday = calendar.jday;
        self.month = calendar.month;
        self.dom = calendar.dom;
        self.hour = calendar.hour;
        self.minute = calendar.minute;
        self.second = calendar.second;
        self.micro_second = calendar.micro_second;
        Ok(())
    }

    /// The epochal time. If calendar fields were set since the last epoch,
    /// the epoch is computed from them.
    pub fn epoch(&self) -> f64 {
        if self.have_epoch {
            return self.epoch;
        }
        self.calendar_to_epoch()
    }

    pub fn set_year(&mut self, year: i32) -> Result<(), SeisError> {
        if !(1900..=9999).contains(&year) {
            return Err(SeisError::InvalidArgument(format!(
                "year = {} must be in range [1900,9999]",
                year
            )));
        }
        self.year = year;
        self.have_epoch = false;
        Ok(())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Sets the day of the year. Day 366 is accepted for any year; in a
    /// common year it rolls over to January 1 of the following year.
    pub fn set_julian_day(&mut self, jday: u32) -> Result<(), SeisError> {
        check_range("jday", jday, 1, 366)?;
        self.jday = jday;
        self.uses_julian_day = true;
        self.have_epoch = false;
        Ok(())
    }

    pub fn julian_day(&self) -> u32 {
        if !self.uses_julian_day && !self.have_epoch {
            return self.normalized().map_or(self.jday, |c| c.jday);
        }
        self.jday
    }

    pub fn set_month(&mut self, month: u32) -> Result<(), SeisError> {
        check_range("month", month, 1, 12)?;
        self.month = month;
        self.uses_julian_day = false;
        self.have_epoch = false;
        Ok(())
    }

    pub fn month(&self) -> u32 {
        if self.uses_julian_day && !self.have_epoch {
            return self.normalized().map_or(self.month, |c| c.month);
        }
        self.month
    }

    pub fn set_day_of_month(&mut self, dom: u32) -> Result<(), SeisError> {
        check_range("dom", dom, 1, 31)?;
        self.dom = dom;
        self.uses_julian_day = false;
        self.have_epoch = false;
        Ok(())
    }

    pub fn day_of_month(&self) -> u32 {
        if self.uses_julian_day && !self.have_epoch {
            return self.normalized().map_or(self.dom, |c| c.dom);
        }
        self.dom
    }

    pub fn set_hour(&mut self, hour: u32) -> Result<(), SeisError> {
        check_range("hour", hour, 0, 23)?;
        self.hour = hour;
        self.have_epoch = false;
        Ok(())
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn set_minute(&mut self, minute: u32) -> Result<(), SeisError> {
        check_range("minute", minute, 0, 59)?;
        self.minute = minute;
        self.have_epoch = false;
        Ok(())
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn set_second(&mut self, second: u32) -> Result<(), SeisError> {
        check_range("second", second, 0, 59)?;
        self.second = second;
        self.have_epoch = false;
        Ok(())
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn set_micro_second(&mut self, micro_second: u32) -> Result<(), SeisError> {
        check_range("musec", micro_second, 0, 999_999)?;
        self.micro_second = micro_second;
        self.have_epoch = false;
        Ok(())
    }

    pub fn micro_second(&self) -> u32 {
        self.micro_second
    }

    /// A new time `seconds` after this one.
    pub fn offset(&self, seconds: f64) -> Result<Time, SeisError> {
        Time::from_epoch(self.epoch() + seconds)
    }

    /// The time as a chrono UTC date time, truncated to the microsecond.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let calendar = self.normalized()?;
        NaiveDate::from_yo_opt(calendar.year, calendar.jday)?
            .and_hms_micro_opt(
                calendar.hour,
                calendar.minute,
                calendar.second,
                calendar.micro_second,
            )
            .map(|naive| naive.and_utc())
    }

    /// Time as ISO8601 string
    pub fn to_iso(&self) -> String {
        match self.normalized() {
            Some(c) => format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}",
                c.year, c.month, c.dom, c.hour, c.minute, c.second, c.micro_second
            ),
            None => format!("{}", self.epoch()),
        }
    }

    fn normalized(&self) -> Option<Calendar> {
        if self.have_epoch {
            return Some(Calendar {
                year: self.year,
                jday: self.jday,
                month: self.month,
                dom: self.dom,
                hour: self.hour,
                minute: self.minute,
                second: self.second,
                micro_second: self.micro_second,
            });
        }
        split_epoch(self.calendar_to_epoch())
    }

    fn calendar_to_epoch(&self) -> f64 {
        // first day of the year or month; the setters keep year and month in range
        let (first, day_offset) = if self.uses_julian_day {
            (NaiveDate::from_yo_opt(self.year, 1), self.jday - 1)
        } else {
            (NaiveDate::from_ymd_opt(self.year, self.month, 1), self.dom - 1)
        };
        let first = first.unwrap_or(NaiveDate::MIN);
        let days = first.num_days_from_ce() as i64 - UNIX_EPOCH_DAYS_FROM_CE + day_offset as i64;
        let seconds = days * SECONDS_PER_DAY
            + self.hour as i64 * 3600
            + self.minute as i64 * 60
            + self.second as i64;
        seconds as f64 + self.micro_second as f64 * 1.0e-6
    }
}

impl Default for Time {
    fn default() -> Self {
        Time::new()
    }
}

/// Compares the calendar fields rather than the epoch, so two times built
/// along different paths to the same microsecond are equal. Fields set out
/// of range of their month (February 30) are compared after rolling over.
impl PartialEq for Time {
    fn eq(&self, other: &Time) -> bool {
        match (self.normalized(), other.normalized()) {
            (Some(a), Some(b)) => a == b,
            _ => self.epoch() == other.epoch(),
        }
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Time) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        self.epoch().partial_cmp(&other.epoch())
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(dt: DateTime<Utc>) -> Self {
        let epoch = dt.timestamp() as f64 + dt.timestamp_subsec_micros() as f64 * 1.0e-6;
        let mut time = Time::new();
        time.epoch = epoch;
        time.year = dt.year();
        time.jday = dt.ordinal();
        time.month = dt.month();
        time.dom = dt.day();
        time.hour = dt.hour();
        time.minute = dt.minute();
        time.second = dt.second().min(59);
        time.micro_second = dt.timestamp_subsec_micros().min(999_999);
        time
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_iso())
    }
}

fn check_range(name: &str, value: u32, low: u32, high: u32) -> Result<(), SeisError> {
    if value < low || value > high {
        return Err(SeisError::InvalidArgument(format!(
            "{} = {} must be in range [{},{}]",
            name, value, low, high
        )));
    }
    Ok(())
}

/// Splits an epoch into calendar fields, rounding to the nearest microsecond.
fn split_epoch(epoch: f64) -> Option<Calendar> {
    if !epoch.is_finite() {
        return None;
    }
    let total_micros = (epoch * 1.0e6).round();
    if total_micros.abs() > 9.0e18 {
        return None;
    }
    let total_micros = total_micros as i64;
    let seconds = total_micros.div_euclid(1_000_000);
    let micro_second = total_micros.rem_euclid(1_000_000) as u32;
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    let second_of_day = seconds.rem_euclid(SECONDS_PER_DAY) as u32;
    let days_from_ce = i32::try_from(days + UNIX_EPOCH_DAYS_FROM_CE).ok()?;
    let date = NaiveDate::from_num_days_from_ce_opt(days_from_ce)?;
    Some(Calendar {
        year: date.year(),
        jday: date.ordinal(),
        month: date.month(),
        dom: date.day(),
        hour: second_of_day / 3600,
        minute: (second_of_day % 3600) / 60,
        second: second_of_day % 60,
        micro_second,
    })
}
