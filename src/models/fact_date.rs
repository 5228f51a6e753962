//! Approximate genealogical dates
//!
//! A `FactDate` is a closed interval of calendar days plus a tag describing
//! how the interval was expressed (exact, about, before, after, between).
//! Text that cannot be understood becomes the unknown date, which spans the
//! whole supported calendar. All arithmetic saturates at the calendar bounds.

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Oldest age considered plausible for a person
pub const MAX_YEARS: i32 = 110;

/// Widest span in years still considered a usable estimate
pub const LONG_YEAR_SPAN: i32 = 5;

/// (365.25 days)^2, converting squared day differences into squared years
const DAYS_PER_YEAR_SQUARED: f64 = 365.25 * 365.25;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

const FULL_MONTHS: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// Earliest representable date, used as the open lower bound
#[must_use]
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Latest representable date, used as the open upper bound
#[must_use]
pub fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// How a date was expressed in the source record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactDateType {
    /// A plain day, month or year
    Exact,
    /// ABT/CIRCA/EST/CAL: one year either side of the base date
    About,
    /// BEF: anything up to the day before the base date
    Before,
    /// AFT: anything from the day after the base date
    After,
    /// BET .. AND .. or FROM .. TO ..
    Between,
    /// Missing or unparseable
    Unknown,
}

/// A possibly imprecise date, stored as an inclusive `[start, end]` interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactDate {
    start: NaiveDate,
    end: NaiveDate,
    date_type: FactDateType,
    text: String,
}

impl FactDate {
    /// Parse a GEDCOM-style date phrase
    ///
    /// Accepts `1 JAN 1850`, `JAN 1850`, `1850`, `1850-01-01`, the
    /// qualifiers `ABT`, `BEF`, `AFT` (and their long forms) and the ranges
    /// `BET x AND y` / `FROM x TO y`. Anything else yields the unknown date.
    ///
    /// # Arguments
    /// * `text` - Raw date text from the source record
    ///
    /// # Returns
    /// The parsed date, or `FactDate::unknown()` with the original text kept
    /// for display
    #[must_use]
    pub fn new(text: &str) -> Self {
        let normalised = text
            .replace(',', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();
        let tokens: Vec<&str> = normalised.split(' ').filter(|t| !t.is_empty()).collect();

        match parse_tokens(&tokens) {
            Some((start, end, date_type)) => Self {
                start,
                end,
                date_type,
                text: normalised,
            },
            None => {
                let mut unknown = Self::unknown();
                if !normalised.is_empty() {
                    unknown.text = normalised;
                }
                unknown
            }
        }
    }

    /// The unknown date, spanning the whole calendar
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            start: min_date(),
            end: max_date(),
            date_type: FactDateType::Unknown,
            text: "UNKNOWN".to_string(),
        }
    }

    /// Build a date directly from interval bounds
    ///
    /// Bounds are clamped to the supported calendar and swapped if given in
    /// reverse order. An interval covering the whole calendar is unknown.
    #[must_use]
    pub fn from_interval(start: NaiveDate, end: NaiveDate) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let start = start.max(min_date());
        let end = end.min(max_date());
        if start == min_date() && end == max_date() {
            return Self::unknown();
        }
        let date_type = if start == min_date() {
            FactDateType::Before
        } else if end == max_date() {
            FactDateType::After
        } else if start == end || is_whole_year(start, end) || is_whole_month(start, end) {
            FactDateType::Exact
        } else {
            FactDateType::Between
        };
        Self {
            start,
            end,
            date_type,
            text: describe_interval(start, end),
        }
    }

    /// A single known day
    #[must_use]
    pub fn on(date: NaiveDate) -> Self {
        Self::from_interval(date, date)
    }

    /// The whole of the given calendar year
    #[must_use]
    pub fn from_year(year: i32) -> Self {
        match year_bounds(year) {
            Some((start, end)) => Self::from_interval(start, end),
            None => Self::unknown(),
        }
    }

    /// Today's date in the local time zone
    #[must_use]
    pub fn today() -> Self {
        Self::on(Local::now().date_naive())
    }

    /// First day of the interval
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the interval
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// How the date was expressed
    #[must_use]
    pub const fn date_type(&self) -> FactDateType {
        self.date_type
    }

    /// Normalised text of the date
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Year of the interval start
    #[must_use]
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Year of the interval end
    #[must_use]
    pub fn end_year(&self) -> i32 {
        self.end.year()
    }

    /// Whether the date carries any information
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.date_type != FactDateType::Unknown
    }

    /// Whether the date pins down a single day
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.is_known() && self.start == self.end
    }

    /// True when this interval ends before `other` begins
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.end < other.start
    }

    /// True when this interval begins after `other` ends
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.start > other.end
    }

    /// True when the two intervals share at least one day
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Squared proximity in years², built from the start and end differences
    ///
    /// Symmetric, zero for identical intervals, and only meaningful for
    /// ranking when either side is a range.
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let start_days = i64::from(self.start.num_days_from_ce())
            - i64::from(other.start.num_days_from_ce());
        let end_days =
            i64::from(self.end.num_days_from_ce()) - i64::from(other.end.num_days_from_ce());
        let sum = start_days * start_days + end_days * end_days;
        sum as f64 / DAYS_PER_YEAR_SQUARED
    }

    /// Proximity in years, the square root of [`FactDate::distance_squared`]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Shift both bounds back by `months`, keeping open bounds open
    #[must_use]
    pub fn subtract_months(&self, months: u32) -> Self {
        if !self.is_known() {
            return self.clone();
        }
        let shift = |date: NaiveDate| {
            if date == min_date() || date == max_date() {
                return date;
            }
            date.checked_sub_months(Months::new(months))
                .map_or(min_date(), |d| d.max(min_date()))
        };
        self.derived(shift(self.start), shift(self.end))
    }

    /// Extend the end bound by `years`, saturating at the calendar end
    #[must_use]
    pub fn add_end_date_years(&self, years: u32) -> Self {
        if !self.is_known() {
            return self.clone();
        }
        let end = if self.end == max_date() {
            self.end
        } else {
            years
                .checked_mul(12)
                .and_then(|m| self.end.checked_add_months(Months::new(m)))
                .map_or(max_date(), |d| d.min(max_date()))
        };
        self.derived(self.start, end)
    }

    /// Whether the interval spans more than [`LONG_YEAR_SPAN`] years
    #[must_use]
    pub fn is_long_year_span(&self) -> bool {
        self.end.year() - self.start.year() > LONG_YEAR_SPAN
    }

    fn derived(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            date_type: self.date_type,
            text: describe_interval(start, end),
        }
    }
}

impl Default for FactDate {
    fn default() -> Self {
        Self::unknown()
    }
}

impl From<&str> for FactDate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for FactDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

// Unknown dates sort before every known date; known dates by start, then end.
impl Ord for FactDate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_known(), other.is_known()) {
            (false, false) => Ordering::Equal,
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => self
                .start
                .cmp(&other.start)
                .then_with(|| self.end.cmp(&other.end)),
        }
    }
}

impl PartialOrd for FactDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FactDate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FactDate {}

impl Hash for FactDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_known().hash(state);
        if self.is_known() {
            self.start.hash(state);
            self.end.hash(state);
        }
    }
}

/// Whole years elapsed from `from` to `to`, negative if `to` is earlier
#[must_use]
pub fn whole_years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

/// Smallest possible age at `when` for someone born at `birth`
///
/// Unknown dates give zero; negative differences are floored at zero.
#[must_use]
pub fn min_years_between(birth: &FactDate, when: &FactDate) -> i32 {
    if !birth.is_known() || !when.is_known() {
        return 0;
    }
    whole_years_between(birth.end, when.start).max(0)
}

/// Largest possible age at `when` for someone born at `birth`
///
/// An unknown or open-started birth, or an open-ended `when`, yields
/// [`MAX_YEARS`]. The result may be negative when `when` precedes the birth.
#[must_use]
pub fn max_years_between(birth: &FactDate, when: &FactDate) -> i32 {
    if !birth.is_known() || birth.start == min_date() || when.end == max_date() {
        return MAX_YEARS;
    }
    whole_years_between(birth.start, when.end)
}

fn parse_tokens(tokens: &[&str]) -> Option<(NaiveDate, NaiveDate, FactDateType)> {
    let (first, rest) = tokens.split_first()?;
    if *first == "UNKNOWN" && rest.is_empty() {
        return None;
    }
    let keyword = first.trim_end_matches('.');
    match keyword {
        "ABT" | "ABOUT" | "CIRCA" | "CA" | "C" | "EST" | "CAL" => {
            let (start, end) = parse_base(rest)?;
            let start = start
                .checked_sub_months(Months::new(12))
                .map_or(min_date(), |d| d.max(min_date()));
            let end = end
                .checked_add_months(Months::new(12))
                .map_or(max_date(), |d| d.min(max_date()));
            Some((start, end, FactDateType::About))
        }
        "BEF" | "BEFORE" => {
            let (start, _) = parse_base(rest)?;
            let end = start.pred_opt().unwrap_or(start).max(min_date());
            Some((min_date(), end, FactDateType::Before))
        }
        "AFT" | "AFTER" => {
            let (_, end) = parse_base(rest)?;
            let start = end.succ_opt().unwrap_or(end).min(max_date());
            Some((start, max_date(), FactDateType::After))
        }
        "BET" | "BETWEEN" => {
            let split = rest.iter().position(|t| *t == "AND")?;
            parse_range(&rest[..split], &rest[split + 1..])
        }
        "FROM" => match rest.iter().position(|t| *t == "TO") {
            Some(split) => parse_range(&rest[..split], &rest[split + 1..]),
            None => {
                let (start, _) = parse_base(rest)?;
                Some((start, max_date(), FactDateType::After))
            }
        },
        "TO" => {
            let (_, end) = parse_base(rest)?;
            Some((min_date(), end, FactDateType::Before))
        }
        _ => {
            let (start, end) = parse_base(tokens)?;
            Some((start, end, FactDateType::Exact))
        }
    }
}

fn parse_range(from: &[&str], to: &[&str]) -> Option<(NaiveDate, NaiveDate, FactDateType)> {
    let (start, _) = parse_base(from)?;
    let (_, end) = parse_base(to)?;
    (start <= end).then_some((start, end, FactDateType::Between))
}

/// Parse a plain day, month or year into the interval it covers
fn parse_base(tokens: &[&str]) -> Option<(NaiveDate, NaiveDate)> {
    match tokens {
        [single] if single.contains('-') => {
            let date = NaiveDate::parse_from_str(single, "%Y-%m-%d").ok()?;
            in_range(date).then_some((date, date))
        }
        [year] => year_bounds(parse_year(year)?),
        [month, year] => month_bounds(parse_year(year)?, parse_month(month)?),
        [day, month, year] => {
            let day: u32 = day.parse().ok()?;
            let date = NaiveDate::from_ymd_opt(parse_year(year)?, parse_month(month)?, day)?;
            Some((date, date))
        }
        _ => None,
    }
}

fn parse_year(token: &str) -> Option<i32> {
    if token.is_empty() || token.len() > 4 || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: i32 = token.parse().ok()?;
    (1..=9999).contains(&year).then_some(year)
}

fn parse_month(token: &str) -> Option<u32> {
    let token = token.trim_end_matches('.');
    MONTHS
        .iter()
        .position(|m| *m == token)
        .or_else(|| FULL_MONTHS.iter().position(|m| *m == token))
        .and_then(|index| u32::try_from(index + 1).ok())
}

fn in_range(date: NaiveDate) -> bool {
    date >= min_date() && date <= max_date()
}

fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = if month == 12 {
        NaiveDate::from_ymd_opt(year, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?.pred_opt()?
    };
    Some((first, last))
}

fn is_whole_year(start: NaiveDate, end: NaiveDate) -> bool {
    start.year() == end.year() && start.ordinal() == 1 && end.month() == 12 && end.day() == 31
}

fn is_whole_month(start: NaiveDate, end: NaiveDate) -> bool {
    month_bounds(start.year(), start.month()) == Some((start, end))
}

fn format_day(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

fn format_span(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        format_day(start)
    } else if is_whole_year(start, end) {
        start.year().to_string()
    } else if is_whole_month(start, end) {
        format!("{} {}", MONTHS[start.month0() as usize], start.year())
    } else {
        format!("BET {} AND {}", format_day(start), format_day(end))
    }
}

fn describe_interval(start: NaiveDate, end: NaiveDate) -> String {
    match (start == min_date(), end == max_date()) {
        (true, true) => "UNKNOWN".to_string(),
        (true, false) => format!("BEF {}", format_day(end.succ_opt().unwrap_or(end))),
        (false, true) => format!("AFT {}", format_day(start.pred_opt().unwrap_or(start))),
        (false, false) => format_span(start, end),
    }
}
