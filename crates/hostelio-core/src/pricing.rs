// ── Booking pricing ──
//
// Nights are counted inclusively: a stay from the 1st to the 5th is five
// nights. Rent is per night, so the total is `rent × nights`.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Stay-length presets offered alongside explicit dates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DurationPreset {
    ShortTerm,
    LongTerm,
}

impl DurationPreset {
    /// Days added to the start date to derive the end date.
    pub fn days(self) -> u64 {
        match self {
            Self::ShortTerm => 7,
            Self::LongTerm => 30,
        }
    }

    pub fn end_from(self, start: NaiveDate) -> Option<NaiveDate> {
        start.checked_add_days(Days::new(self.days()))
    }
}

/// Inclusive night count. Zero when either bound is missing or the range
/// is inverted.
pub fn nights(start: Option<NaiveDate>, end: Option<NaiveDate>) -> u32 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0;
    };
    let span = (end - start).num_days();
    if span < 0 {
        return 0;
    }
    u32::try_from(span + 1).unwrap_or(u32::MAX)
}

/// `rent × nights`, zero for an empty selection.
pub fn total_amount(rent: Decimal, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Decimal {
    rent * Decimal::from(nights(start, end))
}

// ── DateSelection ────────────────────────────────────────────────────

/// The seeker's in-progress date choice for one apartment.
///
/// An end date derived from a preset is tracked as auto-filled: moving the
/// start or switching presets recomputes it, while an end date the seeker
/// picked explicitly stays put.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateSelection {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    preset: Option<DurationPreset>,
    end_autofilled: bool,
}

impl DateSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn preset(&self) -> Option<DurationPreset> {
        self.preset
    }

    pub fn set_start(&mut self, start: Option<NaiveDate>) {
        self.start = start;
        if self.end.is_none() || self.end_autofilled {
            self.autofill_end();
        }
    }

    /// Pick an end date explicitly. Clearing it lets a preset fill it again.
    pub fn set_end(&mut self, end: Option<NaiveDate>) {
        self.end = end;
        self.end_autofilled = false;
        if end.is_none() {
            self.autofill_end();
        }
    }

    pub fn set_preset(&mut self, preset: Option<DurationPreset>) {
        self.preset = preset;
        if self.start.is_some() {
            self.autofill_end();
        }
    }

    fn autofill_end(&mut self) {
        match (self.start, self.preset) {
            (Some(start), Some(preset)) => {
                self.end = preset.end_from(start);
                self.end_autofilled = self.end.is_some();
            }
            _ if self.end_autofilled => {
                self.end = None;
                self.end_autofilled = false;
            }
            _ => {}
        }
    }

    pub fn nights(&self) -> u32 {
        nights(self.start, self.end)
    }

    pub fn quote(&self, rent: Decimal) -> Quote {
        Quote {
            start: self.start,
            end: self.end,
            nights: self.nights(),
            rent,
            amount: total_amount(rent, self.start, self.end),
        }
    }
}

/// A priced selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub nights: u32,
    pub rent: Decimal,
    pub amount: Decimal,
}
