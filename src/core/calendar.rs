//! Monthly calendar grid and its `(month, year)` cursor.

use crate::models::{DayMap, DayRecord, DayStatus, DayType};
use crate::utils::colors::{tone_color, RESET};
use crate::utils::date::{days_between, month_bounds, month_name, today};
use chrono::{Datelike, NaiveDate};

/// Month cursor. `month` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub month: u32,
    pub year: i32,
}

impl CalendarCursor {
    /// Build a cursor; months outside 0..=11 are rejected.
    pub fn new(month: u32, year: i32) -> Option<Self> {
        (month < 12).then_some(Self { month, year })
    }

    pub fn from_date(d: NaiveDate) -> Self {
        Self {
            month: d.month0(),
            year: d.year(),
        }
    }

    pub fn current() -> Self {
        Self::from_date(today())
    }

    /// Stays put when the year would overflow.
    pub fn next(self) -> Self {
        if self.month == 11 {
            match self.year.checked_add(1) {
                Some(year) => Self { month: 0, year },
                None => self,
            }
        } else {
            Self {
                month: self.month + 1,
                ..self
            }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 0 {
            match self.year.checked_sub(1) {
                Some(year) => Self { month: 11, year },
                None => self,
            }
        } else {
            Self {
                month: self.month - 1,
                ..self
            }
        }
    }

    /// Move by `steps` months, negative going back.
    pub fn shift(self, steps: i32) -> Self {
        let mut c = self;
        for _ in 0..steps.unsigned_abs() {
            c = if steps > 0 { c.next() } else { c.previous() };
        }
        c
    }

    /// First and last date of the month under the cursor.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        month_bounds(self.year, self.month + 1)
    }

    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month + 1), self.year)
    }
}

/// Visual class of a day. Absence types win over the punch status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTone {
    Holiday,
    Leave,
    Sick,
    Complete,
    Partial,
    Absent,
}

pub fn cell_tone(record: &DayRecord) -> CellTone {
    match record.day_type {
        DayType::Holiday => CellTone::Holiday,
        DayType::Leave => CellTone::Leave,
        DayType::Sick => CellTone::Sick,
        DayType::Normal | DayType::Remote => match record.status() {
            DayStatus::Complete => CellTone::Complete,
            DayStatus::Partial => CellTone::Partial,
            DayStatus::Absent => CellTone::Absent,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub day_type: DayType,
    pub duration_minutes: i64,
    pub tone: CellTone,
}

#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub cursor: CalendarCursor,
    /// Monday-first weeks; `None` pads days outside the month.
    pub weeks: Vec<[Option<CalendarCell>; 7]>,
}

pub fn build_month(cursor: CalendarCursor, days: &DayMap) -> MonthGrid {
    let mut weeks: Vec<[Option<CalendarCell>; 7]> = Vec::new();

    let Some((first, last)) = cursor.bounds() else {
        return MonthGrid { cursor, weeks };
    };

    let mut week: [Option<CalendarCell>; 7] = Default::default();
    for d in days_between(first, last) {
        let col = d.weekday().num_days_from_monday() as usize;
        let placeholder = DayRecord::placeholder();
        let record = days.get(&d).unwrap_or(&placeholder);

        week[col] = Some(CalendarCell {
            date: d,
            status: record.status(),
            day_type: record.day_type,
            duration_minutes: record.duration_minutes(),
            tone: cell_tone(record),
        });

        if col == 6 {
            weeks.push(std::mem::take(&mut week));
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }

    MonthGrid { cursor, weeks }
}

impl MonthGrid {
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flat_map(|w| w.iter().flatten())
    }

    /// Terminal rendering: day numbers tinted by tone, with a legend.
    pub fn render(&self, color: bool) -> String {
        let mut out = format!("{:^34}\n", self.cursor.title());
        out.push_str(" Mon  Tue  Wed  Thu  Fri  Sat  Sun\n");

        for week in &self.weeks {
            for cell in week {
                match cell {
                    Some(c) => {
                        let mark = tone_mark(c.tone);
                        let text = format!("{:>3}{}", c.date.day(), mark);
                        if color {
                            out.push_str(&format!(" {}{}{}", tone_color(c.tone), text, RESET));
                        } else {
                            out.push_str(&format!(" {}", text));
                        }
                    }
                    None => out.push_str("     "),
                }
            }
            out.push('\n');
        }

        out.push_str("\n* complet  ~ partiel  H holiday  L leave  S sick\n");
        out
    }
}

fn tone_mark(tone: CellTone) -> char {
    match tone {
        CellTone::Complete => '*',
        CellTone::Partial => '~',
        CellTone::Holiday => 'H',
        CellTone::Leave => 'L',
        CellTone::Sick => 'S',
        CellTone::Absent => ' ',
    }
}
