//! Day, month and year wheels kept consistent with each other.

use crate::views::{LinePainter, TextCell, TextCellFactory};
use std::rc::Rc;
use wheel_core::RuntimeHandle;
use wheel_foundation::{ArrayItems, NumericFormat, NumericItems, TextWheelAdapter, WheelError};
use wheel_ui::{MeasureSpec, WheelSpec, WheelView};

pub const FIRST_YEAR: i64 = 1970;
pub const LAST_YEAR: i64 = 2040;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

type DayAdapter = TextWheelAdapter<NumericItems, TextCellFactory>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Date {
    pub year: i64,
    /// Zero based.
    pub month: usize,
    /// One based.
    pub day: i64,
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i64, month: usize) -> i64 {
    match month {
        1 if is_leap_year(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

fn day_items(days: i64) -> Result<NumericItems, WheelError> {
    Ok(NumericItems::new(1, days)?.with_format(NumericFormat::ZeroPad(2)))
}

/// Rebinds the day wheel after the month or year moved, pulling the
/// selection back inside the shorter month.
fn sync_days(days: &WheelView<TextCell>, adapter: &DayAdapter, year: i64, month: usize) {
    let count = days_in_month(year, month);
    if adapter.source().max() == count {
        return;
    }
    match day_items(count) {
        Ok(items) => adapter.set_source(items),
        Err(err) => {
            log::warn!("keeping {} days: {err}", adapter.source().max());
            return;
        }
    }
    let last = (count - 1) as i32;
    if days.current_item() > last {
        days.set_current_item(last, true);
    }
    log::debug!("{} has {count} days in {year}", MONTHS[month]);
}

pub struct DatePicker {
    pub days: WheelView<TextCell>,
    pub months: WheelView<TextCell>,
    pub years: WheelView<TextCell>,
}

impl DatePicker {
    pub fn new(runtime: &RuntimeHandle, initial: Date) -> Result<Self, WheelError> {
        let spec = WheelSpec::new().with_visible_items(5)?;

        let day_adapter = Rc::new(TextWheelAdapter::new(
            day_items(days_in_month(initial.year, initial.month))?,
            TextCellFactory,
        ));
        let days = WheelView::new(runtime, spec.clone());
        days.set_adapter(Some(day_adapter.clone()));

        let months = WheelView::new(runtime, spec.clone().cyclic(true));
        months.set_adapter(Some(Rc::new(TextWheelAdapter::new(
            ArrayItems::new(MONTHS),
            TextCellFactory,
        ))));

        let years = WheelView::new(runtime, spec);
        years.set_adapter(Some(Rc::new(TextWheelAdapter::new(
            NumericItems::new(FIRST_YEAR, LAST_YEAR)?,
            TextCellFactory,
        ))));

        years.set_current_item((initial.year - FIRST_YEAR) as i32, false);
        months.set_current_item(initial.month as i32, false);
        days.set_current_item((initial.day - 1) as i32, false);

        {
            let days = days.clone();
            let adapter = Rc::clone(&day_adapter);
            let years = years.clone();
            months.add_changing_listener(move |_, _, month| {
                let year = FIRST_YEAR + i64::from(years.current_item());
                sync_days(&days, &adapter, year, month as usize);
            });
        }
        {
            let days = days.clone();
            let adapter = Rc::clone(&day_adapter);
            let months = months.clone();
            years.add_changing_listener(move |_, _, year| {
                let month = months.current_item() as usize;
                sync_days(&days, &adapter, FIRST_YEAR + i64::from(year), month);
            });
        }
        for wheel in [&days, &months, &years] {
            wheel.add_clicking_listener(|wheel, index| wheel.set_current_item(index, true));
        }

        Ok(Self {
            days,
            months,
            years,
        })
    }

    pub fn wheels(&self) -> [&WheelView<TextCell>; 3] {
        [&self.days, &self.months, &self.years]
    }

    pub fn measure_and_layout(&self) {
        for wheel in self.wheels() {
            let size = wheel.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
            wheel.layout(size.width, size.height);
        }
    }

    pub fn date(&self) -> Date {
        Date {
            year: FIRST_YEAR + i64::from(self.years.current_item()),
            month: self.months.current_item() as usize,
            day: i64::from(self.days.current_item()) + 1,
        }
    }

    /// One text row per wheel.
    pub fn render(&self) -> [String; 3] {
        self.wheels().map(|wheel| {
            let mut painter = LinePainter::new();
            wheel.draw(&mut painter);
            painter.render()
        })
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let month = MONTHS.get(self.month).copied().unwrap_or("???");
        write!(f, "{:02} {month} {}", self.day, self.year)
    }
}
