//! Calendar model behind [`super::date_picker::DatePicker`].
//!
//! Values travel as ISO `YYYY-MM-DD` strings; the empty string means "no
//! date". The visible page is tracked separately from the committed value
//! so browsing months never changes what the form holds.

use chrono::{Datelike, Days, Months, NaiveDate};

pub const GRID_CELLS: usize = 42;
pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

const ISO_FORMAT: &str = "%Y-%m-%d";

pub fn parse_iso(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO_FORMAT).ok()
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Inclusive `[min, max]` window; either side may be open.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateBounds {
    /// Unparseable bounds are treated as absent.
    pub fn from_iso(min: Option<&str>, max: Option<&str>) -> Self {
        Self {
            min: min.and_then(parse_iso),
            max: max.and_then(parse_iso),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.is_none_or(|min| date >= min) && self.max.is_none_or(|max| date <= max)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub disabled: bool,
    pub today: bool,
    pub selected: bool,
}

/// One visible month laid out as six Sunday-first weeks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarPage {
    pub month: NaiveDate,
    pub cells: Vec<CalendarCell>,
}

impl CalendarPage {
    pub fn build(
        month: NaiveDate,
        selected: Option<NaiveDate>,
        today: NaiveDate,
        bounds: DateBounds,
    ) -> Self {
        let month = first_of_month(month);
        let lead = u64::from(month.weekday().num_days_from_sunday());
        let start = month.checked_sub_days(Days::new(lead)).unwrap_or(month);

        let cells = start
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| CalendarCell {
                date,
                in_month: date.month() == month.month() && date.year() == month.year(),
                disabled: !bounds.contains(date),
                today: date == today,
                selected: selected == Some(date),
            })
            .collect();
        Self { month, cells }
    }

    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatePickerModel {
    pub value: Option<NaiveDate>,
    pub visible_month: NaiveDate,
    pub opened: bool,
    pub bounds: DateBounds,
}

impl DatePickerModel {
    /// The visible page starts on the committed value's month, or on
    /// `today`'s month when nothing is committed.
    pub fn new(value: &str, bounds: DateBounds, today: NaiveDate) -> Self {
        let value = parse_iso(value);
        Self {
            value,
            visible_month: first_of_month(value.unwrap_or(today)),
            opened: false,
            bounds,
        }
    }

    pub fn value_iso(&self) -> String {
        self.value.map(format_iso).unwrap_or_default()
    }

    pub fn page(&self, today: NaiveDate) -> CalendarPage {
        CalendarPage::build(self.visible_month, self.value, today, self.bounds)
    }

    pub fn toggle(&mut self) {
        self.opened = !self.opened;
    }

    /// Closes without committing anything.
    pub fn dismiss(&mut self) {
        self.opened = false;
    }

    pub fn previous_month(&mut self) {
        if let Some(month) = self.visible_month.checked_sub_months(Months::new(1)) {
            self.visible_month = month;
        }
    }

    pub fn next_month(&mut self) {
        if let Some(month) = self.visible_month.checked_add_months(Months::new(1)) {
            self.visible_month = month;
        }
    }

    /// Commits `date` and closes. Dates outside the bounds are ignored and
    /// leave the popup open.
    pub fn select(&mut self, date: NaiveDate) -> Option<String> {
        if !self.bounds.contains(date) {
            return None;
        }
        self.value = Some(date);
        self.opened = false;
        Some(format_iso(date))
    }

    /// Jumps to `today`'s month and commits it. When today falls outside
    /// the bounds only the jump happens.
    pub fn select_today(&mut self, today: NaiveDate) -> Option<String> {
        self.visible_month = first_of_month(today);
        self.select(today)
    }

    /// Commits the empty string and closes.
    pub fn clear(&mut self) -> String {
        self.value = None;
        self.opened = false;
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        parse_iso(raw).expect("valid test date")
    }

    fn january_window() -> DatePickerModel {
        let mut model = DatePickerModel::new(
            "",
            DateBounds::from_iso(Some("2024-01-10"), Some("2024-01-20")),
            date("2024-01-05"),
        );
        model.opened = true;
        model
    }

    #[test]
    fn every_page_has_six_full_weeks() {
        for raw in ["2024-02-01", "2026-02-01", "2024-09-01", "2025-06-15"] {
            let page = CalendarPage::build(date(raw), None, date("2024-01-01"), DateBounds::default());
            assert_eq!(page.cells.len(), GRID_CELLS);
            assert_eq!(page.weeks().count(), 6);
            assert_eq!(page.cells[0].date.weekday().num_days_from_sunday(), 0);
        }
    }

    #[test]
    fn page_includes_overflow_from_neighbouring_months() {
        // 2024-03-01 is a Friday.
        let page = CalendarPage::build(date("2024-03-10"), None, date("2024-03-10"), DateBounds::default());
        assert_eq!(page.cells[0].date, date("2024-02-25"));
        assert!(!page.cells[0].in_month);
        assert_eq!(page.cells[5].date, date("2024-03-01"));
        assert!(page.cells[5].in_month);
        assert!(!page.cells[GRID_CELLS - 1].in_month);
        assert_eq!(page.cells.iter().filter(|cell| cell.today).count(), 1);
        assert_eq!(page.title(), "March 2024");
    }

    #[test]
    fn out_of_range_days_are_no_ops() {
        let mut model = january_window();
        assert_eq!(model.select(date("2024-01-09")), None);
        assert_eq!(model.select(date("2024-01-21")), None);
        assert_eq!(model.value_iso(), "");
        assert!(model.opened);

        assert_eq!(model.select(date("2024-01-15")).as_deref(), Some("2024-01-15"));
        assert_eq!(model.value_iso(), "2024-01-15");
        assert!(!model.opened);
    }

    #[test]
    fn bounds_mark_cells_disabled() {
        let model = january_window();
        let page = model.page(date("2024-01-05"));
        let cell = |raw: &str| {
            *page
                .cells
                .iter()
                .find(|cell| cell.date == date(raw))
                .expect("cell on page")
        };
        assert!(cell("2024-01-09").disabled);
        assert!(!cell("2024-01-10").disabled);
        assert!(!cell("2024-01-20").disabled);
        assert!(cell("2024-01-21").disabled);
    }

    #[test]
    fn browsing_months_keeps_the_committed_value() {
        let mut model = DatePickerModel::new("2024-01-31", DateBounds::default(), date("2024-06-01"));
        assert_eq!(model.visible_month, date("2024-01-01"));
        model.next_month();
        model.next_month();
        assert_eq!(model.visible_month, date("2024-03-01"));
        model.previous_month();
        assert_eq!(model.visible_month, date("2024-02-01"));
        assert_eq!(model.value_iso(), "2024-01-31");
    }

    #[test]
    fn today_jumps_and_commits() {
        let mut model = DatePickerModel::new("2023-05-02", DateBounds::default(), date("2024-08-14"));
        model.opened = true;
        assert_eq!(model.select_today(date("2024-08-14")).as_deref(), Some("2024-08-14"));
        assert_eq!(model.visible_month, date("2024-08-01"));
        assert!(!model.opened);
    }

    #[test]
    fn today_outside_bounds_only_jumps() {
        let mut model = january_window();
        assert_eq!(model.select_today(date("2024-02-03")), None);
        assert_eq!(model.visible_month, date("2024-02-01"));
        assert_eq!(model.value, None);
    }

    #[test]
    fn clear_and_dismiss() {
        let mut model = DatePickerModel::new("2024-01-15", DateBounds::default(), date("2024-01-01"));
        model.toggle();
        model.dismiss();
        assert_eq!(model.value_iso(), "2024-01-15");
        model.toggle();
        assert_eq!(model.clear(), "");
        assert_eq!(model.value, None);
        assert!(!model.opened);
    }

    #[test]
    fn malformed_values_are_treated_as_empty() {
        let model = DatePickerModel::new("15/01/2024", DateBounds::from_iso(Some("nope"), None), date("2024-01-01"));
        assert_eq!(model.value, None);
        assert_eq!(model.bounds, DateBounds::default());
    }
}
