//! Month view of an exam study plan.

use chrono::{Datelike, Months, NaiveDate};
use rand::Rng;
use serde::Serialize;

use crate::collab::{ExamSchedule, ExamTask};

/// Dot colours handed out to subjects.
pub const SUBJECT_PALETTE: [&str; 12] = [
    "bg-red-500",
    "bg-blue-500",
    "bg-green-500",
    "bg-yellow-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-indigo-500",
    "bg-orange-500",
    "bg-teal-500",
    "bg-cyan-500",
    "bg-rose-500",
    "bg-violet-500",
];

/// Colour for subjects beyond the palette and for unknown subjects.
pub const FALLBACK_COLOR: &str = "bg-gray-500";

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October",
    "November", "December",
];

/// Schedule key for a day: `YYYY-MM-DD`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// One day cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_past: bool,
    pub tasks: Vec<ExamTask>,
}

/// Navigable month grid with per-subject colours.
#[derive(Debug, Clone)]
pub struct ExamCalendar {
    /// First day of the displayed month.
    month: NaiveDate,
    selected: Option<NaiveDate>,
    /// Subject colours in assignment order.
    colors: Vec<(String, &'static str)>,
}

impl ExamCalendar {
    /// A calendar showing the month containing `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: today.with_day(1).unwrap_or(today),
            selected: None,
            colors: Vec::new(),
        }
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    /// Header text, e.g. `May 2024`.
    pub fn title(&self) -> String {
        let name = MONTH_NAMES[self.month.month0() as usize];
        format!("{} {}", name, self.month.year())
    }

    /// Step the displayed month forwards or backwards.
    pub fn change_month(&mut self, increment: i32) {
        let step = Months::new(increment.unsigned_abs());
        let next = if increment >= 0 {
            self.month.checked_add_months(step)
        } else {
            self.month.checked_sub_months(step)
        };
        if let Some(next) = next {
            self.month = next;
        }
    }

    /// Select a day of the displayed month. Out-of-range days are ignored.
    pub fn select_day(&mut self, day: u32) -> Option<NaiveDate> {
        let date = self.month.with_day(day)?;
        self.selected = Some(date);
        self.selected
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.month).num_days() as u32,
            None => 31,
        }
    }

    /// Empty cells before day 1, with weeks starting on Sunday.
    pub fn leading_blanks(&self) -> u32 {
        self.month.weekday().num_days_from_sunday()
    }

    pub fn tasks_for_day<'a>(&self, schedule: &'a ExamSchedule, day: u32) -> &'a [ExamTask] {
        self.month
            .with_day(day)
            .and_then(|date| schedule.schedule.get(&date_key(date)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Give every subject of `schedule` a colour not used by another subject.
    ///
    /// Subjects keep colours across calls. Once the palette runs out the rest
    /// get [`FALLBACK_COLOR`].
    pub fn assign_colors<R: Rng + ?Sized>(&mut self, schedule: &ExamSchedule, rng: &mut R) {
        for entry in &schedule.subjects {
            if self.colors.iter().any(|(subject, _)| *subject == entry.subject) {
                continue;
            }
            let free: Vec<&'static str> = SUBJECT_PALETTE
                .iter()
                .copied()
                .filter(|c| !self.colors.iter().any(|(_, used)| used == c))
                .collect();
            let color = if free.is_empty() {
                FALLBACK_COLOR
            } else {
                free[rng.random_range(0..free.len())]
            };
            self.colors.push((entry.subject.clone(), color));
        }
    }

    pub fn color_for(&self, subject: &str) -> &'static str {
        self.colors
            .iter()
            .find(|(s, _)| s == subject)
            .map(|(_, c)| *c)
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Subject/colour pairs for the legend.
    pub fn legend(&self) -> &[(String, &'static str)] {
        &self.colors
    }

    /// Day cells of the displayed month.
    pub fn month_cells(&self, schedule: Option<&ExamSchedule>, today: NaiveDate) -> Vec<DayCell> {
        (1..=self.days_in_month())
            .filter_map(|day| {
                let date = self.month.with_day(day)?;
                Some(DayCell {
                    day,
                    date,
                    is_today: date == today,
                    is_selected: self.selected == Some(date),
                    is_past: date < today,
                    tasks: schedule
                        .map(|s| self.tasks_for_day(s, day).to_vec())
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}
