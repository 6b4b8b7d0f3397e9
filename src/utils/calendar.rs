//! Year-grid layout for the photo heatmap.
//!
//! The grid has one row per weekday (Sunday first) and one column per week.
//! January 1st sits in column 0; days before it in that column are padding.

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::constants::MONTHS;
use crate::models::{HeatmapCell, HeatmapResponse, MonthLabel, PhotoEntry};
use crate::utils::datetime::{format_date, parse_date};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Which photos exist for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub front: bool,
    pub back: bool,
}

impl DaySummary {
    pub fn from_entry(entry: &PhotoEntry) -> Option<Self> {
        Some(Self {
            date: parse_date(&entry.date)?,
            front: entry.front_photo_url.is_some(),
            back: entry.back_photo_url.is_some(),
        })
    }

    pub fn photo_count(&self) -> u8 {
        u8::from(self.front) + u8::from(self.back)
    }
}

pub fn is_supported_year(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

fn weekday_row(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

pub fn year_grid(year: i32) -> Vec<Vec<Option<NaiveDate>>> {
    let mut grid: Vec<Vec<Option<NaiveDate>>> = vec![Vec::new(); 7];
    let Some(start) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return grid;
    };

    for row in grid.iter_mut().take(weekday_row(start)) {
        row.push(None);
    }

    for date in start.iter_days().take_while(|d| d.year() == year) {
        grid[weekday_row(date)].push(Some(date));
    }

    let weeks = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(weeks, None);
    }

    grid
}

pub fn month_labels(year: i32) -> Vec<MonthLabel> {
    let Some(start) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    let lead = weekday_row(start);

    (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .zip(MONTHS)
        .map(|(first, name)| MonthLabel {
            month: name.to_string(),
            week_index: (first.ordinal0() as usize + lead) / 7,
        })
        .collect()
}

/// Current year, optionally the previous one, plus every year with data. Newest first.
pub fn available_years<I>(dates: I, current_year: i32, include_previous: bool) -> Vec<i32>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut years: BTreeSet<i32> = dates.into_iter().map(|d| d.year()).collect();
    years.insert(current_year);
    if include_previous {
        years.insert(current_year - 1);
    }
    years.into_iter().rev().collect()
}

pub fn day_label(date: NaiveDate, summary: Option<&DaySummary>) -> String {
    let date_str = format_date(date);
    let Some(summary) = summary.filter(|s| s.photo_count() > 0) else {
        return format!("{} - No photos", date_str);
    };

    let count = summary.photo_count();
    let mut parts = Vec::new();
    if summary.front {
        parts.push("Front");
    }
    if summary.back {
        parts.push("Back");
    }

    format!(
        "{}: {} photo{} ({})",
        date_str,
        count,
        if count == 1 { "" } else { "s" },
        parts.join(", ")
    )
}

/// Lay out `days` for `year` (default: newest available year).
/// Callers must check the requested year with [`is_supported_year`].
pub fn build_heatmap(
    year: Option<i32>,
    days: &[DaySummary],
    today: NaiveDate,
    include_previous_year: bool,
) -> HeatmapResponse {
    let years = available_years(days.iter().map(|d| d.date), today.year(), include_previous_year);
    let year = year.unwrap_or(years[0]);

    let by_date: HashMap<NaiveDate, &DaySummary> = days.iter().map(|d| (d.date, d)).collect();
    let total_days = days
        .iter()
        .filter(|d| d.photo_count() > 0)
        .map(|d| d.date)
        .collect::<HashSet<_>>()
        .len();

    let rows: Vec<Vec<Option<HeatmapCell>>> = year_grid(year)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| {
                    cell.map(|date| {
                        let summary = by_date.get(&date).copied();
                        HeatmapCell {
                            date: format_date(date),
                            photo_count: summary.map(DaySummary::photo_count).unwrap_or(0),
                            is_future: date > today,
                            is_today: date == today,
                            label: day_label(date, summary),
                        }
                    })
                })
                .collect()
        })
        .collect();

    HeatmapResponse {
        year,
        years,
        total_days,
        weeks: rows.first().map(Vec::len).unwrap_or(0),
        months: month_labels(year),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_grid_places_jan_first_in_first_column() {
        // 2024-01-01 is a Monday
        let grid = year_grid(2024);

        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0][0], None);
        assert_eq!(grid[1][0], Some(date(2024, 1, 1)));
        assert_eq!(grid[0][1], Some(date(2024, 1, 7)));
    }

    #[test]
    fn test_year_grid_rows_are_equal_width() {
        for year in [2000, 2023, 2024, 2025] {
            let grid = year_grid(year);
            let width = grid[0].len();
            assert!(grid.iter().all(|row| row.len() == width), "year {}", year);
        }
    }

    #[test]
    fn test_year_grid_week_counts() {
        // Sunday start, common year
        assert_eq!(year_grid(2023)[0].len(), 53);
        // Saturday start, leap year spills into a 54th column
        assert_eq!(year_grid(2000)[0].len(), 54);
    }

    #[test]
    fn test_year_grid_contains_every_day_once() {
        let grid = year_grid(2024);
        let days: Vec<NaiveDate> = grid.iter().flatten().flatten().copied().collect();

        assert_eq!(days.len(), 366);
        assert_eq!(days.iter().collect::<HashSet<_>>().len(), 366);
        assert!(days.iter().all(|d| d.year() == 2024));
    }

    #[test]
    fn test_year_grid_cell_matches_day_of_year() {
        let grid = year_grid(2025);
        let lead = weekday_row(date(2025, 1, 1));

        for (row_idx, row) in grid.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                if let Some(d) = cell {
                    assert_eq!(weekday_row(*d), row_idx);
                    assert_eq!((d.ordinal0() as usize + lead) / 7, col);
                }
            }
        }
    }

    #[test]
    fn test_month_labels() {
        let labels = month_labels(2024);

        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], MonthLabel { month: "Jan".into(), week_index: 0 });
        // Feb 1 2024: ordinal0 31, lead 1 -> week 4
        assert_eq!(labels[1].week_index, 4);
        assert_eq!(labels[11].month, "Dec");
        assert!(labels.windows(2).all(|w| w[0].week_index <= w[1].week_index));
    }

    #[test]
    fn test_available_years_includes_current_and_previous() {
        let years = available_years(vec![date(2019, 5, 1), date(2024, 2, 2)], 2024, true);
        assert_eq!(years, vec![2024, 2023, 2019]);

        let years = available_years(Vec::new(), 2024, false);
        assert_eq!(years, vec![2024]);
    }

    #[test]
    fn test_day_label() {
        let both = DaySummary { date: date(2024, 3, 1), front: true, back: true };
        let back = DaySummary { date: date(2024, 3, 2), front: false, back: true };

        assert_eq!(day_label(both.date, Some(&both)), "2024-03-01: 2 photos (Front, Back)");
        assert_eq!(day_label(back.date, Some(&back)), "2024-03-02: 1 photo (Back)");
        assert_eq!(day_label(date(2024, 3, 3), None), "2024-03-03 - No photos");
    }

    #[test]
    fn test_build_heatmap_marks_counts_today_and_future() {
        let days = vec![
            DaySummary { date: date(2024, 1, 1), front: true, back: true },
            DaySummary { date: date(2024, 1, 2), front: true, back: false },
            DaySummary { date: date(2022, 6, 1), front: false, back: true },
        ];
        let today = date(2024, 1, 2);

        let heatmap = build_heatmap(None, &days, today, true);

        assert_eq!(heatmap.year, 2024);
        assert_eq!(heatmap.years, vec![2024, 2023, 2022]);
        assert_eq!(heatmap.total_days, 3);
        assert_eq!(heatmap.weeks, 53);

        let jan1 = heatmap.rows[1][0].as_ref().unwrap();
        assert_eq!(jan1.date, "2024-01-01");
        assert_eq!(jan1.photo_count, 2);
        assert!(!jan1.is_future && !jan1.is_today);

        let jan2 = heatmap.rows[2][0].as_ref().unwrap();
        assert_eq!(jan2.photo_count, 1);
        assert!(jan2.is_today);

        let jan3 = heatmap.rows[3][0].as_ref().unwrap();
        assert_eq!(jan3.photo_count, 0);
        assert!(jan3.is_future);
    }

    #[test]
    fn test_build_heatmap_explicit_year() {
        let days = vec![DaySummary { date: date(2022, 6, 1), front: true, back: false }];

        let heatmap = build_heatmap(Some(2022), &days, date(2024, 5, 5), false);

        assert_eq!(heatmap.year, 2022);
        assert_eq!(heatmap.years, vec![2024, 2022]);
        let cells: Vec<&HeatmapCell> = heatmap.rows.iter().flatten().flatten().collect();
        assert_eq!(cells.len(), 365);
        assert_eq!(cells.iter().filter(|c| c.photo_count > 0).count(), 1);
        assert!(cells.iter().all(|c| !c.is_future));
    }
}
