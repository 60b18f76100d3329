//! Appointment availability: hourly slot generation against recurring
//! weekly schedules

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::schedule::{
        AvailabilityResponse, OptometristRef, OptometristWeek, ScheduleWindowDetails,
        WeekdayBranch, WeekdayEntry, WeekdayWindow, WeeklyScheduleResponse,
    },
    repository::Repository,
};

const SLOT_MINUTES: i64 = 60;

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
}

impl AvailabilityService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Open slots for one date. One optometrist serves all slots that day
    /// (single-rotation scheduling); the window with the lowest id wins.
    pub async fn slots_for_date(&self, date_str: &str) -> AppResult<AvailabilityResponse> {
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
            AppError::field_validation("date", "Invalid date (use YYYY-MM-DD)")
        })?;
        if date < Utc::now().date_naive() {
            return Err(AppError::field_validation(
                "date",
                "Date must be today or later",
            ));
        }

        let day_of_week = date.weekday().number_from_monday() as i16;
        let window = match self.repository.schedules.first_active_window(day_of_week).await? {
            Some(window) => window,
            None => {
                return Ok(AvailabilityResponse {
                    date: date.format("%Y-%m-%d").to_string(),
                    available: false,
                    message: Some("No optometrists available on this date".to_string()),
                    branch: None,
                    branch_id: None,
                    optometrist: None,
                    optometrist_id: None,
                    available_times: None,
                });
            }
        };

        let booked = self
            .repository
            .schedules
            .booked_starts(date, window.optometrist_id)
            .await?;
        let booked: HashSet<NaiveTime> = booked.into_iter().collect();
        let slots = generate_time_slots(window.start_time, window.end_time, &booked);

        Ok(AvailabilityResponse {
            date: date.format("%Y-%m-%d").to_string(),
            available: true,
            message: None,
            branch: Some(window.branch_name),
            branch_id: Some(window.branch_id),
            optometrist: Some(window.optometrist_name),
            optometrist_id: Some(window.optometrist_id),
            available_times: Some(slots),
        })
    }

    /// Weekly projection: every optometrist with at least one active
    /// window, with a Monday-to-Sunday row each
    pub async fn weekly_schedule(&self) -> AppResult<WeeklyScheduleResponse> {
        let windows = self.repository.schedules.list_active_windows().await?;
        Ok(WeeklyScheduleResponse {
            weekly_schedule: project_week(windows),
        })
    }
}

/// Walk the window in fixed steps, skipping starts already taken.
/// Slots are emitted in 12-hour display form ("9:00 AM").
pub fn generate_time_slots(
    start: NaiveTime,
    end: NaiveTime,
    booked: &HashSet<NaiveTime>,
) -> Vec<String> {
    let mut slots = Vec::new();
    let mut current = start;
    while current < end {
        if !booked.contains(&current) {
            slots.push(format_slot(current));
        }
        // overflowing_add_signed wraps at midnight; stop rather than loop
        let (next, wrapped) = current.overflowing_add_signed(Duration::minutes(SLOT_MINUTES));
        if wrapped > 0 {
            break;
        }
        current = next;
    }
    slots
}

/// 12-hour display form without a leading zero on the hour
pub fn format_slot(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Group active windows by optometrist and fill the seven weekday cells.
/// Input is ordered by optometrist; the first window per weekday wins.
pub fn project_week(windows: Vec<ScheduleWindowDetails>) -> Vec<OptometristWeek> {
    let mut weeks: Vec<OptometristWeek> = Vec::new();
    for window in windows {
        let idx = weeks
            .iter()
            .position(|w| w.optometrist.id == window.optometrist_id)
            .unwrap_or_else(|| {
                weeks.push(OptometristWeek {
                    optometrist: OptometristRef {
                        id: window.optometrist_id,
                        name: window.optometrist_name.clone(),
                    },
                    schedule: (1..=7)
                        .map(|day_number| WeekdayEntry {
                            day: WEEKDAYS[day_number as usize - 1].to_string(),
                            day_number,
                            available: false,
                            branch: None,
                            window: None,
                        })
                        .collect(),
                });
                weeks.len() - 1
            });

        let entry = &mut weeks[idx].schedule[window.day_of_week as usize - 1];
        if entry.available {
            continue;
        }
        entry.available = true;
        entry.branch = Some(WeekdayBranch {
            id: window.branch_id,
            name: window.branch_name,
            code: window.branch_code,
        });
        entry.window = Some(WeekdayWindow {
            start_time: format_slot(window.start_time),
            end_time: format_slot(window.end_time),
        });
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn generates_hourly_slots_in_display_form() {
        let slots = generate_time_slots(t(9, 0), t(12, 0), &HashSet::new());
        assert_eq!(slots, vec!["9:00 AM", "10:00 AM", "11:00 AM"]);
    }

    #[test]
    fn skips_booked_starts() {
        let booked: HashSet<NaiveTime> = [t(10, 0)].into_iter().collect();
        let slots = generate_time_slots(t(9, 0), t(12, 0), &booked);
        assert_eq!(slots, vec!["9:00 AM", "11:00 AM"]);
    }

    #[test]
    fn afternoon_slots_use_pm() {
        let slots = generate_time_slots(t(13, 0), t(15, 0), &HashSet::new());
        assert_eq!(slots, vec!["1:00 PM", "2:00 PM"]);
    }

    #[test]
    fn empty_window_yields_no_slots() {
        let slots = generate_time_slots(t(9, 0), t(9, 0), &HashSet::new());
        assert!(slots.is_empty());
    }

    #[test]
    fn window_ending_at_midnight_terminates() {
        let slots = generate_time_slots(t(22, 0), t(23, 59), &HashSet::new());
        assert_eq!(slots, vec!["10:00 PM", "11:00 PM"]);
    }

    #[test]
    fn fully_booked_window_yields_empty_list() {
        let booked: HashSet<NaiveTime> = [t(9, 0), t(10, 0)].into_iter().collect();
        let slots = generate_time_slots(t(9, 0), t(11, 0), &booked);
        assert!(slots.is_empty());
    }

    fn window(opt_id: i32, name: &str, day: i16) -> ScheduleWindowDetails {
        ScheduleWindowDetails {
            id: opt_id * 10 + day as i32,
            optometrist_id: opt_id,
            optometrist_name: name.to_string(),
            branch_id: 1,
            branch_name: "Main".to_string(),
            branch_code: "BR1".to_string(),
            day_of_week: day,
            start_time: t(9, 0),
            end_time: t(17, 0),
        }
    }

    #[test]
    fn week_projection_always_has_seven_days() {
        let weeks = project_week(vec![window(1, "Dr. Cruz", 1), window(1, "Dr. Cruz", 3)]);
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].schedule.len(), 7);
        assert!(weeks[0].schedule[0].available);
        assert!(!weeks[0].schedule[1].available);
        assert!(weeks[0].schedule[2].available);
        assert_eq!(weeks[0].schedule[6].day, "Sunday");
        assert_eq!(weeks[0].schedule[6].day_number, 7);
    }

    #[test]
    fn week_projection_groups_by_optometrist() {
        let weeks = project_week(vec![
            window(1, "Dr. Cruz", 1),
            window(2, "Dr. Reyes", 2),
            window(1, "Dr. Cruz", 5),
        ]);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].optometrist.name, "Dr. Cruz");
        assert!(weeks[0].schedule[4].available);
        assert!(weeks[1].schedule[1].available);
    }

    #[test]
    fn week_projection_first_window_per_day_wins() {
        let mut second = window(1, "Dr. Cruz", 1);
        second.id = 99;
        second.branch_name = "Annex".to_string();
        let weeks = project_week(vec![window(1, "Dr. Cruz", 1), second]);
        assert_eq!(weeks[0].schedule[0].branch.as_ref().unwrap().name, "Main");
    }
}
