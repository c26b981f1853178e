//! Daily reminder to log steps.
//!
//! The service is a small state machine driven by a periodic tick: it fires
//! at most once per calendar day, on the first check at or after the
//! configured minute. Firing produces a [`Reminder`] for the caller to
//! deliver; it never touches submission data.

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How often the background task checks the clock
pub const CHECK_INTERVAL: Duration = Duration::from_secs(60);

pub const DEFAULT_REMINDER_TITLE: &str = "10K Steps Challenge Reminder";
pub const DEFAULT_REMINDER_BODY: &str = "Don't forget to log your steps for today!";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderSchedule {
    pub enabled: bool,
    /// Local hour, 0-23
    pub hour: u32,
    pub minute: u32,
    pub title: String,
    pub body: String,
}

impl Default for ReminderSchedule {
    fn default() -> Self {
        Self {
            enabled: true,
            hour: 20,
            minute: 0,
            title: DEFAULT_REMINDER_TITLE.to_string(),
            body: DEFAULT_REMINDER_BODY.to_string(),
        }
    }
}

impl ReminderSchedule {
    pub fn validate(&self) -> Result<()> {
        self.fire_time().map(|_| ())
    }

    fn fire_time(&self) -> Result<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
            .ok_or_else(|| anyhow!("Invalid reminder time {:02}:{:02}", self.hour, self.minute))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub title: String,
    pub body: String,
}

pub struct ReminderService {
    schedule: ReminderSchedule,
    fire_time: NaiveTime,
    last_fired: Option<NaiveDate>,
}

impl ReminderService {
    pub fn new(schedule: ReminderSchedule) -> Result<Self> {
        let fire_time = schedule.fire_time()?;
        Ok(Self {
            schedule,
            fire_time,
            last_fired: None,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.schedule.enabled
    }

    /// Check the clock; returns the reminder if it is due now.
    pub fn check_and_fire(&mut self, now: NaiveDateTime) -> Option<Reminder> {
        if !self.schedule.enabled {
            return None;
        }

        // The most recent reminder time at or before `now`; the late window
        // may run past midnight into the next day
        let today = now.date();
        let day = if now >= today.and_time(self.fire_time) {
            today
        } else {
            today.pred_opt()?
        };
        if self.last_fired == Some(day) {
            return None;
        }

        // A late start should not fire a stale reminder hours afterwards
        let late_limit = chrono::Duration::seconds(2 * CHECK_INTERVAL.as_secs() as i64);
        if now - day.and_time(self.fire_time) >= late_limit {
            debug!("Skipping reminder for {}: started after the reminder time", day);
            self.last_fired = Some(day);
            return None;
        }

        self.last_fired = Some(day);

        Some(Reminder {
            title: self.schedule.title.clone(),
            body: self.schedule.body.clone(),
        })
    }
}
