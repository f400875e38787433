//! Driving-hours trip schedule.
//!
//! Splits a trip into drive legs of at most 11 hours. A new leg starts every
//! 21.5 hours (11 h driving, a 30 min break, a 10 h off-duty period). Each
//! leg takes its short break 3 hours in; every leg but the last goes
//! off-duty 11.5 hours in.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum driving hours per leg.
pub const MAX_DRIVING_HOURS: f64 = 11.0;

/// Hours between the starts of two consecutive legs.
pub const LEG_CYCLE_HOURS: f64 = 21.5;

/// Hours into a leg at which the 30 minute break is taken.
pub const SHORT_BREAK_AFTER_HOURS: f64 = 3.0;

/// Hours into a leg at which the 10 hour off-duty period starts.
pub const OFF_DUTY_AFTER_HOURS: f64 = 11.5;

/// Longest schedule produced, in legs.
pub const MAX_LEGS: usize = 10_000;

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("average speed must be a positive number of km/h, got {0}")]
    InvalidSpeed(f64),
    #[error("distance must be a non-negative number of km, got {0}")]
    InvalidDistance(f64),
    #[error("trip needs {0} drive legs, more than the supported maximum")]
    TooManyLegs(f64),
    #[error("schedule runs past the representable date range")]
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveLeg {
    pub start: DateTime<Utc>,
    pub driving_hours: f64,
    /// Only when the leg drives longer than the short-break threshold.
    pub short_break_at: Option<DateTime<Utc>>,
    /// `None` on the last leg.
    pub off_duty_at: Option<DateTime<Utc>>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSchedule {
    pub legs: Vec<DriveLeg>,
    pub total_road_hours: f64,
    pub full_legs: usize,
    pub last_leg_hours: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TripSchedule {
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }
}

/// Plan drive legs for `distance_km` at `average_speed_kmh`, departing at `start`.
pub fn trip_schedule(
    start: DateTime<Utc>,
    distance_km: f64,
    average_speed_kmh: f64,
) -> Result<TripSchedule, ScheduleError> {
    if !average_speed_kmh.is_finite() || average_speed_kmh <= 0.0 {
        return Err(ScheduleError::InvalidSpeed(average_speed_kmh));
    }
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(ScheduleError::InvalidDistance(distance_km));
    }

    let total_road_hours = distance_km / average_speed_kmh;
    let legs_needed = (total_road_hours / MAX_DRIVING_HOURS).ceil();
    if legs_needed > MAX_LEGS as f64 {
        return Err(ScheduleError::TooManyLegs(legs_needed));
    }

    let leg_count = legs_needed as usize;
    let full_legs = (total_road_hours / MAX_DRIVING_HOURS).floor() as usize;
    let remainder = total_road_hours % MAX_DRIVING_HOURS;
    let last_leg_hours = if leg_count == 0 {
        0.0
    } else if remainder == 0.0 {
        MAX_DRIVING_HOURS
    } else {
        remainder
    };

    let legs = (0..leg_count)
        .map(|index| {
            let is_last = index + 1 == leg_count;
            let leg_start = offset(start, LEG_CYCLE_HOURS * index as f64)?;
            let driving_hours = if is_last { last_leg_hours } else { MAX_DRIVING_HOURS };
            let short_break_at = if driving_hours > SHORT_BREAK_AFTER_HOURS {
                Some(offset(leg_start, SHORT_BREAK_AFTER_HOURS)?)
            } else {
                None
            };
            let off_duty_at = if is_last {
                None
            } else {
                Some(offset(leg_start, OFF_DUTY_AFTER_HOURS)?)
            };
            Ok(DriveLeg {
                start: leg_start,
                driving_hours,
                short_break_at,
                off_duty_at,
                end: offset(leg_start, driving_hours)?,
            })
        })
        .collect::<Result<Vec<DriveLeg>, ScheduleError>>()?;

    let end = legs.last().map_or(start, |leg| leg.end);

    Ok(TripSchedule {
        legs,
        total_road_hours,
        full_legs,
        last_leg_hours,
        start,
        end,
    })
}

fn offset(from: DateTime<Utc>, value: f64) -> Result<DateTime<Utc>, ScheduleError> {
    from.checked_add_signed(hours(value)).ok_or(ScheduleError::OutOfRange)
}

fn hours(value: f64) -> Duration {
    Duration::seconds((value * 3600.0).round() as i64)
}
