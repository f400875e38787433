//! Builders for planner records with sensible defaults.

use chrono::{DateTime, TimeZone, Utc};
use load_planner::model::{Driver, Load, Trailer, Truck};

use super::Location;

pub fn driver(id: &str, home: Location) -> Driver {
    Driver {
        id: id.to_string(),
        home_base: home.name.to_string(),
        home_coordinates: Some(home.point()),
        status: "available".to_string(),
    }
}

pub fn truck(id: &str, at: Location) -> Truck {
    Truck {
        id: id.to_string(),
        current_location: at.name.to_string(),
        current_coordinates: Some(at.point()),
        capacity: 45_000.0,
    }
}

pub fn trailer(id: &str, at: Location) -> Trailer {
    Trailer {
        id: id.to_string(),
        current_location: at.name.to_string(),
        current_coordinates: Some(at.point()),
        capacity: 48_000.0,
    }
}

/// Builder for loads.
#[derive(Clone, Debug)]
pub struct LoadBuilder {
    load: Load,
}

impl LoadBuilder {
    pub fn build(self) -> Load {
        self.load
    }

    pub fn pick_up_on(mut self, day: u32) -> Self {
        self.load.pick_up_by = Some(october(day, 8));
        self
    }

    pub fn due_on(mut self, day: u32) -> Self {
        self.load.due_by = Some(october(day, 17));
        self
    }

    pub fn without_origin_coordinates(mut self) -> Self {
        self.load.origin_coordinates = None;
        self
    }

    pub fn without_destination_coordinates(mut self) -> Self {
        self.load.destination_coordinates = None;
        self
    }
}

pub fn load(id: &str, from: Location, to: Location) -> LoadBuilder {
    LoadBuilder {
        load: Load {
            id: id.to_string(),
            origin: from.name.to_string(),
            destination: to.name.to_string(),
            origin_coordinates: Some(from.point()),
            destination_coordinates: Some(to.point()),
            pick_up_by: None,
            due_by: None,
            weight: 20_000.0,
            status: "unassigned".to_string(),
        },
    }
}

/// A timestamp in October 2024.
pub fn october(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, day, hour, 0, 0)
        .single()
        .expect("valid fixture date")
}
