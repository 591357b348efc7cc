use crate::{
    place::{OpenDays, PlaceId},
    Day,
};

/// Where a person goes. Each activity is attended on the days its `OpenDays` allows; during a
/// stay-home period (illness, isolation) only the home place is attended.
///
/// Presence is only answered for the day the schedule was last updated for, so callers must call
/// `update` for a day before asking `is_present` about it.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    home: Option<PlaceId>,
    activities: Vec<(PlaceId, OpenDays)>,
    // Inclusive
    stay_home: Option<(Day, Day)>,
    updated_for: Option<Day>,
    attending: Vec<PlaceId>,
}

impl Schedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The home place is attended every day.
    #[must_use]
    pub fn with_home(mut self, place_id: PlaceId) -> Self {
        self.home = Some(place_id);
        self
    }

    #[must_use]
    pub fn with_activity(mut self, place_id: PlaceId, days: OpenDays) -> Self {
        self.activities.push((place_id, days));
        self
    }

    /// Restricts the person to their home from `first_day` through `last_day`.
    pub fn stay_home(&mut self, first_day: Day, last_day: Day) {
        self.stay_home = Some((first_day, last_day));
        // Force a recomputation if today is affected.
        self.updated_for = None;
    }

    #[must_use]
    pub fn is_staying_home(&self, day: Day) -> bool {
        self.stay_home
            .is_some_and(|(first, last)| (first..=last).contains(&day))
    }

    /// Computes the places attended on `day`. A no-op if already computed for `day`.
    pub fn update(&mut self, day: Day) {
        if self.updated_for == Some(day) {
            return;
        }
        self.attending.clear();
        self.attending.extend(self.home);
        if !self.is_staying_home(day) {
            self.attending.extend(
                self.activities
                    .iter()
                    .filter(|(_, days)| days.contains(day))
                    .map(|(place_id, _)| *place_id),
            );
        }
        self.updated_for = Some(day);
    }

    #[must_use]
    pub fn is_present(&self, day: Day, place_id: PlaceId) -> bool {
        self.updated_for == Some(day) && self.attending.contains(&place_id)
    }

    /// Every place the person may attend on some day.
    pub fn places(&self) -> impl Iterator<Item = PlaceId> + '_ {
        self.home
            .into_iter()
            .chain(self.activities.iter().map(|(place_id, _)| *place_id))
    }
}
