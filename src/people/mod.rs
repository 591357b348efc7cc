/*!

Hosts. Each person carries a `Schedule` deciding where they are on a given day and, per disease,
an `InfectionState`. The transmission models reach people only through the `HostPopulation`
trait, which the people registry implements and tests may fake.

*/

mod context_ext;
mod people_data;
mod schedule;

// `ContextPeopleExt` is the public API to `PeopleData`.
pub(crate) use people_data::PeopleData;

pub use context_ext::ContextPeopleExt;
pub use schedule::Schedule;

use crate::{disease::DiseaseId, place::PlaceId, Day};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PersonId(pub(crate) usize);

impl PersonId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-disease susceptibility of a host.
///
/// `Susceptible -> Exposed` on successful transmission; `Susceptible | Exposed -> Unsusceptible`
/// when the host is exposed to a competing disease. `Unsusceptible` is terminal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum InfectionState {
    #[default]
    Susceptible,
    Exposed,
    Unsusceptible,
}

/// Who or what caused an exposure.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InfectionSource {
    /// Vector mediated; there is no identifiable infecting individual.
    Environmental,
    PersonToPerson(PersonId),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Exposure {
    pub disease_id: DiseaseId,
    pub source: InfectionSource,
    pub place_id: PlaceId,
    pub day: Day,
}

/// The operations the host infection model performs on people.
pub trait HostPopulation {
    /// Re-evaluates the person's schedule for `day`. Schedules may change from day to day.
    fn update_schedule(&mut self, person_id: PersonId, day: Day);

    fn is_present(&self, person_id: PersonId, day: Day, place_id: PlaceId) -> bool;

    fn is_susceptible(&self, person_id: PersonId, disease_id: DiseaseId) -> bool;

    fn become_exposed(
        &mut self,
        person_id: PersonId,
        disease_id: DiseaseId,
        source: InfectionSource,
        place_id: PlaceId,
        day: Day,
    );

    /// Unconditionally marks the person unsusceptible to `disease_id`.
    fn become_unsusceptible(&mut self, person_id: PersonId, disease_id: DiseaseId);
}
