/*!

The vector-borne transmission step of a multi-pathogen agent-based model. For one
(day, disease, place) the step infects vectors from the infectious hosts present, infects hosts
from the infectious vectors present, and makes newly exposed hosts immune to every competing
pathogen.

The registries the step consults (diseases, vector parameters, places, people, random number
generators) are data containers held by a [`Context`] and reached through `Context*Ext` traits.
The models themselves are free functions over borrowed state, so they can also be driven with
injected fakes.

*/

pub mod context;
pub mod disease;
pub mod error;
pub mod hashing;
pub mod log;
pub mod parameters;
pub mod people;
pub mod place;
pub mod random;
pub mod transmission;

// All modules import `crate::TypeId` in case we want to change the underlying type of `TypeId`.
pub(crate) use std::any::TypeId;

// Replace with `typeid::of as type_of` if necessary.
#[inline(always)]
pub fn type_of<T: 'static>() -> TypeId {
    TypeId::of::<T>()
}

pub use context::Context;
pub use disease::{ContextDiseaseExt, Disease, DiseaseId};
pub use error::IxaError;
pub use hashing::{HashMap, HashSet};
pub use crate::log::{debug, error, info, trace, warn};
pub use parameters::{ContextParametersExt, SimulationParameters, VectorParameters};
pub use people::{
    ContextPeopleExt, Exposure, HostPopulation, InfectionSource, InfectionState, PersonId, Schedule,
};
pub use place::{ContextPlaceExt, OpenDays, Place, PlaceId};
pub use random::{ContextRandomExt, RandomService, RngId};
pub use transmission::ContextTransmissionExt;

// Re-exported for `define_rng!`.
pub use rand;

/// A simulated day, counted from the start of the simulation.
pub type Day = u32;
