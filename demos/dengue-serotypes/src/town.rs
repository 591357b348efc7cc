use ixa_vector_transmission::{
    Context, ContextDiseaseExt, ContextPeopleExt, ContextPlaceExt, DiseaseId, IxaError, OpenDays,
    PersonId, PlaceId, Schedule,
};
use log::info;

static HOUSEHOLDS: usize = 200;
static HOUSEHOLD_SIZE: usize = 4;
static SCHOOLS: usize = 4;
static VECTORS_PER_PLACE: usize = 60;
static SEED_VECTORS: usize = 20;

pub struct Town {
    pub households: Vec<PlaceId>,
    pub schools: Vec<PlaceId>,
    pub people: Vec<PersonId>,
}

/// Builds households and schools, assigns every child to a school, and places a few infectious
/// vectors of each serotype in different households.
pub fn init(context: &mut Context) -> Result<Town, IxaError> {
    let schools = (0..SCHOOLS)
        .map(|index| context.add_place(&format!("school {index}"), OpenDays::Weekdays))
        .collect::<Result<Vec<_>, _>>()?;
    let households = (0..HOUSEHOLDS)
        .map(|index| context.add_place(&format!("household {index}"), OpenDays::Always))
        .collect::<Result<Vec<_>, _>>()?;

    let mut people = Vec::with_capacity(HOUSEHOLDS * HOUSEHOLD_SIZE);
    for (index, household) in households.iter().enumerate() {
        for member in 0..HOUSEHOLD_SIZE {
            let mut schedule = Schedule::new().with_home(*household);
            // The last two members of each household are school children.
            if member >= HOUSEHOLD_SIZE - 2 {
                schedule = schedule.with_activity(schools[index % SCHOOLS], OpenDays::Weekdays);
            }
            people.push(context.add_person(schedule)?);
        }
    }

    for place_id in context.get_place_ids() {
        context
            .get_place_mut(place_id)
            .set_susceptible_vectors(VECTORS_PER_PLACE);
    }
    let number_of_diseases = context.get_number_of_diseases();
    for disease in 0..number_of_diseases {
        let household = households[disease * HOUSEHOLDS / number_of_diseases];
        context
            .get_place_mut(household)
            .set_infectious_vectors(DiseaseId(disease), SEED_VECTORS);
    }

    info!(
        "built a town of {} people in {} households and {} schools",
        people.len(),
        households.len(),
        schools.len()
    );
    Ok(Town {
        households,
        schools,
        people,
    })
}
