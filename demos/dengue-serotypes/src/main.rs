mod town;

use std::path::Path;

use ixa_vector_transmission::log::{set_log_level, set_module_filter, LevelFilter};
use ixa_vector_transmission::{
    Context, ContextDiseaseExt, ContextParametersExt, ContextPeopleExt, ContextPlaceExt,
    ContextTransmissionExt, Day, DiseaseId, InfectionState, IxaError, PlaceId,
};
use log::{info, warn};

use crate::town::Town;

static MAX_DAY: Day = 120;
static LATENT_PERIOD: Day = 5;
static INFECTIOUS_PERIOD: Day = 6;
static SCHOOL_CLOSURE_THRESHOLD: usize = 5;
static SCHOOL_CLOSURE_DAYS: Day = 14;

/// True if a host exposed on `exposure_day` is infectious on `day`.
fn is_infectious(exposure_day: Day, day: Day) -> bool {
    (exposure_day + LATENT_PERIOD..exposure_day + LATENT_PERIOD + INFECTIOUS_PERIOD).contains(&day)
}

/// Counts each infectious host at every place they attend on `day`, and returns how many
/// infectious hosts each school saw.
fn count_infectious_hosts(context: &mut Context, town: &Town, day: Day) -> Vec<usize> {
    let mut at_school = vec![0; town.schools.len()];
    for disease_id in (0..context.get_number_of_diseases()).map(DiseaseId) {
        for person_id in &town.people {
            if context.get_infection_state(*person_id, disease_id) != InfectionState::Exposed {
                continue;
            }
            let Some(exposure) = context.get_exposure(*person_id, disease_id) else {
                continue;
            };
            if !is_infectious(exposure.day, day) {
                continue;
            }

            let schedule = context.get_schedule_mut(*person_id);
            schedule.update(day);
            let attending: Vec<PlaceId> = schedule
                .places()
                .filter(|place_id| schedule.is_present(day, *place_id))
                .collect();
            for place_id in attending {
                context.get_place_mut(place_id).add_infectious_host(disease_id);
                if let Some(school) = town.schools.iter().position(|id| *id == place_id) {
                    at_school[school] += 1;
                }
            }
        }
    }
    at_school
}

fn close_outbreak_schools(context: &mut Context, town: &Town, day: Day, at_school: &[usize]) {
    for (school, count) in town.schools.iter().zip(at_school) {
        if *count < SCHOOL_CLOSURE_THRESHOLD {
            continue;
        }
        let place = context.get_place_mut(*school);
        if !place.should_be_open(day + 1, DiseaseId(0)) {
            continue;
        }
        warn!(
            "{count} infectious hosts at {} on day {day}; closing for {SCHOOL_CLOSURE_DAYS} days",
            place.label()
        );
        place.close(None, day + 1, day + SCHOOL_CLOSURE_DAYS);
    }
}

fn report(context: &Context, day: Day) {
    for disease_id in (0..context.get_number_of_diseases()).map(DiseaseId) {
        info!(
            "day {day} {}: exposed {} unsusceptible {}",
            context.get_disease(disease_id).name(),
            context.count_people_in_state(disease_id, InfectionState::Exposed),
            context.count_people_in_state(disease_id, InfectionState::Unsusceptible)
        );
    }
}

fn initialize(context: &mut Context) -> Result<Town, IxaError> {
    let parameters = Path::new(env!("CARGO_MANIFEST_DIR")).join("parameters.json");
    context.load_parameters_from_json(&parameters)?;
    town::init(context)
}

fn main() {
    set_log_level(LevelFilter::Info);
    set_module_filter("ixa_vector_transmission::transmission", LevelFilter::Warn);

    let mut context = Context::default();
    let town = initialize(&mut context).expect("Failed to initialize Context");

    for day in 0..MAX_DAY {
        let at_school = count_infectious_hosts(&mut context, &town, day);
        context.spread_infection_for_day(day);
        close_outbreak_schools(&mut context, &town, day, &at_school);
        if day % 7 == 6 {
            report(&context, day);
        }
    }

    let untouched = town
        .households
        .iter()
        .filter(|household| context.get_place(**household).infectious_days().is_none())
        .count();
    info!(
        "{untouched} of {} households never saw transmission",
        town.households.len()
    );
}
