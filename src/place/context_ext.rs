use crate::{
    context::Context,
    disease::ContextDiseaseExt,
    error::IxaError,
    people::PersonId,
    place::{OpenDays, Place, PlaceData, PlaceId},
};

pub trait ContextPlaceExt {
    fn get_number_of_places(&self) -> usize;

    /// Creates a place with per-disease state sized from the configured disease count.
    fn add_place(&mut self, label: &str, open_days: OpenDays) -> Result<PlaceId, IxaError>;

    fn get_place(&self, place_id: PlaceId) -> &Place;

    fn get_place_mut(&mut self, place_id: PlaceId) -> &mut Place;

    /// Adds `person_id` to the place's roster. Enrolling twice has no effect.
    fn enroll(&mut self, place_id: PlaceId, person_id: PersonId);

    /// The ids of every place, in creation order.
    fn get_place_ids(&self) -> Vec<PlaceId>;
}

impl ContextPlaceExt for Context {
    fn get_number_of_places(&self) -> usize {
        self.get_data_container::<PlaceData>()
            .map_or(0, PlaceData::len)
    }

    fn add_place(&mut self, label: &str, open_days: OpenDays) -> Result<PlaceId, IxaError> {
        let number_of_diseases = self.get_number_of_diseases();
        if number_of_diseases == 0 {
            return Err("diseases must be configured before places are added".into());
        }
        let place_data = self.get_data_container_mut::<PlaceData>();
        let place_id = place_data.next_id();
        place_data.push(Place::new(place_id, label, open_days, number_of_diseases));
        Ok(place_id)
    }

    fn get_place(&self, place_id: PlaceId) -> &Place {
        self.get_data_container::<PlaceData>()
            .expect("no places have been added")
            .get(place_id)
    }

    fn get_place_mut(&mut self, place_id: PlaceId) -> &mut Place {
        self.get_data_container_mut::<PlaceData>().get_mut(place_id)
    }

    fn enroll(&mut self, place_id: PlaceId, person_id: PersonId) {
        self.get_place_mut(place_id).enroll(person_id);
    }

    fn get_place_ids(&self) -> Vec<PlaceId> {
        self.get_data_container::<PlaceData>()
            .map(|place_data| place_data.ids().collect())
            .unwrap_or_default()
    }
}
