use libmapping::location::Location;
use serde::Serialize;
use tabled::Tabled;

#[derive(Tabled, Serialize)]
#[tabled(rename_all = "PascalCase")]
pub(crate) struct LocationRow {
    id: i64,
    name: String,
    description: String,
    #[tabled(skip)]
    latitude: f64,
    #[tabled(skip)]
    longitude: f64,
    coordinates: String,
}

impl LocationRow {
    pub(crate) fn new(loc: &Location) -> Self {
        Self {
            id: loc.id,
            name: loc.name.clone(),
            description: loc.description.clone(),
            latitude: loc.latitude,
            longitude: loc.longitude,
            coordinates: loc.coordinates(),
        }
    }
}
