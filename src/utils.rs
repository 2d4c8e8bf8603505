use crate::profile::Coordinates;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in km, rounded to one decimal.
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_KM * c * 10.0).round() / 10.0
}

pub fn shared_interests<'a>(mine: &'a [String], theirs: &[String]) -> Vec<&'a str> {
    mine.iter()
        .filter(|i| theirs.contains(i))
        .map(String::as_str)
        .collect()
}
