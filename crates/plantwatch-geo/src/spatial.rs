use geo::{BoundingRect, Distance, Haversine, MultiPoint, Point};
use plantwatch_core::models::{EnrichedPlantLocation, GeoCoordinate, Viewport};

fn to_point(coordinate: &GeoCoordinate) -> Point {
    Point::new(coordinate.longitude, coordinate.latitude)
}

/// Great-circle distance between two coordinates in meters
pub fn distance_meters(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    Haversine.distance(to_point(a), to_point(b))
}

/// Pair every record with its distance from `origin`, closest first.
///
/// Records at equal distance keep their input order.
pub fn nearest_first(
    records: &[EnrichedPlantLocation],
    origin: &GeoCoordinate,
) -> Vec<(EnrichedPlantLocation, f64)> {
    let mut ranked: Vec<_> = records
        .iter()
        .map(|record| (record.clone(), distance_meters(origin, &record.coordinate)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

/// Viewport that shows every pin, with spans scaled by `padding_factor`.
///
/// Spans never shrink below the resolved-position zoom, so a single pin gets
/// the same envelope as a device fix. Returns `None` when there are no records.
pub fn fit_viewport(records: &[EnrichedPlantLocation], padding_factor: f64) -> Option<Viewport> {
    let points: MultiPoint = records.iter().map(|record| to_point(&record.coordinate)).collect();
    let rect = points.bounding_rect()?;

    let padding =
        if padding_factor.is_finite() && padding_factor > 0.0 { padding_factor } else { 1.0 };
    let center = rect.center();
    let latitude_span = (rect.height() * padding).max(Viewport::RESOLVED_LATITUDE_SPAN);
    let longitude_span = (rect.width() * padding).max(Viewport::RESOLVED_LONGITUDE_SPAN);

    Viewport::new(GeoCoordinate::new(center.y, center.x), latitude_span, longitude_span).ok()
}
