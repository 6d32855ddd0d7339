//! Random geometries and their textual forms.
//!
//! Shapes are built as `geo-types` values and rendered either as WKT (MySQL
//! spatial types) or as Postgres geometric literals.

use super::float_in;
use geo_types::{Coord, LineString, MultiPoint, Point, Polygon};
use rand::Rng;
use std::f64::consts::TAU;

/// Decimal places of generated coordinates.
const COORD_PRECISION: u32 = 4;

pub fn random_coord<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Coord<f64> {
    Coord {
        x: float_in(rng, min, max, COORD_PRECISION),
        y: float_in(rng, min, max, COORD_PRECISION),
    }
}

pub fn random_point<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Point<f64> {
    Point::from(random_coord(rng, min, max))
}

pub fn random_linestring<R: Rng + ?Sized>(
    rng: &mut R,
    points: usize,
    min: f64,
    max: f64,
) -> LineString<f64> {
    (0..points.max(2))
        .map(|_| random_coord(rng, min, max))
        .collect::<Vec<_>>()
        .into()
}

pub fn random_multipoint<R: Rng + ?Sized>(
    rng: &mut R,
    points: usize,
    min: f64,
    max: f64,
) -> MultiPoint<f64> {
    MultiPoint(
        (0..points.max(1))
            .map(|_| random_point(rng, min, max))
            .collect(),
    )
}

/// Simple (non self-intersecting) polygon: vertices at increasing angles
/// around a random center.
pub fn random_polygon<R: Rng + ?Sized>(
    rng: &mut R,
    vertices: usize,
    min: f64,
    max: f64,
) -> Polygon<f64> {
    let radius = (max - min).abs() / 10.0;
    let center = random_coord(rng, min + radius, max - radius);

    let mut angles: Vec<f64> = (0..vertices.max(3))
        .map(|_| rng.random_range(0.0..TAU))
        .collect();
    angles.sort_by(f64::total_cmp);

    let ring: Vec<Coord<f64>> = angles
        .into_iter()
        .map(|angle| {
            let r = if radius > 0.0 {
                rng.random_range(radius / 2.0..=radius)
            } else {
                0.0
            };
            Coord {
                x: round(center.x + r * angle.cos()),
                y: round(center.y + r * angle.sin()),
            }
        })
        .collect();
    Polygon::new(LineString::from(ring), vec![])
}

fn round(v: f64) -> f64 {
    let scale = 10f64.powi(COORD_PRECISION as i32);
    (v * scale).round() / scale
}

fn wkt_coords<'a>(coords: impl Iterator<Item = &'a Coord<f64>>) -> String {
    coords
        .map(|c| format!("{} {}", c.x, c.y))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn wkt_point(point: &Point<f64>) -> String {
    format!("POINT({} {})", point.x(), point.y())
}

pub fn wkt_linestring(line: &LineString<f64>) -> String {
    format!("LINESTRING({})", wkt_coords(line.0.iter()))
}

pub fn wkt_polygon(polygon: &Polygon<f64>) -> String {
    format!("POLYGON(({}))", wkt_coords(polygon.exterior().0.iter()))
}

pub fn wkt_multipoint(points: &MultiPoint<f64>) -> String {
    let parts: Vec<String> = points
        .0
        .iter()
        .map(|p| format!("({} {})", p.x(), p.y()))
        .collect();
    format!("MULTIPOINT({})", parts.join(", "))
}

/// Postgres point literal `(x,y)`.
pub fn pg_point(c: &Coord<f64>) -> String {
    format!("({},{})", c.x, c.y)
}

/// Comma-separated Postgres point literals.
pub fn pg_points<'a>(coords: impl Iterator<Item = &'a Coord<f64>>) -> String {
    coords.map(pg_point).collect::<Vec<_>>().join(",")
}
