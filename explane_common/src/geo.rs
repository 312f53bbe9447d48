/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
//! great circle computations for observer/aircraft correlation, based on the haversine metric
//! space of the [geo](https://docs.rs/geo/latest/geo/) crate. Distances and altitudes use the
//! [uom](https://docs.rs/uom/latest/uom/) `Length` type at the API level, angles are plain f64 degrees.
//!
//! The 3D distance between two points is approximated by combining the great circle (ground) distance and the
//! altitude difference as orthogonal legs. This is only accurate for short ranges (< 100km) but that is all we
//! need to correlate ground observers with nearby aircraft.

use std::fmt;
use serde::{Serialize,Deserialize};
use geo::{Destination, Distance, Haversine, Point};
use uom::si::f64::Length;
use uom::si::length::meter;

use crate::define_error;

define_error!{ pub GeoError =
    InvalidCoordinate(String) : "invalid coordinate: {0}"
}

pub type Result<T> = std::result::Result<T,GeoError>;

fn check_lat_lon (lat: f64, lon: f64)->Result<()> {
    if !lat.is_finite() || lat.abs() > 90.0 {
        Err( GeoError::InvalidCoordinate( format!("latitude {lat}")))
    } else if !lon.is_finite() || lon.abs() > 180.0 {
        Err( GeoError::InvalidCoordinate( format!("longitude {lon}")))
    } else {
        Ok(())
    }
}

/* #region GeoPoint ***********************************************************************************************/

/// 2 dimensional point on the earth surface in geodetic degrees
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn from_lat_lon_degrees (lat: f64, lon: f64)->Self { GeoPoint{ lat, lon } }

    pub fn from_point (p: Point)->Self { GeoPoint{ lat: p.y(), lon: p.x() } }

    pub fn latitude_degrees (&self)->f64 { self.lat }
    pub fn longitude_degrees (&self)->f64 { self.lon }

    /// the geo crate point (x = longitude, y = latitude)
    pub fn point (&self)->Point { Point::new( self.lon, self.lat) }

    /// the haversine distance to `other` along the earth surface
    pub fn great_circle_distance (&self, other: &GeoPoint)->Result<Length> {
        check_lat_lon( self.lat, self.lon)?;
        check_lat_lon( other.lat, other.lon)?;

        let dist = Haversine.distance( self.point(), other.point());
        Ok( Length::new::<meter>( dist))
    }

    /// the point reached by travelling `distance` along the great circle with initial `bearing` (degrees
    /// clockwise from true north)
    pub fn destination (&self, bearing: f64, distance: Length)->Result<GeoPoint> {
        check_lat_lon( self.lat, self.lon)?;
        if !bearing.is_finite() { return Err( GeoError::InvalidCoordinate( format!("bearing {bearing}"))) }

        let p = Haversine.destination( self.point(), bearing, distance.get::<meter>());
        Ok( GeoPoint::from_point( p))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.lat, self.lon)
    }
}

/* #endregion GeoPoint */

/* #region GeoPoint3 ***********************************************************************************************/

/// 3 dimensional point given by latitude, longitude (degrees) and altitude (meters)
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoPoint3 {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64
}

impl GeoPoint3 {
    pub fn from_lat_lon_degrees_alt_meters (lat: f64, lon: f64, alt: f64)->Self {
        GeoPoint3 { lat, lon, alt }
    }

    #[inline] pub fn latitude_degrees (&self)->f64 { self.lat }
    #[inline] pub fn longitude_degrees (&self)->f64 { self.lon }
    #[inline] pub fn altitude (&self)->Length { Length::new::<meter>(self.alt) }
    #[inline] pub fn altitude_meters (&self)->f64 { self.alt }

    pub fn surface_point (&self)->GeoPoint { GeoPoint{ lat: self.lat, lon: self.lon } }

    /// approximated 3D distance: ground distance and altitude difference as legs of a right triangle
    pub fn distance_to (&self, other: &GeoPoint3)->Result<Length> {
        let ground = self.surface_point().great_circle_distance( &other.surface_point())?.get::<meter>();
        let height_diff = other.alt - self.alt;

        Ok( Length::new::<meter>( (ground*ground + height_diff*height_diff).sqrt()))
    }

    pub fn destination (&self, bearing: f64, distance: Length)->Result<GeoPoint> {
        self.surface_point().destination( bearing, distance)
    }
}

impl fmt::Display for GeoPoint3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{}]", self.lat, self.lon, self.alt)
    }
}

/* #endregion GeoPoint3 */

/* #region GeoRect ***********************************************************************************************/

/// a lat/lon aligned bounding box in degrees
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoRect {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GeoRect {
    pub fn from_min_max (lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64)->Self {
        GeoRect { lat_min, lat_max, lon_min, lon_max }
    }

    /// the square search region around `center` whose NW and SE corners are `radius` away
    /// along bearings 315° and 135°
    pub fn around (center: &GeoPoint, radius: Length)->Result<GeoRect> {
        let nw = center.destination( 315.0, radius)?;
        let se = center.destination( 135.0, radius)?;

        Ok( GeoRect { lat_min: se.lat, lat_max: nw.lat, lon_min: nw.lon, lon_max: se.lon } )
    }

    pub fn contains (&self, p: &GeoPoint)->bool {
        p.lat >= self.lat_min && p.lat <= self.lat_max && p.lon >= self.lon_min && p.lon <= self.lon_max
    }
}

impl fmt::Display for GeoRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[lat: {}..{}, lon: {}..{}]", self.lat_min, self.lat_max, self.lon_min, self.lon_max)
    }
}

/* #endregion GeoRect */
