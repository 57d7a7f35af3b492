//! Composite cross-section geometry
//!
//! A [`CrossSection`] is an ordered set of axis-aligned rectangles, each
//! located by the height of its centroid above the section bottom. The
//! section reduces to area, neutral axis, second moment of area and first
//! moment of area about an arbitrary horizontal cut.
//!
//! All dimensions are in mm.
//!
//! ## Example
//!
//! ```rust
//! use girder_core::section::{CrossSection, Side};
//!
//! // 20 mm square built from two 10 mm slabs
//! let section = CrossSection::from_tuples(&[(5.0, 20.0, 10.0), (15.0, 20.0, 10.0)]).unwrap();
//! assert!((section.centroidal_axis() - 10.0).abs() < 1e-12);
//! // Q at the axis = 20 * 10 * 5
//! assert!((section.first_moment_of_area(10.0, Side::Above) - 1000.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::section::{first_moment, rectangle_inertia_about, rectangular_area};
use crate::errors::{CalcError, CalcResult};

/// Which part of the section a first moment of area is taken over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Material above the cut
    Above,
    /// Material below the cut
    Below,
}

/// Axis-aligned rectangle in a cross-section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Height of the centroid above the section bottom (mm)
    pub centroid_y: f64,
    /// Horizontal width (mm)
    pub width: f64,
    /// Vertical height (mm)
    pub height: f64,
}

impl Rectangle {
    /// Create a rectangle
    pub fn new(centroid_y: f64, width: f64, height: f64) -> Self {
        Rectangle {
            centroid_y,
            width,
            height,
        }
    }

    /// Area (mm²)
    pub fn area(&self) -> f64 {
        rectangular_area(self.width, self.height)
    }

    /// Lower edge (mm)
    pub fn bottom(&self) -> f64 {
        self.centroid_y - self.height / 2.0
    }

    /// Upper edge (mm)
    pub fn top(&self) -> f64 {
        self.centroid_y + self.height / 2.0
    }

    /// The part of this rectangle on one side of a cut, if any
    pub fn cropped(&self, cut: f64, side: Side) -> Option<Rectangle> {
        let (low, high) = match side {
            Side::Above => (self.bottom().max(cut), self.top()),
            Side::Below => (self.bottom(), self.top().min(cut)),
        };
        if high <= low {
            return None;
        }
        Some(Rectangle::new((low + high) / 2.0, self.width, high - low))
    }
}

/// Reduced properties of a cross-section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Total area (mm²)
    pub area: f64,
    /// Neutral axis height above the bottom (mm)
    pub centroidal_axis: f64,
    /// Second moment of area about the neutral axis (mm⁴)
    pub second_moment: f64,
    /// Height of the extreme top fiber (mm)
    pub top: f64,
}

impl SectionProperties {
    /// Distance from the neutral axis to the extreme compression fiber (mm)
    pub fn top_fiber_distance(&self) -> f64 {
        self.top - self.centroidal_axis
    }

    /// Distance from the neutral axis to the extreme tension fiber (mm)
    pub fn bottom_fiber_distance(&self) -> f64 {
        self.centroidal_axis
    }
}

/// Ordered set of rectangles forming a cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    rectangles: Vec<Rectangle>,
}

impl CrossSection {
    /// Build a section.
    ///
    /// # Errors
    ///
    /// * [`CalcError::DegenerateGeometry`] if there are no rectangles or any
    ///   width or height is not positive
    /// * [`CalcError::InvalidInput`] if a centroid height is not finite
    pub fn new(rectangles: Vec<Rectangle>) -> CalcResult<Self> {
        if rectangles.is_empty() {
            return Err(CalcError::degenerate_geometry(
                "rectangles",
                "0",
                "Cross-section has no components",
            ));
        }
        for (index, rect) in rectangles.iter().enumerate() {
            if !(rect.width > 0.0) || !rect.width.is_finite() {
                return Err(CalcError::degenerate_geometry(
                    format!("rectangles[{}].width", index),
                    rect.width.to_string(),
                    "Width must be positive",
                ));
            }
            if !(rect.height > 0.0) || !rect.height.is_finite() {
                return Err(CalcError::degenerate_geometry(
                    format!("rectangles[{}].height", index),
                    rect.height.to_string(),
                    "Height must be positive",
                ));
            }
            if !rect.centroid_y.is_finite() {
                return Err(CalcError::invalid_input(
                    format!("rectangles[{}].centroid_y", index),
                    rect.centroid_y.to_string(),
                    "Centroid height must be finite",
                ));
            }
        }
        Ok(CrossSection { rectangles })
    }

    /// Build from `(centroid_y, width, height)` tuples
    pub fn from_tuples(tuples: &[(f64, f64, f64)]) -> CalcResult<Self> {
        Self::new(
            tuples
                .iter()
                .map(|&(centroid_y, width, height)| Rectangle::new(centroid_y, width, height))
                .collect(),
        )
    }

    /// Component rectangles in input order
    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    /// Total area (mm²)
    pub fn area(&self) -> f64 {
        self.rectangles.iter().map(Rectangle::area).sum()
    }

    /// Area-weighted centroid height above the bottom (mm)
    pub fn centroidal_axis(&self) -> f64 {
        let weighted: f64 = self.rectangles.iter().map(|r| r.centroid_y * r.area()).sum();
        weighted / self.area()
    }

    /// Second moment of area about the neutral axis (mm⁴)
    pub fn second_moment_of_area(&self) -> f64 {
        let axis = self.centroidal_axis();
        self.rectangles
            .iter()
            .map(|r| rectangle_inertia_about(r.width, r.height, axis - r.centroid_y))
            .sum()
    }

    /// Height of the highest fiber (mm)
    pub fn top(&self) -> f64 {
        self.rectangles
            .iter()
            .map(Rectangle::top)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// First moment of area of the material on one side of `cut` about the
    /// neutral axis (mm³).
    ///
    /// Rectangles straddling the cut are cropped to the part beyond it. The
    /// result is the magnitude, so a cut at the neutral axis gives the same
    /// value from either side.
    pub fn first_moment_of_area(&self, cut: f64, side: Side) -> f64 {
        let axis = self.centroidal_axis();
        self.rectangles
            .iter()
            .filter_map(|r| r.cropped(cut, side))
            .map(|part| first_moment(part.area(), part.centroid_y - axis))
            .sum::<f64>()
            .abs()
    }

    /// Reduce to scalar properties.
    ///
    /// # Errors
    ///
    /// [`CalcError::DegenerateGeometry`] if the second moment of area is not
    /// positive.
    pub fn properties(&self) -> CalcResult<SectionProperties> {
        let second_moment = self.second_moment_of_area();
        if !(second_moment > 0.0) || !second_moment.is_finite() {
            return Err(CalcError::degenerate_geometry(
                "second_moment",
                second_moment.to_string(),
                "Second moment of area must be positive",
            ));
        }
        Ok(SectionProperties {
            area: self.area(),
            centroidal_axis: self.centroidal_axis(),
            second_moment,
            top: self.top(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON * b.abs().max(1.0)
    }

    /// Box with equal top and bottom flanges: 100 wide, 1.27 thick, 100 mm webs
    fn symmetric_box() -> CrossSection {
        let t = 1.27;
        let web = 100.0;
        CrossSection::from_tuples(&[
            (t / 2.0, 100.0, t),
            (t + web / 2.0, t, web),
            (t + web / 2.0, t, web),
            (t + web + t / 2.0, 100.0, t),
        ])
        .unwrap()
    }

    #[test]
    fn test_symmetric_section_centroid_at_mid_height() {
        let section = symmetric_box();
        assert!(approx_eq(section.centroidal_axis(), section.top() / 2.0));
    }

    #[test]
    fn test_single_rectangle_properties() {
        let section = CrossSection::from_tuples(&[(15.0, 10.0, 30.0)]).unwrap();
        let props = section.properties().unwrap();
        assert!(approx_eq(props.area, 300.0));
        assert!(approx_eq(props.centroidal_axis, 15.0));
        assert!(approx_eq(props.second_moment, 10.0 * 27_000.0 / 12.0));
        assert!(approx_eq(props.top, 30.0));
        assert!(approx_eq(props.top_fiber_distance(), 15.0));
    }

    #[test]
    fn test_first_moment_at_axis_matches_both_sides() {
        let section = symmetric_box();
        let axis = section.centroidal_axis();
        let above = section.first_moment_of_area(axis, Side::Above);
        let below = section.first_moment_of_area(axis, Side::Below);
        assert!(approx_eq(above, below));
        assert!(above > 0.0);
    }

    #[test]
    fn test_first_moment_crops_straddling_rectangle() {
        // 10 x 30 block, cut 5 mm above the axis: Q = 10 * 10 * 10
        let section = CrossSection::from_tuples(&[(15.0, 10.0, 30.0)]).unwrap();
        assert!(approx_eq(section.first_moment_of_area(20.0, Side::Above), 1000.0));
        assert_eq!(section.first_moment_of_area(30.0, Side::Above), 0.0);
    }

    #[test]
    fn test_rectangle_crop() {
        let rect = Rectangle::new(5.0, 2.0, 10.0);
        assert_eq!(rect.cropped(8.0, Side::Above), Some(Rectangle::new(9.0, 2.0, 2.0)));
        assert_eq!(rect.cropped(8.0, Side::Below), Some(Rectangle::new(4.0, 2.0, 8.0)));
        assert_eq!(rect.cropped(12.0, Side::Above), None);
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        let err = CrossSection::from_tuples(&[(1.0, 0.0, 2.0)]).unwrap_err();
        assert!(err.is_skippable());
        assert_eq!(err.error_code(), "DEGENERATE_GEOMETRY");
        assert!(CrossSection::from_tuples(&[]).is_err());
        assert!(CrossSection::from_tuples(&[(1.0, 2.0, -1.0)]).is_err());
    }
}
