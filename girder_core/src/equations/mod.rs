//! # Structural Mechanics Equations
//!
//! Closed-form formulas used by the section and failure engines, kept in one
//! place so each can be checked against its reference independently of the
//! engines that combine them.
//!
//! ## Modules
//!
//! - [`section`] - Rectangle properties and the parallel-axis theorem
//! - [`plate`] - Flexural and shear stress, thin-plate buckling
//!
//! ## Sign Conventions
//!
//! - **Moment**: Positive causes tension on the bottom fiber (sagging)
//! - **y**: Measured upward from the section bottom; stresses are evaluated
//!   with the fiber's distance from the neutral axis
//!
//! ## References
//!
//! - Timoshenko & Gere, Theory of Elastic Stability
//! - Hibbeler, Mechanics of Materials

pub mod plate;
pub mod section;

pub use plate::{
    flexural_stress,
    plate_buckling_stress,
    plate_rigidity_factor,
    shear_buckling_stress,
    shear_stress,
    K_FLANGE_BETWEEN_WEBS,
    K_FLANGE_TIP,
    K_WEB_FLEXURE,
    K_WEB_SHEAR,
};

pub use section::{
    first_moment,
    parallel_axis_term,
    rectangle_inertia_about,
    rectangular_area,
    rectangular_moment_of_inertia,
};
