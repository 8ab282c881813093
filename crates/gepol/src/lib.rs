//! Driving the GEPOL molecular surface program: writing its XYZR input,
//! running it, and reading the area and volume back out of its log.

mod error;
pub mod logfile;
pub mod params;
pub mod request;
pub mod xyzr;

pub use error::Error;
pub use logfile::{LogLayout, SolverResult};
pub use params::{SolverParameters, SurfaceType};
pub use request::SolverRequest;
pub use xyzr::{Sphere, Xyzr};
