use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The kind of molecular surface GEPOL builds.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum SurfaceType {
    /// van der Waals surface
    #[serde(rename = "WSURF", alias = "wsurf")]
    Wsurf,
    /// solvent-accessible surface
    #[serde(rename = "ASURF", alias = "asurf")]
    Asurf,
    /// solvent-excluding surface
    #[default]
    #[serde(rename = "ESURF", alias = "esurf")]
    Esurf,
}

impl Display for SurfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SurfaceType::Wsurf => "WSURF",
                SurfaceType::Asurf => "ASURF",
                SurfaceType::Esurf => "ESURF",
            }
        )
    }
}

/// The fixed set of knobs passed to GEPOL on its command line, after the
/// title and file names. A fresh value is built for every calculation; nothing
/// here is shared or mutated between runs.
///
/// Any subset of the fields can be given when deserializing, the rest take
/// their [Default] values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverParameters {
    /// `RD`
    pub density_factor: f64,

    /// overlapping factor, `OFAC`
    pub overlap_factor: f64,

    /// smallest radius allowed for added spheres, `RMIN`
    pub min_radius: f64,

    /// tessellation level of each sphere, `NDIV`
    pub subdivision_count: u32,

    /// write the normal vectors file, `DVEC`
    pub vector_flag: u8,

    pub vector_file: String,

    pub display_file: String,

    /// `KSURF`
    pub surface_type: SurfaceType,

    /// `REDU`
    pub reduction_flag: u8,

    pub print_vec_flag: u8,

    pub print_sph_flag: u8,

    pub print_dis_flag: u8,

    /// `ASS1`
    pub assign_flag: u8,

    /// `LPR`
    pub low_precision_flag: u8,
}

impl Default for SolverParameters {
    fn default() -> Self {
        Self {
            density_factor: 1.4,
            overlap_factor: 0.8,
            min_radius: 0.50,
            subdivision_count: 3,
            vector_flag: 1,
            vector_file: String::from("VECTORS.BIN"),
            display_file: String::from("DISPLAY.BIN"),
            surface_type: SurfaceType::Esurf,
            reduction_flag: 0,
            print_vec_flag: 0,
            print_sph_flag: 0,
            print_dis_flag: 0,
            assign_flag: 0,
            low_precision_flag: 0,
        }
    }
}

impl SolverParameters {
    /// The parameters as command line arguments, in the order GEPOL reads
    /// them.
    pub fn args(&self) -> Vec<String> {
        let Self {
            density_factor,
            overlap_factor,
            min_radius,
            subdivision_count,
            vector_flag,
            vector_file,
            display_file,
            surface_type,
            reduction_flag,
            print_vec_flag,
            print_sph_flag,
            print_dis_flag,
            assign_flag,
            low_precision_flag,
        } = self;
        vec![
            density_factor.to_string(),
            overlap_factor.to_string(),
            min_radius.to_string(),
            subdivision_count.to_string(),
            vector_flag.to_string(),
            vector_file.clone(),
            display_file.clone(),
            surface_type.to_string(),
            reduction_flag.to_string(),
            print_vec_flag.to_string(),
            print_sph_flag.to_string(),
            print_dis_flag.to_string(),
            assign_flag.to_string(),
            low_precision_flag.to_string(),
        ]
    }
}
