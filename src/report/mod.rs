//! Report output boundary - accepted assemblies to the fixed report sheet
//!
//! Each accepted assembly becomes one row of 25 fields in a fixed order.
//! Field extraction is separate from writing so in-memory precision stays
//! decoupled from textual rendering: the numbers here are already rounded by
//! the model, and rendering just prints them.

use std::io::Write;

use crate::core::assembly::Assembly;

/// Report column headers, in emission order
pub const REPORT_HEADER: [&str; 25] = [
    "Gear1",
    "Mass1",
    "PitchD1",
    "FOS1",
    "Width1",
    "Gear2",
    "Mass2",
    "PitchD2",
    "FOS2",
    "Width2",
    "Gear3",
    "Mass3",
    "PitchD3",
    "FOS3",
    "Width3",
    "Gear4",
    "Mass4",
    "PitchD4",
    "FOS4",
    "Width4",
    "TotalReduction",
    "Reduction1",
    "Reduction2",
    "TotalMass",
    "CenterToCenterLength",
];

/// Extract the ordered report row for one assembly
///
/// Gear columns carry the catalog identifier. Mass columns are the catalog
/// masses at the mounted bores (gear 1 at its second bore, gear 4 at its
/// first, the inner pair at the resolved shared bore); width columns repeat
/// per meshing pair.
pub fn report_row(assembly: &Assembly) -> [String; 25] {
    let [g1, g2, g3, g4] = &assembly.gears;
    let (mass2, mass3) = assembly.inner_masses;

    [
        g1.id.clone(),
        fmt(g1.weight2),
        fmt(g1.pitch_diameter),
        fmt(assembly.fos_adjusted[0]),
        fmt(assembly.width1),
        g2.id.clone(),
        fmt(mass2),
        fmt(g2.pitch_diameter),
        fmt(assembly.fos_adjusted[1]),
        fmt(assembly.width1),
        g3.id.clone(),
        fmt(mass3),
        fmt(g3.pitch_diameter),
        fmt(assembly.fos_adjusted[2]),
        fmt(assembly.width2),
        g4.id.clone(),
        fmt(g4.weight1),
        fmt(g4.pitch_diameter),
        fmt(assembly.fos_adjusted[3]),
        fmt(assembly.width2),
        fmt(assembly.total_reduction),
        fmt(assembly.reduction1),
        fmt(assembly.reduction2),
        fmt(assembly.mass),
        fmt(assembly.center_distance),
    ]
}

/// Write the report header and one row per assembly as CSV
pub fn write_report<W: Write>(writer: W, assemblies: &[Assembly]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(REPORT_HEADER)?;
    for assembly in assemblies {
        wtr.write_record(report_row(assembly))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render an already-rounded value as decimal text
fn fmt(value: f64) -> String {
    value.to_string()
}
