//! Plain-text rendering of estimates.

use std::fmt;

use estimate_core::calculations::masonry::{MasonryInput, MasonryResult};
use estimate_core::calculations::{CostReport, FloorBreakdown, RoomLine};

const RULE: &str = "═══════════════════════════════════════════════════════";

/// Format an amount in rupees with Indian digit grouping: `₹12,34,567.89`.
pub fn rupees(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}₹{}.{}", sign, group_indian(whole), fraction)
}

/// Last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut rest, last_three) = digits.split_at(digits.len() - 3);
    let mut groups = vec![last_three];
    while rest.len() > 2 {
        let (head, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = head;
    }
    groups.push(rest);
    groups.reverse();
    groups.join(",")
}

fn sqft(area: f64) -> String {
    format!("{:.2} sq ft", area)
}

/// Text view of a [`CostReport`].
pub struct ReportView<'a>(pub &'a CostReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "  CONSTRUCTION ESTIMATE ({}, {} floor{})",
            report.workflow,
            report.floor_count,
            if report.floor_count == 1 { "" } else { "s" }
        )?;
        writeln!(f, "{}", RULE)?;

        for floor in &report.floors {
            write_floor(f, floor)?;
        }

        writeln!(f)?;
        writeln!(f, "Building:")?;
        writeln!(f, "  Total area:     {}", sqft(report.total_area_sqft))?;
        writeln!(f, "  Building cost:  {}", rupees(report.building_cost))?;
        writeln!(f, "  Roof:           {}", rupees(report.roof_cost))?;

        let foundation = &report.foundation;
        writeln!(
            f,
            "  Foundation:     {} ({} per sq ft) {}",
            foundation.foundation_type,
            rupees(foundation.cost_per_sqft),
            rupees(foundation.cost)
        )?;

        let beams = &report.beams;
        writeln!(
            f,
            "  Beams:          {} × {} = {}",
            beams.estimated_beams,
            rupees(beams.cost_per_beam),
            rupees(beams.total_cost)
        )?;

        writeln!(f)?;
        writeln!(f, "Materials:")?;
        for (material, line) in &report.materials.lines {
            writeln!(
                f,
                "  {:<10} {:>10.2} {:<6} {:>16}",
                material.display_name(),
                line.usage,
                line.unit,
                rupees(line.cost)
            )?;
        }
        writeln!(f, "  {:<28} {:>16}", "Total", rupees(report.materials.total_cost))?;

        let plumbing = &report.plumbing;
        writeln!(f)?;
        writeln!(f, "Plumbing:")?;
        writeln!(f, "  Base:           {}", rupees(plumbing.base_cost))?;
        writeln!(f, "  Pipes:          {} ({} points)", rupees(plumbing.pipe_cost), plumbing.points)?;
        writeln!(f, "  Fixtures:       {}", rupees(plumbing.fixture_cost))?;
        writeln!(f, "  Water tank:     {}", rupees(plumbing.tank_cost))?;
        writeln!(f, "  Labour:         {}", rupees(plumbing.labour_cost))?;
        writeln!(f, "  Total:          {}", rupees(plumbing.total_cost))?;

        writeln!(f, "{}", RULE)?;
        writeln!(f, "  GRAND TOTAL:    {}", rupees(report.total_cost))?;
        writeln!(f, "{}", RULE)
    }
}

fn write_floor(f: &mut fmt::Formatter<'_>, floor: &FloorBreakdown) -> fmt::Result {
    writeln!(f)?;
    writeln!(
        f,
        "Floor {}: {}  cost {}  roof {}",
        floor.number,
        sqft(floor.area_sqft),
        rupees(floor.cost),
        rupees(floor.roof_cost)
    )?;
    for room in &floor.rooms {
        writeln!(f, "  {}", room_line(room))?;
    }
    Ok(())
}

fn room_line(room: &RoomLine) -> String {
    match (room.length_ft, room.width_ft) {
        (Some(length), Some(width)) => format!(
            "{:<10} {:.2} × {:.2} ft  {}  {:.2} cu ft  {}",
            room.label,
            length,
            width,
            sqft(room.area_sqft),
            room.volume_cuft,
            rupees(room.cost)
        ),
        _ => format!(
            "{:<10} × {:<3} {} each  {}  {}",
            room.label,
            room.quantity,
            sqft(room.area_per_room_sqft),
            sqft(room.area_sqft),
            rupees(room.cost)
        ),
    }
}

/// Text view of a masonry estimate.
pub struct MasonryView<'a> {
    pub input: &'a MasonryInput,
    pub result: &'a MasonryResult,
}

impl fmt::Display for MasonryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (input, result) = (self.input, self.result);
        writeln!(f, "{}", RULE)?;
        writeln!(f, "  WALL MASONRY")?;
        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "Room:    {:.2} × {:.2} ft, {:.2} ft high, {}",
            input.length_ft,
            input.width_ft,
            input.height_ft,
            input.thickness.display_name()
        )?;
        writeln!(f, "Volume:  {:.3} m³", result.wall_volume_m3)?;
        writeln!(f, "Bricks:  {:>8}  {}", result.bricks, rupees(result.brick_cost))?;
        writeln!(f, "Cement:  {:>8} bags  {}", result.cement_bags, rupees(result.cement_cost))?;
        writeln!(f, "Sand:    {:>8.3} m³  {}", result.sand_m3, rupees(result.sand_cost))?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "  TOTAL: {}", rupees(result.total_cost))?;
        writeln!(f, "{}", RULE)
    }
}
