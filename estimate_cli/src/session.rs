//! Interactive wizard sessions.
//!
//! Walks the user through the plot step and each floor, then returns the
//! finished report. Rejected entries are reported and asked again; only the
//! end of input aborts a session.

use std::io::{BufRead, Write};

use color_eyre::eyre::{eyre, Result};
use estimate_core::building::{RoomCounts, RoomField, RoomLayout, RoomList, RoomType};
use estimate_core::calculations::CostReport;
use estimate_core::rates::RateCard;
use estimate_core::units::LengthUnit;
use estimate_core::wizard::{PlotField, Wizard, WizardStep};

use crate::console::Console;
use crate::render::rupees;

/// Prompts for the rooms of one floor.
pub trait FloorForm: RoomLayout {
    fn fill<I: BufRead, O: Write>(wizard: &mut Wizard<Self>, console: &mut Console<I, O>) -> Result<()>;
}

impl FloorForm for RoomCounts {
    fn fill<I: BufRead, O: Write>(wizard: &mut Wizard<Self>, console: &mut Console<I, O>) -> Result<()> {
        console.say("  Number of rooms of each type:")?;
        for room in RoomType::ALL {
            loop {
                let current = wizard.current_floor().map(|floor| floor.get(room)).unwrap_or_default();
                let text = console.ask(&format!("    {}", room), &current.to_string())?;
                match wizard.set_room_count(room, &text) {
                    Ok(()) => break,
                    Err(e) => console.warn(e)?,
                }
            }
        }
        Ok(())
    }
}

impl FloorForm for RoomList {
    fn fill<I: BufRead, O: Write>(wizard: &mut Wizard<Self>, console: &mut Console<I, O>) -> Result<()> {
        let mut index = 0;
        loop {
            let room_count = wizard.current_floor().map(RoomList::len).unwrap_or_default();
            if index == room_count {
                if !console.confirm("  Add another room?", room_count == 0)? {
                    return Ok(());
                }
                wizard.add_room()?;
            }

            for field in [RoomField::Length, RoomField::Width] {
                let current = wizard
                    .current_floor()
                    .and_then(|floor| floor.rooms().get(index))
                    .map(|room| room.field(field).to_string())
                    .unwrap_or_default();
                let text = console.ask(&format!("    Room {} {} (ft)", index + 1, field.name()), &current)?;
                wizard.set_room_field(index, field, &text)?;
            }
            index += 1;
        }
    }
}

/// Run a full session and return the estimate.
pub fn run<R: FloorForm, I: BufRead, O: Write>(console: &mut Console<I, O>, rates: RateCard) -> Result<CostReport> {
    let mut wizard = Wizard::<R>::with_rates(rates);
    console.say(format_args!("New {} estimate", R::WORKFLOW))?;

    loop {
        match wizard.step() {
            WizardStep::CollectingPlot => collect_plot(&mut wizard, console)?,
            WizardStep::CollectingFloors { index } => collect_floor(&mut wizard, index, console)?,
            WizardStep::Result => {
                return wizard
                    .report()
                    .cloned()
                    .ok_or_else(|| eyre!("session finished without a report"))
            }
        }
    }
}

fn collect_plot<R: FloorForm, I: BufRead, O: Write>(wizard: &mut Wizard<R>, console: &mut Console<I, O>) -> Result<()> {
    console.say("\nPlot details (lengths in ft; add 'm' for metres)")?;
    loop {
        let plot = wizard.plot().clone();

        let length = console.ask("  Plot length", &with_unit(&plot.length, plot.length_unit))?;
        set_dimension(wizard, PlotField::Length, &length)?;
        let width = console.ask("  Plot width", &with_unit(&plot.width, plot.width_unit))?;
        set_dimension(wizard, PlotField::Width, &width)?;
        let floors = console.ask("  Number of floors", &plot.floors)?;
        wizard.set_plot_field(PlotField::Floors, floors)?;

        match wizard.submit_plot() {
            Ok(()) => {
                if let Some(details) = wizard.plot_details() {
                    console.say(format_args!("  Plot area: {:.2} sq ft", details.area_sqft()))?;
                }
                return Ok(());
            }
            Err(e) => console.warn(e)?,
        }
    }
}

fn collect_floor<R: FloorForm, I: BufRead, O: Write>(
    wizard: &mut Wizard<R>,
    index: usize,
    console: &mut Console<I, O>,
) -> Result<()> {
    let floor_count = wizard.floor_count().unwrap_or_default();
    console.say(format_args!("\nFloor {} of {}", index + 1, floor_count))?;
    R::fill(wizard, console)?;

    let next = if wizard.is_last_floor() { "calculate" } else { "next floor" };
    loop {
        let action = console.ask(&format!("  [Enter] {}, [b]ack, [p]review, [e]dit", next), "")?;
        let outcome = match action.to_ascii_lowercase().as_str() {
            "" => wizard.next_floor(),
            "b" | "back" => wizard.previous_floor(),
            "e" | "edit" => return Ok(()),
            "p" | "preview" => {
                match wizard.preview_report() {
                    Ok(report) => console.say(format_args!(
                        "  So far: {:.2} sq ft, {}",
                        report.total_area_sqft,
                        rupees(report.total_cost)
                    ))?,
                    Err(e) => console.warn(e)?,
                }
                continue;
            }
            other => {
                console.warn(format_args!("unknown choice '{}'", other))?;
                continue;
            }
        };

        if let Err(e) = outcome {
            console.warn(e)?;
        }
        return Ok(());
    }
}

/// "50" in metres is shown as "50 m" so that accepting the default keeps
/// the unit.
fn with_unit(value: &str, unit: LengthUnit) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{} {}", value, unit)
    }
}

fn set_dimension<R: FloorForm>(wizard: &mut Wizard<R>, field: PlotField, text: &str) -> Result<()> {
    let (value, unit) = split_unit(text);
    wizard.set_plot_field(field, value)?;
    wizard.set_plot_unit(field, unit.unwrap_or_default())?;
    Ok(())
}

/// Split "12.5 m" or "40ft" into value and unit.
fn split_unit(text: &str) -> (&str, Option<LengthUnit>) {
    let text = text.trim();
    let value_end = text.trim_end_matches(|c: char| c.is_ascii_alphabetic()).len();
    let (value, suffix) = text.split_at(value_end);
    match suffix.parse::<LengthUnit>() {
        Ok(unit) if !value.trim().is_empty() => (value.trim(), Some(unit)),
        _ => (text, None),
    }
}
