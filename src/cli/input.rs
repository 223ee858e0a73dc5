use std::io::{self, BufRead, Write};

use vehicle_registry::model::vehicle::{validate_capacity, validate_engine_power, validate_name};
use vehicle_registry::{Coordinates, FuelType, VehicleDraft, VehicleType};

/// Line source that remembers how many lines it has handed out
pub struct LineReader<R> {
    inner: R,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line_number: 0,
        }
    }

    /// Next line without its terminator, `None` at end of input
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.inner.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let trimmed_len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed_len);
        Ok(Some(buf))
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Ask until `parse` accepts the answer. `None` once input runs out.
fn prompt<R, W, T, F>(
    input: &mut LineReader<R>,
    out: &mut W,
    label: &str,
    parse: F,
) -> io::Result<Option<T>>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        write!(out, "  {}: ", label)?;
        out.flush()?;

        let Some(line) = input.next_line()? else {
            writeln!(out)?;
            return Ok(None);
        };

        match parse(line.trim()) {
            Ok(value) => return Ok(Some(value)),
            Err(reason) => writeln!(out, "  Error: {}", reason)?,
        }
    }
}

fn parse_real(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>().map_err(|_| "enter a number".to_string())
}

/// Read every user-editable field of a vehicle.
///
/// Invalid answers are re-asked; running out of input returns `None` and
/// the command is dropped.
pub fn read_draft<R: BufRead, W: Write>(
    input: &mut LineReader<R>,
    out: &mut W,
) -> io::Result<Option<VehicleDraft>> {
    writeln!(out, "Enter vehicle data:")?;

    let Some(name) = prompt(input, out, "name (non-empty)", |raw| {
        validate_name(raw).map_err(|e| e.reason)?;
        Ok(raw.to_string())
    })?
    else {
        return Ok(None);
    };

    let Some(mut coordinates) = prompt(input, out, "coordinate x (number, <= 636)", |raw| {
        let x = parse_real(raw)?;
        Coordinates::new(x, 0).map_err(|e| e.reason)
    })?
    else {
        return Ok(None);
    };

    let Some(y) = prompt(input, out, "coordinate y (integer)", |raw| {
        raw.parse::<i32>().map_err(|_| "enter an integer".to_string())
    })?
    else {
        return Ok(None);
    };
    coordinates.set_y(y);

    let Some(engine_power) = prompt(input, out, "enginePower (number > 0)", |raw| {
        let value = parse_real(raw)?;
        validate_engine_power(value).map_err(|e| e.reason)?;
        Ok(value)
    })?
    else {
        return Ok(None);
    };

    let Some(capacity) = prompt(input, out, "capacity (number > 0)", |raw| {
        let value = parse_real(raw)?;
        validate_capacity(value).map_err(|e| e.reason)?;
        Ok(value)
    })?
    else {
        return Ok(None);
    };

    let type_label = format!("type ({})", VehicleType::variants());
    let Some(vehicle_type) = prompt(input, out, &type_label, |raw| {
        VehicleType::parse_lenient(raw).map_err(|e| e.reason)
    })?
    else {
        return Ok(None);
    };

    write!(out, "  fuelType ({}, or empty for none): ", FuelType::variants())?;
    out.flush()?;
    let Some(fuel_raw) = input.next_line()? else {
        writeln!(out)?;
        return Ok(None);
    };
    let fuel_raw = fuel_raw.trim();
    let fuel_type = if fuel_raw.is_empty() {
        None
    } else {
        match FuelType::parse_lenient(fuel_raw) {
            Ok(fuel) => Some(fuel),
            Err(_) => {
                writeln!(out, "  Unknown fuel type, leaving it empty")?;
                None
            }
        }
    };

    Ok(Some(VehicleDraft {
        name,
        coordinates,
        engine_power,
        capacity,
        vehicle_type,
        fuel_type,
    }))
}
