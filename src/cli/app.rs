use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use log::debug;
use vehicle_registry::{Vehicle, VehicleId, VehicleRegistry, VehicleType};

use super::input::{LineReader, read_draft};

const HELP: &str = "\
Available commands:
help                              - show this help
info                              - collection information
show                              - list all elements
add                               - add a new element
update id                         - update the element with the given id
remove_by_id id                   - remove the element with the given id
clear                             - remove every element
save                              - save the collection to the data file
execute_script file_name          - run commands from a file
exit                              - quit without saving
remove_last                       - remove the last element
remove_lower                      - remove every element lower than the given one
sort                              - sort the collection by name
sum_of_capacity                   - sum of all capacity values
filter_by_capacity capacity       - elements with the given capacity
filter_less_than_type type        - elements whose type is lower (CAR, SUBMARINE, BICYCLE, HOVERBOARD)";

pub struct App<W: Write> {
    pub registry: VehicleRegistry,
    pub out: W,
    pub exit: bool,
    scripts_in_progress: HashSet<PathBuf>,
}

impl<W: Write> App<W> {
    pub fn new(registry: VehicleRegistry, out: W) -> Self {
        Self {
            registry,
            out,
            exit: false,
            scripts_in_progress: HashSet::new(),
        }
    }

    /// Command loop over one input source. Prompts are printed when `interactive`.
    pub fn run<R: BufRead>(&mut self, input: &mut LineReader<R>, interactive: bool) -> io::Result<()> {
        if interactive {
            writeln!(self.out, "Type 'help' for the list of commands.")?;
        }

        while !self.exit {
            if interactive {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }

            let Some(line) = input.next_line()? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.execute_line(line, input)?;
        }
        Ok(())
    }

    /// Dispatch one command line. Field prompts read from `input`.
    pub fn execute_line<R: BufRead>(&mut self, line: &str, input: &mut LineReader<R>) -> io::Result<()> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(());
        };
        let args: Vec<&str> = parts.collect();
        debug!("command '{}' args={:?}", command, args);

        match command.to_lowercase().as_str() {
            "help" => writeln!(self.out, "{}", HELP),
            "info" => writeln!(self.out, "{}", self.registry.info()),
            "show" => self.show(),
            "add" => self.add(input),
            "update" => self.update(&args, input),
            "remove_by_id" => self.remove_by_id(&args),
            "clear" => {
                self.registry.clear();
                writeln!(self.out, "Collection cleared")
            }
            "save" => self.save(),
            "execute_script" => self.execute_script(&args),
            "exit" => {
                self.exit = true;
                writeln!(self.out, "Bye")
            }
            "remove_last" => self.remove_last(),
            "remove_lower" => self.remove_lower(input),
            "sort" => {
                self.registry.sort();
                writeln!(self.out, "Collection sorted")
            }
            "sum_of_capacity" => {
                writeln!(self.out, "Sum of capacity: {}", self.registry.sum_of_capacity())
            }
            "filter_by_capacity" => self.filter_by_capacity(&args),
            "filter_less_than_type" => self.filter_less_than_type(&args),
            _ => writeln!(self.out, "Unknown command. Type 'help' for the list of commands."),
        }
    }

    fn show(&mut self) -> io::Result<()> {
        if self.registry.show().is_empty() {
            return writeln!(self.out, "Collection is empty");
        }
        for vehicle in self.registry.show() {
            writeln!(self.out, "{}", vehicle)?;
        }
        Ok(())
    }

    fn add<R: BufRead>(&mut self, input: &mut LineReader<R>) -> io::Result<()> {
        let Some(draft) = read_draft(input, &mut self.out)? else {
            return writeln!(self.out, "Input ended, nothing added");
        };
        match self.registry.add(draft) {
            Ok(id) => writeln!(self.out, "Element added with id {}", id),
            Err(err) => writeln!(self.out, "Error: {}", err),
        }
    }

    fn update<R: BufRead>(&mut self, args: &[&str], input: &mut LineReader<R>) -> io::Result<()> {
        let Some(id) = self.parse_id(args)? else {
            return Ok(());
        };
        if !self.registry.contains_id(id) {
            return writeln!(self.out, "No element with id {}", id);
        }

        let Some(draft) = read_draft(input, &mut self.out)? else {
            return writeln!(self.out, "Input ended, nothing updated");
        };
        match self.registry.update(id, draft) {
            Ok(true) => writeln!(self.out, "Element {} updated", id),
            Ok(false) => writeln!(self.out, "No element with id {}", id),
            Err(err) => writeln!(self.out, "Error: {}", err),
        }
    }

    fn remove_by_id(&mut self, args: &[&str]) -> io::Result<()> {
        let Some(id) = self.parse_id(args)? else {
            return Ok(());
        };
        if self.registry.remove_by_id(id) {
            writeln!(self.out, "Element {} removed", id)
        } else {
            writeln!(self.out, "No element with id {}", id)
        }
    }

    fn save(&mut self) -> io::Result<()> {
        match self.registry.save() {
            Ok(()) => writeln!(
                self.out,
                "Collection saved to {}",
                self.registry.path().display()
            ),
            Err(err) => writeln!(self.out, "Error: {}", err),
        }
    }

    fn remove_last(&mut self) -> io::Result<()> {
        match self.registry.remove_last() {
            Some(vehicle) => writeln!(self.out, "Removed last element (id {})", vehicle.id()),
            None => writeln!(self.out, "Collection is empty"),
        }
    }

    fn remove_lower<R: BufRead>(&mut self, input: &mut LineReader<R>) -> io::Result<()> {
        writeln!(self.out, "Enter the element to compare with:")?;
        let Some(reference) = read_draft(input, &mut self.out)? else {
            return writeln!(self.out, "Input ended, nothing removed");
        };
        let removed = self.registry.remove_lower(&reference);
        writeln!(self.out, "Removed elements: {}", removed)
    }

    fn filter_by_capacity(&mut self, args: &[&str]) -> io::Result<()> {
        let Some(raw) = args.first() else {
            return writeln!(self.out, "Specify a capacity value");
        };
        let Ok(capacity) = raw.parse::<f64>() else {
            return writeln!(self.out, "capacity must be a number");
        };

        let found = self.registry.filter_by_capacity(capacity);
        if found.is_empty() {
            return writeln!(self.out, "No elements with capacity = {}", capacity);
        }
        write_listing(&mut self.out, &found)
    }

    fn filter_less_than_type(&mut self, args: &[&str]) -> io::Result<()> {
        let Some(raw) = args.first() else {
            return writeln!(self.out, "Specify a type ({})", VehicleType::variants());
        };
        let vehicle_type = match VehicleType::parse_lenient(raw) {
            Ok(vehicle_type) => vehicle_type,
            Err(err) => return writeln!(self.out, "Error: {}", err),
        };

        let found = self.registry.filter_less_than_type(vehicle_type);
        if found.is_empty() {
            return writeln!(self.out, "No elements with type lower than {}", vehicle_type);
        }
        write_listing(&mut self.out, &found)
    }

    fn execute_script(&mut self, args: &[&str]) -> io::Result<()> {
        let Some(name) = args.first().copied() else {
            return writeln!(self.out, "Specify a script file");
        };

        let path = PathBuf::from(name);
        let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if self.scripts_in_progress.contains(&key) {
            return writeln!(
                self.out,
                "Error: recursion detected, script {} is already running",
                name
            );
        }

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) => return writeln!(self.out, "Cannot open script {}: {}", name, err),
        };

        self.scripts_in_progress.insert(key.clone());
        writeln!(self.out, "Running script: {}", name)?;
        let result = self.run_script(name, &mut LineReader::new(BufReader::new(file)));
        self.scripts_in_progress.remove(&key);
        result?;

        writeln!(self.out, "Script {} finished", name)
    }

    fn run_script<R: BufRead>(&mut self, name: &str, reader: &mut LineReader<R>) -> io::Result<()> {
        while !self.exit {
            let Some(line) = reader.next_line()? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            writeln!(self.out, "[{}:{}] {}", name, reader.line_number(), line)?;
            self.execute_line(line, reader)?;
        }
        Ok(())
    }

    /// `Ok(None)` after telling the user what was wrong
    fn parse_id(&mut self, args: &[&str]) -> io::Result<Option<VehicleId>> {
        let Some(raw) = args.first() else {
            writeln!(self.out, "Specify the element id")?;
            return Ok(None);
        };
        match raw.parse::<VehicleId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.out, "id must be a positive integer")?;
                Ok(None)
            }
        }
    }
}

fn write_listing<W: Write>(out: &mut W, vehicles: &[&Vehicle]) -> io::Result<()> {
    writeln!(out, "Found elements: {}", vehicles.len())?;
    for vehicle in vehicles {
        writeln!(out, "{}", vehicle)?;
    }
    Ok(())
}
