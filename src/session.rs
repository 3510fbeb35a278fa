use crate::converter::{Converter, MAX_FRACTIONAL_PLACES};
use crate::error::ConvertError;
use crate::table;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    From,
    To,
}

// everything the terminal front end edits and displays
pub struct State {
    pub converter: Converter,
    pub from: String,
    pub to: String,
    pub field: Field,
    pub command: Option<String>,
    pub result: Option<Result<String, ConvertError>>,
    pub message: Option<String>,
    pub table_path: Option<String>,
    pub cached_display: Option<String>,
    pub exiting: bool,
}

impl State {
    pub fn new(converter: Converter, table_path: Option<String>) -> Self {
        Self {
            converter,
            from: String::new(),
            to: String::new(),
            field: Field::From,
            command: None,
            result: None,
            message: None,
            table_path,
            cached_display: None,
            exiting: false,
        }
    }

    pub fn display(&mut self) -> String {
        if let Some(command) = &self.command {
            return format!(":{command}");
        }
        if let Some(display) = &self.cached_display {
            return display.clone();
        }
        let (from, to) = match self.field {
            Field::From => (format!("[{}]", self.from), self.to.clone()),
            Field::To => (self.from.clone(), format!("[{}]", self.to)),
        };
        let mut display = format!("{from} -> {to}");
        match &self.result {
            Some(Ok(value)) => display += format!(" = {value}").as_str(),
            Some(Err(e)) => display += format!(" ! {e}").as_str(),
            None => {}
        }
        if let Some(message) = &self.message {
            display += format!("  ({message})").as_str();
        }
        self.cached_display = Some(display.clone());
        display
    }

    fn editing(&mut self) -> &mut String {
        match self.field {
            Field::From => &mut self.from,
            Field::To => &mut self.to,
        }
    }

    fn invalidate(&mut self) {
        self.result = None;
        self.cached_display = None;
    }

    pub fn enter_command_entry(&mut self, command: String) {
        self.command = Some(command);
    }

    pub fn enter_field_entry(&mut self) {
        self.command = None;
        self.cached_display = None;
    }

    pub fn switch_field(&mut self) {
        self.field = match self.field {
            Field::From => Field::To,
            Field::To => Field::From,
        };
        self.cached_display = None;
    }

    pub fn type_string(&mut self, text: &str) {
        let text = text.replace('\n', "");
        if let Some(command) = self.command.as_mut() {
            *command += text.as_str();
            return;
        }
        if let Some(rest) = text.strip_prefix(':') {
            self.command = Some(String::new());
            self.type_string(rest);
            return;
        }
        *self.editing() += text.as_str();
        self.message = None;
        self.invalidate();
    }

    pub fn delete_one(&mut self) {
        if let Some(command) = self.command.as_mut() {
            if command.pop().is_none() {
                self.command = None;
            }
        } else {
            self.editing().pop();
            self.invalidate();
        }
        self.cached_display = None;
    }

    pub fn convert(&mut self) {
        let result = self.converter.convert(&self.from, &self.to);
        if let Err(e) = &result {
            info!(from = %self.from, to = %self.to, error = %e, "conversion failed");
        }
        self.result = Some(result);
        self.cached_display = None;
    }

    pub fn execute_command(&mut self) {
        let command = self.command.clone().unwrap_or_default();
        self.message = None;
        match command.trim() {
            // single string commands with no arguments
            "q" | "quit" | "exit" => self.exiting = true,
            "s" | "swap" => {
                std::mem::swap(&mut self.from, &mut self.to);
                if self.result.is_some() {
                    self.convert();
                }
            }
            "c" | "clear" => {
                self.from.clear();
                self.to.clear();
                self.field = Field::From;
                self.result = None;
            }
            "" => {} // skip this case before we do any other logic
            _ => {
                let (name, rest) = command.trim().split_once(' ').unwrap_or((command.trim(), ""));
                let rest = rest.trim();
                match name {
                    "p" | "places" => match rest.parse::<u32>() {
                        Ok(places) if places > MAX_FRACTIONAL_PLACES => {
                            self.message = Some(format!("at most {MAX_FRACTIONAL_PLACES} places"));
                        }
                        Ok(places) => {
                            self.converter.set_fractional_places(places);
                            if self.result.is_some() {
                                self.convert();
                            }
                        }
                        Err(_) => self.message = Some(format!("not a number: {rest}")),
                    },
                    "r" | "read" => {
                        let path = if rest.is_empty() {
                            self.table_path.clone()
                        } else {
                            Some(rest.to_owned())
                        };
                        match path {
                            Some(path) => self.reload(path),
                            None => self.message = Some("no table path".to_owned()),
                        }
                    }
                    _ => self.message = Some(format!("unknown command: {name}")),
                }
            }
        }
        self.enter_field_entry();
    }

    fn reload(&mut self, path: String) {
        match table::load(&path) {
            Ok(edges) => {
                let places = self.converter.fractional_places();
                self.converter = Converter::new(edges).with_fractional_places(places);
                self.message = Some(format!("{} units from {path}", self.converter.unit_count()));
                self.table_path = Some(path);
                self.result = None;
            }
            Err(e) => {
                warn!(%path, error = %e, "reload failed");
                self.message = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Edge;

    fn state() -> State {
        let rows = [("km", "m", "1000"), ("h", "min", "60"), ("min", "s", "60")];
        let converter = Converter::new(
            rows.iter()
                .map(|(from, to, ratio)| Edge::parse(*from, *to, ratio).unwrap()),
        );
        State::new(converter, None)
    }

    fn run(state: &mut State, command: &str) {
        state.type_string(&format!(":{command}"));
        state.execute_command();
    }

    #[test]
    fn typing_fills_active_field() {
        let mut state = state();
        state.type_string("m/s");
        state.switch_field();
        state.type_string("km/h");
        assert_eq!(state.from, "m/s");
        assert_eq!(state.to, "km/h");
        assert_eq!(state.display(), "m/s -> [km/h]");
    }

    #[test]
    fn convert_shows_result() {
        let mut state = state();
        state.type_string("m/s");
        state.switch_field();
        state.type_string("km/h");
        state.convert();
        assert_eq!(state.result, Some(Ok("3.6".to_owned())));
        assert_eq!(state.display(), "m/s -> [km/h] = 3.6");

        // editing drops the stale result
        state.delete_one();
        assert_eq!(state.result, None);
        assert_eq!(state.to, "km/");
    }

    #[test]
    fn errors_are_displayed() {
        let mut state = state();
        state.type_string("parsec");
        state.convert();
        assert_eq!(state.display(), "[parsec] ->  ! Unknown measure: parsec");
    }

    #[test]
    fn command_mode() {
        let mut state = state();
        state.type_string(":qu");
        assert_eq!(state.display(), ":qu");
        state.delete_one();
        state.delete_one();
        state.delete_one();
        assert_eq!(state.command, None);

        run(&mut state, "quit");
        assert!(state.exiting);
        assert_eq!(state.command, None);
    }

    #[test]
    fn swap_and_places() {
        let mut state = state();
        state.type_string("min");
        state.switch_field();
        state.type_string("h");
        state.convert();
        assert_eq!(state.result, Some(Ok("0.016666666666667".to_owned())));

        run(&mut state, "p 2");
        assert_eq!(state.result, Some(Ok("0.02".to_owned())));

        run(&mut state, "swap");
        assert_eq!(state.from, "h");
        assert_eq!(state.result, Some(Ok("60".to_owned())));

        run(&mut state, "places lots");
        assert_eq!(state.message.as_deref(), Some("not a number: lots"));
    }

    #[test]
    fn places_over_limit_are_rejected() {
        let mut state = state();
        run(&mut state, "p 999999999");
        assert_eq!(state.message.as_deref(), Some("at most 128 places"));
        assert_eq!(state.converter.fractional_places(), 15);
    }

    #[test]
    fn clear_and_unknown_commands() {
        let mut state = state();
        state.type_string("km");
        run(&mut state, "clear");
        assert!(state.from.is_empty());
        assert_eq!(state.field, Field::From);

        run(&mut state, "frobnicate now");
        assert_eq!(state.message.as_deref(), Some("unknown command: frobnicate"));

        run(&mut state, "read");
        assert_eq!(state.message.as_deref(), Some("no table path"));
    }
}
