//! REPL command parsing.
//!
//! A line is either a number (trigger the numbered action of the rendered
//! page), a filter input such as `search ada`, a form submission written as
//! `key=value` pairs, or a host command like `go` or `html`.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};

use hcms_application::view::Action;
use hcms_application::{Field, Form, UiEvent};
use hcms_core::auth::{AdminCredentials, LoginCredentials};
use hcms_core::doctor::NewDoctor;
use hcms_core::patient::PatientSignup;
use hcms_core::route::Location;

/// Command words offered for completion.
pub const COMMANDS: &[&str] = &[
    "add-doctor",
    "book",
    "click",
    "close",
    "date",
    "exit",
    "go",
    "help",
    "html",
    "login",
    "prescribe",
    "quit",
    "scope",
    "search",
    "show",
    "signup",
    "specialty",
    "time",
    "today",
    "update",
];

pub const HELP: &str = "\
  <n>                         trigger action [n] of the page
  show                        render the current page again
  go <path>                   open a page, e.g. go /patientDashboard.html
  search|time|specialty <v>   doctor filters (empty value clears)
  date <YYYY-MM-DD> | today   doctor dashboard date
  scope all|upcoming|past     appointment date scope
  login admin|doctor|patient <user> <password>
  signup name= email= password= phone= address=
  add-doctor name= specialty= email= password= phone= slots=\"09:00 - 10:00,...\"
  book <date> <time>          confirm the open booking overlay
  update <date> <time>        submit the appointment update form
  prescribe medication= dosage= notes=
  close                       close the open dialog
  html <file>                 write the page as an HTML document
  quit                        leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Show,
    Quit,
    Click(usize),
    Go(Location),
    Event(UiEvent),
    Export(PathBuf),
}

pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    if let Ok(index) = line.parse::<usize>() {
        return Ok(Command::Click(index));
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "help" | "?" => Command::Help,
        "show" => Command::Show,
        "quit" | "exit" => Command::Quit,
        "click" => Command::Click(
            rest.parse()
                .map_err(|_| anyhow!("click expects an action number"))?,
        ),
        "go" => Command::Go(
            Location::parse(rest).ok_or_else(|| anyhow!("Unknown page: {}", rest))?,
        ),
        "html" if !rest.is_empty() => Command::Export(PathBuf::from(rest)),
        "search" => input(Field::Search, rest),
        "time" => input(Field::Time, rest),
        "specialty" => input(Field::Specialty, rest),
        "date" => input(Field::Date, rest),
        "scope" => input(Field::Scope, rest),
        "today" => Command::Event(UiEvent::Click(Action::ShowToday)),
        "close" => Command::Event(UiEvent::Click(Action::CloseModal)),
        "login" => submit(login(&split_args(rest)?)?),
        "signup" => {
            let mut f = fields(rest, &["name", "email", "password", "phone", "address"])?;
            submit(Form::PatientSignup(PatientSignup {
                name: take(&mut f, "name"),
                email: take(&mut f, "email"),
                password: take(&mut f, "password"),
                phone: take(&mut f, "phone"),
                address: take(&mut f, "address"),
            }))
        }
        "add-doctor" => {
            let mut f = fields(rest, &["name", "specialty", "email", "password", "phone", "slots"])?;
            let availability = take(&mut f, "slots")
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            submit(Form::AddDoctor(NewDoctor {
                name: take(&mut f, "name"),
                specialty: take(&mut f, "specialty"),
                email: take(&mut f, "email"),
                password: take(&mut f, "password"),
                phone: take(&mut f, "phone"),
                availability,
            }))
        }
        "book" => {
            let (date, time) = date_and_time(rest);
            submit(Form::Booking { date, time })
        }
        "update" => {
            let (date, time) = date_and_time(rest);
            submit(Form::UpdateAppointment { date, time })
        }
        "prescribe" => {
            let mut f = fields(rest, &["medication", "dosage", "notes"])?;
            submit(Form::Prescription {
                medication: take(&mut f, "medication"),
                dosage: take(&mut f, "dosage"),
                notes: take(&mut f, "notes"),
            })
        }
        other => bail!("Unknown command: {} (type 'help')", other),
    };
    Ok(command)
}

fn input(field: Field, value: &str) -> Command {
    Command::Event(UiEvent::Input {
        field,
        value: value.to_string(),
    })
}

fn submit(form: Form) -> Command {
    Command::Event(UiEvent::Submit(form))
}

fn login(args: &[String]) -> Result<Form> {
    let [kind, user, password] = args else {
        bail!("usage: login admin|doctor|patient <user> <password>");
    };
    let credentials = LoginCredentials {
        email: user.clone(),
        password: password.clone(),
    };
    Ok(match kind.as_str() {
        "admin" => Form::AdminLogin(AdminCredentials {
            username: user.clone(),
            password: password.clone(),
        }),
        "doctor" => Form::DoctorLogin(credentials),
        "patient" => Form::PatientLogin(credentials),
        other => bail!("Unknown login kind: {}", other),
    })
}

/// First word is the date, the remainder the time slot label.
fn date_and_time(rest: &str) -> (String, String) {
    match rest.split_once(char::is_whitespace) {
        Some((date, time)) => (date.to_string(), time.trim().to_string()),
        None => (rest.to_string(), String::new()),
    }
}

/// Parses `key=value` pairs, rejecting keys outside `allowed`.
fn fields(rest: &str, allowed: &[&str]) -> Result<HashMap<String, String>> {
    split_args(rest)?
        .into_iter()
        .map(|arg| {
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected key=value, got '{}'", arg))?;
            if !allowed.contains(&key) {
                bail!("Unknown field '{}' (expected one of: {})", key, allowed.join(", "));
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

fn take(fields: &mut HashMap<String, String>, key: &str) -> String {
    fields.remove(key).unwrap_or_default()
}

/// Splits on whitespace, keeping double-quoted runs together.
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut started = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                started = true;
            }
            c if c.is_whitespace() && !quoted => {
                if started {
                    args.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if quoted {
        bail!("Unterminated quote");
    }
    if started {
        args.push(current);
    }
    Ok(args)
}
