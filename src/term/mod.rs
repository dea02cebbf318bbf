extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::mach::{Event, Listing, Runtime};
use crate::{error, lang::Error};
use ansi_term::Style;
use linefeed::{Interface, ReadResult, Signal};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn main() {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = main_loop(interrupted, std::env::args().nth(1)) {
        eprintln!("{}", error);
    }
}

fn main_loop(interrupted: Arc<AtomicBool>, filename: Option<String>) -> std::io::Result<()> {
    let mut runtime = Runtime::default();
    let command = Interface::new("VM64K")?;
    command.set_report_signal(Signal::Interrupt, true);
    let mut print_ready = true;

    if let Some(filename) = filename {
        info!("loading {}", filename);
        match load(&filename) {
            Ok(listing) => {
                runtime.set_listing(listing);
                runtime.enter("RUN");
            }
            Err(error) => print_error(&command, &error)?,
        }
    }

    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        };
        match runtime.execute(5000) {
            Event::Stopped => {
                if print_ready {
                    print_ready = false;
                    command.write_fmt(format_args!("READY.\n"))?;
                }
                let string = match command.read_line()? {
                    ReadResult::Input(string) => string,
                    ReadResult::Signal(Signal::Interrupt) => {
                        command.set_buffer("")?;
                        continue;
                    }
                    ReadResult::Signal(_) | ReadResult::Eof => break,
                };
                if runtime.enter(&string) {
                    command.add_history_unique(string);
                }
                if runtime.is_running() {
                    print_ready = true;
                }
            }
            Event::Errors(errors) => {
                for error in errors.iter() {
                    print_error(&command, error)?;
                }
                print_ready = true;
            }
            Event::Running => {}
            Event::Print(s) => {
                command.write_fmt(format_args!("{}\n", s))?;
            }
            Event::Load(s) => match load(&s) {
                Ok(listing) => runtime.set_listing(listing),
                Err(error) => print_error(&command, &error)?,
            },
            Event::Save(s) => {
                if let Err(error) = save(runtime.get_listing(), &s) {
                    print_error(&command, &error)?;
                }
            }
        }
    }
    Ok(())
}

fn print_error<T: linefeed::Terminal>(
    command: &Interface<T>,
    error: &Error,
) -> std::io::Result<()> {
    command.write_fmt(format_args!(
        "?{}\n",
        Style::new().bold().paint(error.to_string())
    ))
}

fn load(filename: &str) -> Result<Listing, Error> {
    let mut listing = Listing::default();
    let reader = match File::open(filename) {
        Ok(file) => BufReader::new(file),
        Err(error) => {
            let msg = error.to_string();
            match error.kind() {
                ErrorKind::NotFound => return Err(error!(FileNotFound; msg.as_str())),
                _ => return Err(error!(InternalError; msg.as_str())),
            }
        }
    };
    for (index, line) in reader.lines().enumerate() {
        match line {
            Err(error) => return Err(error!(InternalError; error.to_string().as_str())),
            Ok(line) => {
                if let Err(error) = listing.load_str(&line) {
                    return Err(error.in_line_number(Some(index + 1)));
                }
            }
        }
    }
    Ok(listing)
}

fn save(listing: Listing, filename: &str) -> Result<(), Error> {
    if listing.is_empty() {
        return Err(error!(IllegalFunctionCall; "NOTHING TO SAVE"));
    }
    let mut file = match File::create(filename) {
        Ok(file) => file,
        Err(error) => return Err(error!(InternalError; error.to_string().as_str())),
    };
    for line in listing.lines() {
        if let Err(error) = writeln!(file, "{}", line) {
            return Err(error!(InternalError; error.to_string().as_str()));
        }
    }
    Ok(())
}
