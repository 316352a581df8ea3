#![forbid(unsafe_code)]

//! `dialog` binary entry point.

use std::io::{self, Write};
use std::process;

use ndialog::cli::{self, Command, FAILURE};
use ndialog::{DialogConfig, Session, TerminalSurface};

fn main() {
    let command = match cli::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("dialog: {err}");
            eprintln!("Run with --help for usage information.");
            process::exit(1);
        }
    };
    let inv = match command {
        Command::Help => {
            println!("{}", cli::HELP_TEXT);
            return;
        }
        Command::Version => {
            println!("dialog {}", cli::VERSION);
            return;
        }
        Command::Run(inv) => inv,
    };

    #[cfg(feature = "tracing-json")]
    if let Err(err) = ndialog_core::logging::init_json(io::stderr) {
        eprintln!("dialog: logging disabled: {err}");
    }

    let mut code = 0;
    if let Some(args) = &inv.dialog {
        let config = DialogConfig::from_env();
        let mut session = match Session::<TerminalSurface>::open(&config) {
            Ok(session) => session,
            Err(err) => {
                eprintln!("dialog: cannot open the terminal: {err}");
                process::exit(FAILURE);
            }
        };
        let outcome = cli::run_box(&mut session, &inv, args);
        // Restore the terminal before printing results.
        drop(session);
        if let Some(text) = outcome.output {
            println!("{}", text.trim_end_matches('\n'));
        }
        code = outcome.code;
    }

    if inv.clear {
        let mut stdout = io::stdout();
        let cleared = crossterm::execute!(
            stdout,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
            crossterm::cursor::MoveTo(0, 0)
        );
        if cleared.and_then(|()| stdout.flush()).is_err() {
            code = code.max(1);
        }
    }
    process::exit(code);
}
