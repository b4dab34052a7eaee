use std::io::{BufRead, Write};

use tracing::error;

use crate::engine::{EngineError, ReportGenerator};
use crate::report::ReportLevel;

const MENU: &str = "\
Select a report level:
  1. Level 1 - Dataset overview, KPIs and facts
  2. Level 2 - Level 1 plus sales trend charts
  3. Level 3 - Level 2 plus distributions, monthly KPIs and outliers
  4. Quit";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Choice {
    Report(ReportLevel),
    Quit
}

/// Menu input to a choice, ignoring surrounding whitespace and case.
pub fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim().to_lowercase().as_str() {
        "1" => Some(Choice::Report(ReportLevel::Overview)),
        "2" => Some(Choice::Report(ReportLevel::Trends)),
        "3" => Some(Choice::Report(ReportLevel::Distributions)),
        "4" | "q" | "quit" | "exit" => Some(Choice::Quit),
        _ => None
    }
}

/// Prompts until the user quits or input ends. A failed report ends the session with its error.
pub fn run_menu<G, R, W>(generator: &G, mut input: R, mut output: W) -> Result<(), EngineError>
where
    G: ReportGenerator,
    R: BufRead,
    W: Write
{
    loop {
        writeln!(output, "\n{MENU}")?;
        write!(output, "Enter your choice: ")?;
        output.flush()?;

        let mut line = String::new();

        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        match parse_choice(&line) {
            Some(Choice::Quit) => break,
            Some(Choice::Report(level)) => {
                writeln!(output, "Generating {}...", level.subtitle())?;

                let report = generator.generate(level).inspect_err(|failure| {
                    error!("{} failed: {failure}", level.subtitle());
                })?;

                writeln!(output, "Report written to {} ({} pages)", report.path.display(), report.pages)?;
            }
            None => writeln!(output, "Invalid choice '{}'. Please enter 1, 2, 3 or 4.", line.trim())?
        }
    }

    writeln!(output, "Goodbye!")?;
    output.flush()?;

    Ok(())
}
