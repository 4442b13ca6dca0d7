//! # Interactive Menu
//!
//! ```text
//! MAIN MENU ─┬─ [A] View Data ──────┬─ [1] reviews for a park
//!            │                      ├─ [2] count by park and location
//!            │                      ├─ [3] average by park and year
//!            │                      └─ [4] average per park by location
//!            ├─ [B] Visualise Data ─┬─ [1] pie chart
//!            │                      ├─ [2] top locations bar chart
//!            │                      └─ [3] monthly bar chart
//!            ├─ [C] Export Data ────┬─ [1] TXT  [2] CSV  [3] JSON
//!            └─ [X] Exit
//! ```
//!
//! Every submenu has `[X]` to return. End of input at any prompt leaves the
//! menu cleanly.

use crate::cli::{
    export_summaries, group_thousands, monthly_chart, pie_chart, top_locations_chart,
    write_location_averages, write_reviews, write_year_average,
};
use crate::config::Config;
use parkreview_core::{
    Dataset, ExportFormat, Fragment, ReviewError, average_rating_for_year,
    count_by_park_and_location, park_location_averages, parse_year, reviews_for_park,
};
use std::io::{BufRead, Write};

const RULE_WIDTH: usize = 60;

/// What a submenu asks of the main loop when it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Show the main menu again.
    Back,
    /// Input ended; leave the program.
    Quit,
}

/// Menu session over a loaded dataset.
pub struct Menu<'a, R, W> {
    dataset: &'a Dataset,
    config: &'a Config,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Create a menu reading choices from `input` and writing to `output`.
    pub fn new(dataset: &'a Dataset, config: &'a Config, input: R, output: W) -> Self {
        Self {
            dataset,
            config,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<(), ReviewError> {
        writeln!(self.output, "Data loaded successfully!")?;
        writeln!(
            self.output,
            "Total number of reviews: {}",
            group_thousands(self.dataset.len())
        )?;

        loop {
            self.print_menu(
                "MAIN MENU",
                &[
                    ("A", "View Data"),
                    ("B", "Visualise Data"),
                    ("C", "Export Data"),
                    ("X", "Exit"),
                ],
            )?;

            let Some(choice) = self.read_choice()? else {
                return Ok(());
            };

            let flow = match choice.as_str() {
                "A" => {
                    writeln!(self.output, "You selected: [A] View Data")?;
                    self.view_menu()?
                }
                "B" => {
                    writeln!(self.output, "You selected: [B] Visualise Data")?;
                    self.visualise_menu()?
                }
                "C" => {
                    writeln!(self.output, "You selected: [C] Export Data")?;
                    self.export_menu()?
                }
                "X" => {
                    writeln!(
                        self.output,
                        "Thank you for using the Park Reviews Analysis System!"
                    )?;
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                other => {
                    self.error(&format!(
                        "Invalid choice '{}'. Please enter A, B, C, or X.",
                        other
                    ))?;
                    Flow::Back
                }
            };

            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    // =========================================================================
    // SUBMENUS
    // =========================================================================

    fn view_menu(&mut self) -> Result<Flow, ReviewError> {
        loop {
            self.print_menu(
                "VIEW DATA MENU",
                &[
                    ("1", "Display all reviews for a specific park"),
                    ("2", "Count reviews by park and location"),
                    ("3", "Average rating by park and year"),
                    ("4", "Average score per park by reviewer location"),
                    ("X", "Return to main menu"),
                ],
            )?;

            let Some(choice) = self.read_choice()? else {
                return Ok(Flow::Quit);
            };

            let flow = match choice.as_str() {
                "1" => self.show_reviews()?,
                "2" => self.show_count()?,
                "3" => self.show_year_average()?,
                "4" => {
                    writeln!(
                        self.output,
                        "Calculating average scores per park by location..."
                    )?;
                    let averages = park_location_averages(self.dataset);
                    write_location_averages(
                        &mut self.output,
                        &averages,
                        Some(self.config.location_preview),
                    )?;
                    Flow::Back
                }
                "X" => return Ok(Flow::Back),
                other => {
                    self.error(&format!(
                        "Invalid choice '{}'. Please enter 1-4 or X.",
                        other
                    ))?;
                    Flow::Back
                }
            };

            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn visualise_menu(&mut self) -> Result<Flow, ReviewError> {
        let width = self.config.chart_width;
        loop {
            self.print_menu(
                "VISUALISE DATA MENU",
                &[
                    ("1", "Pie chart - Reviews per park"),
                    ("2", "Bar chart - Top locations by rating"),
                    ("3", "Bar chart - Average rating by month"),
                    ("X", "Return to main menu"),
                ],
            )?;

            let Some(choice) = self.read_choice()? else {
                return Ok(Flow::Quit);
            };

            match choice.as_str() {
                "1" => {
                    writeln!(self.output, "Generating pie chart...")?;
                    writeln!(self.output)?;
                    write!(self.output, "{}", pie_chart(self.dataset, width))?;
                }
                "2" | "3" => {
                    let Some(park) = self.prompt_fragment("Enter park name: ")? else {
                        return Ok(Flow::Quit);
                    };
                    let chart = if choice == "2" {
                        top_locations_chart(self.dataset, &park, self.config.top_n, width)
                    } else {
                        monthly_chart(self.dataset, &park, width)
                    };
                    match chart {
                        Some(chart) => {
                            writeln!(self.output, "Generating bar chart...")?;
                            writeln!(self.output)?;
                            write!(self.output, "{}", chart)?;
                        }
                        None => writeln!(self.output, "No data found for park: {}", park)?,
                    }
                }
                "X" => return Ok(Flow::Back),
                other => {
                    self.error(&format!(
                        "Invalid choice '{}'. Please enter 1-3 or X.",
                        other
                    ))?;
                }
            }
        }
    }

    fn export_menu(&mut self) -> Result<Flow, ReviewError> {
        let target = self.config.export_target();
        loop {
            self.print_menu(
                "EXPORT DATA MENU",
                &[
                    ("1", "Export as TXT"),
                    ("2", "Export as CSV"),
                    ("3", "Export as JSON"),
                    ("X", "Return to main menu"),
                ],
            )?;

            let Some(choice) = self.read_choice()? else {
                return Ok(Flow::Quit);
            };

            let format = match choice.as_str() {
                "1" => ExportFormat::Txt,
                "2" => ExportFormat::Csv,
                "3" => ExportFormat::Json,
                "X" => return Ok(Flow::Back),
                other => {
                    self.error(&format!(
                        "Invalid choice '{}'. Please enter 1-3 or X.",
                        other
                    ))?;
                    continue;
                }
            };

            match export_summaries(self.dataset, format, &target) {
                Ok(path) => {
                    writeln!(self.output, "Successfully exported to {}", path.display())?;
                }
                Err(e) => {
                    tracing::warn!(format = %format, "Export failed: {}", e);
                    self.error(&format!("Export failed: {}", e))?;
                }
            }
        }
    }

    // =========================================================================
    // VIEW ACTIONS
    // =========================================================================

    fn show_reviews(&mut self) -> Result<Flow, ReviewError> {
        let Some(park) = self.prompt_fragment("Enter park name: ")? else {
            return Ok(Flow::Quit);
        };
        let reviews = reviews_for_park(self.dataset, &park);
        write_reviews(&mut self.output, &reviews, None)?;
        Ok(Flow::Back)
    }

    fn show_count(&mut self) -> Result<Flow, ReviewError> {
        let Some(park) = self.prompt_fragment("Enter park name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(location) = self.prompt_fragment("Enter reviewer location: ")? else {
            return Ok(Flow::Quit);
        };
        let count = count_by_park_and_location(self.dataset, &park, &location);
        writeln!(
            self.output,
            "\nNumber of reviews for {} from {}: {}",
            park, location, count
        )?;
        Ok(Flow::Back)
    }

    fn show_year_average(&mut self) -> Result<Flow, ReviewError> {
        let Some(park) = self.prompt_fragment("Enter park name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(year) = self.prompt_year()? else {
            return Ok(Flow::Quit);
        };
        let average = average_rating_for_year(self.dataset, &park, year);
        write_year_average(&mut self.output, &park, year, average)?;
        Ok(Flow::Back)
    }

    // =========================================================================
    // INPUT / OUTPUT
    // =========================================================================

    fn print_menu(&mut self, title: &str, items: &[(&str, &str)]) -> Result<(), ReviewError> {
        let rule = "-".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{}", rule)?;
        writeln!(self.output, "  {}", title)?;
        writeln!(self.output, "{}", rule)?;
        for (key, label) in items {
            writeln!(self.output, "  [{}] {}", key, label)?;
        }
        writeln!(self.output, "{}", rule)?;
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<(), ReviewError> {
        writeln!(self.output, "\nERROR: {}\n", message)?;
        Ok(())
    }

    /// One trimmed line, or `None` at end of input. Invalid UTF-8 is replaced.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ReviewError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        // Undecodable bytes become U+FFFD and fail validation like any other answer.
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    fn read_choice(&mut self) -> Result<Option<String>, ReviewError> {
        Ok(self
            .read_line("\nPlease enter your choice: ")?
            .map(|c| c.to_uppercase()))
    }

    /// Re-prompt until a non-blank fragment is entered.
    fn prompt_fragment(&mut self, prompt: &str) -> Result<Option<Fragment>, ReviewError> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match Fragment::new(&line) {
                Ok(fragment) => return Ok(Some(fragment)),
                Err(e) => self.error(&e.to_string())?,
            }
        }
    }

    /// Re-prompt until a four-digit year is entered.
    fn prompt_year(&mut self) -> Result<Option<u16>, ReviewError> {
        loop {
            let Some(line) = self.read_line("Enter year (YYYY): ")? else {
                return Ok(None);
            };
            match parse_year(&line) {
                Ok(year) => return Ok(Some(year)),
                Err(e) => self.error(&e.to_string())?,
            }
        }
    }
}
