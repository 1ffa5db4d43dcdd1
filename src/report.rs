use std::{io::Write, path::Path};

use crossterm::style::{style, Color, StyledContent, Stylize};
use dylib_info::{Error, Inspection};

fn paint(enabled: bool, text: &str, color: Color) -> StyledContent<&str> {
    if enabled {
        text.with(color).bold()
    } else {
        style(text)
    }
}

/// Renders inspections as an indented listing on `out` and every error or
/// issue on `err`.
pub struct Reporter<O, E> {
    out: O,
    err: E,
    color: bool,
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, color: bool) -> Self {
        Self { out, err, color }
    }

    pub fn file(
        &mut self,
        path: &Path,
        result: &Result<Inspection, Error>,
    ) -> std::io::Result<()> {
        let name = path.display();
        writeln!(self.out, "{}{}", paint(self.color, "- filename: ", Color::Blue), name)?;
        writeln!(self.out, "{}", paint(self.color, "  info:", Color::Blue))?;

        let inspection = match result {
            Ok(inspection) => inspection,
            Err(error) => {
                let label = paint(self.color, "error:", Color::Red);
                writeln!(self.err, "{label} {name}: {error}")?;
                return writeln!(self.out);
            }
        };

        for issue in &inspection.issues {
            let warning = paint(self.color, "warning:", Color::Yellow);
            match issue.slice {
                Some(index) => {
                    writeln!(self.err, "{warning} {name} (slice {index}): {}", issue.error)?
                }
                None => writeln!(self.err, "{warning} {name}: {}", issue.error)?,
            }
        }

        for record in &inspection.records {
            writeln!(
                self.out,
                "{}{}",
                paint(self.color, "  - arch: ", Color::Green),
                record.architecture
            )?;
            if let Some(install_name) = &record.install_name {
                writeln!(
                    self.out,
                    "{}{}",
                    paint(self.color, "    dylib_id: ", Color::Green),
                    install_name
                )?;
            }
            writeln!(self.out, "{}", paint(self.color, "    deps:", Color::Green))?;
            for dependency in &record.dependencies {
                writeln!(self.out, "    - {dependency}")?;
            }
            writeln!(self.out, "{}", paint(self.color, "    rpaths:", Color::Green))?;
            for search_path in &record.search_paths {
                writeln!(self.out, "    - {search_path}")?;
            }
        }

        writeln!(self.out)
    }
}
