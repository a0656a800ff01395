use std::io::{self, Write};

use kham_types::DisplayRow;

/// Draws filter results
pub trait Presenter: Send {
    fn show(&mut self, rows: &[DisplayRow], total: usize, relayout: bool) -> io::Result<()>;

    fn status(&mut self, message: &str) -> io::Result<()>;
}

/// Numbered two-column listing on a terminal
pub struct ConsolePresenter<W> {
    out: W,
    headword_width: usize,
}

impl<W: Write + Send> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            headword_width: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    fn show(&mut self, rows: &[DisplayRow], total: usize, relayout: bool) -> io::Result<()> {
        // width is only recomputed for longer queries, short ones reuse the last layout
        if relayout {
            self.headword_width = rows
                .iter()
                .map(|row| row.headword.chars().count())
                .max()
                .unwrap_or(0);
        }

        let number_width = rows.len().max(1).to_string().len();
        let indent = number_width + 2 + self.headword_width + 2;

        writeln!(self.out)?;
        for (i, row) in rows.iter().enumerate() {
            let mut lines = row.translation.lines();
            let first = lines.next().unwrap_or_default();
            let pad = self
                .headword_width
                .saturating_sub(row.headword.chars().count());

            writeln!(
                self.out,
                "{:>number_width$}  {}{}  {}",
                i + 1,
                row.headword,
                " ".repeat(pad),
                first
            )?;
            for line in lines {
                writeln!(self.out, "{}{}", " ".repeat(indent), line)?;
            }
        }

        if total > rows.len() {
            writeln!(self.out, "({} of {} matches shown)", rows.len(), total)?;
        } else if total == 0 {
            writeln!(self.out, "(no matches)")?;
        }
        self.out.flush()
    }

    fn status(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "-- {message}")?;
        self.out.flush()
    }
}
