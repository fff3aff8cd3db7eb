//! Console table of the found trains.

use std::io::{self, Write};
use std::{fmt, fmt::Display};

use crate::color::strip_ansi;
use crate::tickets::TicketsCollector;

const HEADERS: [&str; 12] = [
    "车次", "车站", "时间", "历时", "商务", "一等", "二等", "软卧", "硬卧", "软座", "硬座", "无座",
];

const NOT_FOUND_HEADER: &str = "Sorry,";
const NOT_FOUND_TEXT: &str = "Train not find";

/// A table with a header, cells may hold several lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given column names.
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: vec![],
        }
    }

    /// Makes the table of the trains passing the filter.
    ///
    /// If the server found nothing, the table tells so in a single column.
    pub fn from_collector(collector: &TicketsCollector) -> Self {
        if collector.is_empty() {
            let mut table = Table::new(&[NOT_FOUND_HEADER]);
            table.add_row(&[NOT_FOUND_TEXT]);
            return table;
        }

        let mut table = Table::new(&HEADERS);
        for ticket in collector.trains() {
            table.add_row(&ticket.cells());
        }
        table
    }

    /// Adds a row, missing cells are left blank.
    pub fn add_row<S: AsRef<str>>(&mut self, cells: &[S]) {
        let mut row: Vec<String> = cells.iter().map(|c| c.as_ref().to_string()).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Returns the number of rows without the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| cell_width(h)).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell_width(cell));
            }
        }
        widths
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let widths = self.column_widths();

        let mut rule = String::from("+");
        for w in &widths {
            rule.push_str(&"-".repeat(w + 2));
            rule.push('+');
        }

        writeln!(f, "{}", rule)?;
        write_row(f, &self.headers, &widths)?;
        writeln!(f, "{}", rule)?;
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }
        writeln!(f, "{}", rule)
    }
}

fn write_row(f: &mut fmt::Formatter, cells: &[String], widths: &[usize]) -> fmt::Result {
    let lines: Vec<Vec<&str>> = cells.iter().map(|c| c.split('\n').collect()).collect();
    let height = lines.iter().map(Vec::len).max().unwrap_or(1);

    for i in 0..height {
        write!(f, "|")?;
        for (cell, w) in lines.iter().zip(widths) {
            let line = cell.get(i).copied().unwrap_or("");
            let space = w - text_width(line);
            let left = space / 2;
            write!(
                f,
                " {}{}{} |",
                " ".repeat(left),
                line,
                " ".repeat(space - left)
            )?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// Writes the table of the trains.
pub fn render<W: Write>(collector: &TicketsCollector, out: &mut W) -> io::Result<()> {
    let table = Table::from_collector(collector);
    debug!("{} rows of {} trains shown", table.len(), collector.len());
    write!(out, "{}", table)
}

// Width of the widest line of the cell.
fn cell_width(cell: &str) -> usize {
    cell.split('\n').map(text_width).max().unwrap_or(0)
}

// Width of the text in the terminal, colors take no place.
fn text_width(text: &str) -> usize {
    strip_ansi(text).chars().map(char_width).sum()
}

fn char_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6 => 2,
        _ if c.is_control() => 0,
        _ => 1,
    }
}
