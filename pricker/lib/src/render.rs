//! Printing blocks as text.  Everything here is built on the public accessors of the blocks.
//!
//! Two formats are supported:
//! - [`Format::Text`], the format read by [`parse`](crate::parse)
//! - [`Format::Siril`], which can be fed to Siril-compatible provers

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use itertools::Itertools;

use crate::{Block, Call, Course, Six, Start, Touch};

/// The formats that blocks can be printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Text,
    Siril,
}

/// Options which modify how blocks are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Whether courses are printed with their course end (text format)
    pub course_end: bool,
    /// If set, Siril output stops after generating this many rows
    pub touch_rows: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            course_end: true,
            touch_rows: None,
        }
    }
}

/// Anything which can be printed in every [`Format`].
pub trait Print {
    fn print(&self, format: Format, options: &Options) -> String;
}

/// Prints a block.
///
/// # Example
/// ```
/// use pricker::{render, Method, Touch};
///
/// let touch = Touch::parse("2314567890E\ns2 3 (4)", Method::STEDMAN)?;
/// let course = touch.course(1)?;
/// assert_eq!(
///     render::print(course, render::Format::Text, &render::Options::default()),
///     "480735692E1  s2 3  (4 sixes)"
/// );
/// # Ok::<(), pricker::Error>(())
/// ```
pub fn print(block: &(impl Print + ?Sized), format: Format, options: &Options) -> String {
    block.print(format, options)
}

impl Print for Six {
    fn print(&self, format: Format, options: &Options) -> String {
        match format {
            Format::Text => self.last_row().to_string(),
            Format::Siril => {
                let mut remaining = options.touch_rows;
                let mut s = String::new();
                six_siril(self, &mut remaining, &mut s);
                s
            }
        }
    }
}

impl Print for Start {
    fn print(&self, format: Format, _options: &Options) -> String {
        match format {
            Format::Text => self.last_row().to_string(),
            Format::Siril => format!("+{}", self.changes().iter().join(".")),
        }
    }
}

impl Print for Course {
    fn print(&self, format: Format, options: &Options) -> String {
        match format {
            Format::Text => course_text(self, options.course_end),
            Format::Siril => {
                let mut remaining = options.touch_rows;
                course_siril(self, &mut remaining)
            }
        }
    }
}

impl Print for Touch {
    fn print(&self, format: Format, options: &Options) -> String {
        let mut s = String::new();
        match format {
            Format::Text => {
                s.push_str(&self.start().print(format, options));
                s.push('\n');
                for course in self.courses() {
                    s.push_str(&course_text(course, options.course_end));
                    s.push('\n');
                }
            }
            Format::Siril => {
                s.push_str(&self.start().print(format, options));
                s.push('\n');
                let mut remaining = options
                    .touch_rows
                    .map(|rows| rows.saturating_sub(self.start().estimate_rows()));
                for course in self.courses() {
                    if remaining == Some(0) {
                        break;
                    }
                    s.push_str(&course_siril(course, &mut remaining));
                }
            }
        }
        s
    }
}

fn course_text(course: &Course, course_end: bool) -> String {
    let calls = course.calls();
    let mut s = String::new();
    if course_end {
        s.push_str(&format!("{}  ", course.last_row()));
    }
    if calls.is_empty() {
        s.push('p');
    } else {
        let call_strings = calls
            .iter()
            .map(|&(index, call)| match call {
                Call::Single => format!("s{}", index),
                _ => index.to_string(),
            })
            .join(" ");
        s.push_str(&call_strings);
    }
    if course.len() != course.natural_length() {
        s.push_str(&format!("  ({} sixes)", course.len()));
    }
    s
}

fn course_siril(course: &Course, remaining: &mut Option<usize>) -> String {
    let mut s = String::new();
    for six in course.sixes() {
        if *remaining == Some(0) {
            break;
        }
        six_siril(six, remaining, &mut s);
    }
    s.push_str(&format!("\"@  {}\"\n", course_text(course, false)));
    s
}

/// Prints a six as `"{call}, {type}, "`, stopping early if `remaining` runs out.  Prints nothing
/// if there are no rows remaining.
fn six_siril(six: &Six, remaining: &mut Option<usize>, s: &mut String) {
    if *remaining == Some(0) {
        return;
    }
    s.push_str(six.call().name());
    s.push_str(", ");
    let rows_left = match remaining {
        None => {
            s.push_str(&format!("{}, ", six.six_type()));
            return;
        }
        Some(rows) => {
            *rows -= 1;
            rows
        }
    };

    let notation = six.six_type().notation();
    if *rows_left >= notation.len() {
        s.push_str(&format!("{}, ", six.six_type()));
        *rows_left -= notation.len();
    } else if *rows_left > 0 {
        s.push_str(&format!("+{}, ", notation[..*rows_left].iter().join(".")));
        *rows_left = 0;
    }
}

/// The error returned when parsing an unknown [`Format`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "siril" => Ok(Format::Siril),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Format::Text => "text",
            Format::Siril => "siril",
        })
    }
}

impl Display for UnknownFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown format {:?} (expected `text` or `siril`)", self.0)
    }
}

impl std::error::Error for UnknownFormat {}
