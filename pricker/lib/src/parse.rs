//! Parsing courses and touches from the text format written by
//! [`render::Format::Text`](crate::render::Format::Text).
//!
//! A course is a line of the form
//! ```text
//! [course end]  <calls>  [(<length> sixes)]
//! ```
//! where each call is `N` (a bob at six `N`), `sN` or `Ns` (a single at six `N`), or `p` for a
//! plain course.  Calls can be separated by whitespace, commas or full stops.  If a six is called
//! more than once, the last call wins.  A touch is a line giving the row that the start finishes
//! on (which also fixes the stage and the position of rounds in the start), followed by one line
//! per course.  `//` starts a comment.

use itertools::Itertools;
use pricker_rows::{Row, Stage};

use crate::{Block, Call, Course, Error, Method, Result, Start, Touch};

/// A single token from a course line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Plain,
    Call(usize, Call),
}

/// Parses a course from a single line, starting from `initial_row`.
///
/// If no length is given, the course has its [`Method`]'s default length, extended if needed to
/// include the last call.
///
/// # Example
/// ```
/// use pricker::{parse, Call, Method, Row};
///
/// let course = parse::course("s2 3 (4)", "2314567890E".parse::<Row>()?, Method::STEDMAN)?;
/// assert_eq!(course.len(), 4);
/// assert_eq!(course.calls(), vec![(2, Call::Single), (3, Call::Bob)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn course(line: &str, initial_row: Row, method: Method) -> Result<Course> {
    let error = || Error::CourseImport {
        line: line.to_owned(),
    };

    // Split off the length
    let mut text = line.trim();
    let mut explicit_length = None;
    if let Some(paren_idx) = text.find('(') {
        let digits = text[paren_idx + 1..]
            .trim_start()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>();
        let length = digits.parse::<usize>().map_err(|_| error())?;
        explicit_length = Some(length);
        text = text[..paren_idx].trim_end();
    }

    let mut words = text
        .split(|c: char| c.is_whitespace() || c == ',' || c == '.')
        .filter(|w| !w.is_empty())
        .collect_vec();
    // The first word is a course end, unless it's the only word or it's a call
    if words.len() > 1 && parse_token(words[0]).is_none() {
        log::trace!("Ignoring course end {:?}", words[0]);
        words.remove(0);
    }
    if words.is_empty() {
        return Err(error());
    }

    let mut calls = Vec::new();
    for word in words {
        match parse_token(word).ok_or_else(error)? {
            Token::Plain => {}
            Token::Call(index, call) => {
                calls.retain(|&(i, _)| i != index);
                calls.push((index, call));
            }
        }
    }

    let last_call = calls.iter().map(|&(index, _)| index).max().unwrap_or(0);
    let default_length = method.course_length(initial_row.stage());
    let length = match explicit_length {
        Some(length) if length < last_call || length > Course::MAX_LENGTH => {
            return Err(error());
        }
        Some(length) => length,
        None => default_length.max(last_call),
    };

    log::debug!("Parsed {:?} as {} sixes with calls {:?}", line, length, calls);
    Ok(Course::with_calls(initial_row, method, length, &calls))
}

/// Parses a [`Token`], returning `None` if the word isn't a valid token
fn parse_token(word: &str) -> Option<Token> {
    let word = word.to_lowercase();
    if word == "p" {
        return Some(Token::Plain);
    }

    let (number, call) = match (word.strip_prefix('s'), word.strip_suffix('s')) {
        (Some(n), _) | (_, Some(n)) => (n, Call::Single),
        (None, None) => (word.as_str(), Call::Bob),
    };
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let index = number.parse::<usize>().ok()?;
    (1..=Course::MAX_LENGTH)
        .contains(&index)
        .then_some(Token::Call(index, call))
}

/// Parses a [`Touch`], starting from rounds.  The first non-empty line must be the last row of
/// the touch's start.  Its length determines the [`Stage`], and the start is moved to the first
/// position which finishes on that row (trying the [`Method`]'s standard start type first, then
/// each row of the six in order).  If no start finishes on the row, the standard start is kept.
///
/// # Example
/// ```
/// use pricker::{parse, Method};
///
/// let touch = parse::touch(
///     "2314567890E  // start
///      2314567890E  1 s10 s13 22",
///     Method::STEDMAN,
/// )?;
/// assert_eq!(touch.len(), 1);
/// # Ok::<(), pricker::Error>(())
/// ```
pub fn touch(text: &str, method: Method) -> Result<Touch> {
    let mut lines = text
        .lines()
        .map(|line| {
            let without_comment = line.split("//").next().unwrap_or("");
            without_comment.trim().trim_start_matches('/').trim()
        })
        .filter(|line| !line.is_empty());

    let start_row = lines.next().map_or_else(String::new, |line| {
        line.chars().filter(|c| !c.is_whitespace()).collect::<String>()
    });
    let stage = Stage::from_num_bells(start_row.chars().count())?;
    log::debug!("Parsing touch on {}", stage);

    let mut touch = Touch::new(Row::rounds(stage), method);
    match Row::parse(&start_row, stage) {
        Ok(row) => match_start(&mut touch, &row)?,
        Err(e) => log::warn!("Keeping the standard start: {}", e),
    }
    for line in lines {
        let course = course(line, touch.last_row().clone(), method)?;
        touch.push_course(course)?;
    }
    touch.take_notifications();
    Ok(touch)
}

/// Moves the start of `touch` to the first position which finishes on `last_row`.
fn match_start(touch: &mut Touch, last_row: &Row) -> Result<()> {
    if touch.start().last_row() == last_row {
        return Ok(());
    }
    let method = touch.method();
    let standard_type = method.default_start_six_type();
    let six_types = std::iter::once(standard_type).chain(
        method
            .six_types()
            .iter()
            .copied()
            .filter(|&t| t != standard_type),
    );
    for six_type in six_types {
        for row_index in 1..=six_type.num_rows() {
            let mut start = Start::new(touch.initial_row().clone(), method);
            start.set_position(six_type, row_index)?;
            if start.last_row() == last_row {
                log::debug!("Rounds is row {} of a {} six", row_index, six_type);
                return touch.set_start_position(six_type, row_index);
            }
        }
    }
    log::warn!("No start finishes on {}; keeping the standard start", last_row);
    Ok(())
}
