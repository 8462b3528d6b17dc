//! Lexical shape of morphology codes: MorphGNT columns and Hebrew segments.

use nom::{
    branch::alt,
    bytes::complete::take_while_m_n,
    character::complete::{anychar, char, multispace0, multispace1, satisfy},
    combinator::{all_consuming, map, opt, rest},
    multi::count,
    sequence::{preceded, terminated, tuple},
    IResult,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("malformed MorphGNT code {0:?}")]
    MalformedMorphGnt(String),
}

/// Number of columns in a MorphGNT parsing code: person, tense, voice, mood,
/// case, number, gender, degree.
pub const MORPHGNT_SLOTS: usize = 8;

/// A MorphGNT code split into its part-of-speech code and parsing slots.
/// `-` placeholders become `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphGntCode<'a> {
    pub pos: &'a str,
    pub slots: [Option<char>; MORPHGNT_SLOTS],
}

fn pos_code(input: &str) -> IResult<&str, &str> {
    take_while_m_n(1, 2, |c: char| c.is_ascii_uppercase() || c == '-')(input)
}

fn slot(input: &str) -> IResult<&str, Option<char>> {
    map(satisfy(|c| c.is_ascii_alphanumeric() || c == '-'), |c| {
        if c == '-' {
            None
        } else {
            Some(c)
        }
    })(input)
}

fn morphgnt(input: &str) -> IResult<&str, (&str, Option<Vec<Option<char>>>)> {
    all_consuming(terminated(
        tuple((
            preceded(multispace0, pos_code),
            opt(preceded(multispace1, count(slot, MORPHGNT_SLOTS))),
        )),
        multispace0,
    ))(input)
}

/// Parses `"V- 3IAI-S--"` (or a bare part-of-speech code such as `"C-"`).
pub fn parse_morphgnt(input: &str) -> Result<MorphGntCode<'_>, CodeError> {
    let (_, (pos, slots)) = morphgnt(input).map_err(|_| CodeError::MalformedMorphGnt(input.to_string()))?;

    let mut code = MorphGntCode { pos, slots: [None; MORPHGNT_SLOTS] };
    if let Some(slots) = slots {
        for (target, value) in code.slots.iter_mut().zip(slots) {
            *target = value;
        }
    }
    Ok(code)
}

/// One `/`-separated part of a Hebrew code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// `H` + letter: an attached prefix morpheme.
    Prefix(char),
    /// `S…`: an attached suffix; the payload is everything after the `S`.
    Suffix(&'a str),
    /// A full word code, starting with its part-of-speech letter.
    Word(&'a str),
}

fn prefix_segment(input: &str) -> IResult<&str, Segment<'_>> {
    map(all_consuming(preceded(char('H'), anychar)), Segment::Prefix)(input)
}

fn suffix_segment(input: &str) -> IResult<&str, Segment<'_>> {
    map(preceded(char('S'), rest), Segment::Suffix)(input)
}

fn word_segment(input: &str) -> IResult<&str, Segment<'_>> {
    map(rest, Segment::Word)(input)
}

pub fn classify_segment(code: &str) -> Segment<'_> {
    let code = code.trim();
    match alt((prefix_segment, suffix_segment, word_segment))(code) {
        Ok((_, segment)) => segment,
        Err(_) => Segment::Word(code),
    }
}
