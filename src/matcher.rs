use log::trace;

use crate::ast::Node;
use crate::captures::Captures;
use crate::cursor::Cursor;
use crate::error::Mismatch;

/// What a successful attempt consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Runes consumed from the subject.
    pub consumed: usize,
    /// Length of each repetition, for `Repeat` nodes.
    pub repetitions: Vec<usize>,
    /// How many of the trailing `repetitions` may be given back.
    pub giveback: usize,
}

impl MatchOutcome {
    fn consumed(consumed: usize) -> Self {
        Self {
            consumed,
            ..Self::default()
        }
    }
}

type AttemptResult = Result<MatchOutcome, Mismatch>;

/// Try to match `node` at the cursor's current offset.
///
/// On success the cursor is left just past the matched text. On failure the
/// cursor is back where it was when the attempt began.
pub fn attempt(node: &Node, cursor: &mut Cursor<'_>, captures: &mut Captures) -> AttemptResult {
    let start = cursor.mark();
    let result = attempt_at(node, cursor, captures);
    if result.is_err() {
        cursor.reset(start);
    }
    result
}

fn attempt_at(node: &Node, cursor: &mut Cursor<'_>, captures: &mut Captures) -> AttemptResult {
    match node {
        Node::Literal(c) => match_rune(cursor, |rune| rune == *c),
        Node::Class(kind) => match_rune(cursor, |rune| kind.matches(rune)),
        Node::Set { members, negated } => match_rune(cursor, |rune| {
            members.iter().any(|member| member.matches(rune)) != *negated
        }),
        Node::StartAnchor(inner) => {
            if cursor.mark() != 0 {
                return Err(Mismatch::NotAtStart);
            }
            attempt(inner, cursor, captures)
        }
        Node::EndAnchor(inner) => {
            let outcome = attempt(inner, cursor, captures)?;
            if !cursor.at_end() {
                return Err(Mismatch::NotAtEnd);
            }
            Ok(MatchOutcome::consumed(outcome.consumed))
        }
        Node::Repeat { node, min, max } => match_repeat(node, *min, *max, cursor, captures),
        Node::Group { index, branches } => match_group(*index, branches, cursor, captures),
        Node::BackRef { index } => match_backref(*index, cursor, captures),
        Node::Seq(nodes) => match_seq(nodes, cursor, captures),
    }
}

fn match_rune(cursor: &mut Cursor<'_>, predicate: impl Fn(char) -> bool) -> AttemptResult {
    if predicate(cursor.peek()?) {
        cursor.advance()?;
        Ok(MatchOutcome::consumed(1))
    } else {
        Err(Mismatch::NoMatch)
    }
}

/// Greedily repeat `inner` up to `max` times.
fn match_repeat(
    inner: &Node,
    min: usize,
    max: Option<usize>,
    cursor: &mut Cursor<'_>,
    captures: &mut Captures,
) -> AttemptResult {
    let mut repetitions = Vec::new();
    while max.map_or(true, |max| repetitions.len() < max) {
        match attempt(inner, cursor, captures) {
            Ok(outcome) => {
                repetitions.push(outcome.consumed);
                // an empty repetition would repeat forever
                if outcome.consumed == 0 {
                    break;
                }
            }
            Err(_) => break,
        }
    }

    if repetitions.len() < min {
        return Err(Mismatch::TooFewRepetitions);
    }

    Ok(MatchOutcome {
        consumed: repetitions.iter().sum(),
        giveback: repetitions.len() - min,
        repetitions,
    })
}

/// Try each branch in order and record the first one that matches.
fn match_group(
    index: usize,
    branches: &[Node],
    cursor: &mut Cursor<'_>,
    captures: &mut Captures,
) -> AttemptResult {
    let start = cursor.mark();
    for branch in branches {
        let saved = captures.clone();
        match attempt(branch, cursor, captures) {
            Ok(outcome) => {
                captures.record(index, cursor.text_between(start, cursor.mark()));
                return Ok(MatchOutcome::consumed(outcome.consumed));
            }
            Err(_) => *captures = saved,
        }
    }
    Err(Mismatch::NoBranchMatched)
}

fn match_backref(index: usize, cursor: &mut Cursor<'_>, captures: &Captures) -> AttemptResult {
    let captured = captures.get(index).ok_or(Mismatch::UnboundCapture(index))?;

    let mut consumed = 0;
    for expected in captured.chars() {
        if cursor.advance()? != expected {
            return Err(Mismatch::NoMatch);
        }
        consumed += 1;
    }
    Ok(MatchOutcome::consumed(consumed))
}

/// Match `nodes` one after another.
///
/// When an element fails right after a repetition that still has giveback,
/// the repetition is unwound one step at a time by
/// [`retry_after_giveback`]. Only that single preceding repetition is ever
/// unwound.
fn match_seq(nodes: &[Node], cursor: &mut Cursor<'_>, captures: &mut Captures) -> AttemptResult {
    let start = cursor.mark();
    // where the previous element began, and what it consumed
    let mut previous: Option<(usize, MatchOutcome)> = None;

    for node in nodes {
        let outcome = match attempt(node, cursor, captures) {
            Ok(outcome) => outcome,
            Err(err) => match &previous {
                Some((repeat_start, repeat)) if repeat.giveback > 0 => {
                    retry_after_giveback(*repeat_start, repeat, node, cursor, captures)?
                }
                _ => return Err(err),
            },
        };
        previous = Some((cursor.mark() - outcome.consumed, outcome));
    }

    Ok(MatchOutcome::consumed(cursor.mark() - start))
}

/// Give back repetitions of a greedy `repeat` one at a time, from the
/// longest remaining match down to its minimum, until `next` matches.
///
/// `repeat_start` is the offset where the repetition began. On failure the
/// cursor is left where the full greedy repetition ended.
pub fn retry_after_giveback(
    repeat_start: usize,
    repeat: &MatchOutcome,
    next: &Node,
    cursor: &mut Cursor<'_>,
    captures: &mut Captures,
) -> AttemptResult {
    let greedy_end = cursor.mark();
    let total = repeat.repetitions.len();
    let floor = total - repeat.giveback;

    for kept in (floor..total).rev() {
        let offset = repeat_start + repeat.repetitions[..kept].iter().sum::<usize>();
        cursor.reset(offset);
        trace!("giveback: retrying with {} of {} repetitions at offset {}", kept, total, offset);
        if let Ok(outcome) = attempt(next, cursor, captures) {
            return Ok(outcome);
        }
    }

    cursor.reset(greedy_end);
    Err(Mismatch::GivebackExhausted)
}
