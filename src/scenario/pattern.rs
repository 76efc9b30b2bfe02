//! Strings that match a schema `pattern`.
//!
//! The pattern is parsed into its syntax tree and walked deterministically:
//! every class contributes one representative character, alternations take
//! their first branch and repetitions emit their minimum count. Extra
//! repetitions are added left to right until a requested length is reached.
//! Every produced string is checked against the compiled pattern.

use regex::Regex;
use regex_syntax::hir::{Class, Hir, HirKind};

/// Characters tried first when a class has to be represented.
const PREFERRED: [char; 6] = ['a', 'A', '0', 'x', '-', '_'];

/// Hard stop for the walk, in bytes.
const MAX_OUTPUT: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct PatternSampler {
    hir: Hir,
    regex: Regex,
}

impl PatternSampler {
    /// `None` when either the matcher or the syntax parser rejects `pattern`.
    pub fn new(pattern: &str) -> Option<Self> {
        let regex = Regex::new(pattern).ok()?;
        let hir = regex_syntax::Parser::new().parse(pattern).ok()?;
        Some(PatternSampler { hir, regex })
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// The shortest string the walk finds, grown toward `target` characters.
    pub fn sample(&self, target: usize) -> Option<String> {
        let shortest = render(&self.hir, 0)?;
        let len = shortest.chars().count();
        let sampled = if target > len {
            render(&self.hir, target - len)?
        } else {
            shortest
        };
        self.matches(&sampled).then_some(sampled)
    }

    /// A match of exactly `len` characters, if the walk can produce one.
    pub fn sample_exact(&self, len: usize) -> Option<String> {
        self.sample(len).filter(|s| s.chars().count() == len)
    }
}

fn render(hir: &Hir, budget: usize) -> Option<String> {
    let mut out = String::new();
    let mut budget = budget;
    emit(hir, &mut budget, &mut out)?;
    Some(out)
}

fn emit(hir: &Hir, budget: &mut usize, out: &mut String) -> Option<()> {
    if out.len() > MAX_OUTPUT {
        return None;
    }
    match hir.kind() {
        HirKind::Empty | HirKind::Look(_) => {}
        HirKind::Literal(literal) => out.push_str(&String::from_utf8_lossy(&literal.0)),
        HirKind::Class(class) => out.push(class_char(class)?),
        HirKind::Capture(capture) => emit(&capture.sub, budget, out)?,
        HirKind::Concat(items) => {
            for item in items {
                emit(item, budget, out)?;
            }
        }
        HirKind::Alternation(branches) => emit(branches.first()?, budget, out)?,
        HirKind::Repetition(repetition) => {
            for _ in 0..repetition.min {
                emit(&repetition.sub, budget, out)?;
            }
            let piece = render(&repetition.sub, 0)?;
            let width = piece.chars().count();
            let mut count = repetition.min;
            while width > 0 && *budget >= width && repetition.max.map_or(true, |max| count < max) {
                out.push_str(&piece);
                *budget -= width;
                count += 1;
                if out.len() > MAX_OUTPUT {
                    return None;
                }
            }
        }
    }
    Some(())
}

fn class_char(class: &Class) -> Option<char> {
    match class {
        Class::Unicode(class) => {
            let ranges = class.ranges();
            PREFERRED
                .iter()
                .copied()
                .find(|c| ranges.iter().any(|r| r.start() <= *c && *c <= r.end()))
                .or_else(|| {
                    ranges.iter().find_map(|r| {
                        let start = r.start().max('!');
                        (start <= r.end()).then_some(start)
                    })
                })
                .or_else(|| ranges.first().map(|r| r.start()))
        }
        Class::Bytes(class) => {
            let ranges = class.ranges();
            PREFERRED
                .iter()
                .map(|c| *c as u8)
                .find(|b| ranges.iter().any(|r| r.start() <= *b && *b <= r.end()))
                .or_else(|| {
                    ranges.iter().find_map(|r| {
                        let start = r.start().max(b'!');
                        (start <= r.end() && start.is_ascii()).then_some(start)
                    })
                })
                .map(char::from)
        }
    }
}
