use alloc::{string::ToString, vec::Vec};

use knitout_core::{
    CarrierId, CarrierSet, Direction, Instruction, MachineSpec, Needle, NeedleOp, OpKind,
    RackState,
};
use log::warn;

use crate::{ParseError, header::HeaderBlock};

// KNITOUT PROGRAM
// ================================================================================================

/// A parsed knitout file: the resolved machine header and the instruction stream in execution
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct KnitoutProgram {
    pub spec: MachineSpec,
    pub instructions: Vec<Instruction>,
}

// PARSER
// ================================================================================================

/// Parses knitout text into a [KnitoutProgram].
///
/// The format is line based: an optional `;!knitout-N` magic line, a prologue of `;;Key: value`
/// headers, then one instruction per line. `;` comments (whole-line or trailing) are preserved as
/// comment instructions so the downstream pipeline can carry them through.
pub fn parse_program(text: &str) -> Result<KnitoutProgram, ParseError> {
    let mut header = HeaderBlock::default();
    let mut in_prologue = true;
    let mut saw_magic = false;
    let mut instructions = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix(";!knitout-") {
            if !in_prologue || saw_magic {
                warn!("line {line_no}: stray knitout magic line ignored");
            } else if rest.parse::<u32>().is_err() {
                warn!("line {line_no}: unreadable knitout version '{rest}'");
            }
            saw_magic = true;
            continue;
        }
        if let Some(rest) = line.strip_prefix(";;") {
            if in_prologue {
                header.apply(rest);
            } else {
                // headers after the first instruction no longer configure anything
                instructions.push(Instruction::Comment(line[1..].to_string()));
            }
            continue;
        }
        if let Some(rest) = line.strip_prefix(';') {
            instructions.push(Instruction::Comment(rest.to_string()));
            continue;
        }

        if in_prologue {
            if !saw_magic {
                warn!("knitout magic line missing, assuming version 2");
            }
            in_prologue = false;
        }

        // split a trailing comment off the instruction body
        let (body, comment) = match line.split_once(';') {
            Some((body, comment)) => (body.trim_end(), Some(comment)),
            None => (line, None),
        };
        if !body.is_empty() {
            instructions.push(parse_instruction(body, line_no)?);
        }
        if let Some(comment) = comment {
            instructions.push(Instruction::Comment(comment.to_string()));
        }
    }

    Ok(KnitoutProgram { spec: header.finish(), instructions })
}

fn parse_instruction(body: &str, line: usize) -> Result<Instruction, ParseError> {
    let mut tokens = body.split_whitespace();
    let op = tokens.next().expect("instruction body is non-empty");
    let mut args = Args { line, op: "", tokens };

    let instruction = match op {
        "knit" => args.named("knit").needle_op(OpKind::Knit)?,
        "tuck" => args.named("tuck").needle_op(OpKind::Tuck)?,
        "miss" => args.named("miss").needle_op(OpKind::Miss)?,
        "split" => {
            let args = args.named("split");
            let direction = args.direction()?;
            let needle = args.needle()?;
            let target = args.needle()?;
            let carriers = args.carriers()?;
            Instruction::Needle(NeedleOp {
                kind: OpKind::Split { target },
                needle,
                direction: Some(direction),
                carriers,
            })
        },
        "xfer" => {
            let args = args.named("xfer");
            let needle = args.needle()?;
            let target = args.needle()?;
            Instruction::Needle(NeedleOp {
                kind: OpKind::Xfer { target },
                needle,
                direction: None,
                carriers: None,
            })
        },
        "rack" => Instruction::Rack(args.named("rack").rack_value()?),
        "inhook" => Instruction::Inhook(args.named("inhook").carrier_id()?),
        "releasehook" => Instruction::Releasehook(args.named("releasehook").carrier_id()?),
        "outhook" => Instruction::Outhook(args.named("outhook").carrier_id()?),
        "pause" => Instruction::Pause,
        other if other.starts_with("x-") => {
            // extension instructions are tolerated but do not reach the machine model
            warn!("line {line}: ignoring extension instruction '{other}'");
            Instruction::Comment(body.to_string())
        },
        other => {
            return Err(ParseError::UnknownOperation { line, op: other.to_string() });
        },
    };

    if let Some(extra) = args.tokens.next() {
        return Err(ParseError::TrailingToken { line, token: extra.to_string() });
    }
    Ok(instruction)
}

// ARGUMENT CURSOR
// ================================================================================================

struct Args<'a> {
    line: usize,
    op: &'static str,
    tokens: core::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn named(&mut self, op: &'static str) -> &mut Self {
        self.op = op;
        self
    }

    fn next(&mut self, what: &'static str) -> Result<&'a str, ParseError> {
        self.tokens
            .next()
            .ok_or(ParseError::MissingArgument { line: self.line, op: self.op, what })
    }

    fn direction(&mut self) -> Result<Direction, ParseError> {
        let token = self.next("direction")?;
        Direction::from_token(token).ok_or_else(|| ParseError::InvalidDirection {
            line: self.line,
            token: token.to_string(),
        })
    }

    fn needle(&mut self) -> Result<Needle, ParseError> {
        let token = self.next("needle")?;
        Needle::from_token(token)
            .ok_or_else(|| ParseError::InvalidNeedle { line: self.line, token: token.to_string() })
    }

    fn carrier_id(&mut self) -> Result<CarrierId, ParseError> {
        let token = self.next("carrier")?;
        match token.parse::<CarrierId>() {
            Ok(id) if (1..=knitout_core::MAX_CARRIER_ID).contains(&id) => Ok(id),
            _ => Err(ParseError::InvalidCarriers { line: self.line, token: token.to_string() }),
        }
    }

    fn rack_value(&mut self) -> Result<RackState, ParseError> {
        let token = self.next("racking value")?;
        token
            .parse::<f64>()
            .map(RackState::from_value)
            .map_err(|_| ParseError::InvalidRackValue { line: self.line, token: token.to_string() })
    }

    /// Consumes the remaining tokens as an optional carrier set.
    fn carriers(&mut self) -> Result<Option<CarrierSet>, ParseError> {
        let mut ids = Vec::new();
        let mut bad = None;
        for token in self.tokens.by_ref() {
            match token.parse::<CarrierId>() {
                Ok(id) => ids.push(id),
                Err(_) => {
                    bad = Some(token.to_string());
                    break;
                },
            }
        }
        if let Some(token) = bad {
            return Err(ParseError::InvalidCarriers { line: self.line, token });
        }
        if ids.is_empty() {
            return Ok(None);
        }
        if ids.len() > 2 {
            return Err(ParseError::InvalidCarriers { line: self.line, token: format!("{ids:?}") });
        }
        CarrierSet::new(ids.iter().copied()).map(Some).ok_or(ParseError::InvalidCarriers {
            line: self.line,
            token: format!("{ids:?}"),
        })
    }

    fn needle_op(&mut self, kind: OpKind) -> Result<Instruction, ParseError> {
        let direction = self.direction()?;
        let needle = self.needle()?;
        let carriers = self.carriers()?;
        Ok(Instruction::Needle(NeedleOp { kind, needle, direction: Some(direction), carriers }))
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests;
