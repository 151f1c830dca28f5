//! Text form of paths: `kind` followed by comma-joined args, segments space-separated.
//!
//! `M0,0 L1,0 A1,1,0,0,1,2,0 Φ0.5,3.1 Z` round-trips through `parse_path`.

use std::fmt;
use std::str::FromStr;

use super::segment::{Path, PathSegment, Point};
use crate::error::{PathError, Result};

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        for (i, a) in self.args().iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{a}")?;
        }
        Ok(())
    }
}

/// Serialize a path in the single-letter command syntax.
pub fn path_to_string(path: &[PathSegment]) -> String {
    path.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[inline]
fn is_command(c: char) -> bool {
    matches!(c, 'M' | 'L' | 'A' | 'Q' | 'C' | 'Φ' | 'Λ' | 'Z')
}

/// Parse the single-letter command syntax. Args may be separated by commas or whitespace.
pub fn parse_path(text: &str) -> Result<Path> {
    let mut chunks: Vec<(char, String)> = Vec::new();
    for c in text.chars() {
        if is_command(c) {
            chunks.push((c, String::new()));
        } else if let Some((_, body)) = chunks.last_mut() {
            body.push(c);
        } else if !c.is_whitespace() {
            return Err(PathError::Parse {
                position: 0,
                token: c.to_string(),
                reason: "expected a command letter".to_string(),
            });
        }
    }
    chunks
        .iter()
        .enumerate()
        .map(|(position, (kind, body))| parse_segment(position, *kind, body))
        .collect()
}

fn parse_segment(position: usize, kind: char, body: &str) -> Result<PathSegment> {
    let fail = |reason: String| PathError::Parse {
        position,
        token: format!("{kind}{}", body.trim()),
        reason,
    };
    let args = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|e| fail(format!("bad number '{tok}': {e}")))
        })
        .collect::<Result<Vec<f64>>>()?;
    let expected = match kind {
        'M' | 'L' | 'Φ' | 'Λ' => 2,
        'A' => 7,
        'Q' => 4,
        'C' => 6,
        _ => 0,
    };
    if args.len() != expected {
        return Err(fail(format!(
            "expected {expected} arguments, found {}",
            args.len()
        )));
    }
    let flag = |v: f64| match v {
        v if v == 0.0 => Ok(false),
        v if v == 1.0 => Ok(true),
        _ => Err(fail(format!("arc flags must be 0 or 1, found {v}"))),
    };
    let p = |i: usize| Point::new(args[i], args[i + 1]);
    Ok(match kind {
        'M' => PathSegment::MoveTo(p(0)),
        'L' => PathSegment::LineTo(p(0)),
        'Φ' => PathSegment::Parallel(p(0)),
        'Λ' => PathSegment::Meridian(p(0)),
        'A' => PathSegment::ArcTo {
            radius: args[0],
            radius_b: args[1],
            rotation: args[2],
            large_arc: flag(args[3])?,
            sweep: flag(args[4])?,
            end: p(5),
        },
        'Q' => PathSegment::QuadraticTo {
            control: p(0),
            end: p(2),
        },
        'C' => PathSegment::CubicTo {
            control1: p(0),
            control2: p(2),
            end: p(4),
        },
        _ => PathSegment::Close,
    })
}

impl FromStr for PathSegment {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        let mut path = parse_path(s)?;
        if path.len() != 1 {
            return Err(PathError::Parse {
                position: 0,
                token: s.to_string(),
                reason: format!("expected exactly one segment, found {}", path.len()),
            });
        }
        Ok(path.remove(0))
    }
}
