use std::io::Read;

use crate::{Error, Point, Result};

/// Reads every `x,y` token from stdin.
pub fn read_points_from_stdin() -> Result<Vec<Point>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    parse_points(&input)
}

/// Parses whitespace-separated `x,y` tokens. Tokens are numbered from 1 in
/// error messages.
pub fn parse_points(input: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (idx, tok) in input.split_whitespace().enumerate() {
        let token = idx + 1;
        let mut fields = tok.split(',');
        let x_s = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::invalid_input(format!("token {token}: missing x")))?;
        let y_s = fields
            .next()
            .ok_or_else(|| Error::invalid_input(format!("token {token}: missing y in {tok}")))?;
        if fields.next().is_some() {
            return Err(Error::invalid_input(format!(
                "token {token}: expected 'x,y' but got extra comma fields: {tok}"
            )));
        }

        let x: f64 = x_s
            .parse()
            .map_err(|_| Error::invalid_input(format!("token {token}: invalid x: {x_s}")))?;
        let y: f64 = y_s
            .parse()
            .map_err(|_| Error::invalid_input(format!("token {token}: invalid y: {y_s}")))?;
        points.push(Point::new(x, y));
    }

    if points.is_empty() {
        return Err(Error::invalid_input("no points provided on stdin"));
    }
    Ok(points)
}
