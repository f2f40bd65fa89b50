/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// Canonical text form:  Matrix(<rows><d><cols>)<v00><d><v01><d>...<d><v_last>
//
// `<d>` is a single character chosen by the caller, `,` by default.

use super::Matrix;
use crate::{MatrixError, Result};
use crate::scalar::Semiring;

use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

const PREFIX: &str = "Matrix(";
pub const DEFAULT_DELIMITER: char = ',';

impl<T: Semiring> Matrix<T> {
    /// Write the canonical text form, with no trailing delimiter or newline.
    pub fn write_text(&self, mut w: impl Write, delimiter: char) -> io::Result<()>
    {
        write!(w, "{}", Delimited(self, delimiter))
    }

    /// Read the canonical text form into `self`, resizing it to fit.
    ///
    /// Exactly `rows * cols` elements must follow the header. Whitespace
    /// around tokens is ignored. On failure `self` is left unchanged.
    pub fn read_text(&mut self, mut r: impl Read, delimiter: char) -> Result<()>
    {
        let mut s = String::new();
        r.read_to_string(&mut s)
            .map_err(|e| MatrixError::format(format!("read failed: {}", e)))?;
        self.fill_from_str(&s, delimiter)
    }

    pub fn from_text(s: &str, delimiter: char) -> Result<Self>
    {
        let mut out = Matrix::new(0, 0);
        out.fill_from_str(s, delimiter)?;
        Ok(out)
    }

    fn fill_from_str(&mut self, s: &str, delimiter: char) -> Result<()>
    {
        let s = s.trim_start();
        if !s.starts_with(PREFIX) {
            throw!(MatrixError::format(format!("expected {:?} at start of input", PREFIX)));
        }
        let s = &s[PREFIX.len()..];

        let (rows, s) = parse_size(s, "rows")?;
        // any single character may separate the sizes
        let mut chars = s.trim_start().chars();
        if chars.next().is_none() {
            throw!(MatrixError::format("input ended after number of rows"));
        }
        let (cols, s) = parse_size(chars.as_str(), "cols")?;

        let s = s.trim_start();
        if !s.starts_with(')') {
            throw!(MatrixError::format("expected ')' after number of columns"));
        }
        let body = s[1..].trim();

        let expected = rows.checked_mul(cols).ok_or_else(|| {
            MatrixError::format(format!("{}x{} matrix is too large", rows, cols))
        })?;
        if expected == 0 {
            if !body.is_empty() {
                throw!(MatrixError::format(format!("unexpected elements after empty {}x{} header", rows, cols)));
            }
            self.resize(rows, cols);
            return Ok(());
        }

        // count before allocating; the header is not trusted
        let count = body.split(delimiter).count();
        if count < expected {
            throw!(MatrixError::format(format!("expected {} elements, found {}", expected, count)));
        }
        if count > expected {
            throw!(MatrixError::format(format!("more than {} elements", expected)));
        }

        let data = body.split(delimiter)
            .map(str::trim)
            .enumerate()
            .map(|(i, token)| token.parse().map_err(|_| {
                MatrixError::format(format!("cannot parse element {} from {:?}", i, token))
            }))
            .collect::<Result<Vec<T>>>()?;
        *self = Matrix { data, rows, cols };
        Ok(())
    }
}

// leading unsigned integer, and the rest
fn parse_size<'a>(s: &'a str, what: &str) -> Result<(usize, &'a str)>
{
    let s = s.trim_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let value = s[..end].parse()
        .map_err(|_| MatrixError::format(format!("expected number of {}", what)))?;
    Ok((value, &s[end..]))
}

struct Delimited<'a, T>(&'a Matrix<T>, char);

impl<'a, T: fmt::Display> fmt::Display for Delimited<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        let Delimited(m, d) = *self;
        write!(f, "{}{}{}{})", PREFIX, m.rows, d, m.cols)?;
        for (i, x) in m.data.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", d)?;
            }
            write!(f, "{}", x)?;
        }
        Ok(())
    }
}

/// The canonical text form with `,` delimiters.
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    { fmt::Display::fmt(&Delimited(self, DEFAULT_DELIMITER), f) }
}

impl<T: Semiring> FromStr for Matrix<T> {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self>
    { Matrix::from_text(s, DEFAULT_DELIMITER) }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_canonical_form() {
        let m = Matrix::from_rows(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(m.to_string(), "Matrix(2,3)1,2,3,4,5,6");

        let mut buf = vec![];
        m.write_text(&mut buf, ';').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Matrix(2;3)1;2;3;4;5;6");

        assert_eq!(Matrix::<f64>::new(0, 0).to_string(), "Matrix(0,0)");
        assert_eq!(Matrix::from_rows(&[&[0.5, -1.25]]).to_string(), "Matrix(1,2)0.5,-1.25");
    }

    #[test]
    fn round_trips() {
        let m = Matrix::from_rows(&[&[1.0 / 3.0, -2.5e-12], &[1e300, 0.1]]);
        let back: Matrix<f64> = m.to_string().parse().unwrap();
        assert_eq!(back.dims(), (2, 2));
        assert_eq!(back.row_major_data(), m.row_major_data());

        let mut buf = vec![];
        m.write_text(&mut buf, '|').unwrap();
        let mut back = Matrix::<f64>::new(5, 5);
        back.read_text(&buf[..], '|').unwrap();
        assert_eq!(back.row_major_data(), m.row_major_data());

        let ints = Matrix::from_rows(&[&[7i64, -3, 0]]);
        let back: Matrix<i64> = ints.to_string().parse().unwrap();
        assert_eq!(back.row_major_data(), &[7, -3, 0]);
    }

    #[test]
    fn tolerates_whitespace() {
        let m: Matrix<i32> = " Matrix( 2, 1 ) 4 , 5\n".parse().unwrap();
        assert_eq!(m.row_major_data(), &[4, 5]);
    }

    #[test]
    fn rejects_malformed() {
        fn bad(s: &str) -> String {
            match s.parse::<Matrix<f64>>() {
                Err(MatrixError::Format { reason }) => reason,
                r => panic!("expected format error for {:?}, got {:?}", s, r),
            }
        }
        bad("Matrix(2,2)1,2,3");
        bad("Matrix(2,2)1,2,3,4,5");
        bad("Matix(2,2)1,2,3,4");
        bad("Matrix(x,2)1,2,3,4");
        bad("Matrix(2,y)1,2,3,4");
        bad("Matrix(2,2]1,2,3,4");
        bad("Matrix(2,2)1,2,three,4");
        bad("Matrix(2");
        bad("Matrix(0,0)1");
        bad("Matrix(4294967296,4294967296)1");
        assert!(bad(&format!("Matrix({},{})1", usize::max_value(), 2)).contains("too large"));
        assert!(bad("Matrix(100000,100000)1").contains("found 1"));
        assert!(bad("Matrix(1,2)1.5,2.5x").contains("element 1"));
    }
}
