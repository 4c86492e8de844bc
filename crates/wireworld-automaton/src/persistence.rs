//! Binary persistence of grids as NumPy `.npy` dense matrices.
//!
//! ## File layout
//!
//! ```text
//! \x93NUMPY            magic
//! 0x01 0x00            format version 1.0
//! u16 (LE)             header length (u32 for versions 2.x/3.x)
//! {'descr': '|i1', 'fortran_order': False, 'shape': (rows, cols), }
//! <spaces> \n          padding so the payload starts on a 64-byte boundary
//! payload              rows * cols cells, row-major, one byte each
//! ```
//!
//! Grids are always written as version 1.0 `|i1`. Reading also accepts wider
//! integer dtypes, either byte order and Fortran order, so matrices produced
//! by other NumPy tooling load as long as every value is a valid state.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use tracing::info;

use crate::automaton::GridAutomaton;
use crate::cell::CellValue;
use crate::error::{AutomatonError, AutomatonResult};
use crate::grid::Grid;
use crate::rule::Rule;

/// Leading bytes of every `.npy` file.
pub const NPY_MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Conventional file extension.
pub const NPY_EXTENSION: &str = "npy";

/// Header plus preamble is padded to a multiple of this.
const HEADER_ALIGN: usize = 64;

/// Magic (6) + version (2) + v1 header length (2).
const V1_PREAMBLE: usize = 10;

// =============================================================================
// Writing
// =============================================================================

/// Serialize `grid` as a version 1.0 `.npy` matrix of `int8`.
pub fn write_npy<S: CellValue>(grid: &Grid<S>, sink: &mut dyn Write) -> AutomatonResult<()> {
    let dict = format!(
        "{{'descr': '|i1', 'fortran_order': False, 'shape': ({}, {}), }}",
        grid.height(),
        grid.width()
    );
    let unpadded = V1_PREAMBLE + dict.len() + 1;
    let padding = (HEADER_ALIGN - unpadded % HEADER_ALIGN) % HEADER_ALIGN;
    let header_len = u16::try_from(dict.len() + padding + 1).map_err(|_| {
        AutomatonError::invalid_dimensions("shape does not fit in a version 1.0 header")
    })?;

    sink.write_all(NPY_MAGIC)?;
    sink.write_all(&[1, 0])?;
    sink.write_all(&header_len.to_le_bytes())?;
    sink.write_all(dict.as_bytes())?;
    sink.write_all(" ".repeat(padding).as_bytes())?;
    sink.write_all(b"\n")?;
    sink.write_all(&grid.to_raw())?;
    sink.flush()?;
    Ok(())
}

/// Save `grid` to `path`, creating or truncating the file.
pub fn save_grid<S: CellValue>(path: impl AsRef<Path>, grid: &Grid<S>) -> AutomatonResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_npy(grid, &mut writer)?;

    info!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        "Saved grid"
    );
    Ok(())
}

// =============================================================================
// Reading
// =============================================================================

/// Decode a `.npy` matrix into a grid.
pub fn read_npy<S: CellValue>(source: &mut dyn Read) -> AutomatonResult<Grid<S>> {
    let mut magic = [0u8; 6];
    read_exact_or_corrupt(source, &mut magic, "magic")?;
    if &magic != NPY_MAGIC {
        return Err(AutomatonError::corrupt("missing .npy magic"));
    }

    let mut version = [0u8; 2];
    read_exact_or_corrupt(source, &mut version, "version")?;
    let header_len = match version[0] {
        1 => {
            let mut len = [0u8; 2];
            read_exact_or_corrupt(source, &mut len, "header length")?;
            u16::from_le_bytes(len) as usize
        }
        2 | 3 => {
            let mut len = [0u8; 4];
            read_exact_or_corrupt(source, &mut len, "header length")?;
            u32::from_le_bytes(len) as usize
        }
        major => {
            return Err(AutomatonError::corrupt(format!(
                "unsupported .npy version {}.{}",
                major, version[1]
            )))
        }
    };

    let mut header = Vec::new();
    Read::take(&mut *source, header_len as u64).read_to_end(&mut header)?;
    if header.len() != header_len {
        return Err(AutomatonError::corrupt(format!(
            "truncated header: {} of {} bytes",
            header.len(),
            header_len
        )));
    }
    let header = std::str::from_utf8(&header)
        .map_err(|_| AutomatonError::corrupt("header is not valid text"))?;
    let header = NpyHeader::parse(header)?;

    let (height, width) = match header.shape.as_slice() {
        [rows, cols] => (*rows, *cols),
        shape => {
            return Err(AutomatonError::corrupt(format!(
                "expected a 2-D matrix, found shape {:?}",
                shape
            )))
        }
    };
    let count = width
        .checked_mul(height)
        .ok_or_else(|| AutomatonError::corrupt("shape overflows"))?;
    let byte_len = count
        .checked_mul(header.dtype.size)
        .ok_or_else(|| AutomatonError::corrupt("shape overflows"))?;

    // Read through `take` so a forged shape cannot force a huge allocation
    let mut payload = Vec::new();
    Read::take(&mut *source, byte_len as u64).read_to_end(&mut payload)?;
    if payload.len() != byte_len {
        return Err(AutomatonError::corrupt(format!(
            "payload has {} bytes, shape {:?} needs {}",
            payload.len(),
            header.shape,
            byte_len
        )));
    }

    let mut trailing = [0u8; 1];
    if read_some(source, &mut trailing)? != 0 {
        return Err(AutomatonError::corrupt(
            "trailing bytes after payload of declared shape",
        ));
    }

    let mut cells = vec![S::default(); count];
    for (i, chunk) in payload.chunks_exact(header.dtype.size).enumerate() {
        let state = header.dtype.decode::<S>(chunk).ok_or_else(|| {
            AutomatonError::corrupt(format!("value at element {} is not a valid cell state", i))
        })?;
        let index = if header.fortran_order {
            // Column-major: element i is (row = i % height, col = i / height).
            (i % height) * width + i / height
        } else {
            i
        };
        cells[index] = state;
    }

    Grid::from_cells(width, height, cells)
}

/// Load a grid from `path`.
pub fn load_grid<S: CellValue>(path: impl AsRef<Path>) -> AutomatonResult<Grid<S>> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let grid = read_npy(&mut reader)?;

    info!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        "Loaded grid"
    );
    Ok(grid)
}

fn read_exact_or_corrupt(source: &mut dyn Read, buf: &mut [u8], what: &str) -> AutomatonResult<()> {
    source.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => AutomatonError::corrupt(format!("truncated {}", what)),
        _ => AutomatonError::Io(e),
    })
}

fn read_some(source: &mut dyn Read, buf: &mut [u8]) -> AutomatonResult<usize> {
    loop {
        match source.read(buf) {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            other => return Ok(other?),
        }
    }
}

// =============================================================================
// Header
// =============================================================================

/// Element type of a matrix payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dtype {
    signed: bool,
    size: usize,
    big_endian: bool,
}

impl Dtype {
    /// Parse a NumPy type string such as `|i1`, `<u2` or `>i8`.
    fn parse(descr: &str) -> AutomatonResult<Self> {
        let unsupported = || AutomatonError::corrupt(format!("unsupported dtype '{}'", descr));
        let mut chars = descr.chars();
        let big_endian = match chars.next() {
            Some('<') | Some('|') | Some('=') => false,
            Some('>') => true,
            _ => return Err(unsupported()),
        };
        let signed = match chars.next() {
            Some('i') => true,
            Some('u') => false,
            _ => return Err(unsupported()),
        };
        let size = match chars.as_str() {
            "1" => 1,
            "2" => 2,
            "4" => 4,
            "8" => 8,
            _ => return Err(unsupported()),
        };
        Ok(Self {
            signed,
            size,
            big_endian,
        })
    }

    /// Decode one element and map it to a state.
    fn decode<S: CellValue>(&self, bytes: &[u8]) -> Option<S> {
        let mut buf = [0u8; 8];
        if self.big_endian {
            buf[8 - self.size..].copy_from_slice(bytes);
            buf.reverse();
        } else {
            buf[..self.size].copy_from_slice(bytes);
        }
        let unsigned = u64::from_le_bytes(buf);
        let value = if self.signed {
            // Sign-extend from the element width.
            let shift = 64 - 8 * self.size as u32;
            ((unsigned << shift) as i64) >> shift
        } else {
            i64::try_from(unsigned).ok()?
        };
        S::from_raw(u8::try_from(value).ok()?)
    }
}

/// Parsed `.npy` header dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NpyHeader {
    dtype: Dtype,
    fortran_order: bool,
    shape: Vec<usize>,
}

impl NpyHeader {
    fn parse(text: &str) -> AutomatonResult<Self> {
        let mut parser = LiteralParser::new(text);
        let entries = parser.dict()?;

        let mut descr = None;
        let mut fortran_order = None;
        let mut shape = None;
        for (key, value) in entries {
            match (key.as_str(), value) {
                ("descr", Literal::Str(s)) => descr = Some(s),
                ("fortran_order", Literal::Bool(b)) => fortran_order = Some(b),
                ("shape", Literal::Tuple(dims)) => shape = Some(dims),
                (key, _) => {
                    return Err(AutomatonError::corrupt(format!(
                        "unexpected header entry '{}'",
                        key
                    )))
                }
            }
        }

        let missing = |key: &str| AutomatonError::corrupt(format!("header is missing '{}'", key));
        Ok(Self {
            dtype: Dtype::parse(&descr.ok_or_else(|| missing("descr"))?)?,
            fortran_order: fortran_order.ok_or_else(|| missing("fortran_order"))?,
            shape: shape.ok_or_else(|| missing("shape"))?,
        })
    }
}

/// Values that can appear in a `.npy` header.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Literal {
    Str(String),
    Bool(bool),
    Tuple(Vec<usize>),
}

/// Parser for the Python literal subset used by `.npy` headers.
struct LiteralParser<'a> {
    rest: &'a str,
}

impl<'a> LiteralParser<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn error(&self, expected: &str) -> AutomatonError {
        let near: String = self.rest.chars().take(16).collect();
        AutomatonError::corrupt(format!("malformed header: expected {} near '{}'", expected, near))
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, token: char) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, token: char) -> AutomatonResult<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("'{}'", token)))
        }
    }

    fn dict(&mut self) -> AutomatonResult<Vec<(String, Literal)>> {
        self.expect('{')?;
        let mut entries = Vec::new();
        while !self.eat('}') {
            let key = self.string()?;
            self.expect(':')?;
            entries.push((key, self.value()?));
            if !self.eat(',') {
                self.expect('}')?;
                break;
            }
        }
        self.skip_ws();
        if !self.rest.is_empty() {
            return Err(self.error("end of header"));
        }
        Ok(entries)
    }

    fn value(&mut self) -> AutomatonResult<Literal> {
        self.skip_ws();
        if self.rest.starts_with(['\'', '"']) {
            return self.string().map(Literal::Str);
        }
        if self.rest.starts_with('(') {
            return self.tuple().map(Literal::Tuple);
        }
        for (word, value) in [("True", true), ("False", false)] {
            if let Some(rest) = self.rest.strip_prefix(word) {
                self.rest = rest;
                return Ok(Literal::Bool(value));
            }
        }
        Err(self.error("a string, boolean or tuple"))
    }

    fn string(&mut self) -> AutomatonResult<String> {
        self.skip_ws();
        let quote = match self.rest.chars().next() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("a quoted string")),
        };
        let body = &self.rest[1..];
        let end = body.find(quote).ok_or_else(|| self.error("closing quote"))?;
        let value = body[..end].to_string();
        self.rest = &body[end + 1..];
        Ok(value)
    }

    fn tuple(&mut self) -> AutomatonResult<Vec<usize>> {
        self.expect('(')?;
        let mut dims = Vec::new();
        while !self.eat(')') {
            self.skip_ws();
            let digits = self
                .rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(self.rest.len());
            let dim = self.rest[..digits]
                .parse()
                .map_err(|_| self.error("a dimension"))?;
            self.rest = &self.rest[digits..];
            dims.push(dim);
            if !self.eat(',') {
                self.expect(')')?;
                break;
            }
        }
        Ok(dims)
    }
}

// =============================================================================
// GridAutomaton Extensions
// =============================================================================

impl<R: Rule> GridAutomaton<R> {
    /// Save the current grid to a `.npy` file.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> AutomatonResult<()> {
        save_grid(path, self.grid())
    }

    /// Replace the grid with the one stored at `path`.
    ///
    /// The grid is left unchanged if loading fails.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> AutomatonResult<()> {
        let grid = load_grid(path)?;
        self.replace_grid(grid);
        Ok(())
    }

    /// Create an automaton from a `.npy` file.
    pub fn open(rule: R, path: impl AsRef<Path>) -> AutomatonResult<Self> {
        Ok(Self::with_grid(rule, load_grid(path)?))
    }
}

// =============================================================================
// Tests
// =============================================================================
