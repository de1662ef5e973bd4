//! Raw tabular input, as read from a delimited text file.
//!
//! Nothing here knows about spots: a [`RawTable`] is just a header row and a
//! list of string records aligned with it.

use csv::ReaderBuilder;
use log::debug;

use crate::Error;

/// Field separators considered during delimiter detection, in order of
/// preference when two candidates score equally.
pub const DELIMITER_CANDIDATES: &[u8] = &[b',', b';', b'\t', b'|'];

// How many lines of the input are inspected when detecting the delimiter.
const SNIFF_LINES: usize = 10;

// Upper bound on the bytes decoded for delimiter detection.
const SNIFF_BYTES: usize = 64 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// One row of the source table. Cells are positionally aligned with the
/// table's headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord(Vec<String>);

impl RawRecord {
    /// The cell at the given column index. Rows shorter than the header row
    /// read as empty for the missing cells.
    pub fn get(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RawRecord {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A fully loaded table: one header row followed by zero or more records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    records: Vec<RawRecord>,
    delimiter: u8,
}

impl RawTable {
    /// Constructor for tables that have already been split into cells.
    pub fn new<H, S>(headers: H, records: Vec<RawRecord>) -> Self
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            records,
            delimiter: b',',
        }
    }

    /// Parses delimited text. When `delimiter` is `None`, the separator is
    /// detected from the first few lines of the input.
    pub fn parse(content: &[u8], delimiter: Option<u8>) -> Result<Self, Error> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        let delimiter = match delimiter {
            Some(d) => d,
            None => sniff_delimiter(&String::from_utf8_lossy(sniff_sample(content))),
        };
        debug!("Parsing table with delimiter {:?}", char::from(delimiter));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(content);
        let headers = reader
            .headers()?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>();
        if headers.is_empty() {
            return Err(Error::EmptyTable);
        }
        let records = reader
            .records()
            .map(|result| result.map(|record| record.iter().collect::<RawRecord>()))
            .collect::<Result<Vec<RawRecord>, csv::Error>>()?;
        Ok(Self {
            headers,
            records,
            delimiter,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    /// The field separator this table was parsed with.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

/// Guesses the field separator of a delimited text sample.
///
/// Each candidate is counted on every sampled line, ignoring anything between
/// double quotes. A candidate that occurs the same non-zero number of times on
/// every line wins over one that doesn't; ties go to the candidate with the
/// most occurrences in the header line, then to the earlier candidate. Falls
/// back to a comma.
pub fn sniff_delimiter(sample: &str) -> u8 {
    let lines = sample
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect::<Vec<&str>>();
    let header = match lines.first() {
        Some(h) => *h,
        None => return b',',
    };

    let mut best: Option<(bool, usize, u8)> = None;
    for &candidate in DELIMITER_CANDIDATES {
        let header_count = count_unquoted(header, candidate);
        if header_count == 0 {
            continue;
        }
        let consistent = lines[1..]
            .iter()
            .all(|line| count_unquoted(line, candidate) == header_count);
        let score = (consistent, header_count, candidate);
        best = match best {
            Some(b) if (b.0, b.1) >= (score.0, score.1) => Some(b),
            _ => Some(score),
        };
    }
    best.map(|(_, _, d)| d).unwrap_or(b',')
}

/// The leading part of `content` used for delimiter detection: at most
/// [`SNIFF_BYTES`], cut after the last complete line when truncated.
fn sniff_sample(content: &[u8]) -> &[u8] {
    if content.len() <= SNIFF_BYTES {
        return content;
    }
    let prefix = &content[..SNIFF_BYTES];
    match prefix.iter().rposition(|&b| b == b'\n') {
        Some(end) => &prefix[..=end],
        None => prefix,
    }
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for b in line.bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}
