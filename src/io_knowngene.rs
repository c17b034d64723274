/*! Parser for records of the UCSC knownGene format.

knownGene is a transcript-oriented annotation format in which each transcript
is denoted in a single line of twelve tab-separated columns:

1.  transcript identifier (e.g. `uc021olp.1`)
2.  chromosome name: `chr1`..`chr22`, `chrX`, `chrY`, or `chrM`
3.  strand: `+` or `-`
4.  transcription start coordinate (zero-based)
5.  transcription end coordinate
6.  coding region start coordinate (zero-based)
7.  coding region end coordinate
8.  number of exons
9.  exon start coordinates (as a comma-separated string, zero-based)
10. exon end coordinates (as a comma-separated string)
11. unused, kept for format compatibility
12. transcript identifier, repeated (ignored)

Coordinates in the file are zero-based and half-open; the produced records
are one-based and fully closed. Non-coding transcripts carry identical raw
coding start and end coordinates.

Iterating over a whole annotation file is the caller's concern: this module
turns one already-read line into a [`KnownGene`](../struct.KnownGene.html).
Errors split into two tiers so that the caller can skip a single bad record
(`FieldError`, plus the model-level validation errors) or abort on structural
corruption of the source itself (`RowError`); see `Error::class`.
*/
use std::error::Error;
use std::num::ParseIntError;
use std::str::FromStr;

use consts;
use model::{Chromosome, KgBuilder, KnownGene, Strand};


quick_error! {
    /// Unrecoverable format errors. Any of these means the source data is
    /// structurally corrupt, and later lines are likely affected too.
    #[derive(Debug)]
    pub enum RowError {
        /// Occurs when a line does not have exactly twelve tab-separated
        /// fields.
        FieldCount(found: usize) {
            description("row does not have the expected number of fields")
            display(self_) -> ("{}: expected {}, found {}",
                               self_.description(), consts::NUM_FIELDS, found)
        }
        /// Occurs when the number of parsed exon coordinates differs from the
        /// declared exon count.
        ExonCountMismatch(id: String, declared: usize, found: usize) {
            description("number of exon coordinates does not match the declared exon count")
            display(self_) -> ("{}: declared {}, found {}, transcript ID: {}",
                               self_.description(), declared, found, id)
        }
        /// Occurs when any exon start or end coordinate is not a valid u64
        /// value.
        InvalidExonCoord(id: String, err: ParseIntError) {
            description(err.description())
            display(self_) -> ("{}, transcript ID: {}", self_.description(), id)
            cause(err)
        }
    }
}

quick_error! {
    /// Recoverable per-record errors; the caller may log and skip the record
    /// while continuing with the rest of the source.
    #[derive(Debug)]
    pub enum FieldError {
        /// Occurs when a coordinate column is not a valid u64 value. The
        /// first element names the offending column.
        Coordinate(field: &'static str, err: ParseIntError) {
            description("coordinate field could not be parsed")
            display(self_) -> ("{}: {} ({})", self_.description(), field, err)
            cause(err)
        }
        /// Occurs when the exon count column is not a valid u8 value.
        ExonCount(err: ParseIntError) {
            description("exon count field could not be parsed")
            display(self_) -> ("{} ({})", self_.description(), err)
            cause(err)
        }
    }
}

/// Parses a single knownGene line into a validated record.
///
/// Tokenizing, chromosome and strand resolution, coordinate normalization,
/// exon table construction, and length aggregation all happen here; the
/// returned record is fully derived and immutable apart from its write-once
/// sequence slot.
pub fn parse_line(line: &str) -> ::Result<KnownGene> {
    let fields = split_fields(line)?;

    let id = fields[0];
    let chromosome = Chromosome::from_ucsc_name(fields[1]).map_err(::Error::Model)?;
    let strand = Strand::from_symbol(fields[2]).map_err(::Error::Model)?;
    let tx_start = parse_coord("txStart", fields[3])?;
    let tx_end = parse_coord("txEnd", fields[4])?;
    let cds_start = parse_coord("cdsStart", fields[5])?;
    let cds_end = parse_coord("cdsEnd", fields[6])?;
    let exon_count = u8::from_str(fields[7])
        .map_err(|err| ::Error::Field(FieldError::ExonCount(err)))?;
    let exon_starts = parse_exon_list(fields[8], id, exon_count as usize)?;
    let exon_ends = parse_exon_list(fields[9], id, exon_count as usize)?;
    // fields[10] is unused and fields[11] repeats the id; both are ignored.

    KgBuilder::new(id, chromosome, strand, tx_start, tx_end)
        .coding_coord(cds_start, cds_end)
        .exon_coords(exon_starts.into_iter().zip(exon_ends.into_iter()))
        .build()
}

impl KnownGene {

    /// Creates a record from a single knownGene line; see `parse_line`.
    pub fn from_line(line: &str) -> ::Result<KnownGene> {
        parse_line(line)
    }
}

/// Splits a line into its twelve tab-separated fields.
fn split_fields(line: &str) -> Result<Vec<&str>, RowError> {
    let fields: Vec<&str> = line.trim_right_matches(|c| c == '\n' || c == '\r')
        .split('\t')
        .collect();
    if fields.len() != consts::NUM_FIELDS {
        return Err(RowError::FieldCount(fields.len()));
    }
    Ok(fields)
}

/// Parses a single numeric coordinate column.
///
/// The field name argument is required for when an error type is returned.
#[inline]
fn parse_coord(field: &'static str, value: &str) -> ::Result<u64> {
    u64::from_str(value)
        .map_err(|err| ::Error::Field(FieldError::Coordinate(field, err)))
}

/// Parses the given raw coordinate string into a vector of u64s, tolerating
/// one trailing comma.
///
/// The parsed length must equal the declared exon count exactly; a mismatch
/// signals corruption of the source, not a merely malformed field.
fn parse_exon_list(raw_coords: &str, id: &str, declared: usize) -> ::Result<Vec<u64>> {
    let mut coords = Vec::with_capacity(declared);
    for item in raw_coords.trim_matches(',').split(',') {
        let coord = u64::from_str(item)
            .map_err(|err| ::Error::Row(RowError::InvalidExonCoord(id.to_owned(), err)))?;
        coords.push(coord);
    }
    if coords.len() != declared {
        let err = RowError::ExonCountMismatch(id.to_owned(), declared, coords.len());
        return Err(::Error::Row(err));
    }
    Ok(coords)
}
