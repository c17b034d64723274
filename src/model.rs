use std::error::Error;
use std::fmt;

use itertools::Itertools;

use {Coord, consts};


quick_error! {
    #[derive(Debug)]
    pub enum ModelError {
        /// Occurs when the chromosome name is not `chr1`..`chr22`, `chrX`,
        /// `chrY`, or `chrM`.
        UnknownChromosome(token: String) {
            description("chromosome name is not in the supported set")
            display(self_) -> ("{}: {}", self_.description(), token)
        }
        /// Occurs when the strand value is not a single `+` or `-` character.
        InvalidStrand(token: String) {
            description("strand is not a single '+' or '-' character")
            display(self_) -> ("{}: {}", self_.description(), token)
        }
        InvalidTranscriptInterval(id: String) {
            description("transcript has larger start than end coordinate")
            display(self_) -> ("{}, transcript ID: {}", self_.description(), id)
        }
        InvalidCodingInterval(id: String) {
            description("coding region has larger start than end coordinate")
            display(self_) -> ("{}, transcript ID: {}", self_.description(), id)
        }
        UnspecifiedExons(id: String) {
            description("transcript is defined without exons")
            display(self_) -> ("{}, transcript ID: {}", self_.description(), id)
        }
        InvalidExonInterval(id: String, index: usize) {
            description("exon has larger start than end coordinate")
            display(self_) -> ("{}, transcript ID: {}, exon: {}",
                               self_.description(), id, index)
        }
        UnorderedExons(id: String, index: usize) {
            description("exon coordinates overlap or are not in ascending order")
            display(self_) -> ("{}, transcript ID: {}, exon: {}",
                               self_.description(), id, index)
        }
        /// Occurs when the coding end precedes an exon while the coding-length
        /// scan is still open. The construction invariants rule this out, so
        /// hitting it means the record state itself is corrupt.
        CdsScanInconsistency(id: String, index: usize) {
            description("coding end precedes an exon while coding is still open")
            display(self_) -> ("{}, transcript ID: {}, exon: {}",
                               self_.description(), id, index)
        }
        SequenceAlreadySet(id: String) {
            description("transcript sequence can only be attached once")
            display(self_) -> ("{}, transcript ID: {}", self_.description(), id)
        }
    }
}

/// Strand of a transcript, restricted to the two values a knownGene row may
/// carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parses the strand column, which must be exactly `+` or `-`.
    pub fn from_symbol(symbol: &str) -> Result<Self, ModelError> {
        match symbol {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Err(ModelError::InvalidStrand(symbol.to_owned())),
        }
    }

    pub fn is_forward(&self) -> bool {
        *self == Strand::Forward
    }

    pub fn is_reverse(&self) -> bool {
        *self == Strand::Reverse
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Strand::Forward => f.write_str("+"),
            Strand::Reverse => f.write_str("-"),
        }
    }
}

/// Chromosome of a transcript, restricted to the primary human assembly.
///
/// Alternate scaffolds and contigs are deliberately unsupported; resolving
/// them fails with a recoverable error so the caller can skip the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chromosome {
    Autosome(u8),
    X,
    Y,
    Mitochondrial,
}

impl Chromosome {
    /// Resolves a UCSC chromosome name such as `chr7`, `chrX`, or `chrM`.
    pub fn from_ucsc_name(name: &str) -> Result<Self, ModelError> {
        match name {
            "chrX" => return Ok(Chromosome::X),
            "chrY" => return Ok(Chromosome::Y),
            "chrM" => return Ok(Chromosome::Mitochondrial),
            _ => {}
        }
        if !name.starts_with(consts::CHR_PREFIX) {
            return Err(ModelError::UnknownChromosome(name.to_owned()));
        }
        match name[consts::CHR_PREFIX.len()..].parse::<u8>() {
            Ok(num) if num >= 1 && num <= consts::MAX_AUTOSOME =>
                Ok(Chromosome::Autosome(num)),
            _ => Err(ModelError::UnknownChromosome(name.to_owned())),
        }
    }

    /// Numeric code of the chromosome: autosomes map to their own number,
    /// X to 23, Y to 24, and the mitochondrial chromosome to 25.
    pub fn number(&self) -> u8 {
        match *self {
            Chromosome::Autosome(num) => num,
            Chromosome::X => consts::CHR_X,
            Chromosome::Y => consts::CHR_Y,
            Chromosome::Mitochondrial => consts::CHR_M,
        }
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Chromosome::Autosome(num) => write!(f, "{}{}", consts::CHR_PREFIX, num),
            Chromosome::X => f.write_str("chrX"),
            Chromosome::Y => f.write_str("chrY"),
            Chromosome::Mitochondrial => f.write_str("chrM"),
        }
    }
}

/// Coding bounds of a transcript in one-based, fully-closed coordinates.
///
/// knownGene rows mark non-coding transcripts by setting the raw coding start
/// and end to the same position; after start normalization that surfaces as
/// `start == end + 1`. The variant makes the distinction explicit while
/// `start()` and `end()` keep reporting the conventional values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodingRegion {
    Coding { start: u64, end: u64 },
    NonCoding { boundary: u64 },
}

impl CodingRegion {
    // `start` must already be normalized; `end` is used as written.
    fn from_bounds(id: &str, start: u64, end: u64) -> Result<Self, ModelError> {
        if start == end + 1 {
            Ok(CodingRegion::NonCoding { boundary: end })
        } else if start <= end {
            Ok(CodingRegion::Coding { start: start, end: end })
        } else {
            Err(ModelError::InvalidCodingInterval(id.to_owned()))
        }
    }

    pub fn start(&self) -> u64 {
        match *self {
            CodingRegion::Coding { start, .. } => start,
            CodingRegion::NonCoding { boundary } => boundary + 1,
        }
    }

    pub fn end(&self) -> u64 {
        match *self {
            CodingRegion::Coding { end, .. } => end,
            CodingRegion::NonCoding { boundary } => boundary,
        }
    }

    pub fn is_coding(&self) -> bool {
        match *self {
            CodingRegion::Coding { .. } => true,
            CodingRegion::NonCoding { .. } => false,
        }
    }
}

/// One validated transcript of the UCSC knownGene annotation table.
///
/// All coordinates are one-based and fully closed, in ascending chromosomal
/// order regardless of strand. Structural fields never change after `build`;
/// the spliced cDNA sequence is the only late attachment, and it can happen
/// at most once.
#[derive(Debug, Clone)]
pub struct KnownGene {
    id: String,
    chromosome: Chromosome,
    strand: Strand,
    tx_start: u64,
    tx_end: u64,
    coding: CodingRegion,
    exon_starts: Vec<u64>,
    exon_ends: Vec<u64>,
    mrna_length: u64,
    cds_length: u64,
    sequence: Option<String>,
}

impl KnownGene {

    /// Returns the transcript identifier, e.g. `uc021olp.1`.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn chromosome(&self) -> Chromosome {
        self.chromosome
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Returns the transcription start (one-based, fully closed).
    pub fn tx_start(&self) -> u64 {
        self.tx_start
    }

    pub fn tx_end(&self) -> u64 {
        self.tx_end
    }

    pub fn coding(&self) -> &CodingRegion {
        &self.coding
    }

    /// Returns the coding start. For non-coding transcripts this is one more
    /// than `cds_end`, preserving the format's sentinel convention.
    pub fn cds_start(&self) -> u64 {
        self.coding.start()
    }

    pub fn cds_end(&self) -> u64 {
        self.coding.end()
    }

    pub fn is_coding(&self) -> bool {
        self.coding.is_coding()
    }

    pub fn exon_count(&self) -> usize {
        self.exon_starts.len() // must be the same as exon_ends
    }

    pub fn exon_starts(&self) -> &[u64] {
        self.exon_starts.as_slice()
    }

    pub fn exon_ends(&self) -> &[u64] {
        self.exon_ends.as_slice()
    }

    /// Returns the start of exon `k` (zero-based index, must be in range).
    pub fn exon_start(&self, k: usize) -> u64 {
        self.exon_starts[k]
    }

    /// Returns the end of exon `k` (zero-based index, must be in range).
    pub fn exon_end(&self, k: usize) -> u64 {
        self.exon_ends[k]
    }

    /// Returns the length of exon `k` in nucleotides.
    ///
    /// Coordinates are fully closed, so an exon spanning positions 10..=20
    /// holds 11 nucleotides. `k` must be a valid exon index.
    pub fn exon_length(&self, k: usize) -> u64 {
        self.exon_ends[k] - self.exon_starts[k] + 1
    }

    /// Returns the length of the intron preceding exon `k`.
    ///
    /// There is no intron before the first exon, so the real introns are
    /// indexed `1..exon_count`; any `k` outside that range yields 0.
    pub fn intron_length(&self, k: usize) -> u64 {
        if k == 0 || k >= self.exon_count() {
            return 0;
        }
        self.exon_starts[k] - self.exon_ends[k - 1] - 1
    }

    /// Returns the total length of the spliced mRNA.
    pub fn mrna_length(&self) -> u64 {
        self.mrna_length
    }

    /// Returns the total length of the coding sequence, 0 for non-coding
    /// transcripts.
    pub fn cds_length(&self) -> u64 {
        self.cds_length
    }

    /// Returns the attached cDNA sequence, if any.
    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_ref().map(String::as_str)
    }

    /// Attaches the spliced cDNA sequence of the transcript.
    ///
    /// The sequence slot is write-once; attaching a second time fails rather
    /// than silently overwriting.
    pub fn attach_sequence<T>(&mut self, sequence: T) -> ::Result<()>
        where T: Into<String>
    {
        if self.sequence.is_some() {
            let err = ModelError::SequenceAlreadySet(self.id.clone());
            return Err(::Error::Model(err));
        }
        self.sequence = Some(sequence.into());
        Ok(())
    }
}

/// Builder for `KnownGene` values from raw UCSC coordinates.
///
/// All coordinate inputs use the file's zero-based, half-open convention;
/// `build` performs the one-time shift of start coordinates to one-based,
/// fully-closed numbering before any validation or length aggregation, so
/// consumers never repeat the conversion.
pub struct KgBuilder {
    id: String,
    chromosome: Chromosome,
    strand: Strand,
    tx_start: u64,
    tx_end: u64,
    coding_coord: Option<Coord<u64>>,
    exon_coords: Vec<Coord<u64>>,
}

impl KgBuilder {

    pub fn new<T>(id: T, chromosome: Chromosome, strand: Strand,
                  tx_start: u64, tx_end: u64) -> Self
        where T: Into<String>
    {
        KgBuilder {
            id: id.into(),
            chromosome: chromosome,
            strand: strand,
            tx_start: tx_start,
            tx_end: tx_end,
            coding_coord: None,
            exon_coords: Vec::new(),
        }
    }

    /// Sets the raw coding bounds. Leaving them unset marks the transcript
    /// non-coding, as does the format's raw `start == end` convention.
    pub fn coding_coord(mut self, start: u64, end: u64) -> Self {
        self.coding_coord = Some((start, end));
        self
    }

    pub fn exon_coords<E>(mut self, coords: E) -> Self
        where E: IntoIterator<Item=Coord<u64>>
    {
        self.exon_coords = coords.into_iter().collect();
        self
    }

    pub fn build(self) -> ::Result<KnownGene> {
        let tx_start = normalize_start(self.tx_start);
        if tx_start > self.tx_end {
            let err = ModelError::InvalidTranscriptInterval(self.id);
            return Err(::Error::Model(err));
        }

        let coding = match self.coding_coord {
            Some((start, end)) =>
                CodingRegion::from_bounds(&self.id, normalize_start(start), end)
                    .map_err(::Error::Model)?,
            None => CodingRegion::NonCoding { boundary: self.tx_end },
        };

        if self.exon_coords.is_empty() {
            let err = ModelError::UnspecifiedExons(self.id);
            return Err(::Error::Model(err));
        }
        let mut exon_starts = Vec::with_capacity(self.exon_coords.len());
        let mut exon_ends = Vec::with_capacity(self.exon_coords.len());
        for (index, &(start, end)) in self.exon_coords.iter().enumerate() {
            let start = normalize_start(start);
            if start > end {
                let err = ModelError::InvalidExonInterval(self.id.clone(), index);
                return Err(::Error::Model(err));
            }
            exon_starts.push(start);
            exon_ends.push(end);
        }
        // The coding-length scan relies on exons being ascending and disjoint.
        for (index, ((_, &prev_end), (&next_start, _))) in
            exon_starts.iter().zip(exon_ends.iter()).tuple_windows().enumerate()
        {
            if next_start <= prev_end {
                let err = ModelError::UnorderedExons(self.id.clone(), index + 1);
                return Err(::Error::Model(err));
            }
        }

        let mrna_length = exon_starts.iter().zip(exon_ends.iter())
            .map(|(&start, &end)| end - start + 1)
            .sum();
        let cds_length = coding_length(&self.id, &coding, &exon_starts, &exon_ends)
            .map_err(::Error::Model)?;

        Ok(KnownGene {
            id: self.id,
            chromosome: self.chromosome,
            strand: self.strand,
            tx_start: tx_start,
            tx_end: self.tx_end,
            coding: coding,
            exon_starts: exon_starts,
            exon_ends: exon_ends,
            mrna_length: mrna_length,
            cds_length: cds_length,
            sequence: None,
        })
    }
}

// UCSC starts are zero-based and half-open; shifting them by one makes each
// interval one-based and fully closed. End coordinates already are.
#[inline]
fn normalize_start(start: u64) -> u64 {
    start + 1
}

// Total length of the coding sequence, from one ascending scan over the exon
// table. The coding interval is given in chromosomal coordinates and may open
// and close in different exons; since the arithmetic only ever measures the
// overlap between that interval and each exon, transcript orientation never
// enters into it and both strands share the same scan.
fn coding_length(
    id: &str,
    coding: &CodingRegion,
    exon_starts: &[u64],
    exon_ends: &[u64],
) -> Result<u64, ModelError> {
    let (cds_start, cds_end) = match *coding {
        CodingRegion::NonCoding { .. } => return Ok(0),
        CodingRegion::Coding { start, end } => (start, end),
    };

    let mut total = 0;
    for (index, (&exon_start, &exon_end)) in
        exon_starts.iter().zip(exon_ends.iter()).enumerate()
    {
        if cds_start >= exon_start && cds_start <= exon_end {
            if cds_end <= exon_end {
                // Coding region contained in a single exon; no later exon
                // can contribute.
                total = cds_end - cds_start + 1;
                break;
            }
            // Partial first coding exon.
            total += exon_end - cds_start + 1;
            continue;
        }
        if total > 0 {
            if cds_end < exon_start {
                return Err(ModelError::CdsScanInconsistency(id.to_owned(), index));
            } else if cds_end <= exon_end {
                // Partial last coding exon.
                total += cds_end - exon_start + 1;
                break;
            } else {
                // Fully coding internal exon.
                total += exon_end - exon_start + 1;
            }
        }
    }
    Ok(total)
}
