#![deny(
        trivial_casts, trivial_numeric_casts,
        unsafe_code,
        unstable_features,
        unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unused_results)]

extern crate itertools;
#[macro_use]
extern crate quick_error;

mod model;
pub use model::{Chromosome, CodingRegion, KgBuilder, KnownGene, ModelError, Strand};

mod io_knowngene;
pub use io_knowngene::{parse_line, FieldError, RowError};


quick_error! {
    #[derive(Debug)]
    pub enum Error {
        Model(err: ModelError) {
            description(err.description())
            display("{}", err)
            from()
            cause(err)
        }
        Field(err: FieldError) {
            description(err.description())
            display("{}", err)
            from()
            cause(err)
        }
        Row(err: RowError) {
            description(err.description())
            display("{}", err)
            from()
            cause(err)
        }
    }
}

/// Propagation policy of an error, for callers iterating over many records.
///
/// The original tooling aborted the whole process on structural corruption;
/// here the caller decides, based on this classification, whether to skip one
/// record or stop reading the source altogether.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Only the offending record is malformed; later records are unaffected.
    SkipRecord,
    /// The data source itself is structurally corrupt and cannot be trusted
    /// beyond this record.
    AbortBatch,
    /// An invariant this crate enforces was violated; never recovered.
    Internal,
}

impl Error {
    /// Classifies the error so the caller can choose a skip-vs-abort policy.
    pub fn class(&self) -> ErrorClass {
        match *self {
            Error::Row(_) => ErrorClass::AbortBatch,
            Error::Field(_) => ErrorClass::SkipRecord,
            Error::Model(ref err) => match *err {
                ModelError::CdsScanInconsistency(..) |
                ModelError::SequenceAlreadySet(..) => ErrorClass::Internal,
                _ => ErrorClass::SkipRecord,
            },
        }
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;

// Helper type for raw coordinate pairs
type Coord<T> = (T, T);

// Crate-wide constants
mod consts {
    // Number of tab-separated fields in a knownGene row.
    pub(crate) const NUM_FIELDS: usize = 12;

    // Prefix shared by all supported chromosome names.
    pub(crate) const CHR_PREFIX: &'static str = "chr";

    // Numeric codes of the non-autosomal chromosomes.
    pub(crate) const CHR_X: u8 = 23;
    pub(crate) const CHR_Y: u8 = 24;
    pub(crate) const CHR_M: u8 = 25;

    // Largest supported autosome number.
    pub(crate) const MAX_AUTOSOME: u8 = 22;
}
