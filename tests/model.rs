extern crate knowngene;
#[macro_use]
extern crate matches;

use knowngene::{Chromosome, CodingRegion, Error, ErrorClass, KgBuilder, KnownGene,
                ModelError, Strand};
use knowngene::Chromosome::*;
use knowngene::Strand::*;


// Raw zero-based coordinates of uc021olp.1, a reverse-strand four-exon
// transcript whose coding region opens in the second exon and closes in the
// third.
fn canonical() -> KnownGene {
    KgBuilder::new("uc021olp.1", Autosome(1), Reverse, 38674705, 38680439)
        .coding_coord(38677458, 38678111)
        .exon_coords(vec![(38674705, 38676494), (38677405, 38677494),
                          (38677769, 38678123), (38680388, 38680439)])
        .build()
        .unwrap()
}

#[test]
fn kgbuilder_basic() {
    let gene = canonical();
    assert_eq!(gene.id(), "uc021olp.1");
    assert_eq!(gene.chromosome(), Autosome(1));
    assert_eq!(gene.chromosome().number(), 1);
    assert_eq!(gene.strand(), Reverse);
    assert!(gene.strand().is_reverse());
    assert!(!gene.strand().is_forward());
    assert_eq!(gene.exon_count(), 4);
    assert!(gene.is_coding());
    assert_eq!(gene.sequence(), None);
}

#[test]
fn kgbuilder_normalizes_start_coordinates() {
    let gene = canonical();
    assert_eq!(gene.tx_start(), 38674706);
    assert_eq!(gene.tx_end(), 38680439);
    assert_eq!(gene.cds_start(), 38677459);
    assert_eq!(gene.cds_end(), 38678111);
    assert_eq!(gene.exon_starts(), &[38674706, 38677406, 38677770, 38680389]);
    assert_eq!(gene.exon_ends(), &[38676494, 38677494, 38678123, 38680439]);
    assert_eq!(gene.exon_start(0), 38674706);
    assert_eq!(gene.exon_end(3), 38680439);
}

#[test]
fn exon_lengths() {
    let gene = canonical();
    let lengths: Vec<u64> = (0..gene.exon_count())
        .map(|k| gene.exon_length(k))
        .collect();
    assert_eq!(lengths, vec![1789, 89, 354, 51]);
}

#[test]
fn mrna_length_is_sum_of_exon_lengths() {
    let gene = canonical();
    let total: u64 = (0..gene.exon_count()).map(|k| gene.exon_length(k)).sum();
    assert_eq!(gene.mrna_length(), total);
    assert_eq!(gene.mrna_length(), 2283);
}

#[test]
fn cds_length_spanning_two_exons() {
    // 36 nucleotides from [38677459, 38677494] plus 342 from
    // [38677770, 38678111].
    assert_eq!(canonical().cds_length(), 378);
}

#[test]
fn intron_lengths() {
    let gene = canonical();
    assert_eq!(gene.intron_length(0), 0);
    assert_eq!(gene.intron_length(1), 911);
    assert_eq!(gene.intron_length(2), 275);
    assert_eq!(gene.intron_length(3), 2265);
    assert_eq!(gene.intron_length(4), 0);
    assert_eq!(gene.intron_length(100), 0);
}

#[test]
fn cds_scan_ignores_strand() {
    let fwd = KgBuilder::new("trx-f", Autosome(1), Forward, 38674705, 38680439)
        .coding_coord(38677458, 38678111)
        .exon_coords(vec![(38674705, 38676494), (38677405, 38677494),
                          (38677769, 38678123), (38680388, 38680439)])
        .build()
        .unwrap();
    let rev = canonical();
    assert_eq!(fwd.cds_length(), rev.cds_length());
    assert_eq!(fwd.mrna_length(), rev.mrna_length());
}

#[test]
fn cds_length_single_exon_transcript() {
    let gene = KgBuilder::new("trx-1", Autosome(2), Forward, 99, 300)
        .coding_coord(149, 250)
        .exon_coords(vec![(99, 300)])
        .build()
        .unwrap();
    assert_eq!(gene.exon_count(), 1);
    assert_eq!(gene.cds_end() - gene.cds_start() + 1, 101);
    assert_eq!(gene.cds_length(), 101);
}

#[test]
fn cds_length_contained_in_first_of_several_exons() {
    // The whole coding region sits inside exon 0; exon 1 contributes nothing
    // and the scan must neither double-count nor flag an inconsistency.
    let gene = KgBuilder::new("trx-2", Autosome(3), Forward, 0, 300)
        .coding_coord(9, 50)
        .exon_coords(vec![(0, 100), (200, 300)])
        .build()
        .unwrap();
    assert_eq!(gene.cds_length(), 41);
}

#[test]
fn cds_length_with_internal_coding_exon() {
    let gene = KgBuilder::new("trx-3", Autosome(4), Reverse, 0, 500)
        .coding_coord(49, 449)
        .exon_coords(vec![(0, 100), (199, 300), (399, 500)])
        .build()
        .unwrap();
    // 51 from the partial first coding exon, 101 from the fully-internal
    // exon, 50 from the partial last coding exon.
    assert_eq!(gene.cds_length(), 202);
}

#[test]
fn noncoding_by_sentinel() {
    let gene = KgBuilder::new("trx-nc", Autosome(5), Forward, 1000, 2000)
        .coding_coord(1500, 1500)
        .exon_coords(vec![(1000, 2000)])
        .build()
        .unwrap();
    assert!(!gene.is_coding());
    assert_eq!(gene.cds_length(), 0);
    assert_eq!(gene.cds_start(), gene.cds_end() + 1);
    assert_matches!(*gene.coding(), CodingRegion::NonCoding { boundary: 1500 });
}

#[test]
fn noncoding_by_omission() {
    let gene = KgBuilder::new("trx-nc2", X, Forward, 1000, 2000)
        .exon_coords(vec![(1000, 2000)])
        .build()
        .unwrap();
    assert!(!gene.is_coding());
    assert_eq!(gene.cds_length(), 0);
    assert_eq!(gene.cds_end(), gene.tx_end());
    assert_eq!(gene.cds_start(), gene.cds_end() + 1);
}

#[test]
fn invalid_transcript_interval() {
    let res = KgBuilder::new("trx-bad", Autosome(1), Forward, 300, 200)
        .exon_coords(vec![(300, 400)])
        .build();
    let err = res.unwrap_err();
    assert_matches!(err, Error::Model(ModelError::InvalidTranscriptInterval(_)));
    assert_eq!(err.class(), ErrorClass::SkipRecord);
}

#[test]
fn invalid_coding_interval() {
    let res = KgBuilder::new("trx-bad", Autosome(1), Forward, 0, 1000)
        .coding_coord(100, 50)
        .exon_coords(vec![(0, 1000)])
        .build();
    let err = res.unwrap_err();
    assert_matches!(err, Error::Model(ModelError::InvalidCodingInterval(_)));
    assert_eq!(err.class(), ErrorClass::SkipRecord);
}

#[test]
fn invalid_exon_interval() {
    let res = KgBuilder::new("trx-bad", Autosome(1), Forward, 0, 1000)
        .exon_coords(vec![(0, 100), (500, 400)])
        .build();
    let err = res.unwrap_err();
    assert_matches!(err, Error::Model(ModelError::InvalidExonInterval(_, 1)));
    assert_eq!(err.class(), ErrorClass::SkipRecord);
}

#[test]
fn unordered_exons() {
    let res = KgBuilder::new("trx-bad", Autosome(1), Forward, 0, 1000)
        .exon_coords(vec![(0, 300), (200, 400)])
        .build();
    let err = res.unwrap_err();
    assert_matches!(err, Error::Model(ModelError::UnorderedExons(_, 1)));
    assert_eq!(err.class(), ErrorClass::SkipRecord);
}

#[test]
fn touching_exons_are_unordered() {
    // Normalized start of the second exon equals the end of the first.
    let res = KgBuilder::new("trx-bad", Autosome(1), Forward, 0, 1000)
        .exon_coords(vec![(0, 100), (99, 200)])
        .build();
    assert_matches!(res.unwrap_err(),
                    Error::Model(ModelError::UnorderedExons(_, 1)));
}

#[test]
fn unspecified_exons() {
    let res = KgBuilder::new("trx-bad", Autosome(1), Forward, 0, 1000).build();
    assert_matches!(res.unwrap_err(),
                    Error::Model(ModelError::UnspecifiedExons(_)));
}

#[test]
fn attach_sequence_is_write_once() {
    let mut gene = canonical();
    assert!(gene.attach_sequence("ACGTACGT").is_ok());
    assert_eq!(gene.sequence(), Some("ACGTACGT"));

    let err = gene.attach_sequence("TTTT").unwrap_err();
    assert_matches!(err, Error::Model(ModelError::SequenceAlreadySet(_)));
    assert_eq!(err.class(), ErrorClass::Internal);
    // The first attachment is untouched.
    assert_eq!(gene.sequence(), Some("ACGTACGT"));
}

#[test]
fn chromosome_resolution() {
    assert_eq!(Chromosome::from_ucsc_name("chr1").unwrap(), Autosome(1));
    assert_eq!(Chromosome::from_ucsc_name("chr22").unwrap(), Autosome(22));
    assert_eq!(Chromosome::from_ucsc_name("chrX").unwrap(), X);
    assert_eq!(Chromosome::from_ucsc_name("chrY").unwrap(), Y);
    assert_eq!(Chromosome::from_ucsc_name("chrM").unwrap(), Mitochondrial);
}

#[test]
fn chromosome_numbers() {
    assert_eq!(Chromosome::from_ucsc_name("chr7").unwrap().number(), 7);
    assert_eq!(X.number(), 23);
    assert_eq!(Y.number(), 24);
    assert_eq!(Mitochondrial.number(), 25);
}

#[test]
fn chromosome_rejects_unsupported_names() {
    for name in &["chrUn_gl000243", "chr0", "chr23", "chrMT", "17", "chr", ""] {
        let res = Chromosome::from_ucsc_name(name);
        assert_matches!(res, Err(ModelError::UnknownChromosome(_)));
    }
}

#[test]
fn chromosome_error_names_the_token() {
    let err = Chromosome::from_ucsc_name("chrUn_gl000243").unwrap_err();
    assert!(format!("{}", err).contains("chrUn_gl000243"));
}

#[test]
fn chromosome_display() {
    assert_eq!(format!("{}", Autosome(7)), "chr7");
    assert_eq!(format!("{}", X), "chrX");
    assert_eq!(format!("{}", Mitochondrial), "chrM");
}

#[test]
fn strand_from_symbol() {
    assert_eq!(Strand::from_symbol("+").unwrap(), Forward);
    assert_eq!(Strand::from_symbol("-").unwrap(), Reverse);
    for symbol in &[".", "", "+-", "plus", " -"] {
        assert_matches!(Strand::from_symbol(symbol),
                        Err(ModelError::InvalidStrand(_)));
    }
}

#[test]
fn strand_display() {
    assert_eq!(format!("{}", Forward), "+");
    assert_eq!(format!("{}", Reverse), "-");
}
