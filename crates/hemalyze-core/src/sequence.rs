//! Protein sequence validation, composition, and FASTA input.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::SequenceError;

/// The 20 standard amino-acid one-letter codes, in ascending order.
pub const AMINO_ACIDS: [char; 20] = [
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V',
    'W', 'Y',
];

/// Whether `c` is a standard amino acid, case-insensitive.
pub fn is_amino_acid(c: char) -> bool {
    AMINO_ACIDS.contains(&c.to_ascii_uppercase())
}

/// Strip whitespace and uppercase.
pub fn clean(sequence: &str) -> String {
    sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// True iff the sequence is non-empty after stripping whitespace and every
/// remaining character is a standard amino acid.
pub fn validate(sequence: &str) -> bool {
    check(sequence).is_ok()
}

/// Like [`validate`], but reports why the sequence was rejected.
pub fn check(sequence: &str) -> Result<(), SequenceError> {
    let mut residues = sequence.chars().filter(|c| !c.is_whitespace()).peekable();
    if residues.peek().is_none() {
        return Err(SequenceError::Empty);
    }
    match residues.find(|&c| !is_amino_acid(c)) {
        Some(bad) => Err(SequenceError::Invalid(bad)),
        None => Ok(()),
    }
}

/// Count of one amino acid in a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResidueCount {
    #[serde(rename = "aminoAcid")]
    pub amino_acid: char,
    pub count: usize,
}

/// Count each standard amino acid, sorted by letter.
///
/// Letters with no occurrences are left out and anything outside the
/// alphabet is ignored. Does not validate; call [`validate`] first when
/// invalid input must be rejected.
pub fn distribution(sequence: &str) -> Vec<ResidueCount> {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for c in clean(sequence).chars().filter(|c| AMINO_ACIDS.contains(c)) {
        *counts.entry(c).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(amino_acid, count)| ResidueCount { amino_acid, count })
        .collect()
}

/// Longest sequence the structure prediction service accepts.
pub const MAX_FOLD_LENGTH: usize = 1500;

/// Concatenate the residue lines of FASTA text.
///
/// Header lines (starting with `>`) are dropped and the other lines are
/// trimmed and joined; multiple records collapse into one sequence. Text
/// without headers passes through with line breaks removed. Use
/// [`parse_fasta_records`] to keep records apart.
pub fn parse_fasta(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.starts_with('>'))
        .map(str::trim)
        .collect()
}

/// Split FASTA text into one cleaned sequence per record.
///
/// Every `>` header line starts a new record. Residue lines before the first
/// header form a record of their own, so bare sequences come back as a
/// single entry. Records with no residues are dropped; the rest are not
/// validated.
pub fn parse_fasta_records(text: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        if line.starts_with('>') {
            if !current.is_empty() {
                records.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push_str(&clean(line));
    }
    if !current.is_empty() {
        records.push(current);
    }

    records
}

/// Parse FASTA (or bare) text into a validated, cleaned sequence.
pub fn load_sequence(text: &str) -> Result<String, SequenceError> {
    let raw = parse_fasta(text);
    check(&raw)?;
    Ok(clean(&raw))
}

/// Like [`check`], but also rejects sequences longer than [`MAX_FOLD_LENGTH`].
pub fn check_foldable(sequence: &str) -> Result<(), SequenceError> {
    check(sequence)?;
    let len = clean(sequence).len();
    if len > MAX_FOLD_LENGTH {
        return Err(SequenceError::TooLong {
            len,
            max: MAX_FOLD_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate() {
        assert!(validate("mktayiak"));
        assert!(validate("MKT AYI\nAK"));
        assert!(!validate("MKT123"));
        assert!(!validate(""));
        assert!(!validate("   "));
        assert!(!validate("MKTB"));
    }

    #[test]
    fn test_check_reports_offending_char() {
        assert_eq!(check("MKX"), Err(SequenceError::Invalid('X')));
        assert_eq!(check(" \n"), Err(SequenceError::Empty));
    }

    #[test]
    fn test_distribution_sorted_by_letter() {
        let dist = distribution("wA a\nCw");
        assert_eq!(
            dist,
            vec![
                ResidueCount { amino_acid: 'A', count: 2 },
                ResidueCount { amino_acid: 'C', count: 1 },
                ResidueCount { amino_acid: 'W', count: 2 },
            ]
        );
    }

    #[test]
    fn test_distribution_ignores_letters_outside_alphabet() {
        // B (Asx) is not one of the 20 standard residues.
        let dist = distribution("AAB");
        assert_eq!(dist, vec![ResidueCount { amino_acid: 'A', count: 2 }]);
    }

    #[test]
    fn test_parse_fasta() {
        let text = ">sp|P69905|HBA_HUMAN Hemoglobin subunit alpha\n\
                    MVLSPADKTN\n VKAAWGKVGA \n\n>second\nHAGEY\n";
        assert_eq!(parse_fasta(text), "MVLSPADKTNVKAAWGKVGAHAGEY");
    }

    #[test]
    fn test_parse_fasta_records_keeps_records_apart() {
        let records = parse_fasta_records(">p1\nmkta\nYIAK\n>p2\nGG GG\n>empty\n\n>p3\nMK1\n");
        assert_eq!(records, vec!["MKTAYIAK", "GGGG", "MK1"]);
    }

    #[test]
    fn test_parse_fasta_records_bare_sequence() {
        assert_eq!(parse_fasta_records("MKT\nAYI\n"), vec!["MKTAYI"]);
        assert!(parse_fasta_records(">only a header\n").is_empty());
    }

    #[test]
    fn test_check_foldable_length_limit() {
        assert_eq!(check_foldable(&"A".repeat(MAX_FOLD_LENGTH)), Ok(()));
        assert_eq!(
            check_foldable(&"A".repeat(5000)),
            Err(SequenceError::TooLong { len: 5000, max: MAX_FOLD_LENGTH })
        );
        assert_eq!(check_foldable("MK1"), Err(SequenceError::Invalid('1')));
    }

    #[test]
    fn test_load_sequence() {
        assert_eq!(load_sequence(">x\nmkta\nyiak").unwrap(), "MKTAYIAK");
        assert_eq!(load_sequence(">header only\n"), Err(SequenceError::Empty));
        assert_eq!(load_sequence("MKT*"), Err(SequenceError::Invalid('*')));
    }
}
