//! Compact Japanese word segmentation
//!
//! A dictionary-free segmenter in the style of TinySegmenter: every gap
//! between two characters is scored by a linear model over the surrounding
//! characters, their character classes and the previous boundary decisions.
//! A positive score opens a new word.

mod model;

use model::*;

// Padding symbols around the input. They live in Supplementary Private Use
// Area-B so they are valid `char`s that ordinary text does not contain.
const B1: char = '\u{10FFF1}';
const B2: char = '\u{10FFF2}';
const B3: char = '\u{10FFF3}';
const E1: char = '\u{10FFF4}';
const E2: char = '\u{10FFF5}';
const E3: char = '\u{10FFF6}';

const OTHER: char = 'O';
const UNKNOWN: char = 'U';
const BOUNDARY: char = 'B';

#[inline]
fn weight<K: Ord>(table: &[(K, i32)], key: &K) -> i32 {
    table
        .binary_search_by(|(k, _)| k.cmp(key))
        .map(|idx| table[idx].1)
        .unwrap_or(0)
}

/// Character class used by the model
///
/// `M` kanji numerals, `H` kanji, `I` hiragana, `K` katakana, `A` latin,
/// `N` digits, `O` everything else.
pub fn char_class(c: char) -> char {
    match c as u32 {
        0x4E00 | 0x4E8C | 0x4E09 | 0x56DB | 0x4E94 | 0x516D | 0x4E03 | 0x516B | 0x4E5D | 0x5341
        | 0x767E | 0x5343 | 0x4E07 | 0x5104 | 0x5146 => 'M',
        0x4E00..=0x9FA0 | 0x3005 | 0x3006 | 0x30F5 | 0x30F6 => 'H',
        0x3041..=0x3093 => 'I',
        0x30A1..=0x30F4 | 0x30FC | 0xFF71..=0xFF9D | 0xFF9E | 0xFF70 => 'K',
        0x61..=0x7A | 0x41..=0x5A | 0xFF41..=0xFF5A | 0xFF21..=0xFF3A => 'A',
        0x30..=0x39 | 0xFF10..=0xFF19 => 'N',
        _ => OTHER,
    }
}

/// Score of the gap before `w[3]`, given a six-symbol window, its classes
/// and the last three boundary decisions
fn gap_score(w: &[char], c: &[char], p: &[char; 3]) -> i32 {
    let mut score = BIAS;

    score += weight(UP1, &p[0]);
    score += weight(UP2, &p[1]);
    score += weight(UP3, &p[2]);
    score += weight(BP1, &(p[0], p[1]));
    score += weight(BP2, &(p[1], p[2]));

    score += weight(UW1, &w[0]);
    score += weight(UW2, &w[1]);
    score += weight(UW3, &w[2]);
    score += weight(UW4, &w[3]);
    score += weight(UW5, &w[4]);
    score += weight(UW6, &w[5]);
    score += weight(BW1, &(w[1], w[2]));
    score += weight(BW2, &(w[2], w[3]));
    score += weight(BW3, &(w[3], w[4]));
    score += weight(TW1, &(w[0], w[1], w[2]));
    score += weight(TW2, &(w[1], w[2], w[3]));
    score += weight(TW3, &(w[2], w[3], w[4]));
    score += weight(TW4, &(w[3], w[4], w[5]));

    score += weight(UC1, &c[0]);
    score += weight(UC2, &c[1]);
    score += weight(UC3, &c[2]);
    score += weight(UC4, &c[3]);
    score += weight(UC5, &c[4]);
    score += weight(UC6, &c[5]);
    score += weight(BC1, &(c[1], c[2]));
    score += weight(BC2, &(c[2], c[3]));
    score += weight(BC3, &(c[3], c[4]));
    score += weight(TC1, &(c[0], c[1], c[2]));
    score += weight(TC2, &(c[1], c[2], c[3]));
    score += weight(TC3, &(c[2], c[3], c[4]));
    score += weight(TC4, &(c[3], c[4], c[5]));

    score += weight(UQ1, &(p[0], c[0]));
    score += weight(UQ2, &(p[1], c[1]));
    score += weight(UQ3, &(p[2], c[2]));
    score += weight(BQ1, &(p[1], c[1], c[2]));
    score += weight(BQ2, &(p[1], c[2], c[3]));
    score += weight(BQ3, &(p[2], c[1], c[2]));
    score += weight(BQ4, &(p[2], c[2], c[3]));
    score += weight(TQ1, &(p[1], c[0], c[1], c[2]));
    score += weight(TQ2, &(p[1], c[1], c[2], c[3]));
    score += weight(TQ3, &(p[2], c[0], c[1], c[2]));
    score += weight(TQ4, &(p[2], c[1], c[2], c[3]));

    score
}

/// Split `text` into words
///
/// Concatenating the result gives back `text` unchanged.
pub fn segment(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let symbols: Vec<char> = [B3, B2, B1]
        .into_iter()
        .chain(text.chars())
        .chain([E1, E2, E3])
        .collect();
    let classes: Vec<char> = [OTHER; 3]
        .into_iter()
        .chain(text.chars().map(char_class))
        .chain([OTHER; 3])
        .collect();

    let mut words = Vec::new();
    let mut word = String::new();
    word.push(symbols[3]);
    let mut previous = [UNKNOWN; 3];

    for idx in 4..symbols.len() - 3 {
        let score = gap_score(&symbols[idx - 3..idx + 3], &classes[idx - 3..idx + 3], &previous);

        previous = [previous[1], previous[2], if score < 0 { OTHER } else { BOUNDARY }];
        if score > 0 {
            words.push(std::mem::take(&mut word));
        }
        word.push(symbols[idx]);
    }

    words.push(word);
    words
}
