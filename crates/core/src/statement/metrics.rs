//! Glyph widths of the standard Helvetica faces, for aligning text.
//!
//! Widths are in thousandths of the font size (AFM units) for the printable ASCII
//! range. Oblique shares the regular widths.
#![allow(clippy::float_arithmetic)]

/// Font face used on the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Face {
    Regular,
    Bold,
    Oblique,
}

/// Width used for characters outside the table.
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    333, 333, 584, 584, 584, 611, 975,
    // A-Z
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    333, 278, 333, 584, 556, 333,
    // a-z
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // { | } ~
    389, 280, 389, 584,
];

fn glyph_width(table: &[u16; 95], c: char) -> u16 {
    u32::from(c)
        .checked_sub(32)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or(FALLBACK_WIDTH)
}

/// Width of `text` in points when set in `face` at `size` points.
pub(crate) fn text_width(text: &str, face: Face, size: f32) -> f32 {
    let table = match face {
        Face::Regular | Face::Oblique => &HELVETICA,
        Face::Bold => &HELVETICA_BOLD,
    };

    let units: f32 = text
        .chars()
        .map(|c| f32::from(glyph_width(table, c)))
        .sum();

    units * size / 1000.0
}

/// Breaks `text` into lines no wider than `max_width` points.
///
/// Lines break between words. A word wider than the limit on its own is split
/// between characters. Blank text yields a single empty line.
pub(crate) fn wrap_text(text: &str, face: Face, size: f32, max_width: f32) -> Vec<String> {
    let fits = |line: &str| text_width(line, face, size) <= max_width;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::replace(&mut current, c.to_string()));
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_are_uniform() {
        let a = text_width("1234567890", Face::Regular, 10.0);
        let b = text_width("0000000000", Face::Regular, 10.0);
        assert!((a - b).abs() < f32::EPSILON);
        assert!((a - 55.6).abs() < 0.001);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = text_width("Laba Bersih", Face::Regular, 9.5);
        let bold = text_width("Laba Bersih", Face::Bold, 9.5);
        assert!(bold > regular);
    }

    #[test]
    fn test_oblique_matches_regular() {
        let regular = text_width("Warung", Face::Regular, 10.0);
        let oblique = text_width("Warung", Face::Oblique, 10.0);
        assert!((regular - oblique).abs() < f32::EPSILON);
    }

    #[test]
    fn test_non_ascii_uses_fallback() {
        let width = text_width("é", Face::Regular, 1000.0);
        assert!((width - f32::from(FALLBACK_WIDTH)).abs() < 0.001);
    }

    #[test]
    fn test_empty_text() {
        assert!(text_width("", Face::Bold, 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        assert_eq!(
            wrap_text("\"Warung Sejahtera\"", Face::Oblique, 10.0, 535.0),
            vec!["\"Warung Sejahtera\"".to_string()]
        );
    }

    #[test]
    fn test_wrap_breaks_between_words() {
        let text = "Koperasi Serba Usaha Karya Mandiri Sejahtera Bersama ".repeat(4);
        let lines = wrap_text(&text, Face::Oblique, 10.0, 200.0);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| text_width(line, Face::Oblique, 10.0) <= 200.0));
        assert_eq!(lines.join(" "), text.trim_end());
    }

    #[test]
    fn test_wrap_splits_overlong_word() {
        let word = "W".repeat(60);
        let lines = wrap_text(&word, Face::Bold, 12.0, 100.0);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| text_width(line, Face::Bold, 12.0) <= 100.0));
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_blank_text() {
        assert_eq!(wrap_text("   ", Face::Regular, 10.0, 100.0), vec![String::new()]);
    }
}
