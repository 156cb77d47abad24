//! Save format of a collage.
//!
//! A saved collage is a flat list of lines with no count, delimiter or
//! escaping:
//!
//! ```text
//! background red
//! background green
//! background blue
//! text      \
//! x          |
//! y          | repeated once per item,
//! red        | in draw order
//! green      |
//! blue      /
//! ```
//!
//! The text line is kept verbatim, including surrounding whitespace, so only
//! single-line text survives a round trip.

use std::fmt::Write as _;

use crate::{
    color::Rgb,
    document::Document,
    error::{CollageError, MalformedReason, Result},
    item::Item,
};

const HEADER_LINES: usize = 3;
const RECORD_LINES: usize = 6;

/// Encodes `document` into `3 + 6 * items` lines.
///
/// Items without a color are written as black, and decode back as
/// `Some(Rgb::BLACK)`. Decoding the output reproduces the document only when
/// every item carries a color, which holds for items placed through
/// [`Document::add_item`] or generated at random.
pub fn encode(document: &Document) -> String {
    let mut out = String::new();

    let background = document.background_color();
    push_color(&mut out, background);

    for item in document.items() {
        // `writeln!` into a `String` cannot fail.
        let _ = writeln!(out, "{}", item.text());
        let _ = writeln!(out, "{}", item.x());
        let _ = writeln!(out, "{}", item.y());
        push_color(&mut out, item.color().unwrap_or(Rgb::BLACK));
    }

    out
}

fn push_color(out: &mut String, color: Rgb) {
    for channel in color.channels() {
        let _ = writeln!(out, "{channel}");
    }
}

/// Decodes a saved collage.
///
/// The returned document carries the decoded items and background; its
/// current text color is the crate default. Nothing is installed anywhere, so
/// a failure leaves every live document untouched.
///
/// Both `\n` and `\r\n` line endings are accepted, and blank lines after the
/// last complete record are ignored.
pub fn decode(text: &str) -> Result<Document> {
    let (items, background) = decode_parts(text)?;
    let mut document = Document::default();
    document.replace_all(items, background);
    Ok(document)
}

/// Decodes a saved collage into its items and background color.
pub fn decode_parts(text: &str) -> Result<(Vec<Item>, Rgb)> {
    let lines: Vec<&str> = text.lines().collect();

    // trailing blank lines are not part of any record
    let mut end = lines.len();
    while end > HEADER_LINES && lines[end - 1].trim().is_empty() {
        end -= 1;
    }
    let lines = &lines[..end];

    if lines.len() < HEADER_LINES {
        return Err(malformed(lines.len() + 1, MalformedReason::MissingHeader));
    }
    let background = parse_color(lines, 0)?;

    let body = &lines[HEADER_LINES..];
    let leftover = body.len() % RECORD_LINES;
    if leftover != 0 {
        let first_line = HEADER_LINES + body.len() - leftover + 1;
        return Err(malformed(
            first_line,
            MalformedReason::TruncatedRecord { leftover },
        ));
    }

    let items = (0..body.len() / RECORD_LINES)
        .map(|record| parse_item(lines, HEADER_LINES + record * RECORD_LINES))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("decoded collage with {} items", items.len());
    Ok((items, background))
}

/// Parses the record starting at zero-based line `start`.
fn parse_item(lines: &[&str], start: usize) -> Result<Item> {
    let text = lines[start];
    let x = parse_coordinate(lines, start + 1)?;
    let y = parse_coordinate(lines, start + 2)?;
    let color = parse_color(lines, start + 3)?;

    Item::new(text, x, y, Some(color))
        .map_err(|_| malformed(start + 1, MalformedReason::InvalidText))
}

fn parse_coordinate(lines: &[&str], index: usize) -> Result<i32> {
    let value = lines[index];
    value.parse::<i32>().map_err(|_| {
        malformed(
            index + 1,
            MalformedReason::NotAnInteger {
                value: value.to_string(),
            },
        )
    })
}

fn parse_color(lines: &[&str], start: usize) -> Result<Rgb> {
    let mut channels = [0u8; 3];
    for (offset, channel) in channels.iter_mut().enumerate() {
        let index = start + offset;
        let value = lines[index];
        let wide = value.parse::<i64>().map_err(|_| {
            malformed(
                index + 1,
                MalformedReason::NotAnInteger {
                    value: value.to_string(),
                },
            )
        })?;
        *channel = u8::try_from(wide).map_err(|_| {
            malformed(
                index + 1,
                MalformedReason::ChannelOutOfRange { value: wide },
            )
        })?;
    }
    Ok(Rgb::from(channels))
}

fn malformed(line: usize, reason: MalformedReason) -> CollageError {
    CollageError::MalformedDocument { line, reason }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new(Rgb::new(10, 20, 30), Rgb::BLACK);
        doc.add_item("Hello", 10, 20, "fallback").unwrap();
        doc.set_current_text_color(Rgb::new(200, 100, 0));
        doc.add_item("World", -5, 600, "fallback").unwrap();
        doc
    }

    fn reason(err: CollageError) -> (usize, MalformedReason) {
        match err {
            CollageError::MalformedDocument { line, reason } => (line, reason),
            other => panic!("expected MalformedDocument, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_single_item_layout() {
        let mut doc = Document::new(Rgb::LIGHT_GRAY, Rgb::BLACK);
        doc.add_item("Hello", 10, 20, "fallback").unwrap();

        let encoded = encode(&doc);
        let lines: Vec<&str> = encoded.lines().collect();
        assert_eq!(
            lines,
            ["192", "192", "192", "Hello", "10", "20", "0", "0", "0"]
        );
    }

    #[test]
    fn test_encode_line_count() {
        let doc = sample();
        assert_eq!(encode(&doc).lines().count(), 3 + 6 * doc.len());
        assert_eq!(encode(&Document::default()).lines().count(), 3);
    }

    #[test]
    fn test_encode_uncolored_item_as_black() {
        let mut doc = Document::default();
        doc.replace_all(vec![Item::new("x", 1, 1, None).unwrap()], Rgb::WHITE);
        let encoded = encode(&doc);
        assert!(encoded.ends_with("x\n1\n1\n0\n0\n0\n"));

        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.items()[0].color(), Some(Rgb::BLACK));
        assert_ne!(decoded, doc);
    }

    #[test]
    fn test_round_trip_of_placed_and_generated_items() {
        use rand::SeedableRng;

        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(3);
        let generated = crate::generator::RandomCollageGenerator::default()
            .generate("alpha beta gamma", &mut rng)
            .unwrap();
        assert!(generated.items().iter().all(|item| item.color().is_some()));
        assert_eq!(decode(&encode(&generated)).unwrap(), generated);

        let placed = sample();
        assert!(placed.items().iter().all(|item| item.color().is_some()));
        assert_eq!(decode(&encode(&placed)).unwrap(), placed);
    }

    #[test]
    fn test_round_trip() {
        let doc = sample();
        let decoded = decode(&encode(&doc)).unwrap();
        assert_eq!(decoded, doc);
        assert_eq!(decoded.items(), doc.items());
    }

    #[test]
    fn test_decode_keeps_whitespace_and_crlf() {
        let text = "1\r\n2\r\n3\r\n  padded  \r\n4\r\n5\r\n6\r\n7\r\n8\r\n";
        let doc = decode(text).unwrap();
        assert_eq!(doc.background_color(), Rgb::new(1, 2, 3));
        assert_eq!(doc.items()[0].text(), "  padded  ");
        assert_eq!(doc.items()[0].color(), Some(Rgb::new(6, 7, 8)));
    }

    #[test]
    fn test_decode_header_only() {
        let doc = decode("0\n0\n0\n").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.background_color(), Rgb::BLACK);
    }

    #[test]
    fn test_decode_ignores_trailing_blank_lines() {
        let doc = decode("0\n0\n0\nHi\n1\n2\n3\n4\n5\n\n\n").unwrap();
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_decode_truncated_record() {
        let err = decode("0\n0\n0\nHi\n1\n2\n3\n").unwrap_err();
        assert_eq!(
            reason(err),
            (4, MalformedReason::TruncatedRecord { leftover: 4 })
        );
    }

    #[test]
    fn test_decode_missing_header() {
        let err = decode("12\n34\n").unwrap_err();
        assert_eq!(reason(err), (3, MalformedReason::MissingHeader));
        assert!(decode("").is_err());
    }

    #[test]
    fn test_decode_not_an_integer() {
        let err = decode("0\n0\n0\nHi\n1.5\n2\n3\n4\n5\n").unwrap_err();
        assert_eq!(
            reason(err),
            (
                5,
                MalformedReason::NotAnInteger {
                    value: "1.5".into()
                }
            )
        );

        let err = decode("0\nzero\n0\n").unwrap_err();
        assert_eq!(reason(err).0, 2);
    }

    #[test]
    fn test_decode_channel_out_of_range() {
        let err = decode("0\n0\n256\n").unwrap_err();
        assert_eq!(
            reason(err),
            (3, MalformedReason::ChannelOutOfRange { value: 256 })
        );

        let err = decode("0\n0\n0\nHi\n1\n2\n-1\n4\n5\n").unwrap_err();
        assert_eq!(
            reason(err),
            (7, MalformedReason::ChannelOutOfRange { value: -1 })
        );
    }

    #[test]
    fn test_decode_blank_text_line() {
        let err = decode("0\n0\n0\n   \n1\n2\n3\n4\n5\nHi\n1\n2\n3\n4\n5\n").unwrap_err();
        assert_eq!(reason(err), (4, MalformedReason::InvalidText));
    }
}
