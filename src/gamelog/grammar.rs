//! Ply notation grammar: the ordered rule table that splits unspaced
//! move text into individual plies.
//!
//! The log format concatenates plies with no separators, so the grammar
//! is ambiguous at the character level: `O-O` is a prefix of `O-O-O`,
//! and `e8` is a prefix of `e8=Q`. Rules are therefore tried in a fixed
//! order, most specific first, and the first rule that matches at the
//! start of the remainder wins. The ordering constraints are:
//!
//! 1. Queenside castling before kingside, or `O-O-O` truncates to `O-O`
//!    with a dangling `-O`.
//! 2. Every capture rule before the non-capture rules (the literal `x`
//!    keeps them from colliding, but the promotion forms must still come
//!    first within each group).
//! 3. A rule with a promotion segment before its sibling without one,
//!    or the `=Q` of `e8=Q` is left behind and misread as part of the
//!    next move number.
//! 4. Within a capture/non-capture pair, the disambiguated form before
//!    the plain form.
//!
//! Matching is a pure function of the remainder text: no board state,
//! no legality checks. Each matched token is the exact source substring,
//! so rendering tokens back always reproduces the input byte-for-byte.

/// Which rule of the table matched a ply. Variant order mirrors the
/// order the rules are tried in [`RULES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    QueensideCastle,
    KingsideCastle,
    CaptureDisambigPromotion,
    CapturePromotion,
    CaptureDisambig,
    Capture,
    QuietPromotion,
    Quiet,
}

/// One ply as matched from the move text.
///
/// The token is kept as the opaque matched substring plus the rule that
/// recognized it; the text is a slice of the scanned line, never a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToken<'a> {
    pub text: &'a str,
    pub rule: RuleKind,
}

type Matcher = fn(&[u8]) -> Option<usize>;

/// The rule table. Tried strictly top to bottom; reordering it corrupts
/// output silently, without any parse error.
pub const RULES: [(RuleKind, Matcher); 8] = [
    (RuleKind::QueensideCastle, queenside_castle),
    (RuleKind::KingsideCastle, kingside_castle),
    (RuleKind::CaptureDisambigPromotion, capture_disambig_promotion),
    (RuleKind::CapturePromotion, capture_promotion),
    (RuleKind::CaptureDisambig, capture_disambig),
    (RuleKind::Capture, capture),
    (RuleKind::QuietPromotion, quiet_promotion),
    (RuleKind::Quiet, quiet),
];

/// Match the longest ply notation at the start of `rest`, or `None` if
/// no rule applies there.
pub fn match_ply(rest: &str) -> Option<MoveToken<'_>> {
    let bytes = rest.as_bytes();
    for (rule, matcher) in RULES {
        if let Some(len) = matcher(bytes) {
            return Some(MoveToken {
                text: &rest[..len],
                rule,
            });
        }
    }
    None
}

fn is_piece(b: u8) -> bool {
    matches!(b, b'K' | b'Q' | b'R' | b'B' | b'N')
}

fn is_promotion(b: u8) -> bool {
    matches!(b, b'Q' | b'R' | b'B' | b'N')
}

fn is_file(b: u8) -> bool {
    (b'a'..=b'h').contains(&b)
}

fn is_rank(b: u8) -> bool {
    (b'1'..=b'8').contains(&b)
}

/// Consume the run of `+`/`#` check and mate markers from `i` on.
fn suffixes(bytes: &[u8], mut i: usize) -> usize {
    while let Some(&b) = bytes.get(i) {
        if b == b'+' || b == b'#' {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// Match a destination square (file then rank) at `i`.
fn square(bytes: &[u8], i: usize) -> Option<usize> {
    if is_file(*bytes.get(i)?) && is_rank(*bytes.get(i + 1)?) {
        Some(i + 2)
    } else {
        None
    }
}

fn queenside_castle(bytes: &[u8]) -> Option<usize> {
    bytes.starts_with(b"O-O-O").then(|| suffixes(bytes, 5))
}

fn kingside_castle(bytes: &[u8]) -> Option<usize> {
    bytes.starts_with(b"O-O").then(|| suffixes(bytes, 3))
}

/// Leading piece letter plus an optional single-character disambiguator.
/// The disambiguator is consumed only when the capture marker follows
/// it, so `Nxb5` and `Ndxb5` both land in the right place.
fn piece_with_disambig(bytes: &[u8]) -> Option<usize> {
    if !is_piece(*bytes.first()?) {
        return None;
    }
    match bytes.get(1) {
        Some(&d) if (is_file(d) || is_rank(d)) && bytes.get(2) == Some(&b'x') => Some(2),
        _ => Some(1),
    }
}

/// Shared tail of the four capture rules: the `x`, the destination
/// square, and (when `promotion` is set) a mandatory `=<piece>` segment.
fn capture_tail(bytes: &[u8], i: usize, promotion: bool) -> Option<usize> {
    if *bytes.get(i)? != b'x' {
        return None;
    }
    let mut i = square(bytes, i + 1)?;
    if promotion {
        if *bytes.get(i)? != b'=' || !is_promotion(*bytes.get(i + 1)?) {
            return None;
        }
        i += 2;
    }
    Some(suffixes(bytes, i))
}

fn capture_disambig_promotion(bytes: &[u8]) -> Option<usize> {
    let i = piece_with_disambig(bytes)?;
    capture_tail(bytes, i, true)
}

fn capture_promotion(bytes: &[u8]) -> Option<usize> {
    let b0 = *bytes.first()?;
    if !(is_piece(b0) || is_file(b0)) {
        return None;
    }
    capture_tail(bytes, 1, true)
}

fn capture_disambig(bytes: &[u8]) -> Option<usize> {
    let i = piece_with_disambig(bytes)?;
    capture_tail(bytes, i, false)
}

fn capture(bytes: &[u8]) -> Option<usize> {
    let b0 = *bytes.first()?;
    if !(is_piece(b0) || is_file(b0)) {
        return None;
    }
    capture_tail(bytes, 1, false)
}

/// A destination square preceded by exactly one disambiguating file or
/// rank character.
fn square_with_disambig(bytes: &[u8], i: usize) -> Option<usize> {
    let d = *bytes.get(i)?;
    if is_file(d) || is_rank(d) {
        square(bytes, i + 1)
    } else {
        None
    }
}

/// Shared tail of the two non-capture rules: optional piece letter, at
/// most one disambiguating character, destination square, then (when
/// `promotion` is set) a mandatory `=<piece>` segment.
///
/// The disambiguated form is tried first so `N1c3` keeps its `1`; a
/// plain `e4` cannot be over-consumed because the character after its
/// file must itself be a file for the disambiguated form to fire.
fn quiet_tail(bytes: &[u8], promotion: bool) -> Option<usize> {
    let start = usize::from(bytes.first().copied().is_some_and(is_piece));
    let mut i = square_with_disambig(bytes, start).or_else(|| square(bytes, start))?;
    if promotion {
        if *bytes.get(i)? != b'=' || !is_promotion(*bytes.get(i + 1)?) {
            return None;
        }
        i += 2;
    }
    Some(suffixes(bytes, i))
}

fn quiet_promotion(bytes: &[u8]) -> Option<usize> {
    quiet_tail(bytes, true)
}

fn quiet(bytes: &[u8]) -> Option<usize> {
    quiet_tail(bytes, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(input: &str) -> (&str, RuleKind) {
        let token = match_ply(input)
            .unwrap_or_else(|| panic!("expected a match at the start of {input:?}"));
        (token.text, token.rule)
    }

    #[test]
    fn queenside_castle_wins_over_kingside_prefix() {
        assert_eq!(matched("O-O-O"), ("O-O-O", RuleKind::QueensideCastle));
        assert_eq!(matched("O-O-O+"), ("O-O-O+", RuleKind::QueensideCastle));
        assert_eq!(matched("O-O-O#"), ("O-O-O#", RuleKind::QueensideCastle));
    }

    #[test]
    fn kingside_castle_stops_before_following_ply() {
        assert_eq!(matched("O-O"), ("O-O", RuleKind::KingsideCastle));
        assert_eq!(matched("O-Oa6"), ("O-O", RuleKind::KingsideCastle));
        // Two concatenated castles: the first must not grab the second.
        assert_eq!(matched("O-OO-O"), ("O-O", RuleKind::KingsideCastle));
    }

    #[test]
    fn promotion_consumed_with_the_push() {
        assert_eq!(matched("e8=Q+"), ("e8=Q+", RuleKind::QuietPromotion));
        assert_eq!(matched("e8=Q"), ("e8=Q", RuleKind::QuietPromotion));
        // Without the promotion segment the plain rule takes over.
        assert_eq!(matched("e8"), ("e8", RuleKind::Quiet));
    }

    #[test]
    fn capture_promotion_consumed_whole() {
        assert_eq!(matched("exd8=Q#"), ("exd8=Q#", RuleKind::CapturePromotion));
        assert_eq!(matched("bxa8=N"), ("bxa8=N", RuleKind::CapturePromotion));
    }

    #[test]
    fn disambiguator_stays_with_its_capture() {
        assert_eq!(matched("Ndxb5"), ("Ndxb5", RuleKind::CaptureDisambig));
        assert_eq!(matched("R1xe1+"), ("R1xe1+", RuleKind::CaptureDisambig));
        // No disambiguator: same rule, shorter match.
        assert_eq!(matched("Nxb5"), ("Nxb5", RuleKind::CaptureDisambig));
    }

    #[test]
    fn piece_capture_with_disambiguator_and_promotion() {
        // Lexically valid even though only pawns promote; the grammar
        // does not know chess rules.
        assert_eq!(
            matched("Q1xe8=N"),
            ("Q1xe8=N", RuleKind::CaptureDisambigPromotion)
        );
    }

    #[test]
    fn pawn_capture_uses_origin_file() {
        assert_eq!(matched("exd5"), ("exd5", RuleKind::Capture));
        assert_eq!(matched("bxc3Nf6"), ("bxc3", RuleKind::Capture));
    }

    #[test]
    fn quiet_moves_stop_at_the_next_ply() {
        assert_eq!(matched("e4e5"), ("e4", RuleKind::Quiet));
        assert_eq!(matched("Nf3Nf6"), ("Nf3", RuleKind::Quiet));
        assert_eq!(matched("Qh5#"), ("Qh5#", RuleKind::Quiet));
    }

    #[test]
    fn quiet_disambiguators_are_kept() {
        assert_eq!(matched("Nbd2"), ("Nbd2", RuleKind::Quiet));
        assert_eq!(matched("R1a3"), ("R1a3", RuleKind::Quiet));
        // The disambiguated form must not fire on a lone square.
        assert_eq!(matched("d4cxd4"), ("d4", RuleKind::Quiet));
    }

    #[test]
    fn check_and_mate_suffixes_accumulate() {
        assert_eq!(matched("Bb5+"), ("Bb5+", RuleKind::Quiet));
        assert_eq!(matched("Qxf7#"), ("Qxf7#", RuleKind::CaptureDisambig));
        assert_eq!(matched("e4++"), ("e4++", RuleKind::Quiet));
    }

    #[test]
    fn garbage_matches_nothing() {
        assert!(match_ply("").is_none());
        assert!(match_ply("xyz").is_none());
        assert!(match_ply("Z4").is_none());
        assert!(match_ply("i4").is_none());
        assert!(match_ply("=Q").is_none());
        assert!(match_ply("-O").is_none());
    }
}
