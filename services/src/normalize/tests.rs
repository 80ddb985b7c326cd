use std::time::{
    Duration,
    Instant,
};

use super::*;

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "Song",
    "Song (Remastered 2009)",
    "Song (Acoustic)",
    "Song - Remastered 2011",
    "Song feat. Jay-Z",
    "Song (Live) [Remastered]",
    "(Live)",
    "(Li(Live)ve)",
    "Song (Acoustic) (Live)",
    "Abbey Road (Remastered)",
    "Come Together - Remastered 2019",
    "Title [Live at Wembley] - Remastered",
    "Song - Live Forever",
    "Song ft. Someone (Radio Edit)",
    "Song (feat. Guest) - 2011 Remaster",
    "  Padded Title  ",
    "Loft. Party",
    "Song\n - Remastered\nsecond line",
    "Album (Remastered [2011])",
    "Song [Live (Bonus)]",
    "Song (Live]",
    "[a (Live] b)",
];

#[test]
fn test_empty() {
    assert_eq!(clean(""), "");
    assert_eq!(clean(None::<&str>), "");
    assert_eq!(clean("   "), "");
}

#[test]
fn test_bracketed_junk() {
    assert_eq!(clean("Song (Remastered 2009)"), "Song");
    assert_eq!(clean("Title [Live at Wembley]"), "Title");
    assert_eq!(clean("Song (MONO)"), "Song");
    assert_eq!(clean("Album (Super Deluxe Edition)"), "Album");
    assert_eq!(clean("Album [25th Anniversary Expanded]"), "Album");
}

#[test]
fn test_multiple_segments() {
    assert_eq!(clean("Song (Live) [Remastered]"), "Song");
    assert_eq!(clean("Song (Stereo Mix) (2015 Version) Extra"), "Song Extra");
}

#[test]
fn test_legitimate_parenthetical() {
    assert_eq!(clean("Song (Acoustic)"), "Song (Acoustic)");
    assert_eq!(clean("Song (Acoustic) (Live)"), "Song (Acoustic)");
    assert_eq!(clean("(What's the Story) Morning Glory?"), "(What's the Story) Morning Glory?");
}

#[test]
fn test_junk_only() {
    assert_eq!(clean("(Live)"), "");
    assert_eq!(clean("[Remastered] (feat. Somebody)"), "");
}

#[test]
fn test_nested_brackets() {
    assert_eq!(clean("(Li(Live)ve)"), "");
    assert_eq!(clean("Song ((Live))"), "Song ()");
}

#[test]
fn test_junk_around_clean_brackets() {
    assert_eq!(clean("Album (Remastered [2011])"), "Album");
    assert_eq!(clean("Song [Live (Bonus)]"), "Song");
    assert_eq!(clean("Song (Live at Wembley [Disc 1])"), "Song");
    assert_eq!(clean("Song (Bonus [Disc 1]) (Acoustic)"), "Song (Bonus [Disc 1]) (Acoustic)");
    assert_eq!(clean("Song ([Disc 1] Live)"), "Song");
}

#[test]
fn test_mismatched_brackets_kept() {
    assert_eq!(clean("Song (Live]"), "Song (Live]");
    assert_eq!(clean("Song [Live)"), "Song [Live)");
    assert_eq!(clean("[a (Live] b)"), "[a (Live] b)");
    assert_eq!(clean("Song (Live] (Remastered)"), "Song (Live]");
}

#[test]
fn test_deep_nesting_is_linear() {
    const DEPTH: usize = 100_000;
    let start = Instant::now();

    let spliced = format!("{}(Live){}", "(Li".repeat(DEPTH), "ve)".repeat(DEPTH));
    assert_eq!(clean(spliced.as_str()), "");

    let clean_nest = format!("{}x{}", "(".repeat(DEPTH), ")".repeat(DEPTH));
    assert_eq!(clean(clean_nest.as_str()), clean_nest);

    assert!(start.elapsed() < Duration::from_secs(5), "took {:?}", start.elapsed());
}

#[test]
fn test_suffixes() {
    assert_eq!(clean("Song - Remastered 2011"), "Song");
    assert_eq!(clean("Song - 2009 remaster"), "Song");
    assert_eq!(clean("Song - Live"), "Song");
    assert_eq!(clean("Song feat. Jay-Z"), "Song");
    assert_eq!(clean("Song FT. Jay-Z"), "Song");
    assert_eq!(clean("Song ft. Someone (Radio Edit)"), "Song");
}

#[test]
fn test_suffix_after_bracket_removal() {
    assert_eq!(clean("Song (feat. Guest) - 2011 Remaster"), "Song");
    assert_eq!(clean("Title [Live at Wembley] - Remastered"), "Title");
}

#[test]
fn test_suffix_needs_separator() {
    // Hyphenated names are not a " - " separator
    assert_eq!(clean("Jay-Z"), "Jay-Z");
    assert_eq!(clean("Live-Evil"), "Live-Evil");
    assert_eq!(clean("Loft. Party"), "Loft. Party");
    assert_eq!(clean("Left Party"), "Left Party");
}

#[test]
fn test_ft_requires_literal_period() {
    assert_eq!(clean("Song (ftx)"), "Song (ftx)");
    assert_eq!(clean("Song ftx Other"), "Song ftx Other");
}

#[test]
fn test_live_suffix_over_truncates() {
    assert_eq!(clean("Song - Live Forever"), "Song");
}

#[test]
fn test_multiline_suffix() {
    assert_eq!(clean("Song\n - Remastered\nsecond line"), "Song");
}

#[test]
fn test_idempotent() {
    for sample in SAMPLES {
        let once = clean(*sample);
        assert_eq!(clean(once.as_str()), once, "cleaning {sample:?} twice changed the result");
    }
}
