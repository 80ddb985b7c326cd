use std::sync::Mutex;

use anyhow::{
    anyhow,
    Result,
};
use time::OffsetDateTime;

use super::*;

const SCROBBLE_SAMPLE: &str = r#"{
    "event": "media.scrobble",
    "Metadata": {
        "type": "track",
        "grandparentTitle": "The Beatles",
        "parentTitle": "Abbey Road (Remastered)",
        "title": "Come Together - Remastered 2019"
    }
}"#;

#[derive(Default)]
struct Recorder {
    fail: bool,
    submitted: Mutex<Vec<ScrobbleRecord>>,
}

impl Scrobbler for Recorder {
    fn name(&self) -> &'static str { "recorder" }

    fn submit(&self, listen: &ScrobbleRecord) -> Result<()> {
        self.submitted.lock().unwrap().push(listen.clone());
        if self.fail {
            Err(anyhow!("service unavailable"))
        } else {
            Ok(())
        }
    }
}

fn proceed(payload: &str) -> RawTrack {
    match classify(payload) {
        Classification::Proceed(raw) => raw,
        other => panic!("Expected Proceed, got {other:?}"),
    }
}

#[test]
fn test_end_to_end() {
    let before = OffsetDateTime::now_utc().unix_timestamp();
    let recorder = Recorder::default();

    let listen = match forward(&proceed(SCROBBLE_SAMPLE), &recorder) {
        Outcome::Scrobbled(listen) => listen,
        other => panic!("Expected Scrobbled, got {other:?}"),
    };

    assert_eq!(listen.artist, "The Beatles");
    assert_eq!(listen.title, "Come Together");
    assert_eq!(listen.album, "Abbey Road");
    assert!(listen.timestamp >= before);
    assert!(listen.timestamp <= OffsetDateTime::now_utc().unix_timestamp());
    assert_eq!(*recorder.submitted.lock().unwrap(), vec![listen]);
}

#[test]
fn test_failed_submission() {
    let recorder = Recorder {
        fail: true,
        ..Default::default()
    };

    match forward(&proceed(SCROBBLE_SAMPLE), &recorder) {
        Outcome::Failed(listen, e) => {
            assert_eq!(listen.title, "Come Together");
            assert_eq!(e.to_string(), "service unavailable");
        },
        other => panic!("Expected Failed, got {other:?}"),
    }
    assert_eq!(recorder.submitted.lock().unwrap().len(), 1);
}

#[test]
fn test_empty_cleaned_fields_are_submitted() {
    let recorder = Recorder::default();
    let raw = RawTrack {
        artist: None,
        title: Some("(Live)".to_owned()),
        album: Some(String::new()),
    };

    assert!(matches!(forward(&raw, &recorder), Outcome::Scrobbled(_)));
    let submitted = recorder.submitted.lock().unwrap();
    assert_eq!(submitted[0].artist, "");
    assert_eq!(submitted[0].title, "");
    assert_eq!(submitted[0].album, "");
}

#[test]
fn test_record_ignores_other_fields() {
    let raw = RawTrack {
        artist: Some("Artist feat. Guest".to_owned()),
        title: Some("Title (Radio Edit)".to_owned()),
        album: Some("Album [Deluxe]".to_owned()),
    };
    let listen = ScrobbleRecord::new(&raw, 42);
    assert_eq!(listen, ScrobbleRecord {
        artist: "Artist".to_owned(),
        title: "Title".to_owned(),
        album: "Album".to_owned(),
        timestamp: 42,
    });
    assert_eq!(listen.release_name(), Some("Album"));
    assert_eq!(listen.listened_at(), 42);
}

#[test]
fn test_dyn_scrobbler() {
    let recorder = Recorder::default();
    let scrobbler: &dyn Scrobbler = &recorder;
    assert!(matches!(forward(&proceed(SCROBBLE_SAMPLE), scrobbler), Outcome::Scrobbled(_)));
}
