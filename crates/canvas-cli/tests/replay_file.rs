//! Replay from files on disk, the way the binary reads them.

use canvas_artifact::ArtifactStatus;
use canvas_cli::{read_deltas, replay};
use canvas_session::SessionConfig;
use std::fs::File;
use std::io::{BufReader, Write};

#[tokio::test]
async fn replay_recorded_text_stream_with_config() {
    let mut recording = tempfile::NamedTempFile::new().unwrap();
    for line in [
        r#"{"type":"data-id","data":"doc-9"}"#,
        r#"{"type":"data-title","data":"Haiku"}"#,
        r#"{"type":"data-clear","data":null}"#,
        r#"{"type":"data-textDelta","data":"old pond"}"#,
        r#"{"type":"data-textDelta","data":", frog"}"#,
        r#"{"type":"data-finish","data":null}"#,
    ] {
        writeln!(recording, "{line}").unwrap();
    }

    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(config_file, "user_id = \"poet\"\nsave_on_finish = false").unwrap();
    let config = SessionConfig::load(config_file.path()).unwrap();

    let deltas = read_deltas(BufReader::new(File::open(recording.path()).unwrap())).unwrap();
    let report = replay(config, deltas).await.unwrap();

    assert_eq!(report.saved, 0);
    let artifact = report.artifact.unwrap();
    assert_eq!(artifact.content, "old pond, frog");
    assert_eq!(artifact.status, ArtifactStatus::Idle);
}

#[test]
fn unknown_tags_are_accepted_and_ignored() {
    let input = r#"{"type":"data-telemetry","data":{"tokens":12}}
{"type":"data-title","data":"t"}
"#;
    let deltas = read_deltas(input.as_bytes()).unwrap();
    assert_eq!(deltas.len(), 2);
}
