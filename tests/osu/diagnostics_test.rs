//! Test diagnostics module functionality

use osu_rs::{OsuWarning, diagnostics::SimpleSource, parse_beatmap};

#[test]
fn test_simple_source() {
    let source_text = "[Metadata]\nTitle: Example Song\n";
    let source = SimpleSource::new("test.osu", source_text);

    assert_eq!(source.text(), source_text);
    assert_eq!(source.name(), "test.osu");
}

#[cfg(feature = "diagnostics")]
mod reports {
    use osu_rs::{
        OsuWarning, Severity,
        diagnostics::{collect_osu_reports, emit_osu_warnings, emit_osu_warnings_with},
        parse_beatmap,
    };

    #[test]
    fn test_reports_for_every_warning() {
        let source = crate::MALFORMED;
        let output = parse_beatmap(source);
        assert!(!output.warnings.is_empty());

        let reports = collect_osu_reports("malformed.osu", source, &output.warnings);
        assert_eq!(reports.len(), output.warnings.len());

        emit_osu_warnings("malformed.osu", source, &output.warnings);
        emit_osu_warnings_with("malformed.osu", source, &output.warnings, true);
    }

    #[test]
    fn test_playing_warnings_are_reported() {
        let source = "[Metadata]\nTitle: test\n";
        let output = parse_beatmap(source);
        let playing = output
            .warnings
            .iter()
            .filter(|warning| matches!(warning, OsuWarning::PlayingWarning(_)))
            .collect::<Vec<_>>();
        assert_eq!(playing.len(), 3);
        assert!(
            playing
                .iter()
                .all(|warning| warning.severity() == Severity::Normal)
        );
        assert_eq!(collect_osu_reports("test.osu", source, playing).len(), 3);
    }

    #[test]
    fn test_empty_warnings() {
        let source = "[Metadata]\nTitle: test\n";
        let empty_warnings: Vec<OsuWarning> = vec![];

        emit_osu_warnings("test.osu", source, &empty_warnings);
        assert!(collect_osu_reports("test.osu", source, &empty_warnings).is_empty());
    }
}

#[test]
fn test_warnings_display() {
    let output = parse_beatmap("[General]\nMode: seven\n[Fonts]\n");
    let messages = output
        .warnings
        .iter()
        .map(OsuWarning::to_string)
        .collect::<Vec<_>>();
    assert!(messages.iter().any(|message| message.contains("seven")));
    assert!(messages.iter().any(|message| message.contains("Fonts")));
}
