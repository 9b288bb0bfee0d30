//! Logging sessions driven through the sampling cycle and command layer.

#![allow(clippy::unwrap_used)]

use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use std::fs;
use traytemp::glyph::GlyphLayout;
use traytemp::monitor::{
    Channel, ChannelKey, Command, MonitorState, Outcome, SamplingCycle, SensorProvider, TierConfig,
};
use traytemp::{Error, Result};

/// Provider whose readings are set directly by the test.
#[derive(Default)]
struct ManualProvider {
    channels: Vec<(Channel, Option<f64>)>,
}

impl ManualProvider {
    fn set(&mut self, label: &str, value: Option<f64>) {
        match self.channels.iter_mut().find(|(c, _)| c.label == label) {
            Some((_, v)) => *v = value,
            None => self.channels.push((Channel::new(label.to_lowercase(), label), value)),
        }
    }
}

impl SensorProvider for ManualProvider {
    fn channels(&self) -> Vec<Channel> {
        self.channels.iter().map(|(c, _)| c.clone()).collect()
    }

    fn read_celsius(&mut self, key: &ChannelKey) -> Result<Option<f64>> {
        Ok(self.channels.iter().find(|(c, _)| &c.key == key).and_then(|(_, v)| *v))
    }
}

fn at(second: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(14, 0, 0).unwrap()
        + ChronoDuration::seconds(second)
}

#[test]
fn test_session_records_only_its_own_ticks() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = MonitorState::new(TierConfig::default(), 60, tmp.path()).unwrap();
    let mut provider = ManualProvider::default();
    let mut cycle = SamplingCycle::new(GlyphLayout::default()).unwrap();

    // Samples before the session must not count.
    provider.set("CPU", Some(99.0));
    provider.set("GPU", Some(10.0));
    cycle.tick(&mut state, &mut provider, at(0));

    state.apply(Command::StartLog, at(1)).unwrap();
    for (i, (cpu, gpu)) in [(40.0, 30.0), (50.0, 31.0), (60.0, 32.0)].into_iter().enumerate() {
        provider.set("CPU", Some(cpu));
        provider.set("GPU", Some(gpu));
        let output = cycle.tick(&mut state, &mut provider, at(2 + i as i64));
        assert!(output.log_error.is_none());
    }

    let summary = match state.apply(Command::StopLog, at(5)).unwrap() {
        Outcome::LogSaved(path) => path,
        other => panic!("unexpected outcome: {other:?}"),
    };

    assert_eq!(summary, tmp.path().join("2024-03-09_14-00-05.log"));
    let content = fs::read_to_string(&summary).unwrap();
    assert_eq!(
        content,
        "Hardware,Average,Minimum,Maximum\n\
         CPU,50.00,40.00,60.00\n\
         GPU,31.00,30.00,32.00\n\
         \n\
         DateTime,CPU,GPU\n\
         2024-03-09 14:00:02,40.00,30.00\n\
         2024-03-09 14:00:03,50.00,31.00\n\
         2024-03-09 14:00:04,60.00,32.00\n"
    );
    assert!(!tmp.path().join("temp.log").exists());
}

#[test]
fn test_missing_channel_repeats_last_value() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = MonitorState::new(TierConfig::default(), 60, tmp.path()).unwrap();
    let mut provider = ManualProvider::default();
    let mut cycle = SamplingCycle::new(GlyphLayout::default()).unwrap();

    provider.set("CPU", Some(40.0));
    provider.set("GPU", Some(30.0));
    cycle.tick(&mut state, &mut provider, at(0));
    state.apply(Command::ToggleLog, at(0)).unwrap();

    provider.set("GPU", None);
    cycle.tick(&mut state, &mut provider, at(1));
    provider.set("CPU", Some(41.0));
    provider.set("GPU", Some(33.0));
    cycle.tick(&mut state, &mut provider, at(2));
    provider.set("GPU", None);
    cycle.tick(&mut state, &mut provider, at(3));

    let rows = fs::read_to_string(state.session().row_log_path()).unwrap();
    assert_eq!(
        rows,
        "DateTime,CPU,GPU\n\
         2024-03-09 14:00:01,40.00,\n\
         2024-03-09 14:00:02,41.00,33.00\n\
         2024-03-09 14:00:03,41.00,33.00\n"
    );
}

#[test]
fn test_channel_added_mid_session_is_not_a_column() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = MonitorState::new(TierConfig::default(), 60, tmp.path()).unwrap();
    let mut provider = ManualProvider::default();
    let mut cycle = SamplingCycle::new(GlyphLayout::default()).unwrap();

    provider.set("CPU", Some(40.0));
    cycle.tick(&mut state, &mut provider, at(0));
    state.apply(Command::StartLog, at(0)).unwrap();

    provider.set("NVME", Some(35.0));
    let output = cycle.tick(&mut state, &mut provider, at(1));
    assert_eq!(output.events.len(), 2);

    let rows = fs::read_to_string(state.session().row_log_path()).unwrap();
    assert_eq!(rows, "DateTime,CPU\n2024-03-09 14:00:01,40.00\n");

    let Outcome::LogSaved(summary) = state.apply(Command::StopLog, at(2)).unwrap() else {
        panic!("expected a saved summary");
    };
    let content = fs::read_to_string(summary).unwrap();
    assert!(content.starts_with("Hardware,Average,Minimum,Maximum\nCPU,40.00,40.00,40.00\n\n"));
    assert!(!content.contains("NVME"));
}

#[test]
fn test_sessions_stopped_in_the_same_second_keep_both_summaries() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = MonitorState::new(TierConfig::default(), 60, tmp.path()).unwrap();
    let mut provider = ManualProvider::default();
    let mut cycle = SamplingCycle::new(GlyphLayout::default()).unwrap();
    provider.set("CPU", Some(20.0));
    cycle.tick(&mut state, &mut provider, at(0));

    let mut summaries = Vec::new();
    for value in [40.0, 90.0] {
        state.apply(Command::StartLog, at(0)).unwrap();
        provider.set("CPU", Some(value));
        cycle.tick(&mut state, &mut provider, at(0));
        match state.apply(Command::StopLog, at(0)).unwrap() {
            Outcome::LogSaved(path) => summaries.push(path),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    assert_eq!(
        summaries,
        vec![tmp.path().join("2024-03-09_14-00-00.log"), tmp.path().join("2024-03-09_14-00-00_1.log")]
    );
    assert!(fs::read_to_string(&summaries[0]).unwrap().contains("CPU,40.00,40.00,40.00"));
    assert!(fs::read_to_string(&summaries[1]).unwrap().contains("CPU,90.00,90.00,90.00"));
}

#[test]
fn test_session_misuse_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = MonitorState::new(TierConfig::default(), 60, tmp.path()).unwrap();

    assert!(matches!(state.apply(Command::StopLog, at(0)), Err(Error::NotRecording)));
    state.apply(Command::StartLog, at(0)).unwrap();
    assert!(matches!(state.apply(Command::StartLog, at(1)), Err(Error::AlreadyRecording)));
    assert!(matches!(state.apply(Command::ToggleUnit, at(1)), Err(Error::UnitLockedWhileRecording)));
}

#[test]
fn test_unwritable_log_dir_leaves_state_idle() {
    let tmp = tempfile::tempdir().unwrap();
    // A regular file where the log directory should be.
    let blocker = tmp.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();
    let mut state = MonitorState::new(TierConfig::default(), 60, &blocker).unwrap();
    let mut provider = ManualProvider::default();
    let mut cycle = SamplingCycle::new(GlyphLayout::default()).unwrap();
    provider.set("CPU", Some(40.0));
    cycle.tick(&mut state, &mut provider, at(0));

    assert!(matches!(state.apply(Command::StartLog, at(0)), Err(Error::Io(_))));
    assert!(!state.session().is_recording());
    assert_eq!(state.channels().iter().next().unwrap().window.len(), 1);
}

#[test]
fn test_shutdown_while_recording_keeps_row_log() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = MonitorState::new(TierConfig::default(), 60, tmp.path()).unwrap();
    let mut provider = ManualProvider::default();
    let mut cycle = SamplingCycle::new(GlyphLayout::default()).unwrap();

    provider.set("CPU", Some(40.0));
    cycle.tick(&mut state, &mut provider, at(0));
    state.apply(Command::StartLog, at(0)).unwrap();
    cycle.tick(&mut state, &mut provider, at(1));

    let err = cycle.shutdown(&mut state).unwrap_err();
    let row_log = match err {
        Error::RecordingAtShutdown { row_log } => row_log,
        other => panic!("unexpected error: {other}"),
    };
    let rows = fs::read_to_string(row_log).unwrap();
    assert_eq!(rows, "DateTime,CPU\n2024-03-09 14:00:01,40.00\n");
}
