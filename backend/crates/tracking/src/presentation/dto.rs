//! Wire DTOs (Data Transfer Objects)
//!
//! Stage data as the client sends it in `trackingDatas` and receives it back
//! from a pull.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{StageRecord, StageRecordPatch};
use crate::domain::value_objects::{StageIndex, StageTime};

/// Stage index (decimal text) to stage data
pub type TrackingDatas = BTreeMap<String, StageDataPayload>;

/// Stage data for one stage
///
/// Every field is optional on push: an absent field keeps the stored value.
/// Pulls always fill every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageDataPayload {
    /// Total play time, `[-][d.]hh:mm:ss[.fffffff]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_timer: Option<String>,
    /// Shortest clear time, same format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_per_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_goal_counter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_goal_counter: Option<u32>,
}

impl From<&StageRecord> for StageDataPayload {
    fn from(record: &StageRecord) -> Self {
        Self {
            total_timer: Some(record.total_time.to_string()),
            timer_per_stage: Some(record.shortest_time.to_string()),
            total_goal_counter: Some(record.total_goal_count),
            streak_goal_counter: Some(record.streak_goal_count),
        }
    }
}

impl StageDataPayload {
    /// Validate the payload pushed under `key`
    ///
    /// `None` when the key is not a stage index or a duration does not parse.
    pub fn to_patch(&self, key: &str) -> Option<StageRecordPatch> {
        let stage: StageIndex = key.parse().ok()?;

        Some(StageRecordPatch {
            stage,
            total_time: parse_time(self.total_timer.as_deref())?,
            shortest_time: parse_time(self.timer_per_stage.as_deref())?,
            total_goal_count: self.total_goal_counter,
            streak_goal_count: self.streak_goal_counter,
        })
    }
}

/// Validate a whole push; `None` if any stage is invalid
pub fn parse_tracking_datas(datas: &TrackingDatas) -> Option<Vec<StageRecordPatch>> {
    datas.iter().map(|(key, data)| data.to_patch(key)).collect()
}

/// Wire form of a pull
pub fn to_tracking_datas(records: &[StageRecord]) -> TrackingDatas {
    records
        .iter()
        .map(|record| (record.stage.to_string(), StageDataPayload::from(record)))
        .collect()
}

/// `Some(None)` for an absent field, `None` for an unparsable one
fn parse_time(raw: Option<&str>) -> Option<Option<StageTime>> {
    match raw {
        None => Some(None),
        Some(s) => s.parse().ok().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let payload = StageDataPayload {
            total_timer: Some("00:01:00".into()),
            timer_per_stage: Some("00:00:45".into()),
            total_goal_counter: Some(2),
            streak_goal_counter: Some(1),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalTimer": "00:01:00",
                "timerPerStage": "00:00:45",
                "totalGoalCounter": 2,
                "streakGoalCounter": 1
            })
        );
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let payload: StageDataPayload =
            serde_json::from_str(r#"{"totalGoalCounter":3}"#).unwrap();
        assert_eq!(payload.total_goal_counter, Some(3));
        assert!(payload.total_timer.is_none());
        assert!(payload.streak_goal_counter.is_none());
    }

    #[test]
    fn test_negative_counter_rejected() {
        assert!(serde_json::from_str::<StageDataPayload>(r#"{"totalGoalCounter":-1}"#).is_err());
    }

    fn full(total: &str, shortest: &str) -> StageDataPayload {
        StageDataPayload {
            total_timer: Some(total.into()),
            timer_per_stage: Some(shortest.into()),
            total_goal_counter: Some(2),
            streak_goal_counter: Some(1),
        }
    }

    #[test]
    fn test_to_patch_parses_durations() {
        let patch = full("0:5:23.456", "00:00:45").to_patch("3").unwrap();
        assert_eq!(patch.stage.value(), 3);
        assert_eq!(patch.total_time.unwrap().to_string(), "00:05:23.4560000");
        assert_eq!(patch.shortest_time.unwrap().to_string(), "00:00:45");
        assert_eq!(patch.total_goal_count, Some(2));
    }

    #[test]
    fn test_to_patch_keeps_absent_fields_absent() {
        let partial = StageDataPayload {
            streak_goal_counter: Some(4),
            ..Default::default()
        };
        let patch = partial.to_patch("1").unwrap();
        assert!(patch.total_time.is_none());
        assert!(patch.shortest_time.is_none());
        assert!(patch.total_goal_count.is_none());
        assert_eq!(patch.streak_goal_count, Some(4));
    }

    #[test]
    fn test_to_patch_rejects_bad_keys_and_durations() {
        let good = full("00:01:00", "00:00:45");
        for key in ["x", "0", "01", "-1", "", " 1"] {
            assert!(good.to_patch(key).is_none(), "{key:?}");
        }
        assert!(full("1 minute", "00:00:45").to_patch("1").is_none());
        assert!(full("00:01:00", "00:99:00").to_patch("1").is_none());
    }

    #[test]
    fn test_one_bad_stage_rejects_the_whole_push() {
        let mut datas = TrackingDatas::new();
        datas.insert("1".into(), full("00:01:00", "00:00:45"));
        assert_eq!(parse_tracking_datas(&datas).unwrap().len(), 1);

        datas.insert("2".into(), full("soon", "00:00:45"));
        assert!(parse_tracking_datas(&datas).is_none());
    }

    #[test]
    fn test_to_tracking_datas_keys_by_stage() {
        let patch = full("00:01:00", "00:00:45").to_patch("7").unwrap();
        let record = StageRecord::from_patch(
            kernel::username::Username::new("alice").unwrap(),
            &patch,
            chrono::Utc::now(),
        );

        let datas = to_tracking_datas(&[record]);
        assert_eq!(datas.len(), 1);
        assert_eq!(datas["7"], full("00:01:00", "00:00:45"));
    }
}
