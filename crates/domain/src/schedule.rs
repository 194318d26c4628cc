use std::slice::Iter;

use chrono::{Datelike, Local, Weekday};
use derive_more::{Deref, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CreateError, Exercise, ExerciseID, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ScheduleRepository: Send + Sync + 'static {
    async fn read_schedules(&self) -> Result<Vec<WeeklySchedule>, ReadError>;
    async fn read_schedule(&self, day: DayOfWeek) -> Result<WeeklySchedule, ReadError>;
    async fn read_schedule_by_id(&self, id: ScheduleID) -> Result<WeeklySchedule, ReadError>;
    /// Creates the missing day rows so that all seven days exist afterwards.
    async fn initialize_schedules(&self) -> Result<Vec<WeeklySchedule>, CreateError>;
    async fn rename_schedule(&self, id: ScheduleID, name: Name)
    -> Result<WeeklySchedule, UpdateError>;
    /// Replaces the full assignment list of one day in a single transaction.
    async fn replace_schedule_exercises(
        &self,
        id: ScheduleID,
        entries: Vec<ScheduleExercise>,
    ) -> Result<WeeklySchedule, UpdateError>;
    /// Atomically exchanges the names and assignment lists of two days.
    /// Aborts before any mutation if either day row is missing.
    async fn swap_schedule_days(&self, day_a: DayOfWeek, day_b: DayOfWeek)
    -> Result<(), UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait ScheduleService: Send + Sync + 'static {
    async fn get_schedules(&self) -> Result<Vec<WeeklySchedule>, ReadError>;
    async fn initialize_schedules(&self) -> Result<Vec<WeeklySchedule>, CreateError>;
    async fn rename_day(&self, id: ScheduleID, name: Name) -> Result<WeeklySchedule, UpdateError>;
    async fn rename_day_of_week(
        &self,
        day: DayOfWeek,
        name: Name,
    ) -> Result<WeeklySchedule, UpdateError>;
    async fn add_exercise_to_day(
        &self,
        day: DayOfWeek,
        exercise_id: ExerciseID,
    ) -> Result<WeeklySchedule, UpdateError>;
    async fn remove_exercise_from_day(
        &self,
        id: ScheduleID,
        exercise_id: ExerciseID,
    ) -> Result<WeeklySchedule, UpdateError>;
    async fn reorder_day(
        &self,
        day: DayOfWeek,
        exercise_ids: Vec<ExerciseID>,
    ) -> Result<WeeklySchedule, UpdateError>;
    /// The live plan for one day with soft-deleted exercises filtered out.
    /// This is the one read path that intentionally bypasses snapshots: it
    /// answers "what should I do today", not "what did I do".
    async fn day_plan(&self, day: DayOfWeek) -> Result<DayPlan, ReadError>;
    async fn weekly_plan(&self) -> Result<Vec<DayPlan>, ReadError>;
    async fn schedule_status(&self) -> Result<ScheduleStatus, ReadError>;
    async fn swap_days(&self, day_a: DayOfWeek, day_b: DayOfWeek) -> Result<(), UpdateError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySchedule {
    pub id: ScheduleID,
    pub day: DayOfWeek,
    pub name: Name,
    pub exercises: Vec<ScheduleExercise>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleExercise {
    pub exercise_id: ExerciseID,
    pub order: u32,
}

/// Restores the invariant that order values within one day form a dense
/// 1..N sequence, preserving the relative order of the entries.
#[must_use]
pub fn renumber(mut entries: Vec<ScheduleExercise>) -> Vec<ScheduleExercise> {
    entries.sort_by_key(|e| e.order);
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.order = u32::try_from(i).unwrap_or(u32::MAX) + 1;
    }
    entries
}

#[derive(
    Deref,
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub struct ScheduleID(Uuid);

impl ScheduleID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ScheduleID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ScheduleID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Day of the week as 0 (Monday) to 6 (Sunday).
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Into,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub fn new(value: u8) -> Result<Self, DayOfWeekError> {
        if value > 6 {
            return Err(DayOfWeekError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn today() -> Self {
        Local::now().date_naive().weekday().into()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "Monday",
            1 => "Tuesday",
            2 => "Wednesday",
            3 => "Thursday",
            4 => "Friday",
            5 => "Saturday",
            _ => "Sunday",
        }
    }

    pub fn iter() -> Iter<'static, DayOfWeek> {
        static DAYS: [DayOfWeek; 7] = [
            DayOfWeek(0),
            DayOfWeek(1),
            DayOfWeek(2),
            DayOfWeek(3),
            DayOfWeek(4),
            DayOfWeek(5),
            DayOfWeek(6),
        ];
        DAYS.iter()
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = DayOfWeekError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DayOfWeek::new(value)
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self(value.num_days_from_monday() as u8)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DayOfWeekError {
    #[error("Day of week must be in the range 0 to 6 ({0} > 6)")]
    OutOfRange(u8),
}

/// Live view of one scheduled day used by the daily and weekly plan pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub schedule_id: ScheduleID,
    pub day: DayOfWeek,
    pub name: Name,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleStatus {
    pub initialized: bool,
    pub days: u32,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, Ok(DayOfWeek(0)))]
    #[case(6, Ok(DayOfWeek(6)))]
    #[case(7, Err(DayOfWeekError::OutOfRange(7)))]
    fn test_day_of_week_new(#[case] value: u8, #[case] expected: Result<DayOfWeek, DayOfWeekError>) {
        assert_eq!(DayOfWeek::new(value), expected);
    }

    #[rstest]
    #[case(Weekday::Mon, 0, "Monday")]
    #[case(Weekday::Wed, 2, "Wednesday")]
    #[case(Weekday::Sun, 6, "Sunday")]
    fn test_day_of_week_from_weekday(
        #[case] weekday: Weekday,
        #[case] value: u8,
        #[case] name: &str,
    ) {
        let day = DayOfWeek::from(weekday);
        assert_eq!(day, DayOfWeek(value));
        assert_eq!(day.name(), name);
    }

    #[test]
    fn test_day_of_week_iter() {
        assert_eq!(DayOfWeek::iter().count(), 7);
        assert_eq!(DayOfWeek::iter().next(), Some(&DayOfWeek(0)));
        assert_eq!(DayOfWeek::iter().last(), Some(&DayOfWeek(6)));
    }

    #[test]
    fn test_schedule_id_nil() {
        assert!(ScheduleID::nil().is_nil());
        assert_eq!(ScheduleID::nil(), ScheduleID::default());
    }

    #[rstest]
    #[case::empty(&[], &[])]
    #[case::already_dense(&[1, 2, 3], &[1, 2, 3])]
    #[case::gap_after_removal(&[1, 3, 4], &[1, 2, 3])]
    #[case::unordered_with_gaps(&[7, 2, 5], &[3, 1, 2])]
    fn test_renumber(#[case] orders: &[u32], #[case] expected: &[u32]) {
        let entries = orders
            .iter()
            .enumerate()
            .map(|(i, order)| ScheduleExercise {
                exercise_id: (i as u128 + 1).into(),
                order: *order,
            })
            .collect::<Vec<_>>();
        let renumbered = renumber(entries.clone());
        let mut result = entries
            .iter()
            .map(|e| {
                renumbered
                    .iter()
                    .find(|r| r.exercise_id == e.exercise_id)
                    .unwrap()
                    .order
            })
            .collect::<Vec<_>>();
        assert_eq!(result, expected);
        result.sort_unstable();
        assert_eq!(result, (1..=orders.len() as u32).collect::<Vec<_>>());
    }
}
