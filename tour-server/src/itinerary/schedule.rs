//! Assigning clock times to chosen stops.

use chrono::{Duration, NaiveTime};

use crate::catalog::CatalogStop;

/// One stop with its visit window.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledStop<'a> {
    pub stop: &'a CatalogStop,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Lay stops out through the day, in the given order.
///
/// Each stop takes its travel time, then its visit time. A stop whose visit
/// would end after `end` (or past midnight) is dropped and the clock does
/// not advance for it; later, shorter stops may still fit.
pub fn schedule<'a>(
    stops: &[&'a CatalogStop],
    start: NaiveTime,
    end: Option<NaiveTime>,
) -> Vec<ScheduledStop<'a>> {
    let mut clock = start;
    let mut scheduled = Vec::with_capacity(stops.len());

    for &stop in stops {
        let Some((arrive, leave)) = visit_window(clock, stop, end) else {
            continue;
        };

        scheduled.push(ScheduledStop {
            stop,
            start_time: arrive,
            end_time: leave,
        });
        clock = leave;
    }

    scheduled
}

/// Arrival and departure for `stop` when setting off at `clock`, or `None`
/// if the visit would end after `end` or past midnight.
pub(super) fn visit_window(
    clock: NaiveTime,
    stop: &CatalogStop,
    end: Option<NaiveTime>,
) -> Option<(NaiveTime, NaiveTime)> {
    let arrive = add_mins(clock, stop.travel_time_mins)?;
    let leave = add_mins(arrive, stop.visit_mins)?;
    if end.is_some_and(|end| leave > end) {
        return None;
    }
    Some((arrive, leave))
}

/// Add minutes, returning `None` on wrapping past midnight.
fn add_mins(time: NaiveTime, mins: u32) -> Option<NaiveTime> {
    let (next, wrapped_secs) = time.overflowing_add_signed(Duration::minutes(i64::from(mins)));
    (wrapped_secs == 0).then_some(next)
}
