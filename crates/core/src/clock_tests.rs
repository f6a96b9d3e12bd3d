// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

#[test]
fn system_clock_is_not_before_epoch_2020() {
    let clock = SystemClock;
    assert!(clock.now().timestamp() > 1_577_836_800);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    clock.advance(Duration::seconds(60));
    let t2 = clock.now();
    assert_eq!(t2 - t1, Duration::seconds(60));
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::seconds(30));
    let t2 = clock1.now();
    assert_eq!(t2 - t1, Duration::seconds(30));
}

#[test]
fn fake_clock_timestamp_uses_current_instant() {
    let clock = FakeClock::at(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    assert_eq!(clock.timestamp().as_str(), "2024-01-01 10:00:00.000000Z");

    clock.advance(Duration::microseconds(5));
    assert_eq!(clock.timestamp().as_str(), "2024-01-01 10:00:00.000005Z");
}

#[test]
fn fake_clock_can_be_set_backwards() {
    let clock = FakeClock::at(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    clock.set(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap());
    assert_eq!(clock.timestamp().as_str(), "2023-06-01 00:00:00.000000Z");
}
