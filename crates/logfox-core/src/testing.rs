//! Shared test doubles.

use crate::time::FixedClock;
use chrono::{Local, TimeZone};
use logfox_types::{Host, Result, SystemDescriptors};
use mockall::mock;
use std::sync::Arc;

mock! {
    pub Host {}

    impl Host for Host {
        fn is_running(&self) -> bool;
        fn is_debug_build(&self) -> bool;
        fn system(&self) -> Result<SystemDescriptors>;
        fn state_snapshot(&self) -> String;
        fn alert(&self, title: &str, message: &str);
        fn quit(&self, code: i32);
    }
}

pub fn fixed_clock(hour: u32, min: u32, sec: u32) -> Arc<FixedClock> {
    let at = Local
        .with_ymd_and_hms(2024, 5, 1, hour, min, sec)
        .single()
        .expect("unambiguous local time");
    Arc::new(FixedClock::new(at))
}

pub fn system() -> SystemDescriptors {
    SystemDescriptors {
        host_name: "TestHost".to_string(),
        host_version: "4.2.1".to_string(),
        platform: "linux".to_string(),
        model: "GenericDevice".to_string(),
        processor: "Test CPU".to_string(),
        total_memory_bytes: 16 * 1024 * 1024 * 1024,
    }
}

/// A running, non-debug host that never escalates.
pub fn running_host() -> MockHost {
    let mut host = MockHost::new();
    host.expect_is_running().return_const(true);
    host.expect_is_debug_build().return_const(false);
    host.expect_system().returning(|| Ok(system()));
    host.expect_alert().never();
    host.expect_quit().never();
    host
}
