use chronos_clock::{ClockConfig, SystemClock};
use chronos_core::{Clock, DateTime};
use std::sync::Arc;
use std::thread;

#[test]
fn shared_clock_across_threads() {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::with_config(ClockConfig::new().with_local_offset(0)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let clock = Arc::clone(&clock);
            thread::spawn(move || DateTime::now_local(clock.as_ref()).unwrap())
        })
        .collect();

    for handle in handles {
        let now = handle.join().unwrap();
        assert!(now.year() >= 2020);
    }
}

#[test]
fn boxed_system_clock_drives_calendar() {
    let clock: Box<dyn Clock> = Box::new(SystemClock::new());
    let today = DateTime::now_utc(&clock).unwrap();
    let midnight = today.start_of_day();
    assert!(midnight <= today);
    assert!(today.is_same_day(&midnight));
    assert!((1..=53).contains(&today.week_of_year()));
}
