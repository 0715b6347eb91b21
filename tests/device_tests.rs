//! Integration tests for the main loop.

mod common;
use common::*;

use blinky_earrings::patterns::{self, Pattern, Step};
use blinky_earrings::{
    Activity, ButtonConfig, ButtonPhase, Clock, ClockRatio, Config, Device, PowerState,
    RenderPolicy,
};

static LOOPING: &[Pattern] = &[&[Step::new(0b01, 100), Step::END]];

static ODD_LEDS: &[Pattern] = &[&[Step::new(0b0010_1010, 1000), Step::END]];

fn config(catalog: &'static [Pattern], render: RenderPolicy) -> Config {
    Config {
        button: ButtonConfig::default(),
        render,
        catalog,
    }
}

fn earrings() -> Config {
    config(patterns::EARRINGS, RenderPolicy::Multiplex)
}

fn device<'c>(
    config: Config,
    clock: &'c Clock,
    eeprom: Eeprom,
) -> (TestDevice<'c>, Button, [Led; 8]) {
    let button = Button::default();
    let leds = leds();
    let sleeper = Sleeper::new(&button, &leds);
    let device = Device::new(config, clock, button.clone(), leds.clone(), sleeper, eeprom);
    (device, button, leds)
}

fn short_push(device: &mut TestDevice<'_>, clock: &Clock, button: &Button) -> Vec<Activity> {
    button.press();
    let mut events = events_for(device, clock, 100);
    button.release();
    events.extend(events_for(device, clock, 100));
    events
}

#[test]
fn boots_into_saved_pattern() {
    let clock = Clock::new(ClockRatio::EARRINGS);
    let (device, _, _) = device(earrings(), &clock, Eeprom::holding(4));
    assert_eq!(device.scheduler().pattern_index(), 4);
    assert_eq!(device.power().state(), PowerState::Running);
}

#[test]
fn garbage_in_eeprom_boots_first_pattern() {
    let clock = Clock::new(ClockRatio::EARRINGS);
    let (device, _, _) = device(earrings(), &clock, Eeprom::holding(0xff));
    assert_eq!(device.scheduler().pattern_index(), 0);

    let blank = Eeprom {
        value: None,
        writes: 0,
    };
    let (device, _, _) = self::device(earrings(), &clock, blank);
    assert_eq!(device.scheduler().pattern_index(), 0);
}

#[test]
fn first_poll_lights_first_step() {
    let clock = Clock::new(ClockRatio::EARRINGS);
    let (mut device, _, leds) = device(earrings(), &clock, Eeprom::holding(0));
    assert!(lit(&leds).is_empty());
    assert_eq!(device.poll(), Activity::Stepped(0));
    assert_eq!(lit(&leds), vec![0]);
}

#[test]
fn short_push_selects_and_saves_next_pattern() {
    let clock = Clock::new(ClockRatio::EARRINGS);
    let (mut device, button, _) = device(earrings(), &clock, Eeprom::holding(2));
    run_for(&mut device, &clock, 500);

    assert_eq!(
        short_push(&mut device, &clock, &button),
        vec![Activity::PatternChanged(3)]
    );
    assert_eq!(device.scheduler().pattern_index(), 3);
    assert_eq!(device.store().value, Some(3));
    assert_eq!(device.store().writes, 1);
}

#[test]
fn short_push_wraps_after_last_pattern() {
    let clock = Clock::new(ClockRatio::EARRINGS);
    let (mut device, button, _) = device(earrings(), &clock, Eeprom::holding(6));
    assert_eq!(
        short_push(&mut device, &clock, &button),
        vec![Activity::PatternChanged(0)]
    );
    assert_eq!(device.store().value, Some(0));
}

#[test]
fn new_pattern_starts_from_its_first_step() {
    let clock = Clock::new(ClockRatio::EARRINGS);
    let (mut device, button, _) = device(earrings(), &clock, Eeprom::holding(0));
    run_for(&mut device, &clock, 350);
    assert_eq!(device.scheduler().step_index(), Some(3));

    button.press();
    run_for(&mut device, &clock, 100);
    button.release();
    clock.tick();
    assert_eq!(device.poll(), Activity::PatternChanged(1));
    assert_eq!(device.scheduler().step_index(), None);
    clock.tick();
    assert_eq!(device.poll(), Activity::Stepped(0));
}

#[test]
fn long_push_sleeps_with_leds_off_and_wakes_quietly() {
    let clock = Clock::new(ClockRatio::EARRINGS);
    let (mut device, button, leds) = device(earrings(), &clock, Eeprom::holding(5));
    run_for(&mut device, &clock, 100);
    assert!(!lit(&leds).is_empty());

    button.press();
    assert!(events_for(&mut device, &clock, 400).is_empty());
    button.release();
    assert_eq!(events_for(&mut device, &clock, 1), vec![Activity::Woke]);

    let sleeper = device.power().control();
    assert_eq!(
        sleeper.calls,
        vec![
            Call::HaltClock,
            Call::ArmAndSleep,
            Call::DisarmWake,
            Call::ResumeClock
        ]
    );
    assert_eq!(sleeper.lit_while_asleep, vec![Vec::<u8>::new()]);
    assert_eq!(device.power().state(), PowerState::Running);
    assert!(device.button().is_suppressed());
    assert_eq!(device.scheduler().step_index(), None);

    // The push that woke us is still held, then let go.  Neither changes the
    // pattern nor puts us back to sleep.
    assert!(events_for(&mut device, &clock, 500).is_empty());
    button.release();
    assert!(events_for(&mut device, &clock, 200).is_empty());
    assert_eq!(device.scheduler().pattern_index(), 5);
    assert_eq!(device.store().writes, 0);
    assert!(!device.button().is_suppressed());

    // Back to normal.
    assert_eq!(
        short_push(&mut device, &clock, &button),
        vec![Activity::PatternChanged(6)]
    );
}

#[test]
fn pattern_restarts_after_wake() {
    let clock = Clock::new(ClockRatio::EARRINGS);
    let (mut device, button, leds) = device(earrings(), &clock, Eeprom::holding(0));
    run_for(&mut device, &clock, 250);
    assert_eq!(device.scheduler().step_index(), Some(2));

    button.press();
    run_for(&mut device, &clock, 300);
    button.release();
    assert_eq!(events_for(&mut device, &clock, 1), vec![Activity::Woke]);
    assert!(lit(&leds).is_empty());

    clock.tick();
    assert_eq!(device.poll(), Activity::Stepped(0));
    assert_eq!(lit(&leds), vec![0]);
    assert_eq!(device.button().phase(), ButtonPhase::Debounced);
}

#[test]
fn multiplexed_pins_take_turns() {
    let clock = Clock::new(ClockRatio::EARRINGS);
    let (mut device, _, _) = device(
        config(ODD_LEDS, RenderPolicy::Multiplex),
        &clock,
        Eeprom::holding(0),
    );
    let mut order = Vec::new();
    for _ in 0..6 {
        device.poll();
        assert_eq!(device.scheduler().mask(), 0b0010_1010);
        let on = lit(device.channels());
        assert_eq!(on.len(), 1);
        order.push(on[0]);
    }
    assert_eq!(order, vec![1, 3, 5, 1, 3, 5]);
}

#[test]
fn direct_pins_light_together() {
    let clock = Clock::new(ClockRatio::EARRINGS);
    let (mut device, _, leds) = device(
        config(ODD_LEDS, RenderPolicy::Direct),
        &clock,
        Eeprom::holding(0),
    );
    for _ in 0..3 {
        device.poll();
        assert_eq!(device.scheduler().mask(), 0b0010_1010);
        assert_eq!(lit(&leds), vec![1, 3, 5]);
    }
}

#[test]
fn activity_formats_with_ufmt() {
    let mut s = String::new();
    ufmt::uwrite!(&mut s, "{:?} {:?}", Activity::PatternChanged(3), Activity::Woke).unwrap();
    assert_eq!(s, "PatternChanged(3) Woke");
}

#[test]
fn keeps_time_across_counter_wrap() {
    let clock = Clock::starting_at(ClockRatio::EARRINGS, u32::MAX - 150);
    let (mut device, _, leds) = device(
        config(LOOPING, RenderPolicy::Multiplex),
        &clock,
        Eeprom::holding(0),
    );
    let steps = run_for(&mut device, &clock, 400);
    assert_eq!(steps, vec![Activity::Stepped(0); 4]);
    assert_eq!(lit(&leds), vec![0]);
}
