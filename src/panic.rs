// Based on https://github.com/Rahix/avr-hal/blob/main/examples/arduino-uno/src/bin/uno-panic.rs
// License MIT

#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    // disable interrupts - no longer necessary after panic
    avr_device::interrupt::disable();

    // There is no serial port to report to.  Switch the LEDs off so a crash
    // doesn't drain the battery, keeping the button pull-up.
    // SAFETY: we're never returning so stealing the peripherals is ok
    let dp = unsafe { attiny_hal::Peripherals::steal() };
    dp.PORTA.porta.write(|w| w.pa5().set_bit());
    dp.PORTB.portb.reset();

    loop {
        avr_device::asm::sleep();
    }
}
