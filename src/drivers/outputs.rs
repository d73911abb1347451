//! Digital output bank: indicator lamp, guard relay, alarm lamp, buzzer.
//!
//! Thin level-setting wrappers over the GPIO/LEDC helpers, plus state
//! tracking so host tests can observe what the hardware would do. All
//! setters are idempotent.

use crate::pins;

use crate::drivers::hw_init;

pub struct OutputBank {
    indicator_on: bool,
    guard_on: bool,
    alarm_on: bool,
    tone_hz: Option<u16>,
}

impl OutputBank {
    /// Everything starts off; the service asserts the real levels on its
    /// first tick.
    pub fn new() -> Self {
        Self {
            indicator_on: false,
            guard_on: false,
            alarm_on: false,
            tone_hz: None,
        }
    }

    pub fn set_indicator(&mut self, on: bool) {
        self.indicator_on = on;
        hw_init::gpio_write(pins::INDICATOR_GPIO, on);
    }

    pub fn set_guard(&mut self, on: bool) {
        self.guard_on = on;
        hw_init::gpio_write(pins::GUARD_RELAY_GPIO, on);
    }

    pub fn set_alarm_line(&mut self, on: bool) {
        self.alarm_on = on;
        hw_init::gpio_write(pins::ALARM_GPIO, on);
    }

    /// Start the buzzer: retune the timer to the tone, 50% duty.
    pub fn start_tone(&mut self, freq_hz: u16) {
        self.tone_hz = Some(freq_hz);
        hw_init::ledc_set_freq(hw_init::LEDC_TIMER_BUZZER, freq_hz as u32);
        hw_init::ledc_set_duty(
            hw_init::LEDC_CH_BUZZER,
            1 << (pins::BUZZER_PWM_RESOLUTION_BITS - 1),
        );
    }

    pub fn stop_tone(&mut self) {
        self.tone_hz = None;
        hw_init::ledc_set_duty(hw_init::LEDC_CH_BUZZER, 0);
    }

    /// Drop every output to its inactive level.
    pub fn all_off(&mut self) {
        self.set_indicator(false);
        self.set_guard(false);
        self.set_alarm_line(false);
        self.stop_tone();
    }

    pub fn indicator_on(&self) -> bool {
        self.indicator_on
    }

    pub fn guard_on(&self) -> bool {
        self.guard_on
    }

    pub fn alarm_on(&self) -> bool {
        self.alarm_on
    }

    pub fn tone_hz(&self) -> Option<u16> {
        self.tone_hz
    }
}

impl Default for OutputBank {
    fn default() -> Self {
        Self::new()
    }
}
