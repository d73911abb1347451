//! HC-SR04 ultrasonic ranging with a bounded echo wait.
//!
//! A 10 µs trigger pulse starts a measurement; the sensor raises the echo
//! line for the round-trip time of the ping. Both the wait for the rising
//! edge and the high-pulse measurement share one timeout budget, so a
//! missing echo costs at most `echo_timeout_ms` — a short, predictable
//! stall, never an indefinite block.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the trigger GPIO and times the echo line.
//! On host/test: reads a simulated echo duration from a static atomic.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Speed of sound at ~20 °C, in cm per µs of one-way travel time.
pub const SOUND_CM_PER_US: f32 = 0.0343;

/// Simulated echo duration in µs; 0 = no echo (timeout).
#[cfg(not(target_os = "espidf"))]
static SIM_ECHO_US: AtomicU32 = AtomicU32::new(0);

/// Inject a simulated echo duration (host/test builds only). 0 = timeout.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_echo_us(us: u32) {
    SIM_ECHO_US.store(us, Ordering::Relaxed);
}

/// Convert an echo high-pulse duration to a distance.
/// The pulse covers the round trip, hence the halving.
pub fn echo_to_cm(duration_us: u32) -> f32 {
    duration_us as f32 * SOUND_CM_PER_US / 2.0
}

pub struct RangeSensor {
    trig_gpio: i32,
    echo_gpio: i32,
    timeout_us: u64,
}

impl RangeSensor {
    pub fn new(trig_gpio: i32, echo_gpio: i32, timeout_ms: u32) -> Self {
        Self {
            trig_gpio,
            echo_gpio,
            timeout_us: timeout_ms as u64 * 1000,
        }
    }

    /// One ranging attempt, converted to centimetres.
    /// `None` when no echo arrived within the timeout budget. Range
    /// plausibility is the sampler's concern, not this driver's.
    pub fn measure_cm(&mut self) -> Option<f32> {
        self.measure_echo_us().map(echo_to_cm)
    }

    /// Raw echo high-pulse duration in µs, bounded by the timeout budget.
    #[cfg(target_os = "espidf")]
    pub fn measure_echo_us(&mut self) -> Option<u32> {
        // Trigger: clean low, then a 10 µs high pulse.
        hw_init::gpio_write(self.trig_gpio, false);
        hw_init::delay_us(2);
        hw_init::gpio_write(self.trig_gpio, true);
        hw_init::delay_us(10);
        hw_init::gpio_write(self.trig_gpio, false);

        let budget_start = hw_init::now_us();

        // Wait for the echo line to rise.
        while !hw_init::gpio_read(self.echo_gpio) {
            if hw_init::now_us().wrapping_sub(budget_start) > self.timeout_us {
                return None;
            }
        }

        // Time the high pulse against the same budget.
        let pulse_start = hw_init::now_us();
        while hw_init::gpio_read(self.echo_gpio) {
            if hw_init::now_us().wrapping_sub(budget_start) > self.timeout_us {
                return None;
            }
        }
        Some(hw_init::now_us().wrapping_sub(pulse_start) as u32)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn measure_echo_us(&mut self) -> Option<u32> {
        match SIM_ECHO_US.load(Ordering::Relaxed) {
            0 => None,
            us if us as u64 > self.timeout_us => None,
            us => Some(us),
        }
    }

    pub fn trig_gpio(&self) -> i32 {
        self.trig_gpio
    }

    pub fn echo_gpio(&self) -> i32 {
        self.echo_gpio
    }
}
