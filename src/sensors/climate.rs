//! DHT22 temperature/humidity sensor on a single-wire GPIO.
//!
//! The DHT22 answers a host start pulse with a 40-bit frame, each bit
//! encoded in the length of a high pulse (~27 µs = 0, ~70 µs = 1). The
//! whole transaction takes under 6 ms and every wait is bounded, so a
//! wedged sensor cannot stall the control loop.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the data line with µs busy-waits.
//! On host/test: reads from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_TENTHS: AtomicI32 = AtomicI32::new(215); // 21.5 °C
#[cfg(not(target_os = "espidf"))]
static SIM_HUM_TENTHS: AtomicU32 = AtomicU32::new(400); // 40.0 %
#[cfg(not(target_os = "espidf"))]
static SIM_CLIMATE_FAULT: AtomicBool = AtomicBool::new(false);

/// Inject a simulated climate reading (host/test builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_TENTHS.store((temperature_c * 10.0) as i32, Ordering::Relaxed);
    SIM_HUM_TENTHS.store((humidity_pct * 10.0) as u32, Ordering::Relaxed);
}

/// Force subsequent simulated reads to fail (host/test builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate_fault(fault: bool) {
    SIM_CLIMATE_FAULT.store(fault, Ordering::Relaxed);
}

/// One decoded DHT22 acquisition.
#[derive(Debug, Clone, Copy)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

pub struct ClimateSensor {
    gpio: i32,
}

impl ClimateSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// One acquisition. `None` on a missing response or checksum failure —
    /// the caller retains its previous values.
    pub fn read(&mut self) -> Option<ClimateReading> {
        let frame = self.read_frame()?;

        let checksum = frame[0]
            .wrapping_add(frame[1])
            .wrapping_add(frame[2])
            .wrapping_add(frame[3]);
        if checksum != frame[4] {
            return None;
        }

        let humidity_pct = u16::from_be_bytes([frame[0], frame[1]]) as f32 / 10.0;
        let raw_temp = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]) as f32 / 10.0;
        let temperature_c = if frame[2] & 0x80 != 0 {
            -raw_temp
        } else {
            raw_temp
        };

        Some(ClimateReading {
            temperature_c,
            humidity_pct,
        })
    }

    #[cfg(target_os = "espidf")]
    fn read_frame(&mut self) -> Option<[u8; 5]> {
        // Host start signal: pull low >1 ms, release, hand the line over.
        hw_init::gpio_set_output(self.gpio);
        hw_init::gpio_write(self.gpio, false);
        hw_init::delay_us(1200);
        hw_init::gpio_write(self.gpio, true);
        hw_init::delay_us(25);
        hw_init::gpio_set_input(self.gpio);

        // Sensor preamble: ~80 µs low, ~80 µs high, then the first bit's low.
        wait_level(self.gpio, false, 90)?;
        wait_level(self.gpio, true, 90)?;
        wait_level(self.gpio, false, 90)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            // ~50 µs low gap precedes every bit.
            wait_level(self.gpio, true, 70)?;
            let high_us = pulse_high_us(self.gpio, 100)?;
            if high_us > 40 {
                frame[bit / 8] |= 1 << (7 - bit % 8);
            }
        }
        Some(frame)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_frame(&mut self) -> Option<[u8; 5]> {
        if SIM_CLIMATE_FAULT.load(Ordering::Relaxed) {
            return None;
        }
        let hum_tenths = SIM_HUM_TENTHS.load(Ordering::Relaxed) as u16;
        let temp_tenths = SIM_TEMP_TENTHS.load(Ordering::Relaxed);
        let temp_field = if temp_tenths < 0 {
            0x8000 | (-temp_tenths) as u16
        } else {
            temp_tenths as u16
        };
        let [h0, h1] = hum_tenths.to_be_bytes();
        let [t0, t1] = temp_field.to_be_bytes();
        let sum = h0.wrapping_add(h1).wrapping_add(t0).wrapping_add(t1);
        Some([h0, h1, t0, t1, sum])
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

/// Busy-wait until the line reaches `level`. `None` on timeout.
#[cfg(target_os = "espidf")]
fn wait_level(pin: i32, level: bool, timeout_us: u32) -> Option<()> {
    let start = hw_init::now_us();
    while hw_init::gpio_read(pin) != level {
        if hw_init::now_us().wrapping_sub(start) > timeout_us as u64 {
            return None;
        }
    }
    Some(())
}

/// Measure how long the line stays high. `None` if it exceeds `timeout_us`.
#[cfg(target_os = "espidf")]
fn pulse_high_us(pin: i32, timeout_us: u32) -> Option<u32> {
    let start = hw_init::now_us();
    while hw_init::gpio_read(pin) {
        if hw_init::now_us().wrapping_sub(start) > timeout_us as u64 {
            return None;
        }
    }
    Some(hw_init::now_us().wrapping_sub(start) as u32)
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    // Single test — the simulation statics are process-wide and the test
    // harness runs tests concurrently.
    #[test]
    fn simulated_frames_decode_and_fault() {
        let mut s = ClimateSensor::new(6);

        sim_set_climate_fault(false);
        sim_set_climate(23.4, 56.7);
        let r = s.read().expect("valid frame");
        assert!((r.temperature_c - 23.4).abs() < 0.11);
        assert!((r.humidity_pct - 56.7).abs() < 0.11);

        sim_set_climate(-8.5, 70.0);
        let r = s.read().expect("valid frame");
        assert!((r.temperature_c + 8.5).abs() < 0.11);

        sim_set_climate_fault(true);
        assert!(s.read().is_none());
        sim_set_climate_fault(false);
    }
}
