//! One-shot hardware peripheral initialization and raw register helpers.
//!
//! Configures GPIO directions, LEDC timers/channels, and the I²C master
//! using raw ESP-IDF sys calls. Called once from `main()` before the
//! control loop starts. The free functions below are the only path the
//! drivers use to touch registers, so the single-threaded access
//! assumption lives in one place.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::error::Error;
use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::pins;

// ── LEDC channel / timer map ──────────────────────────────────

/// Servo signal: timer 0, 50 Hz, 14-bit.
pub const LEDC_CH_SERVO: u32 = 0;
/// Alarm buzzer: timer 1, retuned per tone, 10-bit.
pub const LEDC_CH_BUZZER: u32 = 1;

pub const LEDC_TIMER_SERVO: u32 = 0;
pub const LEDC_TIMER_BUZZER: u32 = 1;

// ── Init ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_ledc()?;
        init_i2c()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<()> {
    // Button is active-low behind the internal pull-up. The echo line is
    // driven push-pull by the ranger, no pull needed.
    let btn_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::BUTTON_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&btn_cfg) };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("button GPIO config failed"));
    }

    let echo_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::ECHO_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&echo_cfg) };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("echo GPIO config failed"));
    }

    info!("hw_init: GPIO inputs configured (button, echo)");
    Ok(())
}

// ── GPIO outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<()> {
    let output_pins = [
        pins::TRIG_GPIO,
        pins::INDICATOR_GPIO,
        pins::GUARD_RELAY_GPIO,
        pins::ALARM_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(Error::Init("output GPIO config failed"));
        }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (trig, indicator, guard, alarm)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

/// Retarget a pin to input. Used by the DHT driver when handing the
/// single-wire line back to the sensor.
#[cfg(target_os = "espidf")]
pub fn gpio_set_input(pin: i32) {
    // SAFETY: direction change on a pin this firmware owns; main-loop only.
    unsafe {
        gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_set_input(_pin: i32) {}

/// Retarget a pin to open-drain output for the DHT start signal.
#[cfg(target_os = "espidf")]
pub fn gpio_set_output(pin: i32) {
    // SAFETY: see gpio_set_input.
    unsafe {
        gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT_OD);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_set_output(_pin: i32) {}

// ── Time ──────────────────────────────────────────────────────

/// Microseconds since boot, monotonic.
#[cfg(target_os = "espidf")]
pub fn now_us() -> u64 {
    // SAFETY: esp_timer_get_time is a counter read, safe anywhere.
    (unsafe { esp_timer_get_time() }) as u64
}

#[cfg(not(target_os = "espidf"))]
pub fn now_us() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_micros() as u64
}

/// Busy-wait for `us` microseconds. Only for the short, protocol-level
/// delays in the bit-banged drivers — everything else is cadence-gated.
#[cfg(target_os = "espidf")]
pub fn delay_us(us: u32) {
    // SAFETY: ets_delay_us spins the calling core; no shared state.
    unsafe {
        ets_delay_us(us);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn delay_us(_us: u32) {}

// ── LEDC PWM ──────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<()> {
    // Timer 0: servo (50 Hz, 14-bit for ~1.2 µs pulse granularity).
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_14_BIT,
        freq_hz: pins::SERVO_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("servo LEDC timer config failed"));
    }

    // Timer 1: buzzer (frequency retuned per tone, 10-bit).
    let timer1 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_1,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_10_BIT,
        freq_hz: pins::BUZZER_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer1) };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("buzzer LEDC timer config failed"));
    }

    // Channel 0: servo signal.
    let ret = unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: ledc_channel_t_LEDC_CHANNEL_0,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: pins::SERVO_PWM_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        })
    };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("servo LEDC channel config failed"));
    }

    // Channel 1: buzzer.
    let ret = unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: ledc_channel_t_LEDC_CHANNEL_1,
            timer_sel: ledc_timer_t_LEDC_TIMER_1,
            gpio_num: pins::BUZZER_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        })
    };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("buzzer LEDC channel config failed"));
    }

    info!("hw_init: LEDC configured (servo=CH0, buzzer=CH1)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set_duty(channel: u32, duty: u32) {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    unsafe {
        esp_idf_svc::sys::ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty);
        esp_idf_svc::sys::ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set_duty(_channel: u32, _duty: u32) {}

/// Retune an LEDC timer's frequency (buzzer tone changes).
#[cfg(target_os = "espidf")]
pub fn ledc_set_freq(timer: u32, freq_hz: u32) {
    // SAFETY: timer was configured in init_ledc(); main-loop only.
    unsafe {
        esp_idf_svc::sys::ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, timer, freq_hz);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set_freq(_timer: u32, _freq_hz: u32) {}

// ── I²C master (LCD backpack) ─────────────────────────────────

#[cfg(target_os = "espidf")]
const I2C_PORT: i32 = 0;
#[cfg(target_os = "espidf")]
const I2C_TIMEOUT_TICKS: u32 = 20;

#[cfg(target_os = "espidf")]
unsafe fn init_i2c() -> Result<()> {
    let cfg = i2c_config_t {
        mode: i2c_mode_t_I2C_MODE_MASTER,
        sda_io_num: pins::I2C_SDA_GPIO,
        scl_io_num: pins::I2C_SCL_GPIO,
        sda_pullup_en: true,
        scl_pullup_en: true,
        __bindgen_anon_1: i2c_config_t__bindgen_ty_1 {
            master: i2c_config_t__bindgen_ty_1__bindgen_ty_1 {
                clk_speed: pins::I2C_FREQ_HZ,
            },
        },
        ..Default::default()
    };
    let ret = unsafe { i2c_param_config(I2C_PORT, &cfg) };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("I2C param config failed"));
    }
    let ret = unsafe { i2c_driver_install(I2C_PORT, i2c_mode_t_I2C_MODE_MASTER, 0, 0, 0) };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("I2C driver install failed"));
    }
    info!("hw_init: I2C master configured (port 0)");
    Ok(())
}

/// One I²C master write transaction.
#[cfg(target_os = "espidf")]
pub fn i2c_write(addr: u8, bytes: &[u8]) -> Result<()> {
    // SAFETY: driver installed in init_i2c(); main-loop only.
    let ret = unsafe {
        i2c_master_write_to_device(I2C_PORT, addr, bytes.as_ptr(), bytes.len(), I2C_TIMEOUT_TICKS)
    };
    if ret != ESP_OK as i32 {
        return Err(crate::error::ActuatorError::DisplayWriteFailed.into());
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_write(_addr: u8, _bytes: &[u8]) -> Result<()> {
    Ok(())
}
