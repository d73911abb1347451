//! GPIO / peripheral pin assignments for the Gatewarden main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Gate servo (standard 50 Hz hobby servo on the hinge)
// ---------------------------------------------------------------------------

/// LEDC PWM output for the gate servo signal line.
pub const SERVO_PWM_GPIO: i32 = 5;
/// Servo PWM frequency — 20 ms frame.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution for the servo channel (14-bit, 16384 counts/frame).
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// Pulse width at 0 degrees (µs).
pub const SERVO_MIN_PULSE_US: u32 = 500;
/// Pulse width at 180 degrees (µs).
pub const SERVO_MAX_PULSE_US: u32 = 2500;

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT22 climate sensor — single-wire data line (open-drain, external pull-up).
pub const DHT_GPIO: i32 = 6;

/// HC-SR04 ultrasonic trigger output.
pub const TRIG_GPIO: i32 = 3;
/// HC-SR04 ultrasonic echo input.
pub const ECHO_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Digital outputs
// ---------------------------------------------------------------------------

/// Indicator lamp — HIGH while the gate is open or in motion.
pub const INDICATOR_GPIO: i32 = 13;
/// Guard/lock relay — HIGH only when the gate is fully closed.
pub const GUARD_RELAY_GPIO: i32 = 11;
/// Alarm lamp line — HIGH while the intrusion alarm is armed.
pub const ALARM_GPIO: i32 = 12;

/// Piezo buzzer on an LEDC channel (tone = frequency, 50% duty).
pub const BUZZER_GPIO: i32 = 4;
/// Idle LEDC frequency for the buzzer timer (retuned per tone).
pub const BUZZER_PWM_FREQ_HZ: u32 = 2_000;
/// Buzzer LEDC resolution (10-bit; 50% duty = 512).
pub const BUZZER_PWM_RESOLUTION_BITS: u32 = 10;

// ---------------------------------------------------------------------------
// User button (active-low with internal pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button — the single gate open/close control.
pub const BUTTON_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// I²C bus — 16x2 character LCD on a PCF8574 backpack
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
/// I²C clock (standard mode, the PCF8574 tops out at 100 kHz).
pub const I2C_FREQ_HZ: u32 = 100_000;

/// LCD backpack address.
pub const LCD_I2C_ADDR: u8 = 0x27;
pub const LCD_COLUMNS: u8 = 16;
pub const LCD_LINES: u8 = 2;
