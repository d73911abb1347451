//! 16x2 character LCD (HD44780) behind a PCF8574 I²C backpack.
//!
//! The backpack exposes the controller's 4-bit bus on P4–P7 and the
//! control lines on P0–P2 (RS, RW, EN) with the backlight on P3. Every
//! byte therefore goes out as two nibbles, each strobed with an EN pulse.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real I²C transactions via `hw_init::i2c_write`.
//! On host/test: a 2x16 character buffer that tests can inspect.

use crate::app::ports::DisplayPort;
use crate::pins;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use log::warn;

// PCF8574 bit assignments.
#[cfg(target_os = "espidf")]
const RS_BIT: u8 = 0x01;
#[cfg(target_os = "espidf")]
const EN_BIT: u8 = 0x04;
#[cfg(target_os = "espidf")]
const BACKLIGHT_BIT: u8 = 0x08;

/// Degree symbol, loaded into CGRAM slot 1 and referenced as `\x01`.
#[cfg(target_os = "espidf")]
const DEGREE_GLYPH: [u8; 8] = [0b00111, 0b00101, 0b00111, 0, 0, 0, 0, 0];

/// DDRAM base address per row (standard 16x2 layout).
#[cfg(target_os = "espidf")]
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

pub struct LcdDriver {
    addr: u8,
    #[cfg(not(target_os = "espidf"))]
    buffer: [[u8; pins::LCD_COLUMNS as usize]; pins::LCD_LINES as usize],
    #[cfg(not(target_os = "espidf"))]
    clear_count: u32,
}

impl LcdDriver {
    pub fn new(addr: u8) -> Self {
        Self {
            addr,
            #[cfg(not(target_os = "espidf"))]
            buffer: [[b' '; pins::LCD_COLUMNS as usize]; pins::LCD_LINES as usize],
            #[cfg(not(target_os = "espidf"))]
            clear_count: 0,
        }
    }

    /// Bring the controller into 4-bit mode and switch the display on.
    /// The magic 0x03/0x02 dance is the HD44780 datasheet reset-by-
    /// instruction sequence.
    #[cfg(target_os = "espidf")]
    pub fn init(&mut self) {
        hw_init::delay_us(50_000); // power-on settle

        self.write_nibble(0x03, false);
        hw_init::delay_us(4_500);
        self.write_nibble(0x03, false);
        hw_init::delay_us(4_500);
        self.write_nibble(0x03, false);
        hw_init::delay_us(150);
        self.write_nibble(0x02, false); // 4-bit mode

        self.command(0x28); // function set: 4-bit, 2 lines, 5x8
        self.command(0x0C); // display on, cursor off, blink off
        self.command(0x01); // clear
        hw_init::delay_us(2_000);
        self.command(0x06); // entry mode: increment, no shift
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn init(&mut self) {}

    #[cfg(target_os = "espidf")]
    fn command(&mut self, byte: u8) {
        self.write_byte(byte, false);
    }

    #[cfg(target_os = "espidf")]
    fn data(&mut self, byte: u8) {
        self.write_byte(byte, true);
    }

    #[cfg(target_os = "espidf")]
    fn write_byte(&mut self, byte: u8, is_data: bool) {
        self.write_nibble(byte >> 4, is_data);
        self.write_nibble(byte & 0x0F, is_data);
    }

    /// Put one nibble on P4–P7 and strobe EN. A failed transaction is
    /// logged and dropped — a flaky display must not stop the gate.
    #[cfg(target_os = "espidf")]
    fn write_nibble(&mut self, nibble: u8, is_data: bool) {
        let base = (nibble << 4) | BACKLIGHT_BIT | if is_data { RS_BIT } else { 0 };
        let frames = [base | EN_BIT, base];
        for frame in frames {
            if let Err(e) = hw_init::i2c_write(self.addr, &[frame]) {
                warn!("lcd: {e}");
                return;
            }
            hw_init::delay_us(50);
        }
    }

    /// Host-side view of a display row, for tests.
    #[cfg(not(target_os = "espidf"))]
    pub fn row_text(&self, row: u8) -> String {
        self.buffer[row as usize].iter().map(|&b| b as char).collect()
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn clear_count(&self) -> u32 {
        self.clear_count
    }

    pub fn addr(&self) -> u8 {
        self.addr
    }
}

impl DisplayPort for LcdDriver {
    #[cfg(target_os = "espidf")]
    fn write(&mut self, row: u8, col: u8, text: &str) {
        let row = row.min(pins::LCD_LINES - 1);
        self.command(0x80 | (ROW_OFFSETS[row as usize] + col.min(pins::LCD_COLUMNS - 1)));
        let budget = (pins::LCD_COLUMNS - col.min(pins::LCD_COLUMNS - 1)) as usize;
        for byte in text.bytes().take(budget) {
            self.data(byte);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn write(&mut self, row: u8, col: u8, text: &str) {
        let row = row.min(pins::LCD_LINES - 1) as usize;
        let mut col = col.min(pins::LCD_COLUMNS - 1) as usize;
        for byte in text.bytes() {
            if col >= pins::LCD_COLUMNS as usize {
                break;
            }
            self.buffer[row][col] = byte;
            col += 1;
        }
    }

    #[cfg(target_os = "espidf")]
    fn clear(&mut self) {
        self.command(0x01);
        hw_init::delay_us(2_000);
    }

    #[cfg(not(target_os = "espidf"))]
    fn clear(&mut self) {
        self.buffer = [[b' '; pins::LCD_COLUMNS as usize]; pins::LCD_LINES as usize];
        self.clear_count += 1;
    }

    #[cfg(target_os = "espidf")]
    fn load_degree_glyph(&mut self) {
        // CGRAM slot 1: set-CGRAM-address 0x40 | (slot << 3).
        self.command(0x40 | (1 << 3));
        for row in DEGREE_GLYPH {
            self.data(row);
        }
        self.command(0x80); // back to DDRAM
    }

    #[cfg(not(target_os = "espidf"))]
    fn load_degree_glyph(&mut self) {}
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn host_buffer_tracks_writes_and_clears() {
        let mut lcd = LcdDriver::new(pins::LCD_I2C_ADDR);
        lcd.write(0, 0, "Opened!");
        assert_eq!(lcd.row_text(0), "Opened!         ");

        lcd.write(1, 2, "21\u{01}C");
        assert!(lcd.row_text(1).starts_with("  21\u{01}C"));

        lcd.clear();
        assert_eq!(lcd.row_text(0), " ".repeat(16));
        assert_eq!(lcd.clear_count(), 1);
    }

    #[test]
    fn overlong_text_is_truncated_at_row_end() {
        let mut lcd = LcdDriver::new(pins::LCD_I2C_ADDR);
        lcd.write(0, 10, "0123456789");
        assert_eq!(lcd.row_text(0), "          012345");
    }
}
