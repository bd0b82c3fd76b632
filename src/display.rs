//! PCD8544 (Nokia 5110) LCD driver and the two screens drawn on it
//!
//! The controller is written over raw SPI plus DC/CE/RST lines and exposes
//! an 84x48 framebuffer as an embedded-graphics [`DrawTarget`]. Pixels land
//! in the buffer; [`Pcd8544::flush`] streams all 504 bytes to the panel.

use crate::Error;
use crate::status::StatusReport;
use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_5X8, ascii::FONT_9X15_BOLD},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Panel width in pixels
pub const WIDTH: usize = 84;
/// Panel height in pixels
pub const HEIGHT: usize = 48;
/// Framebuffer size: one byte covers an 8-pixel vertical strip
const BUF_SIZE: usize = WIDTH * HEIGHT / 8;

// PCD8544 command set
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_EXTENDED: u8 = 0x01;
const CMD_DISPLAY_NORMAL: u8 = 0x0C;
const CMD_SET_TEMP: u8 = 0x04;
const CMD_SET_BIAS: u8 = 0x10;
const CMD_SET_VOP: u8 = 0x80;
const CMD_SET_Y_ADDR: u8 = 0x40;
const CMD_SET_X_ADDR: u8 = 0x80;

/// Bias system 1:48, the value the panel expects at 3.3V
const BIAS: u8 = 0x04;

/// PCD8544 driver generic over the HAL traits it actually needs
pub struct Pcd8544<SPI, DC, CE, RST> {
    spi: SPI,
    dc: DC,
    ce: CE,
    rst: RST,
    buffer: [u8; BUF_SIZE],
}

impl<SPI, DC, CE, RST> Pcd8544<SPI, DC, CE, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CE: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, ce: CE, rst: RST) -> Self {
        Self {
            spi,
            dc,
            ce,
            rst,
            buffer: [0; BUF_SIZE],
        }
    }

    /// Reset the controller and program bias, contrast and normal mode
    pub fn init(&mut self, delay: &mut impl DelayNs, contrast: u8) -> Result<(), Error> {
        self.ce.set_high().map_err(|_| Error::Display)?;
        self.rst.set_low().map_err(|_| Error::Display)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(|_| Error::Display)?;
        delay.delay_ms(10);

        self.command(CMD_FUNCTION_SET | CMD_EXTENDED)?;
        self.command(CMD_SET_TEMP)?;
        self.command(CMD_SET_BIAS | BIAS)?;
        self.command(CMD_SET_VOP | (contrast & 0x7F))?;
        self.command(CMD_FUNCTION_SET)?;
        self.command(CMD_DISPLAY_NORMAL)?;

        self.clear();
        self.flush()
    }

    /// Reprogram the operating voltage (contrast)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error> {
        self.command(CMD_FUNCTION_SET | CMD_EXTENDED)?;
        self.command(CMD_SET_VOP | (contrast & 0x7F))?;
        self.command(CMD_FUNCTION_SET)
    }

    /// Blank the framebuffer (does not touch the panel until flushed)
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Stream the framebuffer to the panel
    pub fn flush(&mut self) -> Result<(), Error> {
        self.command(CMD_SET_Y_ADDR)?;
        self.command(CMD_SET_X_ADDR)?;

        self.dc.set_high().map_err(|_| Error::Display)?;
        self.ce.set_low().map_err(|_| Error::Display)?;
        let res = self.spi.write(&self.buffer).map_err(|_| Error::Display);
        self.ce.set_high().map_err(|_| Error::Display)?;
        res
    }

    fn command(&mut self, byte: u8) -> Result<(), Error> {
        self.dc.set_low().map_err(|_| Error::Display)?;
        self.ce.set_low().map_err(|_| Error::Display)?;
        let res = self.spi.write(&[byte]).map_err(|_| Error::Display);
        self.ce.set_high().map_err(|_| Error::Display)?;
        res
    }
}

impl<SPI, DC, CE, RST> OriginDimensions for Pcd8544<SPI, DC, CE, RST> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<SPI, DC, CE, RST> DrawTarget for Pcd8544<SPI, DC, CE, RST> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let idx = x + (y / 8) * WIDTH;
            let mask = 1 << (y % 8);
            match color {
                BinaryColor::On => self.buffer[idx] |= mask,
                BinaryColor::Off => self.buffer[idx] &= !mask,
            }
        }
        Ok(())
    }
}

/// Status screen header, 14 columns like the status lines
const HEADER_LINES: [&str; 3] = ["  Lazy Horse  ", "Box Lab Status", "--------------"];

/// Splash font is 9 pixels wide; used to center the splash lines
const SPLASH_CHAR_WIDTH: i32 = 9;

/// Draw the boot splash: product name and firmware version, large type
pub fn draw_splash<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off)?;
    let style = MonoTextStyle::new(&FONT_9X15_BOLD, BinaryColor::On);
    for (i, line) in ["BOX LAB", "VERSION", crate::VERSION].iter().enumerate() {
        let x = (WIDTH as i32 - SPLASH_CHAR_WIDTH * line.len() as i32) / 2;
        Text::with_baseline(line, Point::new(x, i as i32 * 16), style, Baseline::Top)
            .draw(display)?;
    }
    Ok(())
}

/// Draw the six-line status screen: header plus one line per check target
pub fn draw_status_screen<D>(display: &mut D, report: &StatusReport) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off)?;
    let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
    let lines = [
        HEADER_LINES[0],
        HEADER_LINES[1],
        HEADER_LINES[2],
        report.wifi_line(),
        report.internet_line(),
        report.server_line(),
    ];
    for (i, line) in lines.iter().enumerate() {
        Text::with_baseline(line, Point::new(0, i as i32 * 8), style, Baseline::Top)
            .draw(display)?;
    }
    Ok(())
}
