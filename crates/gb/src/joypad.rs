//! Joypad: the P1 input matrix at 0xFF00.
//!
//! Grounded on the teacher's register-stub style (`bus.rs`'s plain I/O byte
//! fields), extended with edge-triggered interrupt requests per this
//! engine's spec.

use serde::{Deserialize, Serialize};

use crate::interrupts::{InterruptController, InterruptKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Start,
    Select,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Joypad {
    select_action: bool,
    select_direction: bool,
    // Pressed = true internally; the P1 register inverts this on read.
    a: bool,
    b: bool,
    select: bool,
    start: bool,
    right: bool,
    left: bool,
    up: bool,
    down: bool,
}

impl Default for Joypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Joypad {
    pub fn new() -> Self {
        Self {
            select_action: false,
            select_direction: false,
            a: false,
            b: false,
            select: false,
            start: false,
            right: false,
            left: false,
            up: false,
            down: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn action_line(&self) -> u8 {
        (!self.a as u8) | ((!self.b as u8) << 1) | ((!self.select as u8) << 2) | ((!self.start as u8) << 3)
    }

    fn direction_line(&self) -> u8 {
        (!self.right as u8)
            | ((!self.left as u8) << 1)
            | ((!self.up as u8) << 2)
            | ((!self.down as u8) << 3)
    }

    pub fn read_p1(&self) -> u8 {
        let mut bits = 0x0F;
        if self.select_action {
            bits &= self.action_line();
        }
        if self.select_direction {
            bits &= self.direction_line();
        }
        0xC0 | ((!self.select_action as u8) << 5) | ((!self.select_direction as u8) << 4) | bits
    }

    pub fn write_p1(&mut self, val: u8) {
        self.select_action = val & 0x20 == 0;
        self.select_direction = val & 0x10 == 0;
    }

    /// Apply a button transition, requesting a joypad interrupt on any
    /// line that was previously high (released) and is now selected and low.
    pub fn set_button(&mut self, button: Button, pressed: bool, interrupts: &mut InterruptController) {
        let before = self.read_p1() & 0x0F;

        let field = match button {
            Button::A => &mut self.a,
            Button::B => &mut self.b,
            Button::Select => &mut self.select,
            Button::Start => &mut self.start,
            Button::Right => &mut self.right,
            Button::Left => &mut self.left,
            Button::Up => &mut self.up,
            Button::Down => &mut self.down,
        };
        *field = pressed;

        let after = self.read_p1() & 0x0F;
        if before & !after != 0 {
            interrupts.request(InterruptKind::Joypad);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unselected_lines_read_high() {
        let pad = Joypad::new();
        assert_eq!(pad.read_p1() & 0x0F, 0x0F);
    }

    #[test]
    fn pressed_button_reads_low_when_selected() {
        let mut pad = Joypad::new();
        let mut ic = InterruptController::new();
        pad.write_p1(0x10); // select direction (bit 4 low)
        pad.set_button(Button::Down, true, &mut ic);
        assert_eq!(pad.read_p1() & 0x08, 0x00);
    }

    #[test]
    fn press_requests_interrupt_on_falling_edge() {
        let mut pad = Joypad::new();
        let mut ic = InterruptController::new();
        ic.write_ie(0xFF);
        pad.write_p1(0x20); // select action (bit 5 low)
        pad.set_button(Button::A, true, &mut ic);
        assert!(ic.pending() & 0x10 != 0);
    }

    #[test]
    fn release_does_not_request_interrupt() {
        let mut pad = Joypad::new();
        let mut ic = InterruptController::new();
        ic.write_ie(0xFF);
        pad.write_p1(0x20);
        pad.set_button(Button::A, true, &mut ic);
        ic.acknowledge(4);
        pad.set_button(Button::A, false, &mut ic);
        assert_eq!(ic.pending() & 0x10, 0);
    }
}
