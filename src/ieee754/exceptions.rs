/*
    Exceptions
*/

use super::*;

impl Exceptions {
    /// Clears all exceptions.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns true if any exception was raised.
    pub fn any(&self) -> bool {
        self.invalid || self.overflow || self.underflow || self.inexact || self.carry
    }

    /// Returns true if the `invalid` flag was raised.
    pub fn invalid(&self) -> bool {
        self.invalid
    }

    /// Returns true if the `overflow` flag was raised.
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Returns true if the `underflow` flag was raised.
    pub fn underflow(&self) -> bool {
        self.underflow
    }

    /// Returns true if the `inexact` flag was raised.
    pub fn inexact(&self) -> bool {
        self.inexact
    }

    /// Returns true if the `carry` flag was raised.
    pub fn carry(&self) -> bool {
        self.carry
    }

    /// Sets the `invalid` field.
    pub fn with_invalid(mut self, raised: bool) -> Self {
        self.invalid = raised;
        self
    }

    /// Sets the `overflow` field.
    pub fn with_overflow(mut self, raised: bool) -> Self {
        self.overflow = raised;
        self
    }

    /// Sets the `underflow` field.
    pub fn with_underflow(mut self, raised: bool) -> Self {
        self.underflow = raised;
        self
    }

    /// Sets the `inexact` field.
    pub fn with_inexact(mut self, raised: bool) -> Self {
        self.inexact = raised;
        self
    }

    /// Sets the `carry` field.
    pub fn with_carry(mut self, raised: bool) -> Self {
        self.carry = raised;
        self
    }
}
