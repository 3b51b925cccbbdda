//! Style value primitives: evaluation-tagged lengths and the
//! status-ordered property slot.

/// Evaluation tag for a length value.
///
/// Only `Pixels` and `Percentage` are evaluated; the remaining tags are
/// accepted so style chains round-trip, but resolve 1:1 as pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Unit {
    /// Absolute cells.
    Pixels,
    /// Fraction of the parent's content basis.
    Percentage,
    // TODO: font-relative units need a font metric source before they can
    // evaluate as anything but pixels.
    /// Em. Evaluates as pixels.
    Em,
    /// Rem. Evaluates as pixels.
    Rem,
    /// Viewport width. Evaluates as pixels.
    Vw,
    /// Viewport height. Evaluates as pixels.
    Vh,
    /// Character width. Evaluates as pixels.
    Ch,
    /// Viewport minimum. Evaluates as pixels.
    Vmin,
    /// Viewport maximum. Evaluates as pixels.
    Vmax,
    /// Ex. Evaluates as pixels.
    Ex,
    /// Fraction. Evaluates as pixels.
    Fraction,
    /// Centimeters. Evaluates as pixels.
    Cm,
    /// Millimeters. Evaluates as pixels.
    Mm,
    /// Inches. Evaluates as pixels.
    In,
    /// Points. Evaluates as pixels.
    Pt,
    /// Picas. Evaluates as pixels.
    Pc,
    /// Unset.
    #[default]
    Default,
}

/// A numeric style value with an evaluation tag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LengthValue {
    /// The raw number: cells for `Pixels`, a fraction for `Percentage`.
    pub value: f32,
    /// How the number resolves against the parent.
    pub unit: Unit,
}

impl LengthValue {
    /// An absolute length in cells.
    pub const fn pixels(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Pixels,
        }
    }

    /// A fraction of the parent's content basis.
    pub const fn percentage(fraction: f32) -> Self {
        Self {
            value: fraction,
            unit: Unit::Percentage,
        }
    }

    /// Returns true for percentage values, which must be re-evaluated
    /// whenever the parent basis changes.
    pub const fn is_dynamic(&self) -> bool {
        matches!(self.unit, Unit::Percentage)
    }

    /// Resolve against the parent basis: a percentage becomes
    /// `round(parent * fraction)`; every other tag resolves as pixels.
    pub fn evaluate(&self, parent: u16) -> u16 {
        let resolved = match self.unit {
            Unit::Percentage => f32::from(parent) * self.value,
            _ => self.value,
        };
        resolved.round().max(0.0) as u16
    }
}

impl From<u16> for LengthValue {
    fn from(cells: u16) -> Self {
        Self::pixels(f32::from(cells))
    }
}

impl From<i32> for LengthValue {
    fn from(cells: i32) -> Self {
        Self::pixels(cells as f32)
    }
}

impl From<f32> for LengthValue {
    fn from(fraction: f32) -> Self {
        Self::percentage(fraction)
    }
}

/// Initialization status of a property. Higher status wins on assignment,
/// so a defaults-`Initialized` value can never overwrite a user-set
/// `Value`, while one `Value` can overwrite another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueState {
    /// Never written.
    #[default]
    Uninitialized,
    /// Written by library defaults.
    Initialized,
    /// Written by the user.
    Value,
}

/// A property slot: a value plus the status of its last assignment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Prop<T> {
    value: T,
    state: ValueState,
}

impl<T> Prop<T> {
    /// A slot pre-filled with a library default.
    pub const fn initialized(value: T) -> Self {
        Self {
            value,
            state: ValueState::Initialized,
        }
    }

    /// An unset slot holding a placeholder value.
    pub const fn uninitialized(value: T) -> Self {
        Self {
            value,
            state: ValueState::Uninitialized,
        }
    }

    /// The current value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Mutable access for in-place evaluation; does not change the status.
    pub const fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// The assignment status.
    pub const fn state(&self) -> ValueState {
        self.state
    }

    /// Returns true once the slot has been written at any status.
    pub fn is_set(&self) -> bool {
        self.state != ValueState::Uninitialized
    }

    /// Assign at the given status. Succeeds (and reports true) only when
    /// the incoming status is at least the current one.
    pub fn assign(&mut self, value: T, state: ValueState) -> bool {
        if state >= self.state {
            self.value = value;
            self.state = state;
            true
        } else {
            false
        }
    }

    /// Assign at user status.
    pub fn set(&mut self, value: T) {
        self.assign(value, ValueState::Value);
    }
}

impl<T: Copy> Prop<T> {
    /// The current value, copied.
    pub fn value(&self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_evaluates_against_parent() {
        let v = LengthValue::percentage(0.5);
        assert_eq!(v.evaluate(18), 9);
        assert_eq!(v.evaluate(0), 0);
    }

    #[test]
    fn percentage_rounds() {
        let v = LengthValue::percentage(0.33);
        assert_eq!(v.evaluate(10), 3);
        let v = LengthValue::percentage(0.35);
        assert_eq!(v.evaluate(10), 4);
    }

    #[test]
    fn pixels_ignore_parent() {
        let v = LengthValue::pixels(7.0);
        assert_eq!(v.evaluate(100), 7);
    }

    #[test]
    fn unimplemented_units_resolve_as_pixels() {
        let v = LengthValue {
            value: 3.0,
            unit: Unit::Em,
        };
        assert_eq!(v.evaluate(100), 3);
    }

    #[test]
    fn from_int_is_pixels_from_float_is_percentage() {
        let px: LengthValue = 12u16.into();
        assert_eq!(px.unit, Unit::Pixels);
        let pct: LengthValue = 0.25f32.into();
        assert_eq!(pct.unit, Unit::Percentage);
        assert!(pct.is_dynamic());
    }

    #[test]
    fn state_ordering() {
        assert!(ValueState::Value > ValueState::Initialized);
        assert!(ValueState::Initialized > ValueState::Uninitialized);
    }

    #[test]
    fn initialized_cannot_overwrite_value() {
        let mut p = Prop::uninitialized(0u16);
        assert!(p.assign(5, ValueState::Value));
        assert!(!p.assign(9, ValueState::Initialized));
        assert_eq!(*p.get(), 5);
    }

    #[test]
    fn value_overwrites_value() {
        let mut p = Prop::uninitialized(0u16);
        p.set(5);
        p.set(7);
        assert_eq!(*p.get(), 7);
    }

    #[test]
    fn initialized_overwrites_uninitialized() {
        let mut p = Prop::uninitialized(0u16);
        assert!(p.assign(3, ValueState::Initialized));
        assert_eq!(p.state(), ValueState::Initialized);
    }
}
