/// Visibility of the pointing device, arbitrated against keyboard selection.
///
/// Keyboard navigation hides the pointer so a stale hover cannot fight the
/// keyboard highlight; the next pointer movement shows it again.
pub trait PointerVisibility {
    fn is_visible(&self) -> bool;
    fn hide(&mut self);
    fn show(&mut self);
}

/// In-memory pointer visibility flag. Terminals cannot hide the mouse, so
/// this is all the terminal shell needs.
#[derive(Debug, Clone, Default)]
pub struct HoverGate {
    hidden: bool,
}

impl PointerVisibility for HoverGate {
    fn is_visible(&self) -> bool {
        !self.hidden
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_starts_visible_and_toggles() {
        let mut gate = HoverGate::default();
        assert!(gate.is_visible());
        gate.hide();
        gate.hide();
        assert!(!gate.is_visible());
        gate.show();
        assert!(gate.is_visible());
    }
}
