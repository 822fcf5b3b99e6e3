use crate::{
    CoreResult,
    collaborators::InputDevice,
    keys::{Key, Modifier},
};

/// Returns the modifier the platform uses for clipboard chords.
///
/// macOS uses Cmd, Windows and Linux use Ctrl.
pub fn clipboard_modifier() -> Modifier {
    #[cfg(target_os = "macos")]
    {
        Modifier::Cmd
    }
    #[cfg(not(target_os = "macos"))]
    {
        Modifier::Ctrl
    }
}

/// RAII guard that guarantees a held modifier is released when dropped.
///
/// Prevents a stuck modifier if an operation between press and release fails.
/// Release on drop is best-effort; the OS resets modifier state on the next
/// physical press anyway.
pub struct ModifierGuard<'a, D: InputDevice + ?Sized> {
    device: &'a mut D,
    modifier: Modifier,
}

impl<'a, D: InputDevice + ?Sized> ModifierGuard<'a, D> {
    /// Press `modifier` and return a guard that releases it on drop.
    pub fn press(device: &'a mut D, modifier: Modifier) -> CoreResult<Self> {
        device.press(Key::Modifier(modifier))?;
        Ok(Self { device, modifier })
    }

    /// Access the device for additional key operations while the modifier is held.
    pub fn device_mut(&mut self) -> &mut D {
        self.device
    }
}

impl<D: InputDevice + ?Sized> Drop for ModifierGuard<'_, D> {
    fn drop(&mut self) {
        let _ = self.device.release(Key::Modifier(self.modifier));
    }
}
