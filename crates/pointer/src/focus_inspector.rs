//! Focused UI element inspection.
//!
//! macOS reads the accessibility tree of the system-wide element. Other
//! platforms have no equivalent wired up and report an inspection error,
//! which the core treats as "not a text field".

use pointer_core::{
    CoreResult,
    collaborators::{FocusInspector, FocusedElement},
};

use tracing::instrument;

/// Focus inspector for the current platform.
#[derive(Debug, Default)]
pub struct PlatformFocusInspector;

impl PlatformFocusInspector {
    /// Create the inspector.
    pub fn new() -> Self {
        Self
    }
}

impl FocusInspector for PlatformFocusInspector {
    #[instrument(skip(self))]
    fn inspect(&self) -> CoreResult<FocusedElement> {
        platform::inspect()
    }
}

#[cfg(target_os = "macos")]
mod platform {
    use pointer_core::{CoreError, CoreResult, collaborators::FocusedElement};

    use std::{ffi::c_void, panic::Location, ptr};

    use core_foundation::{
        base::{CFRelease, CFTypeRef, TCFType},
        string::{CFString, CFStringRef},
    };
    use error_location::ErrorLocation;
    use tracing::debug;

    #[link(name = "ApplicationServices", kind = "framework")]
    unsafe extern "C" {
        fn AXIsProcessTrusted() -> bool;
        fn AXUIElementCreateSystemWide() -> *mut c_void;
        fn AXUIElementCopyAttributeValue(
            element: *mut c_void,
            attr: CFStringRef,
            value: *mut CFTypeRef,
        ) -> i32;
    }

    #[link(name = "CoreFoundation", kind = "framework")]
    unsafe extern "C" {
        fn CFGetTypeID(cf: CFTypeRef) -> usize;
        fn CFStringGetTypeID() -> usize;
    }

    /// Owned AX element, released on drop.
    struct AxElement(*mut c_void);

    impl AxElement {
        fn system_wide() -> Option<Self> {
            let raw = unsafe { AXUIElementCreateSystemWide() };
            (!raw.is_null()).then_some(Self(raw))
        }

        /// Copy an element-valued attribute.
        fn element(&self, attr: &str) -> Option<AxElement> {
            let value = self.copy(attr)?;
            Some(AxElement(value as *mut c_void))
        }

        /// Copy a string-valued attribute.
        fn string(&self, attr: &str) -> Option<String> {
            let value = self.copy(attr)?;
            // SAFETY: value is a +1 reference from a Copy function.
            unsafe {
                if CFGetTypeID(value) != CFStringGetTypeID() {
                    CFRelease(value);
                    return None;
                }
                let s = CFString::wrap_under_create_rule(value as CFStringRef);
                Some(s.to_string())
            }
        }

        fn copy(&self, attr: &str) -> Option<CFTypeRef> {
            let name = CFString::new(attr);
            let mut value: CFTypeRef = ptr::null();
            let err = unsafe {
                AXUIElementCopyAttributeValue(self.0, name.as_concrete_TypeRef(), &mut value)
            };
            if err != 0 || value.is_null() {
                debug!(attr, err, "AX attribute unavailable");
                return None;
            }
            Some(value)
        }
    }

    impl Drop for AxElement {
        fn drop(&mut self) {
            unsafe { CFRelease(self.0 as CFTypeRef) };
        }
    }

    #[track_caller]
    pub(super) fn inspect() -> CoreResult<FocusedElement> {
        if !unsafe { AXIsProcessTrusted() } {
            return Err(CoreError::FocusInspection {
                reason: "process is not trusted for accessibility".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let system = AxElement::system_wide().ok_or_else(|| CoreError::FocusInspection {
            reason: "AXUIElementCreateSystemWide returned null".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let role = system
            .element("AXFocusedUIElement")
            .and_then(|focused| focused.string("AXRole"))
            .unwrap_or_default();

        let app_name = system
            .element("AXFocusedApplication")
            .and_then(|app| app.string("AXTitle"))
            .unwrap_or_default();

        if role.is_empty() && app_name.is_empty() {
            return Err(CoreError::FocusInspection {
                reason: "no focused element".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(FocusedElement { role, app_name })
    }
}

#[cfg(not(target_os = "macos"))]
mod platform {
    use pointer_core::{CoreError, CoreResult, collaborators::FocusedElement};

    use std::panic::Location;

    use error_location::ErrorLocation;

    #[track_caller]
    pub(super) fn inspect() -> CoreResult<FocusedElement> {
        Err(CoreError::FocusInspection {
            reason: "focus inspection is not supported on this platform".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
