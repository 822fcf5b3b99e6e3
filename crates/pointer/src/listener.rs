//! Native global keyboard listener.
//!
//! `rdev::listen` runs on a dedicated OS thread and feeds every key and
//! pointer event into the [`InputCore`]. The callback never blocks: slow work
//! leaves the thread through the core's workers.

use crate::{AppError, AppResult};

use pointer_core::{InputCore, InputEvent, Key, Modifier};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use error_location::ErrorLocation;
use rdev::{Event, EventType};
use tracing::{debug, error, info, instrument, warn};

/// How long `start` waits for the native listener to report an attach failure.
pub(crate) const STARTUP_WINDOW: Duration = Duration::from_millis(300);

/// Map an rdev key to the core key model.
///
/// Character keys use their US-layout character; the layout-aware text comes
/// separately from the event name.
pub(crate) fn map_key(key: rdev::Key) -> Key {
    use rdev::Key as R;

    match key {
        R::MetaLeft | R::MetaRight => Key::Modifier(Modifier::Cmd),
        R::ControlLeft | R::ControlRight => Key::Modifier(Modifier::Ctrl),
        R::Alt | R::AltGr => Key::Modifier(Modifier::Alt),
        R::ShiftLeft | R::ShiftRight => Key::Modifier(Modifier::Shift),
        R::Space => Key::Space,
        R::Return | R::KpReturn => Key::Enter,
        R::Tab => Key::Tab,
        R::Escape => Key::Escape,
        R::Backspace => Key::Backspace,
        R::F1 => Key::Function(1),
        R::F2 => Key::Function(2),
        R::F3 => Key::Function(3),
        R::F4 => Key::Function(4),
        R::F5 => Key::Function(5),
        R::F6 => Key::Function(6),
        R::F7 => Key::Function(7),
        R::F8 => Key::Function(8),
        R::F9 => Key::Function(9),
        R::F10 => Key::Function(10),
        R::F11 => Key::Function(11),
        R::F12 => Key::Function(12),
        R::KeyA => Key::Char('a'),
        R::KeyB => Key::Char('b'),
        R::KeyC => Key::Char('c'),
        R::KeyD => Key::Char('d'),
        R::KeyE => Key::Char('e'),
        R::KeyF => Key::Char('f'),
        R::KeyG => Key::Char('g'),
        R::KeyH => Key::Char('h'),
        R::KeyI => Key::Char('i'),
        R::KeyJ => Key::Char('j'),
        R::KeyK => Key::Char('k'),
        R::KeyL => Key::Char('l'),
        R::KeyM => Key::Char('m'),
        R::KeyN => Key::Char('n'),
        R::KeyO => Key::Char('o'),
        R::KeyP => Key::Char('p'),
        R::KeyQ => Key::Char('q'),
        R::KeyR => Key::Char('r'),
        R::KeyS => Key::Char('s'),
        R::KeyT => Key::Char('t'),
        R::KeyU => Key::Char('u'),
        R::KeyV => Key::Char('v'),
        R::KeyW => Key::Char('w'),
        R::KeyX => Key::Char('x'),
        R::KeyY => Key::Char('y'),
        R::KeyZ => Key::Char('z'),
        R::Num0 | R::Kp0 => Key::Char('0'),
        R::Num1 | R::Kp1 => Key::Char('1'),
        R::Num2 | R::Kp2 => Key::Char('2'),
        R::Num3 | R::Kp3 => Key::Char('3'),
        R::Num4 | R::Kp4 => Key::Char('4'),
        R::Num5 | R::Kp5 => Key::Char('5'),
        R::Num6 | R::Kp6 => Key::Char('6'),
        R::Num7 | R::Kp7 => Key::Char('7'),
        R::Num8 | R::Kp8 => Key::Char('8'),
        R::Num9 | R::Kp9 => Key::Char('9'),
        R::BackQuote => Key::Char('`'),
        R::Minus | R::KpMinus => Key::Char('-'),
        R::Equal => Key::Char('='),
        R::KpPlus => Key::Char('+'),
        R::KpMultiply => Key::Char('*'),
        R::KpDivide => Key::Char('/'),
        R::LeftBracket => Key::Char('['),
        R::RightBracket => Key::Char(']'),
        R::SemiColon => Key::Char(';'),
        R::Quote => Key::Char('\''),
        R::BackSlash | R::IntlBackslash => Key::Char('\\'),
        R::Comma => Key::Char(','),
        R::Dot | R::KpDelete => Key::Char('.'),
        R::Slash => Key::Char('/'),
        R::Unknown(code) => Key::Other(code),
        other => Key::Other(named_key_code(other)),
    }
}

// Navigation and lock keys have no character. They get stable codes outside
// the range rdev reports for unknown keys so they never collide.
fn named_key_code(key: rdev::Key) -> u32 {
    use rdev::Key as R;

    const BASE: u32 = 0x1_0000;
    let offset = match key {
        R::UpArrow => 1,
        R::DownArrow => 2,
        R::LeftArrow => 3,
        R::RightArrow => 4,
        R::Home => 5,
        R::End => 6,
        R::PageUp => 7,
        R::PageDown => 8,
        R::Delete => 9,
        R::Insert => 10,
        R::CapsLock => 11,
        R::NumLock => 12,
        R::ScrollLock => 13,
        R::PrintScreen => 14,
        R::Pause => 15,
        R::Function => 16,
        _ => 0,
    };
    BASE + offset
}

/// Layout-aware text for a key press, kept only for keys that can type.
///
/// macOS reports function and arrow keys as private-use characters; those and
/// control characters are dropped.
pub(crate) fn printable_text(key: Key, name: Option<String>) -> Option<String> {
    if !matches!(key, Key::Char(_) | Key::Other(_)) {
        return None;
    }

    name.filter(|text| {
        !text.is_empty()
            && text
                .chars()
                .all(|c| !c.is_control() && !('\u{e000}'..='\u{f8ff}').contains(&c))
    })
}

/// Translate a native event. Events the core does not use yield `None`.
pub(crate) fn to_input_event(event: Event) -> Option<InputEvent> {
    match event.event_type {
        EventType::KeyPress(raw) => {
            let key = map_key(raw);
            Some(InputEvent::KeyDown {
                key,
                text: printable_text(key, event.name),
            })
        }
        EventType::KeyRelease(raw) => Some(InputEvent::KeyUp { key: map_key(raw) }),
        EventType::MouseMove { x, y } => Some(InputEvent::PointerMoved { x, y }),
        _ => None,
    }
}

/// Owns the native listener thread and the input core it drives.
pub struct KeyboardListener {
    core: Arc<Mutex<InputCore>>,
    running: Arc<AtomicBool>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl KeyboardListener {
    /// Wrap `core`. Nothing is attached until [`start`](Self::start).
    pub fn new(core: InputCore) -> Self {
        Self {
            core: Arc::new(Mutex::new(core)),
            running: Arc::new(AtomicBool::new(false)),
            thread: Mutex::new(None),
        }
    }

    /// Whether events are being processed.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Attach the native listener and begin processing events.
    ///
    /// Pressed keys and capture state start empty. The native thread is
    /// spawned once; a start after [`stop`](Self::stop) resumes it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ListenerStartFailed`] when the native listener
    /// reports an error within [`STARTUP_WINDOW`], typically missing
    /// input-monitoring permission.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start(&self) -> AppResult<()> {
        if self.running.load(Ordering::SeqCst) {
            debug!("Keyboard listener already running");
            return Ok(());
        }

        lock_core(&self.core).reset();

        let mut thread = self.thread.lock().unwrap_or_else(|e| {
            error!("Listener thread lock poisoned, recovering: {}", e);
            e.into_inner()
        });

        if thread.as_ref().is_some_and(|t| !t.is_finished()) {
            self.running.store(true, Ordering::SeqCst);
            info!("Keyboard listener resumed");
            return Ok(());
        }

        self.running.store(true, Ordering::SeqCst);

        let (startup_tx, startup_rx) = mpsc::channel::<String>();
        let core = Arc::clone(&self.core);
        let running = Arc::clone(&self.running);

        let handle = thread::Builder::new()
            .name("pointer-keyboard".to_string())
            .spawn(move || {
                let callback_running = Arc::clone(&running);
                let callback = move |event: Event| {
                    if !callback_running.load(Ordering::Relaxed) {
                        return;
                    }
                    if let Some(input) = to_input_event(event) {
                        lock_core(&core).handle(input);
                    }
                };

                // rdev::listen blocks for the life of the listener.
                if let Err(e) = rdev::listen(callback) {
                    error!(error = ?e, "Native keyboard listener stopped");
                    running.store(false, Ordering::SeqCst);
                    let _ = startup_tx.send(format!("{:?}", e));
                }
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                AppError::ListenerStartFailed {
                    reason: format!("Failed to spawn listener thread: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        match startup_rx.recv_timeout(STARTUP_WINDOW) {
            Ok(reason) => {
                self.running.store(false, Ordering::SeqCst);
                let _ = handle.join();
                Err(AppError::ListenerStartFailed {
                    reason,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(RecvTimeoutError::Disconnected) => {
                self.running.store(false, Ordering::SeqCst);
                Err(AppError::ListenerStartFailed {
                    reason: "native listener exited during startup".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(RecvTimeoutError::Timeout) => {
                *thread = Some(handle);
                info!("Keyboard listener started");
                Ok(())
            }
        }
    }

    /// Stop processing events.
    ///
    /// The native hook stays installed; events are ignored until the next
    /// [`start`](Self::start).
    #[instrument(skip(self))]
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            info!("Keyboard listener stopped");
        } else {
            warn!("Keyboard listener was not running");
        }
    }
}

fn lock_core(core: &Mutex<InputCore>) -> MutexGuard<'_, InputCore> {
    core.lock().unwrap_or_else(|e| {
        error!("Input core lock poisoned, recovering: {}", e);
        e.into_inner()
    })
}
