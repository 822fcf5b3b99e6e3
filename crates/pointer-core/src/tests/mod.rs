mod capture;
mod context;
mod hotkey;
