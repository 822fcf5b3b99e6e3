mod buffer;
mod state_machine;
