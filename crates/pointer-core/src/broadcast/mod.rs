mod broadcaster;
mod registry;

pub use {
    broadcaster::{BroadcastReport, Broadcaster},
    registry::{ConnectionHandle, ConnectionRegistry},
};
