mod control;
mod gate;
mod spec;
mod tracker;
