mod builder;
mod selection;
