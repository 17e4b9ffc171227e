mod fallthrough;
mod properties;
