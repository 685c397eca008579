//! End-to-end tests driving the library the way the binaries do.

mod editor_session;
mod shipped_config;
