//! Repository implementations

pub mod event;

pub use event::EventRepository;
