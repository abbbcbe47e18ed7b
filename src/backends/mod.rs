//! Input backends for `padbind`.
//!
//! Implementations of [`Device`](crate::device::Device). Platform bridges live in
//! the embedding application; this crate ships only the scripted
//! [`VirtualDevice`](virtual_input::VirtualDevice).

pub mod virtual_input;
