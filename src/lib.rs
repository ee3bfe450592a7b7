//! Maze-chase game core: procedural maze generation, grid pathfinding,
//! enemy navigation, and the per-frame session state machine.
//!
//! The core is pure data-in/data-out: the renderer and the input layer
//! live in the binary and only ever read `GameState` snapshots or feed
//! `Command`s into [`compute::step`].

pub mod compute;
pub mod entities;
pub mod maze;
pub mod path;
