//! Subtype rules split out of the main checker by construct.

mod generics;
mod unions;
