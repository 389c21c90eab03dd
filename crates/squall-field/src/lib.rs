//! Particle field simulation for the squall weather overlay.
//!
//! A [`Field`] owns a set of rain drops, snow flakes or clouds moving across
//! a rectangular surface. Each [`Field::step`] advances every particle by its
//! velocity and recycles the ones that left the surface back onto an entry
//! line derived from the fall direction. [`FieldRun`] wraps a field with the
//! play/pause/stop lifecycle a frame scheduler drives.

mod entry_line;
mod error;
mod field;
mod heading;
mod motion;
mod particle;
mod run;
mod size_table;

pub use entry_line::EntryLine;
pub use error::FieldError;
pub use field::Field;
pub use heading::Heading;
pub use particle::Particle;
pub use run::FieldRun;
pub use size_table::SizeTable;
