//! The grid component.
//!
//! [`Grid`] is the logical engine behind a data grid surface: it owns the
//! records, the column registry, sort/filter state, the derived view and
//! the active cell. Rendering is left to the host, which reads rows and
//! cell text from here and feeds input back through the interaction
//! methods.

mod events;
mod state;

pub use state::{Grid, GridId};
