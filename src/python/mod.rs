//! Python bindings for the Naishi engine.
//!
//! ```python
//! import naishi_engine as ne
//!
//! game = ne.GameState(seed=42)
//! game.step([0, 0, 0, 0, 0, 0, 0, 0])  # first player gives draft card 0
//! game.step([0, 1, 0, 0, 0, 0, 0, 0])  # second player gives draft card 1
//! obs, reward, terminated, truncated, legal = game.step([1, 5, 0, 0, 0, 0, 0, 0])
//! if game.phase == "optional_emissary_window":
//!     game.skip_optional_emissary()
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_game;

pub use py_core::*;
pub use py_game::*;

#[pymodule]
fn naishi_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPlayerId>()?;
    m.add_class::<PyGameState>()?;
    m.add("OBSERVATION_LEN", crate::nn::OBSERVATION_LEN)?;
    m.add("ACTION_MASK_LEN", crate::nn::ACTION_MASK_LEN)?;
    Ok(())
}
