//! Game bindings: a `GameState` driven from a Python training loop.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use super::py_core::{to_py_err, PyPlayerId};
use crate::core::{GameState, NaishiConfig};
use crate::nn::{NaishiEncoder, StateEncoder};
use crate::rules::{Phase, Transition};

type StepResult<'py> = (Bound<'py, PyArray1<f32>>, f32, bool, bool, Vec<usize>);

fn unpack<'py>(py: Python<'py>, t: Transition) -> StepResult<'py> {
    let kinds = t.info.legal_action_types.iter().map(|k| k.code()).collect();
    (
        PyArray1::from_slice_bound(py, t.observation.as_slice()),
        t.reward,
        t.terminated,
        t.truncated,
        kinds,
    )
}

/// Python wrapper for GameState.
#[pyclass(name = "GameState")]
#[derive(Clone, Debug)]
pub struct PyGameState {
    inner: GameState,
    encoder: NaishiEncoder,
}

#[pymethods]
impl PyGameState {
    #[new]
    #[pyo3(signature = (seed, max_turns=None))]
    fn new(seed: u64, max_turns: Option<u32>) -> PyResult<Self> {
        let mut config = NaishiConfig::default();
        if let Some(max_turns) = max_turns {
            config = config.with_max_turns(max_turns);
        }
        let inner = GameState::new(config, seed).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self {
            inner,
            encoder: NaishiEncoder::new(),
        })
    }

    /// Apply an 8-field encoded action.
    ///
    /// Returns (observation, reward, terminated, truncated, legal_action_types).
    fn step<'py>(&mut self, py: Python<'py>, action: Vec<i64>) -> PyResult<StepResult<'py>> {
        let t = self.inner.step(&action).map_err(to_py_err)?;
        Ok(unpack(py, t))
    }

    fn skip_optional_emissary<'py>(&mut self, py: Python<'py>) -> PyResult<StepResult<'py>> {
        let t = self.inner.skip_optional_emissary().map_err(to_py_err)?;
        Ok(unpack(py, t))
    }

    fn legal_action_types(&self) -> Vec<usize> {
        self.inner.legal_action_types().iter().map(|k| k.code()).collect()
    }

    /// Observation for `player`, default the player to act.
    #[pyo3(signature = (player=None))]
    fn observation<'py>(&self, py: Python<'py>, player: Option<PyPlayerId>) -> Bound<'py, PyArray1<f32>> {
        let perspective = player.map_or(self.inner.current_player(), |p| p.0);
        let encoded = self.encoder.encode(&self.inner, perspective);
        PyArray1::from_slice_bound(py, encoded.as_slice())
    }

    fn action_mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_slice_bound(py, &self.encoder.action_mask(&self.inner))
    }

    /// Current totals, first player then second.
    fn scores(&self) -> (i32, i32) {
        let scores = self.inner.scores();
        (
            scores[crate::core::PlayerId::FIRST].total(),
            scores[crate::core::PlayerId::SECOND].total(),
        )
    }

    #[getter]
    fn current_player(&self) -> PyPlayerId {
        PyPlayerId(self.inner.current_player())
    }

    #[getter]
    fn turn_count(&self) -> u32 {
        self.inner.turn_count()
    }

    #[getter]
    fn phase(&self) -> &'static str {
        match self.inner.phase() {
            Phase::Drafting => "drafting",
            Phase::AwaitingAction => "awaiting_action",
            Phase::OptionalEmissaryWindow => "optional_emissary_window",
            Phase::Terminated => "terminated",
        }
    }

    #[getter]
    fn terminated(&self) -> bool {
        self.inner.terminated()
    }

    #[getter]
    fn truncated(&self) -> bool {
        self.inner.truncated()
    }

    #[getter]
    fn ending_available(&self) -> bool {
        self.inner.ending_available()
    }

    /// Winner index, -1 for a draw, None while the game runs.
    #[getter]
    fn winner(&self) -> Option<i8> {
        self.inner.result().map(|r| match r {
            crate::rules::GameResult::Winner(p) => p.0 as i8,
            crate::rules::GameResult::Draw => -1,
        })
    }

    fn copy(&self) -> Self {
        self.clone()
    }

    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self
            .inner
            .snapshot()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    #[staticmethod]
    fn restore(bytes: &[u8]) -> PyResult<Self> {
        let inner = GameState::restore(bytes).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self {
            inner,
            encoder: NaishiEncoder::new(),
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "GameState(turn={}, player={}, phase={})",
            self.inner.turn_count(),
            self.inner.current_player(),
            self.phase()
        )
    }
}
