use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

#[pyclass]
#[derive(Clone)]
struct TallyPy {
    #[pyo3(get)]
    raw: usize,
    #[pyo3(get)]
    decoded: usize,
    #[pyo3(get)]
    encoded: usize,
    #[pyo3(get)]
    literals: usize,
    #[pyo3(get)]
    difference: usize,
    #[pyo3(get)]
    encoded_difference: usize,
}

impl From<crate::EscapeAccumulator> for TallyPy {
    fn from(a: crate::EscapeAccumulator) -> Self {
        Self {
            raw: a.raw_total(),
            decoded: a.decoded_total(),
            encoded: a.encoded_total(),
            literals: a.literals(),
            difference: a.difference(),
            encoded_difference: a.encoded_difference(),
        }
    }
}

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pyfunction]
fn raw_length(line: &str) -> usize { crate::raw_length(line) }

#[pyfunction]
fn decoded_length(line: &str) -> PyResult<usize> { crate::decoded_length(line).map_err(value_error) }

#[pyfunction]
fn decode(line: &str) -> PyResult<String> { crate::decode(line).map_err(value_error) }

#[pyfunction]
fn encode(s: &str) -> String { crate::encode(s) }

#[pyfunction]
fn encoded_length(s: &str) -> usize { crate::encoded_length(s) }

#[pyfunction]
fn accumulate(text: &str) -> PyResult<usize> {
    crate::accumulate(text.lines()).map_err(value_error)
}

#[pyfunction]
fn tally(text: &str) -> PyResult<TallyPy> {
    Ok(crate::tally_text(text).map_err(value_error)?.into())
}

#[pymodule]
fn quotelen(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<TallyPy>()?;
    m.add_function(wrap_pyfunction!(raw_length, m)?)?;
    m.add_function(wrap_pyfunction!(decoded_length, m)?)?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(encoded_length, m)?)?;
    m.add_function(wrap_pyfunction!(accumulate, m)?)?;
    m.add_function(wrap_pyfunction!(tally, m)?)?;
    Ok(())
}
