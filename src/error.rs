use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DisjointSetError {
	#[error("element {index} is outside the forest (valid elements: 0..{len})")]
	OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
	#[error("grid size must be greater than 0, got {n}")]
	Construction { n: isize },
	#[error("a {n}x{n} grid does not fit in memory addressing")]
	TooLarge { n: isize },
	#[error("row and col must be within the range 1 - {n}, inclusively. You entered row: {row}, col: {col}")]
	Coordinate { row: isize, col: isize, n: usize },
}

#[derive(Debug, Error)]
pub enum ScenarioError {
	#[error("scenario is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("scenario field `{field}` is missing or has the wrong type")]
	BadField { field: String },
	#[error("scenario step {step}: {source}")]
	Grid { step: usize, source: GridError },
}
