use crate::error::ScanError;
use crate::runner::{CancelToken, Output, Runner};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// One recorded invocation of [`FakeRunner`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeCall {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Vec<u8>>,
}

/// Canned response: an [`Output`] or a spawn-level failure.
pub type FakeResult = Result<Output, ScanError>;

/// A [`Runner`] double that replays canned results in order and records
/// every call. Calls past the last result fail with [`ScanError::Exhausted`].
#[derive(Debug, Default)]
pub struct FakeRunner {
    state: Mutex<FakeState>,
}

#[derive(Debug, Default)]
struct FakeState {
    results: VecDeque<FakeResult>,
    calls: Vec<FakeCall>,
}

impl FakeRunner {
    pub fn new(results: impl IntoIterator<Item = FakeResult>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                results: results.into_iter().collect(),
                calls: Vec::new(),
            }),
        }
    }

    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<Vec<u8>>) -> FakeResult {
        Ok(Output {
            stdout: stdout.into(),
            stderr: Vec::new(),
            success: true,
        })
    }

    /// Non-zero exit with the given stderr.
    pub fn failed(stderr: impl Into<Vec<u8>>) -> FakeResult {
        Ok(Output {
            stdout: Vec::new(),
            stderr: stderr.into(),
            success: false,
        })
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .clone()
    }
}

impl Runner for FakeRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&[u8]>,
        _cancel: &CancelToken,
    ) -> Result<Output, ScanError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.calls.push(FakeCall {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            stdin: stdin.map(<[u8]>::to_vec),
        });
        let call = state.calls.len();
        state
            .results
            .pop_front()
            .unwrap_or_else(|| Err(ScanError::Exhausted(call)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_order_then_errors() {
        let fake = FakeRunner::new([FakeRunner::ok("one"), FakeRunner::failed("two")]);
        let token = CancelToken::new();

        let first = fake.run("a", &["x"], None, &token).expect("first");
        assert_eq!(first.stdout, b"one");
        let second = fake.run("b", &[], Some(b"in"), &token).expect("second");
        assert!(!second.success);
        let third = fake.run("c", &[], None, &token).expect_err("exhausted");
        assert!(matches!(third, ScanError::Exhausted(3)), "{third:?}");

        let calls = fake.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].args, vec!["x".to_string()]);
        assert_eq!(calls[1].stdin.as_deref(), Some(&b"in"[..]));
        assert_eq!(calls[2].program, "c");
    }
}
