use std::fmt;

use crate::error::BuildError;
use crate::reason::{FaultReason, Success};

/// Success-or-failure container.
///
/// A successful outcome carries a value and zero or more [`Success`]
/// reasons. A failed outcome carries no value and at least one fault reason;
/// success reasons accrued before the failure may still be present.
///
/// Invariant: `is_failed() ⟺ at least one fault reason is present`.
pub struct Outcome<T> {
    value: Option<T>,
    faults: Vec<Box<dyn FaultReason>>,
    successes: Vec<Success>,
}

impl<T> Outcome<T> {
    /// Successful outcome with no attached reasons.
    pub fn ok(value: T) -> Self {
        Self {
            value: Some(value),
            faults: Vec::new(),
            successes: Vec::new(),
        }
    }

    /// Successful outcome with attached success reasons.
    pub fn ok_with(value: T, successes: Vec<Success>) -> Self {
        Self {
            value: Some(value),
            faults: Vec::new(),
            successes,
        }
    }

    /// Failed outcome with a single fault.
    pub fn fail(fault: impl Into<Box<dyn FaultReason>>) -> Self {
        Self {
            value: None,
            faults: vec![fault.into()],
            successes: Vec::new(),
        }
    }

    /// Failed outcome with one or more faults plus any success reasons
    /// accrued before the failure.
    pub fn fail_with(
        faults: Vec<Box<dyn FaultReason>>,
        successes: Vec<Success>,
    ) -> Result<Self, BuildError> {
        if faults.is_empty() {
            return Err(BuildError::FailedWithoutFaults);
        }
        Ok(Self {
            value: None,
            faults,
            successes,
        })
    }

    /// Rebuilds an outcome from decoded parts, enforcing the construction
    /// invariants.
    pub fn from_parts(
        value: Option<T>,
        faults: Vec<Box<dyn FaultReason>>,
        successes: Vec<Success>,
    ) -> Result<Self, BuildError> {
        match (&value, faults.is_empty()) {
            (Some(_), false) => Err(BuildError::ValueOnFailed),
            (None, true) => Err(BuildError::SuccessWithoutValue),
            _ => Ok(Self {
                value,
                faults,
                successes,
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn is_failed(&self) -> bool {
        !self.faults.is_empty()
    }

    /// Raw value accessor. `None` while failed; never panics.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn faults(&self) -> &[Box<dyn FaultReason>] {
        &self.faults
    }

    pub fn successes(&self) -> &[Success] {
        &self.successes
    }
}

impl<T: fmt::Debug> fmt::Debug for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outcome")
            .field("value", &self.value)
            .field("faults", &self.faults)
            .field("successes", &self.successes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::Fault;

    #[test]
    fn ok_is_success_with_value() {
        let outcome = Outcome::ok(5);
        assert!(outcome.is_success());
        assert!(!outcome.is_failed());
        assert_eq!(outcome.value(), Some(&5));
        assert!(outcome.faults().is_empty());
    }

    #[test]
    fn fail_carries_no_value() {
        let outcome = Outcome::<i32>::fail(Fault::new("e1"));
        assert!(outcome.is_failed());
        assert_eq!(outcome.value(), None);
        assert_eq!(outcome.faults().len(), 1);
        assert_eq!(outcome.faults()[0].message(), "e1");
    }

    #[test]
    fn fail_with_rejects_empty_faults() {
        let result = Outcome::<i32>::fail_with(Vec::new(), Vec::new());
        assert_eq!(result.unwrap_err(), BuildError::FailedWithoutFaults);
    }

    #[test]
    fn from_parts_enforces_invariants() {
        assert_eq!(
            Outcome::<i32>::from_parts(None, Vec::new(), Vec::new()).unwrap_err(),
            BuildError::SuccessWithoutValue
        );
        assert_eq!(
            Outcome::from_parts(Some(1), vec![Fault::new("e").into()], Vec::new()).unwrap_err(),
            BuildError::ValueOnFailed
        );
        let ok = Outcome::from_parts(Some(1), Vec::new(), vec![Success::new("s")]).unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.successes().len(), 1);
    }

    #[test]
    fn failed_outcome_keeps_accrued_successes() {
        let outcome = Outcome::<i32>::fail_with(
            vec![Fault::new("late failure").into()],
            vec![Success::new("step one done")],
        )
        .unwrap();
        assert!(outcome.is_failed());
        assert_eq!(outcome.successes().len(), 1);
    }
}
