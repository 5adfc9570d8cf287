use crate::error::AdmissionError;
use crate::resource::Kinded;
use crate::validator::{BoxedValidator, Verdict};

/// Runs `validators` against `resource` in order and returns one verdict.
///
/// Evaluation stops at the first failing verdict, which is returned as-is so
/// exactly one rule explains a rejection. If every validator passes, or the
/// list is empty, the verdict is `valid <noun>`.
///
/// # Errors
///
/// A validator fault stops evaluation and is returned as
/// [`AdmissionError::ValidatorMalfunction`].
///
/// # Examples
///
/// ```
/// use admission_core::{run_all, Pipeline, Registry};
///
/// let registry = Registry::default();
/// let verdict = run_all(&Pipeline::default(), registry.pipeline_validators()).unwrap();
///
/// assert!(verdict.valid);
/// assert_eq!(verdict.reason, "valid pipeline");
/// ```
pub fn run_all<R: Kinded>(
    resource: &R,
    validators: &[BoxedValidator<R>],
) -> Result<Verdict, AdmissionError> {
    for validator in validators {
        let verdict =
            validator
                .validate(resource)
                .map_err(|source| AdmissionError::ValidatorMalfunction {
                    validator: validator.name().to_string(),
                    source,
                })?;

        if !verdict.valid {
            return Ok(verdict);
        }
    }

    Ok(Verdict::pass(format!("valid {}", R::KIND.noun())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidatorFault;
    use crate::resource::{Pipeline, Task};
    use crate::validator::Validator;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Fixed {
        name: &'static str,
        result: Result<Verdict, ValidatorFault>,
        calls: Arc<AtomicUsize>,
    }

    impl Fixed {
        fn new(name: &'static str, result: Result<Verdict, ValidatorFault>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let validator = Self {
                name,
                result,
                calls: Arc::clone(&calls),
            };
            (validator, calls)
        }
    }

    impl<R> Validator<R> for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn validate(&self, _resource: &R) -> Result<Verdict, ValidatorFault> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[test]
    fn empty_list_is_valid() {
        let verdict = run_all::<Task>(&Task::default(), &[]).unwrap();

        assert_eq!(verdict, Verdict::pass("valid task"));
    }

    #[test]
    fn all_passing_yields_kind_reason() {
        let (a, _) = Fixed::new("a", Ok(Verdict::pass("a ok")));
        let (b, _) = Fixed::new("b", Ok(Verdict::pass("b ok")));
        let validators: Vec<BoxedValidator<Pipeline>> = vec![Box::new(a), Box::new(b)];

        let verdict = run_all(&Pipeline::default(), &validators).unwrap();

        assert_eq!(verdict, Verdict::pass("valid pipeline"));
    }

    #[test]
    fn stops_at_first_failure() {
        let (a, a_calls) = Fixed::new("a", Ok(Verdict::fail("a says no")));
        let (b, b_calls) = Fixed::new("b", Ok(Verdict::fail("b says no")));
        let validators: Vec<BoxedValidator<Pipeline>> = vec![Box::new(a), Box::new(b)];

        let verdict = run_all(&Pipeline::default(), &validators).unwrap();

        assert_eq!(verdict, Verdict::fail("a says no"));
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn runs_in_registration_order() {
        let (a, a_calls) = Fixed::new("a", Ok(Verdict::pass("a ok")));
        let (b, b_calls) = Fixed::new("b", Ok(Verdict::fail("b says no")));
        let (c, c_calls) = Fixed::new("c", Ok(Verdict::pass("c ok")));
        let validators: Vec<BoxedValidator<Pipeline>> = vec![Box::new(a), Box::new(b), Box::new(c)];

        let verdict = run_all(&Pipeline::default(), &validators).unwrap();

        assert_eq!(verdict.reason, "b says no");
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
        assert_eq!(c_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fault_propagates_and_stops() {
        let (a, _) = Fixed::new("broken", Err(ValidatorFault::new("nil spec")));
        let (b, b_calls) = Fixed::new("b", Ok(Verdict::pass("b ok")));
        let validators: Vec<BoxedValidator<Task>> = vec![Box::new(a), Box::new(b)];

        let err = run_all(&Task::default(), &validators).unwrap_err();

        match err {
            AdmissionError::ValidatorMalfunction { validator, source } => {
                assert_eq!(validator, "broken");
                assert_eq!(source.message(), "nil spec");
            }
            other => panic!("expected ValidatorMalfunction, got {other:?}"),
        }
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }
}
